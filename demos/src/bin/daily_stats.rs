use elspot::Elspot;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    elspot_demos::init_tracing();

    let mut builder = Elspot::builder().with_rates(elspot_demos::rates_from_env());
    for connector in elspot_demos::connectors_from_env() {
        builder = builder.with_connector(connector);
    }
    let elspot = builder.build()?;

    let request = elspot_demos::request_from_env();
    let result = elspot.prices(&request).await?;

    let unit = format!("{}/kWh", result.currency);
    println!(
        "Daily statistics for {} on {} (via {}):",
        result.region_code, result.price_date, result.provider
    );
    println!("  min       {:>10.4} {unit}", result.daily.min_price);
    println!("  max       {:>10.4} {unit}", result.daily.max_price);
    println!("  average   {:>10.4} {unit}", result.daily.avg_price);
    println!("  peak      {:>10.4} {unit}", result.daily.peak_price);
    println!("  off-peak 1{:>10.4} {unit}", result.daily.off_peak_price_1);
    println!("  off-peak 2{:>10.4} {unit}", result.daily.off_peak_price_2);

    Ok(())
}
