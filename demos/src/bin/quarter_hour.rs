use elspot::{Elspot, Resolution};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    elspot_demos::init_tracing();

    let mut builder = Elspot::builder().with_rates(elspot_demos::rates_from_env());
    for connector in elspot_demos::connectors_from_env() {
        builder = builder.with_connector(connector);
    }
    let elspot = builder.build()?;

    // Request the series on a quarter-hour cadence; hourly upstream data is
    // split into energy-conserving 15-minute slices.
    let request = elspot_demos::request_from_env().with_resolution(Resolution::QuarterHour);
    let result = elspot.prices(&request).await?;

    println!(
        "{} quarter-hour entries for {} on {}:",
        result.hourly.len(),
        result.region_code,
        result.price_date
    );
    for entry in result.hourly.iter().take(8) {
        println!(
            "  {}  {:.4} {}/kWh",
            entry.start_time.format("%H:%M"),
            entry.spot_price,
            result.currency
        );
    }
    if result.hourly.len() > 8 {
        println!("  ...");
    }

    Ok(())
}
