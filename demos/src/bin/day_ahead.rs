use elspot::Elspot;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    elspot_demos::init_tracing();

    // 1. Wire connectors and the rate source from the environment.
    let mut builder = Elspot::builder().with_rates(elspot_demos::rates_from_env());
    for connector in elspot_demos::connectors_from_env() {
        builder = builder.with_connector(connector);
    }
    let elspot = builder.build()?;

    // 2. Assemble the request (region defaults to NO1, currency to NOK).
    let request = elspot_demos::request_from_env();
    println!(
        "Fetching day-ahead prices for {} in {}...",
        request.region, request.currency
    );

    // 3. Fetch. Elspot handles ordering, fallback and currency conversion.
    let result = elspot.prices(&request).await?;

    // 4. Print the full result as JSON.
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
