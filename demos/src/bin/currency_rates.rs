use elspot::RateLookup;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    elspot_demos::init_tracing();

    // The same lookup the orchestrator uses; the live variant memoizes the
    // ECB snapshot per calendar day.
    let rates = elspot_demos::rates_from_env();

    println!("Reference rates against the EUR pivot:");
    for code in ["NOK", "SEK", "DKK", "USD"] {
        match rates.rate(code).await {
            Ok(rate) => println!("  1 EUR = {rate:.4} {code}"),
            Err(e) => println!("  {code}: {e}"),
        }
    }

    Ok(())
}
