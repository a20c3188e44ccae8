//! Shared wiring for the runnable demos.
//!
//! Every demo honors `ELSPOT_DEMOS_USE_MOCK`: set it to run offline against
//! the deterministic mock stack instead of the live endpoints. Live runs pick
//! up `ELSPOT_REGION`, `ELSPOT_CURRENCY`, `ELSPOT_DATE` and `ENTSOE_TOKEN`
//! from the environment.

use std::sync::Arc;

use elspot::{ElspotConnector, PriceRequest, RateCache, RateLookup};

fn use_mock() -> bool {
    std::env::var("ELSPOT_DEMOS_USE_MOCK").is_ok()
}

/// Connectors selected from the environment (mock in CI when
/// `ELSPOT_DEMOS_USE_MOCK` is set).
#[must_use]
pub fn connectors_from_env() -> Vec<Arc<dyn ElspotConnector>> {
    if use_mock() {
        println!("--- (Using mock stack for CI) ---");
        return vec![Arc::new(elspot_mock::MockConnector::new())];
    }

    let mut out: Vec<Arc<dyn ElspotConnector>> =
        vec![Arc::new(elspot_nordpool::NordPoolConnector::new_default())];
    match std::env::var("ENTSOE_TOKEN") {
        Ok(token) if !token.trim().is_empty() => {
            out.push(Arc::new(elspot_entsoe::EntsoeConnector::with_token(token)));
        }
        _ => println!("--- (ENTSOE_TOKEN not set; ENTSO-E fallback disabled) ---"),
    }
    out
}

/// Rate source selected from the environment.
#[must_use]
pub fn rates_from_env() -> Arc<dyn RateLookup> {
    if use_mock() {
        Arc::new(elspot_mock::MockRates::new())
    } else {
        Arc::new(RateCache::new(Arc::new(elspot_ecb::EcbRates::new_default())))
    }
}

/// Request assembled from the environment, with Nordic defaults.
#[must_use]
pub fn request_from_env() -> PriceRequest {
    let region = std::env::var("ELSPOT_REGION").unwrap_or_else(|_| "NO1".to_string());
    let mut request = PriceRequest::new(region);
    if let Ok(currency) = std::env::var("ELSPOT_CURRENCY") {
        request = request.with_currency(currency);
    }
    if let Ok(raw) = std::env::var("ELSPOT_DATE")
        && let Ok(date) = raw.parse::<chrono::NaiveDate>()
    {
        request = request.with_date(date);
    }
    request
}

/// Install a fmt subscriber honoring `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
