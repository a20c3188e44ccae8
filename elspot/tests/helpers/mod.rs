
pub use scripted::{FixedRates, ScriptedConnector, m_conn, m_fail, m_series, m_unsupported, rates};

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use elspot_core::{DayAheadSeries, PricePoint};

// ---------- Lightweight fixtures for orchestrator tests ----------

/// Delivery date used by most fixtures.
pub fn fixture_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 15).expect("valid date")
}

/// Construct a UTC `DateTime` from components for readability in tests.
pub fn dt(y: i32, m: u32, d: u32, hh: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, hh, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// Contiguous points starting at `start`, one per value, each `step_min`
/// minutes wide.
pub fn points(
    start: DateTime<Utc>,
    step_min: i64,
    values: &[f64],
    currency: &str,
) -> Vec<PricePoint> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let s = start + Duration::minutes(step_min * i as i64);
            PricePoint {
                start: s,
                end: s + Duration::minutes(step_min),
                value: *v,
                currency: currency.to_string(),
            }
        })
        .collect()
}

/// Hourly points covering `date` from midnight UTC.
pub fn hourly_points(date: NaiveDate, values: &[f64], currency: &str) -> Vec<PricePoint> {
    let midnight = date.and_hms_opt(0, 0, 0).expect("midnight exists").and_utc();
    points(midnight, 60, values, currency)
}

/// Series wrapper with a synthetic provider URL.
pub fn series(provider: &str, resolution: &str, points: Vec<PricePoint>) -> DayAheadSeries {
    DayAheadSeries {
        provider: provider.to_string(),
        provider_url: format!("https://example.test/{}", provider.to_lowercase()),
        resolution: resolution.to_string(),
        points,
    }
}
