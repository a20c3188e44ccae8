//! Value types shared across the elspot workspace.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ElspotError;

/// Cadence of a day-ahead price series, either native or requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Resolution {
    /// One entry per hour (24 per delivery day).
    #[default]
    #[serde(rename = "1h")]
    Hourly,
    /// One entry per quarter hour (96 per delivery day).
    #[serde(rename = "15m")]
    QuarterHour,
}

impl Resolution {
    /// Canonical string form, `"1h"` or `"15m"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hourly => "1h",
            Self::QuarterHour => "15m",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resolution {
    type Err = ElspotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1h" => Ok(Self::Hourly),
            "15m" => Ok(Self::QuarterHour),
            other => Err(ElspotError::invalid_input(format!(
                "unsupported interval {other:?}; expected \"1h\" or \"15m\""
            ))),
        }
    }
}

/// One delivery interval with its price.
///
/// Connectors produce these as half-open `[start, end)` intervals in whatever
/// cadence the upstream publishes. After normalization the sequence is sorted
/// ascending by `start`, every `value` is finite, and `start < end` holds on
/// every point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Start of the delivery interval (inclusive).
    pub start: DateTime<Utc>,
    /// End of the delivery interval (exclusive).
    pub end: DateTime<Utc>,
    /// Price per kWh, expressed in `currency`.
    pub value: f64,
    /// Currency code the value is quoted in.
    pub currency: String,
}

/// Parameters handed to a day-ahead provider for a single fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAheadQuery {
    /// Bidding-zone code, e.g. `NO1` or `SE3`.
    pub region: String,
    /// Currency the provider should quote in, where the upstream supports it.
    pub currency: String,
    /// Delivery date the prices apply to.
    pub date: NaiveDate,
}

/// Raw series returned by one provider, before normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayAheadSeries {
    /// Human-readable provider name, e.g. `"Nord Pool"`.
    pub provider: String,
    /// URL the data was fetched from, with any credentials masked.
    pub provider_url: String,
    /// ISO-8601 duration of the native cadence, e.g. `"PT60M"`.
    pub resolution: String,
    /// Delivery intervals in upstream order.
    pub points: Vec<PricePoint>,
}

/// Exchange-rate snapshot as reported by a rate feed.
///
/// Feeds report rates relative to `base`; harmonization rebases every
/// snapshot onto the EUR pivot so that `rates["EUR"] == 1` exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencySnapshot {
    /// Currency the `rates` values are expressed against.
    pub base: String,
    /// Publication date of the snapshot, as reported by the feed.
    pub date: String,
    /// When the snapshot was fetched.
    pub fetched_at: DateTime<Utc>,
    /// Where the snapshot came from.
    pub source: String,
    /// Units of each code per one unit of `base`.
    pub rates: HashMap<String, f64>,
}

/// One presentation-ready price entry with a rounded spot price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyEntry {
    /// Start of the delivery interval.
    pub start_time: DateTime<Utc>,
    /// End of the delivery interval.
    pub end_time: DateTime<Utc>,
    /// Spot price, rounded to four decimals.
    pub spot_price: f64,
}

/// Daily aggregate statistics over a normalized series.
///
/// All fields are rounded to four decimals; an empty input series produces
/// the all-zero default.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStats {
    /// Lowest rounded spot price of the day.
    pub min_price: f64,
    /// Highest rounded spot price of the day.
    pub max_price: f64,
    /// Mean over all entries.
    pub avg_price: f64,
    /// Mean over the configured peak window.
    pub peak_price: f64,
    /// Mean over the entries before the peak window.
    pub off_peak_price_1: f64,
    /// Mean over the entries after the peak window.
    pub off_peak_price_2: f64,
}

/// Final, externally visible result for one region and delivery day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceResult {
    /// Delivery date the prices apply to.
    pub price_date: NaiveDate,
    /// Name of the provider that supplied the data.
    pub provider: String,
    /// URL the data was fetched from, with any credentials masked.
    pub provider_url: String,
    /// Bidding-zone code the prices apply to.
    pub region_code: String,
    /// Currency every price in the result is quoted in.
    pub currency: String,
    /// Normalized price entries, sorted by start time.
    pub hourly: Vec<HourlyEntry>,
    /// Aggregate statistics derived from `hourly`.
    pub daily: DailyStats,
}
