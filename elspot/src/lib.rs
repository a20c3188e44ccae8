//! Elspot orchestrates day-ahead electricity spot prices across multiple
//! providers.
//!
//! Overview
//! - Routes one request across the registered connectors in a deterministic
//!   order, falling back until a provider delivers a series.
//! - Converts every price into the requested currency through the EUR pivot,
//!   using whatever [`RateLookup`] the orchestrator or the request carries.
//! - Normalizes the series onto an hourly or quarter-hour cadence and derives
//!   daily statistics with a configurable peak window.
//!
//! Key behaviors and trade-offs
//! - Candidate order: registration order by default; a request's `prefer`
//!   moves one connector to the front, while an explicit `order` replaces the
//!   candidate set entirely.
//! - Fallback: connectors are tried strictly in sequence and the first
//!   success wins; when everything fails, the last connector's error is
//!   returned rather than an aggregate.
//! - Credential gating: connectors that cannot currently serve the day-ahead
//!   capability (for example a token-gated upstream without credentials) are
//!   filtered out before any request is made.
//!
//! Examples
//! Building an orchestrator and fetching one day of prices:
//! ```rust,ignore
//! use std::sync::Arc;
//! use elspot::{Elspot, PriceRequest};
//! use elspot_core::RateCache;
//!
//! let nordpool = Arc::new(elspot_nordpool::NordPoolConnector::new_default());
//! let rates = Arc::new(RateCache::new(Arc::new(elspot_ecb::EcbRates::new_default())));
//!
//! let elspot = Elspot::builder()
//!     .with_connector(nordpool)
//!     .with_rates(rates)
//!     .build()?;
//!
//! let result = elspot.prices(&PriceRequest::new("NO1")).await?;
//! println!("{} {:?}", result.currency, result.daily);
//! ```
//!
//! See `demos/` for runnable end-to-end demonstrations.
#![warn(missing_docs)]

pub(crate) mod core;
mod router;

pub use core::{Elspot, ElspotBuilder};

// Re-export core types for convenience
pub use elspot_core::{
    ConnectorKey, CurrencySnapshot, DEFAULT_CURRENCY, DailyStats, DayAheadProvider, DayAheadQuery,
    DayAheadSeries, ElspotConnector, ElspotError, HourlyEntry, PIVOT, PeakWindow, PricePoint,
    PriceRequest, PriceResult, RateCache, RateFeed, RateLookup, Resolution,
};
