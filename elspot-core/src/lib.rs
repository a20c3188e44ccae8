//! elspot-core
//!
//! Core abstractions shared by the elspot orchestrator and its connectors:
//! the value types, the error taxonomy, per-request configuration, the
//! series normalizer, the daily statistics builder, and the currency stack
//! (pivot conversion, snapshot harmonization, per-day rate cache).
#![warn(missing_docs)]

/// Connector traits implemented by day-ahead price sources.
pub mod connector;
/// Currency conversion, snapshot harmonization, and the rate cache.
pub mod currency;
/// Unified error type for the workspace.
pub mod error;
/// Cadence detection and resampling for price series.
pub mod normalize;
/// Per-request configuration for the orchestrator.
pub mod request;
/// Daily aggregate statistics for normalized series.
pub mod stats;
/// Value types shared across the workspace.
pub mod types;

pub use connector::{ConnectorKey, DayAheadProvider, ElspotConnector};
pub use currency::{PIVOT, RateCache, RateFeed, RateLookup, convert, harmonize, prepare_points};
pub use error::ElspotError;
pub use normalize::{detect_resolution, normalize};
pub use request::{DEFAULT_CURRENCY, PeakWindow, PriceRequest};
pub use stats::{build_daily_stats, hourly_entries, round4};
pub use types::{
    CurrencySnapshot, DailyStats, DayAheadQuery, DayAheadSeries, HourlyEntry, PricePoint,
    PriceResult, Resolution,
};
