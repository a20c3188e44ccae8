//! Per-request configuration for the orchestrator.

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::connector::ConnectorKey;
use crate::currency::RateLookup;
use crate::error::ElspotError;
use crate::types::Resolution;

/// Currency results are quoted in when the request does not say otherwise.
pub const DEFAULT_CURRENCY: &str = "NOK";

/// Hour-of-day window treated as peak load in daily statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeakWindow {
    /// First hour (inclusive) of the peak window.
    pub start_hour: u32,
    /// End hour (exclusive) of the peak window.
    pub end_hour: u32,
}

impl Default for PeakWindow {
    fn default() -> Self {
        Self {
            start_hour: 6,
            end_hour: 22,
        }
    }
}

/// Fully enumerated configuration for one price request.
///
/// Every recognized option appears here with its default; the orchestrator
/// validates the request before the pipeline runs. Only `region` is
/// required.
#[derive(Clone)]
pub struct PriceRequest {
    /// Bidding-zone code, e.g. `NO1`, `SE3`, `DK1`. Required.
    pub region: String,
    /// Currency the result should be quoted in.
    pub currency: String,
    /// Delivery date; `None` resolves to today at fetch time.
    pub date: Option<NaiveDate>,
    /// Cadence of the output series.
    pub resolution: Resolution,
    /// Preferred connector, moved to the front of the registration order.
    pub prefer: Option<ConnectorKey>,
    /// Explicit connector order; overrides `prefer` entirely. Keys that do
    /// not match a registered connector are skipped.
    pub order: Option<Vec<ConnectorKey>>,
    /// Hour-of-day window used for peak/off-peak statistics.
    pub peak: PeakWindow,
    /// Rate lookup overriding the orchestrator's built-in source.
    pub rates: Option<Arc<dyn RateLookup>>,
}

impl PriceRequest {
    /// Request for `region` with every other option at its default.
    #[must_use]
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            currency: DEFAULT_CURRENCY.to_string(),
            date: None,
            resolution: Resolution::default(),
            prefer: None,
            order: None,
            peak: PeakWindow::default(),
            rates: None,
        }
    }

    /// Quote the result in `currency` instead of the default.
    #[must_use]
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Fetch prices for `date` instead of today.
    #[must_use]
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Produce the series at `resolution` instead of hourly.
    #[must_use]
    pub fn with_resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = resolution;
        self
    }

    /// Move `key` to the front of the candidate order.
    #[must_use]
    pub fn with_preferred(mut self, key: ConnectorKey) -> Self {
        self.prefer = Some(key);
        self
    }

    /// Try connectors in exactly this order, skipping unregistered keys.
    #[must_use]
    pub fn with_order(mut self, order: Vec<ConnectorKey>) -> Self {
        self.order = Some(order);
        self
    }

    /// Use a custom peak window for the daily statistics.
    #[must_use]
    pub fn with_peak_window(mut self, start_hour: u32, end_hour: u32) -> Self {
        self.peak = PeakWindow {
            start_hour,
            end_hour,
        };
        self
    }

    /// Resolve currency rates through `rates` instead of the orchestrator's
    /// built-in source.
    #[must_use]
    pub fn with_rates(mut self, rates: Arc<dyn RateLookup>) -> Self {
        self.rates = Some(rates);
        self
    }

    /// Validate boundary requirements before the pipeline runs.
    ///
    /// # Errors
    /// Returns [`ElspotError::InvalidInput`] when the region is missing or
    /// the currency is blank.
    pub fn validate(&self) -> Result<(), ElspotError> {
        if self.region.trim().is_empty() {
            return Err(ElspotError::invalid_input(
                "region is required (e.g. NO1, SE3, DK1)",
            ));
        }
        if self.currency.trim().is_empty() {
            return Err(ElspotError::invalid_input("currency must not be blank"));
        }
        Ok(())
    }
}

impl fmt::Debug for PriceRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriceRequest")
            .field("region", &self.region)
            .field("currency", &self.currency)
            .field("date", &self.date)
            .field("resolution", &self.resolution)
            .field("prefer", &self.prefer)
            .field("order", &self.order)
            .field("peak", &self.peak)
            .field("rates", &self.rates.as_ref().map(|_| "<custom lookup>"))
            .finish()
    }
}
