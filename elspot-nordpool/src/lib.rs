//! elspot-nordpool
//!
//! Connector that implements `ElspotConnector` on top of the public Nord Pool
//! data portal. Serves day-ahead spot prices for the Nordic and Baltic
//! delivery areas (NO1..NO5, SE1..SE4, DK1, DK2, FI, EE, LV, LT).
#![warn(missing_docs)]

/// Adapter definitions and the production transport backed by `reqwest`.
pub mod adapter;

use std::sync::Arc;

use adapter::{DayAheadDocument, NordPoolApi, RealAdapter};
use async_trait::async_trait;
use elspot_core::{
    ConnectorKey, DayAheadProvider, DayAheadQuery, DayAheadSeries, ElspotConnector, ElspotError,
    PricePoint,
};
use url::Url;

/// Provider label used for series attribution and error messages.
pub const VENDOR: &str = "Nord Pool";

/// Day-ahead price endpoint on the public data portal.
pub const DEFAULT_URL: &str =
    "https://dataportal-api.nordpoolgroup.com/api/DayAheadPrices?market=DayAhead";

#[cfg(not(feature = "test-adapters"))]
type ApiArc = Arc<RealAdapter>;
#[cfg(feature = "test-adapters")]
type ApiArc = Arc<dyn NordPoolApi>;

/// Public connector type. Production users will construct with
/// `NordPoolConnector::new_default()`.
pub struct NordPoolConnector {
    api: ApiArc,
    base_url: Url,
}

impl NordPoolConnector {
    /// Static connector key for orchestrator priority configuration.
    pub const KEY: ConnectorKey = ConnectorKey::new("elspot-nordpool");

    /// Build against the public data portal endpoint.
    ///
    /// # Panics
    /// Panics if [`DEFAULT_URL`] fails to parse, which would be a packaging
    /// bug rather than a runtime condition.
    #[must_use]
    pub fn new_default() -> Self {
        let base = Url::parse(DEFAULT_URL).expect("default Nord Pool endpoint must parse");
        Self::with_base_url(base)
    }

    /// Build against a custom endpoint (mock servers, proxies).
    #[must_use]
    pub fn with_base_url(base_url: Url) -> Self {
        Self {
            api: Arc::new(RealAdapter::new()),
            base_url,
        }
    }

    /// For tests/injection (requires the `test-adapters` feature).
    #[cfg(feature = "test-adapters")]
    #[must_use]
    pub fn from_adapter(api: Arc<dyn NordPoolApi>, base_url: Url) -> Self {
        Self { api, base_url }
    }

    fn request_url(&self, query: &DayAheadQuery) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("deliveryArea", &query.region)
            .append_pair("currency", &query.currency)
            .append_pair("date", &query.date.to_string());
        url
    }

    /// Entries that do not quote the requested area are skipped rather than
    /// treated as an error, matching how the portal publishes partial days.
    fn collect_points(doc: &DayAheadDocument, query: &DayAheadQuery) -> Vec<PricePoint> {
        doc.multi_area_entries
            .iter()
            .filter_map(|entry| {
                let raw = entry.entry_per_area.get(&query.region)?;
                Some(PricePoint {
                    start: entry.delivery_start,
                    end: entry.delivery_end,
                    // Upstream quotes per MWh; downstream works per kWh.
                    value: raw / 1000.0,
                    currency: query.currency.clone(),
                })
            })
            .collect()
    }
}

impl Default for NordPoolConnector {
    fn default() -> Self {
        Self::new_default()
    }
}

#[async_trait]
impl DayAheadProvider for NordPoolConnector {
    async fn day_ahead(&self, query: &DayAheadQuery) -> Result<DayAheadSeries, ElspotError> {
        let url = self.request_url(query);
        let Some(doc) = self.api.fetch_document(&url).await? else {
            return Err(ElspotError::provider(
                VENDOR,
                format!("day-ahead prices are not ready for {}", query.date),
            ));
        };
        let points = Self::collect_points(&doc, query);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            region = %query.region,
            date = %query.date,
            points = points.len(),
            "nord pool day-ahead fetched"
        );

        // A complete quarter-hour day carries exactly 96 entries; everything
        // else the portal serves is hourly.
        let resolution = if points.len() == 96 { "PT15M" } else { "PT60M" };
        Ok(DayAheadSeries {
            provider: VENDOR.to_string(),
            provider_url: url.to_string(),
            resolution: resolution.to_string(),
            points,
        })
    }
}

impl ElspotConnector for NordPoolConnector {
    fn name(&self) -> &'static str {
        "elspot-nordpool"
    }

    fn vendor(&self) -> &'static str {
        VENDOR
    }

    fn as_day_ahead_provider(&self) -> Option<&dyn DayAheadProvider> {
        Some(self as &dyn DayAheadProvider)
    }
}
