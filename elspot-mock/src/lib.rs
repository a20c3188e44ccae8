//! # elspot-mock
//!
//! Mock connector for CI-safe demos and tests. It serves a deterministic
//! 24-hour day-ahead curve from static fixtures, together with a frozen
//! reference-rate table, so the full fetch and conversion pipeline can run
//! without network access or credentials.
//!
//! The fixture day is quoted in EUR, which makes requests for other
//! currencies exercise conversion through [`MockRates`].

#![warn(missing_docs)]

use async_trait::async_trait;
use elspot_core::connector::{ConnectorKey, DayAheadProvider, ElspotConnector};
use elspot_core::{DayAheadQuery, DayAheadSeries, ElspotError, PIVOT, RateLookup};

mod fixtures;

/// Vendor label used in provider-tagged errors and result metadata.
pub const VENDOR: &str = "Mock";

/// Mock connector serving the deterministic fixture day.
///
/// Requests for the region `"FAIL"` are rejected with a provider error,
/// which gives fallback tests a connector that reliably loses.
pub struct MockConnector;

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnector {
    /// Stable key under which the connector registers.
    pub const KEY: ConnectorKey = ConnectorKey::new("elspot-mock");

    /// Build the connector. Stateless, so this is free.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn maybe_fail(region: &str, capability: &'static str) -> Result<(), ElspotError> {
        if region == "FAIL" {
            return Err(ElspotError::provider(
                VENDOR,
                format!("forced failure: {capability}"),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl DayAheadProvider for MockConnector {
    async fn day_ahead(&self, query: &DayAheadQuery) -> Result<DayAheadSeries, ElspotError> {
        Self::maybe_fail(&query.region, "day-ahead")?;
        Ok(DayAheadSeries {
            provider: VENDOR.to_string(),
            provider_url: format!("mock://day-ahead/{}/{}", query.region, query.date),
            resolution: "PT60M".to_string(),
            points: fixtures::day_ahead(query.date),
        })
    }
}

impl ElspotConnector for MockConnector {
    fn name(&self) -> &'static str {
        "elspot-mock"
    }

    fn vendor(&self) -> &'static str {
        VENDOR
    }

    fn as_day_ahead_provider(&self) -> Option<&dyn DayAheadProvider> {
        Some(self as &dyn DayAheadProvider)
    }
}

/// Deterministic rate lookup backed by a frozen ECB-style table.
///
/// Codes outside the table resolve to [`ElspotError::RateUnavailable`],
/// exactly as a live feed would report an unknown currency.
pub struct MockRates;

impl Default for MockRates {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRates {
    /// Build the lookup. Stateless, so this is free.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl RateLookup for MockRates {
    async fn rate(&self, code: &str) -> Result<f64, ElspotError> {
        let code = if code.is_empty() {
            PIVOT.to_string()
        } else {
            code.to_uppercase()
        };
        fixtures::rate(&code).ok_or_else(|| ElspotError::rate_unavailable(code))
    }
}
