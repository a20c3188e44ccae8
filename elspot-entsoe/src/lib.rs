//! elspot-entsoe
//!
//! Connector that implements `ElspotConnector` on top of the ENTSO-E
//! transparency platform (document type A44, day-ahead prices). The platform
//! requires a personal access token; a connector built without one stays
//! registered but advertises no day-ahead capability.
#![warn(missing_docs)]

/// Adapter definitions and the production transport backed by `reqwest`.
pub mod adapter;
/// Publication document parsing.
pub mod document;
/// Delivery area to EIC code mapping.
pub mod regions;

use std::sync::Arc;

use adapter::{EntsoeApi, RealAdapter};
use async_trait::async_trait;
use chrono::Duration;
use elspot_core::{
    ConnectorKey, DayAheadProvider, DayAheadQuery, DayAheadSeries, ElspotConnector, ElspotError,
    PricePoint,
};
use url::Url;

/// Provider label used for series attribution and error messages.
pub const VENDOR: &str = "ENTSO-E";

/// Default transparency platform endpoint.
pub const DEFAULT_URL: &str = "https://web-api.tp.entsoe.eu/api";

/// Placeholder written over the access token in reported URLs.
const TOKEN_MASK: &str = "*****";

#[cfg(not(feature = "test-adapters"))]
type ApiArc = Arc<RealAdapter>;
#[cfg(feature = "test-adapters")]
type ApiArc = Arc<dyn EntsoeApi>;

/// Public connector type. Production users will construct with
/// `EntsoeConnector::with_token(..)`.
pub struct EntsoeConnector {
    api: ApiArc,
    base_url: Url,
    token: Option<String>,
}

impl EntsoeConnector {
    /// Static connector key for orchestrator priority configuration.
    pub const KEY: ConnectorKey = ConnectorKey::new("elspot-entsoe");

    /// Build against the public platform endpoint without credentials.
    ///
    /// The resulting connector advertises no day-ahead capability until a
    /// token is supplied, so candidate selection skips it.
    ///
    /// # Panics
    /// Panics if [`DEFAULT_URL`] fails to parse, which would be a packaging
    /// bug rather than a runtime condition.
    #[must_use]
    pub fn new_default() -> Self {
        Self::with_base_url(default_url(), None)
    }

    /// Build against the public platform endpoint with an access token.
    ///
    /// # Panics
    /// Panics if [`DEFAULT_URL`] fails to parse.
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self::with_base_url(default_url(), Some(token.into()))
    }

    /// Build against a custom endpoint (mock servers, proxies).
    #[must_use]
    pub fn with_base_url(base_url: Url, token: Option<String>) -> Self {
        Self {
            api: Arc::new(RealAdapter::new()),
            base_url,
            token,
        }
    }

    /// For tests/injection (requires the `test-adapters` feature).
    #[cfg(feature = "test-adapters")]
    #[must_use]
    pub fn from_adapter(api: Arc<dyn EntsoeApi>, base_url: Url, token: Option<String>) -> Self {
        Self {
            api,
            base_url,
            token,
        }
    }

    fn usable_token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    fn request_url(
        &self,
        token: &str,
        eic: &str,
        query: &DayAheadQuery,
    ) -> Result<Url, ElspotError> {
        let next_day = query.date.succ_opt().ok_or_else(|| {
            ElspotError::invalid_input(format!("date out of range: {}", query.date))
        })?;
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("documentType", "A44")
            .append_pair("securityToken", token)
            .append_pair("in_Domain", eic)
            .append_pair("out_Domain", eic)
            .append_pair(
                "periodStart",
                &format!("{}0000", query.date.format("%Y%m%d")),
            )
            .append_pair("periodEnd", &format!("{}0000", next_day.format("%Y%m%d")));
        Ok(url)
    }
}

impl Default for EntsoeConnector {
    fn default() -> Self {
        Self::new_default()
    }
}

fn default_url() -> Url {
    Url::parse(DEFAULT_URL).expect("default ENTSO-E endpoint must parse")
}

#[async_trait]
impl DayAheadProvider for EntsoeConnector {
    async fn day_ahead(&self, query: &DayAheadQuery) -> Result<DayAheadSeries, ElspotError> {
        let Some(token) = self.usable_token() else {
            return Err(ElspotError::provider(VENDOR, "an access token is required"));
        };
        let eic = regions::eic_for(&query.region).ok_or_else(|| {
            ElspotError::provider(
                VENDOR,
                format!("region mapping missing for {}", query.region),
            )
        })?;

        let url = self.request_url(token, eic, query)?;
        let xml = self.api.fetch_raw(&url).await?;
        let doc = document::parse_document(&xml)?;

        if doc.series.iter().all(|s| s.periods.is_empty()) {
            return Err(ElspotError::provider(
                VENDOR,
                "prices are not available in the response",
            ));
        }

        let mut points = Vec::new();
        let mut resolution = "PT60M".to_string();
        for series in &doc.series {
            // A44 documents quote in EUR; the element is optional in older
            // schema revisions.
            let currency = series.currency.clone().unwrap_or_else(|| "EUR".to_string());
            for period in &series.periods {
                let raw_start = period.interval_start.as_deref().ok_or_else(|| {
                    ElspotError::provider(VENDOR, "missing time interval start value")
                })?;
                let interval_start = document::parse_timestamp(raw_start).ok_or_else(|| {
                    ElspotError::provider(
                        VENDOR,
                        format!("invalid time interval start {raw_start:?}"),
                    )
                })?;
                let step =
                    document::resolution_to_minutes(period.resolution.as_deref().unwrap_or("PT60M"));

                let mut period_points: Vec<PricePoint> = period
                    .points
                    .iter()
                    .filter_map(|point| {
                        let (position, amount) = (point.position?, point.amount?);
                        let start = interval_start + Duration::minutes((position - 1) * step);
                        Some(PricePoint {
                            start,
                            end: start + Duration::minutes(step),
                            // Upstream quotes per MWh; downstream works per kWh.
                            value: amount / 1000.0,
                            currency: currency.clone(),
                        })
                    })
                    .collect();
                period_points.sort_by_key(|p| p.start);
                points.extend(period_points);

                if let Some(r) = &period.resolution {
                    resolution = r.clone();
                }
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            region = %query.region,
            date = %query.date,
            points = points.len(),
            %resolution,
            "entsoe day-ahead fetched"
        );

        Ok(DayAheadSeries {
            provider: VENDOR.to_string(),
            provider_url: self.request_url(TOKEN_MASK, eic, query)?.to_string(),
            resolution,
            points,
        })
    }
}

impl ElspotConnector for EntsoeConnector {
    fn name(&self) -> &'static str {
        "elspot-entsoe"
    }

    fn vendor(&self) -> &'static str {
        VENDOR
    }

    fn as_day_ahead_provider(&self) -> Option<&dyn DayAheadProvider> {
        // Without credentials every request would fail, so the capability is
        // withheld and candidate selection skips this connector.
        self.usable_token().map(|_| self as &dyn DayAheadProvider)
    }
}
