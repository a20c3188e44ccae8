#[cfg(feature = "test-adapters")]
use std::sync::Arc;

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use elspot_core::ElspotError;
use reqwest::header;
use serde::Deserialize;
use url::Url;

use crate::VENDOR;

/// Decoded `DayAheadPrices` response body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayAheadDocument {
    /// Delivery intervals with per-area prices, in upstream order.
    #[serde(default)]
    pub multi_area_entries: Vec<DeliveryEntry>,
}

/// One delivery interval across all published areas.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryEntry {
    /// Start of the delivery interval.
    pub delivery_start: DateTime<Utc>,
    /// End of the delivery interval.
    pub delivery_end: DateTime<Utc>,
    /// Raw price per MWh, keyed by delivery area code.
    #[serde(default)]
    pub entry_per_area: HashMap<String, f64>,
}

/// Transport abstraction (so we can inject mocks in tests).
#[async_trait]
pub trait NordPoolApi: Send + Sync {
    /// Fetch and decode the day-ahead document behind `url`.
    ///
    /// `Ok(None)` means the upstream answered successfully but without a
    /// usable document, which callers report as prices not being ready yet.
    async fn fetch_document(&self, url: &Url) -> Result<Option<DayAheadDocument>, ElspotError>;
}

/// Real transport backed by a shared `reqwest::Client`.
#[derive(Clone, Default)]
pub struct RealAdapter {
    client: reqwest::Client,
}

impl RealAdapter {
    /// Build a transport with a freshly configured HTTP client.
    #[must_use]
    pub fn new() -> Self {
        Self::with_client(reqwest::Client::new())
    }

    /// Wrap an existing HTTP client.
    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl NordPoolApi for RealAdapter {
    async fn fetch_document(&self, url: &Url) -> Result<Option<DayAheadDocument>, ElspotError> {
        let response = self
            .client
            .get(url.clone())
            .header(header::ACCEPT, "application/json")
            // The data portal expects this header even on GET requests.
            .header(header::CONTENT_TYPE, "text/json")
            .send()
            .await
            .map_err(|e| ElspotError::provider(VENDOR, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ElspotError::provider(
                VENDOR,
                format!("request failed with status {status}"),
            ));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ElspotError::provider(VENDOR, e.to_string()))?;
        if body.is_empty() {
            return Ok(None);
        }
        // An unpublished date surfaces as a success with a non-document body.
        Ok(serde_json::from_slice(&body).ok())
    }
}

/* -------- Test-only lightweight adapter constructors ------- */

#[cfg(feature = "test-adapters")]
impl dyn NordPoolApi {
    /// Build a `NordPoolApi` from a closure (tests only).
    pub fn from_fn<F>(f: F) -> Arc<dyn NordPoolApi>
    where
        F: Send + Sync + 'static + Fn(Url) -> Result<Option<DayAheadDocument>, ElspotError>,
    {
        struct FnApi<F>(F);
        #[async_trait]
        impl<F> NordPoolApi for FnApi<F>
        where
            F: Send + Sync + 'static + Fn(Url) -> Result<Option<DayAheadDocument>, ElspotError>,
        {
            async fn fetch_document(
                &self,
                url: &Url,
            ) -> Result<Option<DayAheadDocument>, ElspotError> {
                (self.0)(url.clone())
            }
        }
        Arc::new(FnApi(f))
    }
}
