#[cfg(feature = "test-adapters")]
use std::sync::Arc;

use async_trait::async_trait;
use elspot_core::ElspotError;
use reqwest::header;
use url::Url;

use crate::VENDOR;

/// Transport abstraction (so we can inject mocks in tests).
#[async_trait]
pub trait EcbApi: Send + Sync {
    /// Fetch the raw reference-rate XML behind `url`.
    async fn fetch_raw(&self, url: &Url) -> Result<String, ElspotError>;
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
impl EcbApi for RealAdapter {
    async fn fetch_raw(&self, url: &Url) -> Result<String, ElspotError> {
        let response = self
            .client
            .get(url.clone())
            .header(header::ACCEPT, "application/xml")
            .header(header::CONTENT_TYPE, "text/xml")
            .send()
            .await
            .map_err(|e| ElspotError::provider(VENDOR, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ElspotError::provider(
                VENDOR,
                format!("currency fetch error {status}"),
            ));
        }

        response
            .text()
            .await
            .map_err(|e| ElspotError::provider(VENDOR, e.to_string()))
    }
}

/* -------- Test-only lightweight adapter constructors ------- */

#[cfg(feature = "test-adapters")]
impl dyn EcbApi {
    /// Build an `EcbApi` from a closure (tests only).
    pub fn from_fn<F>(f: F) -> Arc<dyn EcbApi>
    where
        F: Send + Sync + 'static + Fn(Url) -> Result<String, ElspotError>,
    {
        struct FnApi<F>(F);
        #[async_trait]
        impl<F> EcbApi for FnApi<F>
        where
            F: Send + Sync + 'static + Fn(Url) -> Result<String, ElspotError>,
        {
            async fn fetch_raw(&self, url: &Url) -> Result<String, ElspotError> {
                (self.0)(url.clone())
            }
        }
        Arc::new(FnApi(f))
    }
}
