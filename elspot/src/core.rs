use std::collections::HashSet;
use std::sync::Arc;

use elspot_core::currency::RateLookup;
use elspot_core::{ElspotConnector, ElspotError, PriceRequest};

/// Orchestrator that routes price requests across registered connectors.
pub struct Elspot {
    pub(crate) connectors: Vec<Arc<dyn ElspotConnector>>,
    pub(crate) rates: Option<Arc<dyn RateLookup>>,
}

impl std::fmt::Debug for Elspot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Elspot")
            .field("connectors", &self.connectors.len())
            .field("has_rates", &self.rates.is_some())
            .finish()
    }
}

/// Builder for constructing an `Elspot` orchestrator.
pub struct ElspotBuilder {
    connectors: Vec<Arc<dyn ElspotConnector>>,
    rates: Option<Arc<dyn RateLookup>>,
}

impl Default for ElspotBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ElspotBuilder {
    /// Create a new builder with no connectors and no rate source.
    ///
    /// At least one connector has to be registered via [`with_connector`]
    /// before [`build`](Self::build) succeeds. A rate source is optional;
    /// without one, requests that need currency conversion fail with
    /// [`ElspotError::NoRateProvider`].
    ///
    /// [`with_connector`]: Self::with_connector
    #[must_use]
    pub fn new() -> Self {
        Self {
            connectors: vec![],
            rates: None,
        }
    }

    /// Register a provider connector.
    ///
    /// Behavior and trade-offs:
    /// - Registration order is the default candidate order; a request's
    ///   `prefer` and `order` options reorder or replace it per call.
    /// - Duplicates are not deduplicated; avoid registering the same
    ///   connector twice.
    #[must_use]
    pub fn with_connector(mut self, c: Arc<dyn ElspotConnector>) -> Self {
        self.connectors.push(c);
        self
    }

    /// Install the currency rate source used when a request does not carry
    /// its own.
    ///
    /// Typically a [`RateCache`](elspot_core::RateCache) over a live feed;
    /// any [`RateLookup`] works.
    #[must_use]
    pub fn with_rates(mut self, rates: Arc<dyn RateLookup>) -> Self {
        self.rates = Some(rates);
        self
    }

    /// Build the `Elspot` orchestrator.
    ///
    /// # Errors
    /// Returns [`ElspotError::InvalidInput`] if no connectors have been
    /// registered via [`with_connector`](Self::with_connector).
    pub fn build(self) -> Result<Elspot, ElspotError> {
        if self.connectors.is_empty() {
            return Err(ElspotError::invalid_input(
                "no connectors registered; add at least one via with_connector(...)",
            ));
        }
        Ok(Elspot {
            connectors: self.connectors,
            rates: self.rates,
        })
    }
}

/// Tag an untagged error with the connector that produced it.
///
/// Provider errors already carry their origin and pass through unchanged;
/// everything else is wrapped so the caller can tell which connector the
/// failure came from.
pub fn tag_err(connector: &str, e: ElspotError) -> ElspotError {
    match e {
        e @ ElspotError::Provider { .. } => e,
        other => ElspotError::provider(connector, other.to_string()),
    }
}

impl Elspot {
    /// Start building a new `Elspot` instance.
    ///
    /// Typical usage chains connector registration and the rate source:
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use elspot::Elspot;
    /// use elspot_core::RateCache;
    ///
    /// let nordpool = Arc::new(elspot_nordpool::NordPoolConnector::new_default());
    /// let entsoe = Arc::new(elspot_entsoe::EntsoeConnector::with_token("..."));
    /// let rates = Arc::new(RateCache::new(Arc::new(elspot_ecb::EcbRates::new_default())));
    ///
    /// let elspot = Elspot::builder()
    ///     .with_connector(nordpool)
    ///     .with_connector(entsoe)
    ///     .with_rates(rates)
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> ElspotBuilder {
        ElspotBuilder::new()
    }

    /// Resolve the candidate connectors for one request, in attempt order.
    ///
    /// An explicit `order` replaces the registration order entirely: only
    /// listed connectors run, unknown keys are skipped, and duplicates
    /// collapse onto their first mention. Otherwise `prefer` moves one
    /// connector to the front and the rest keep registration order; an
    /// unknown preference leaves the order untouched. Connectors that do not
    /// currently serve the day-ahead capability are dropped last.
    pub(crate) fn candidates(&self, request: &PriceRequest) -> Vec<Arc<dyn ElspotConnector>> {
        let ordered: Vec<Arc<dyn ElspotConnector>> = if let Some(order) = &request.order {
            let mut seen: HashSet<&'static str> = HashSet::new();
            order
                .iter()
                .filter(|k| seen.insert(k.as_str()))
                .filter_map(|k| self.connector_named(k.as_str()))
                .collect()
        } else if let Some(prefer) = request.prefer {
            let mut indexed: Vec<(usize, Arc<dyn ElspotConnector>)> =
                self.connectors.iter().cloned().enumerate().collect();
            indexed.sort_by_key(|(i, c)| (usize::from(c.name() != prefer.as_str()), *i));
            indexed.into_iter().map(|(_, c)| c).collect()
        } else {
            self.connectors.clone()
        };

        ordered
            .into_iter()
            .filter(|c| c.as_day_ahead_provider().is_some())
            .collect()
    }

    fn connector_named(&self, name: &str) -> Option<Arc<dyn ElspotConnector>> {
        self.connectors.iter().find(|c| c.name() == name).cloned()
    }
}
