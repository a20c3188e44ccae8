//! Connector traits implemented by day-ahead price sources.

use async_trait::async_trait;

use crate::error::ElspotError;
use crate::types::{DayAheadQuery, DayAheadSeries};

/// Typed key identifying a connector in ordering configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectorKey(pub &'static str);

impl ConnectorKey {
    /// Construct a new typed connector key from a static name.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Returns the inner static string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl From<ConnectorKey> for &'static str {
    fn from(k: ConnectorKey) -> Self {
        k.0
    }
}

/// Capability trait for sources that publish day-ahead spot prices.
#[async_trait]
pub trait DayAheadProvider: Send + Sync {
    /// Fetch the raw day-ahead series for one region and delivery date.
    async fn day_ahead(&self, query: &DayAheadQuery) -> Result<DayAheadSeries, ElspotError>;
}

/// A pluggable data source registered with the orchestrator.
///
/// Connectors advertise capabilities through `as_*_provider` accessors. The
/// defaults report no capability, so implementors opt in per role; a
/// connector that cannot currently serve a capability (for example a
/// token-gated upstream constructed without credentials) simply keeps the
/// default and is filtered out of candidate selection.
pub trait ElspotConnector: Send + Sync {
    /// Unique connector name, e.g. `"elspot-nordpool"`.
    fn name(&self) -> &'static str;

    /// Typed key derived from [`name`](Self::name), used by ordering
    /// configuration.
    fn key(&self) -> ConnectorKey {
        ConnectorKey::new(self.name())
    }

    /// Human-readable vendor label used for result attribution.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Day-ahead price capability, if this connector can serve it.
    fn as_day_ahead_provider(&self) -> Option<&dyn DayAheadProvider> {
        None
    }
}
