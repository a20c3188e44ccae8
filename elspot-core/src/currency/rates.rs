//! Rate-feed traits, snapshot harmonization, and the per-day rate cache.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use lru::LruCache;
use tokio::sync::Mutex;

use crate::currency::{PIVOT, round12};
use crate::error::ElspotError;
use crate::types::CurrencySnapshot;

/// Days of harmonized snapshots the cache retains.
const SNAPSHOT_CAPACITY: usize = 4;

/// Transport contract for upstream exchange-rate feeds.
///
/// Implementations return the snapshot exactly as published; rebasing onto
/// the EUR pivot happens in the cache layer via [`harmonize`].
#[async_trait]
pub trait RateFeed: Send + Sync {
    /// Fetch the current raw snapshot.
    async fn fetch_snapshot(&self) -> Result<CurrencySnapshot, ElspotError>;
}

/// Lookup contract the converter consumes: units of `code` per one EUR.
#[async_trait]
pub trait RateLookup: Send + Sync {
    /// Resolve the pivot-relative rate for a currency code.
    async fn rate(&self, code: &str) -> Result<f64, ElspotError>;
}

/// Rebase a snapshot onto the EUR pivot.
///
/// Behavior:
/// - A snapshot already based on EUR passes through, base label
///   canonicalized.
/// - Otherwise the snapshot must carry a finite, non-zero EUR rate; every
///   other entry is divided by it and rounded to 12 decimals.
/// - Entries whose values are not finite are dropped silently.
/// - The declared base keeps its reciprocal rate, and `rates["EUR"]` ends up
///   exactly `1`.
///
/// # Errors
/// Returns [`ElspotError::MissingPivotRate`] when the snapshot carries no
/// usable EUR rate.
pub fn harmonize(snapshot: CurrencySnapshot) -> Result<CurrencySnapshot, ElspotError> {
    let declared_base = if snapshot.base.is_empty() {
        PIVOT.to_string()
    } else {
        snapshot.base.to_uppercase()
    };
    if declared_base == PIVOT {
        return Ok(CurrencySnapshot {
            base: PIVOT.to_string(),
            ..snapshot
        });
    }

    let eur_per_base = snapshot.rates.get(PIVOT).copied().unwrap_or(f64::NAN);
    if !eur_per_base.is_finite() || eur_per_base == 0.0 {
        return Err(ElspotError::missing_pivot_rate(declared_base));
    }

    let mut converted: HashMap<String, f64> = HashMap::with_capacity(snapshot.rates.len() + 1);
    for (code, value) in &snapshot.rates {
        if !value.is_finite() {
            continue;
        }
        let code = code.to_uppercase();
        if code == PIVOT {
            continue;
        }
        converted.insert(code, round12(value / eur_per_base));
    }
    converted.insert(declared_base, round12(1.0 / eur_per_base));
    converted.insert(PIVOT.to_string(), 1.0);

    Ok(CurrencySnapshot {
        base: PIVOT.to_string(),
        rates: converted,
        ..snapshot
    })
}

/// Per-day memoized rate lookup over a [`RateFeed`].
///
/// Harmonized snapshots are keyed by the calendar day an injectable clock
/// reports. The populate path holds one mutex across check, fetch, and
/// store, so concurrent callers for the same day await a single upstream
/// round trip. The pivot short-circuits to `1` without touching the feed.
pub struct RateCache {
    feed: Arc<dyn RateFeed>,
    store: Mutex<LruCache<NaiveDate, Arc<HashMap<String, f64>>>>,
    use_cache: bool,
    clock: Arc<dyn Fn() -> NaiveDate + Send + Sync>,
}

impl RateCache {
    /// Cache over `feed`, memoizing per UTC calendar day.
    #[must_use]
    pub fn new(feed: Arc<dyn RateFeed>) -> Self {
        Self::with_clock(feed, true, || Utc::now().date_naive())
    }

    /// Cache that refetches on every call instead of memoizing.
    #[must_use]
    pub fn without_cache(feed: Arc<dyn RateFeed>) -> Self {
        Self::with_clock(feed, false, || Utc::now().date_naive())
    }

    /// Cache with an explicit day clock, for tests and replay scenarios.
    pub fn with_clock<C>(feed: Arc<dyn RateFeed>, use_cache: bool, clock: C) -> Self
    where
        C: Fn() -> NaiveDate + Send + Sync + 'static,
    {
        Self {
            feed,
            store: Mutex::new(LruCache::new(
                NonZeroUsize::new(SNAPSHOT_CAPACITY).unwrap_or(NonZeroUsize::MIN),
            )),
            use_cache,
            clock: Arc::new(clock),
        }
    }

    async fn resolve_rates(&self) -> Result<Arc<HashMap<String, f64>>, ElspotError> {
        if !self.use_cache {
            let snapshot = harmonize(self.feed.fetch_snapshot().await?)?;
            return Ok(Arc::new(snapshot.rates));
        }

        let today = (self.clock)();
        let mut store = self.store.lock().await;
        if let Some(rates) = store.get(&today) {
            return Ok(Arc::clone(rates));
        }
        // Populate under the lock: a second caller for the same day awaits
        // this fetch instead of starting its own.
        #[cfg(feature = "tracing")]
        tracing::debug!(day = %today, "refreshing rate snapshot");
        let snapshot = harmonize(self.feed.fetch_snapshot().await?)?;
        let rates = Arc::new(snapshot.rates);
        store.put(today, Arc::clone(&rates));
        Ok(rates)
    }
}

#[async_trait]
impl RateLookup for RateCache {
    async fn rate(&self, code: &str) -> Result<f64, ElspotError> {
        let code = if code.is_empty() {
            PIVOT.to_string()
        } else {
            code.to_uppercase()
        };
        if code == PIVOT {
            return Ok(1.0);
        }

        let rates = self.resolve_rates().await?;
        rates
            .get(&code)
            .copied()
            .ok_or_else(|| ElspotError::rate_unavailable(code))
    }
}
