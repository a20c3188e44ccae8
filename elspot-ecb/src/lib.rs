//! elspot-ecb
//!
//! Exchange-rate feed that implements `RateFeed` on top of the European
//! Central Bank `eurofxref-daily` publication. The feed quotes units of each
//! currency per one euro, which matches the pivot the conversion layer
//! expects, so harmonization is a passthrough.
#![warn(missing_docs)]

/// Adapter definitions and the production transport backed by `reqwest`.
pub mod adapter;

use std::collections::HashMap;
use std::sync::Arc;

use adapter::{EcbApi, RealAdapter};
use async_trait::async_trait;
use chrono::Utc;
use elspot_core::{CurrencySnapshot, ElspotError, PIVOT, RateFeed};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use url::Url;

/// Provider label used in error messages.
pub const VENDOR: &str = "ECB";

/// Daily euro foreign-exchange reference rate publication.
pub const DEFAULT_URL: &str = "https://www.ecb.europa.eu/stats/eurofxref/eurofxref-daily.xml";

#[cfg(not(feature = "test-adapters"))]
type ApiArc = Arc<RealAdapter>;
#[cfg(feature = "test-adapters")]
type ApiArc = Arc<dyn EcbApi>;

/// Rate feed backed by the ECB reference-rate publication.
pub struct EcbRates {
    api: ApiArc,
    url: Url,
}

impl EcbRates {
    /// Build against the public publication URL.
    ///
    /// # Panics
    /// Panics if [`DEFAULT_URL`] fails to parse, which would be a packaging
    /// bug rather than a runtime condition.
    #[must_use]
    pub fn new_default() -> Self {
        let url = Url::parse(DEFAULT_URL).expect("default ECB feed URL must parse");
        Self::with_url(url)
    }

    /// Build against a custom feed URL (mock servers, mirrors).
    #[must_use]
    pub fn with_url(url: Url) -> Self {
        Self {
            api: Arc::new(RealAdapter::new()),
            url,
        }
    }

    /// For tests/injection (requires the `test-adapters` feature).
    #[cfg(feature = "test-adapters")]
    #[must_use]
    pub fn from_adapter(api: Arc<dyn EcbApi>, url: Url) -> Self {
        Self { api, url }
    }
}

impl Default for EcbRates {
    fn default() -> Self {
        Self::new_default()
    }
}

#[async_trait]
impl RateFeed for EcbRates {
    async fn fetch_snapshot(&self) -> Result<CurrencySnapshot, ElspotError> {
        let xml = self.api.fetch_raw(&self.url).await?;
        let (date, rates) = parse_rates(&xml)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(day = %date, codes = rates.len(), "ecb reference rates fetched");

        Ok(CurrencySnapshot {
            base: PIVOT.to_string(),
            date,
            fetched_at: Utc::now(),
            source: self.url.to_string(),
            rates,
        })
    }
}

fn structure_error(e: &impl std::fmt::Display) -> ElspotError {
    ElspotError::provider(VENDOR, format!("unexpected currency XML structure: {e}"))
}

fn attr_value(e: &BytesStart<'_>, name: &str) -> Result<Option<String>, ElspotError> {
    let attr = e
        .try_get_attribute(name)
        .map_err(|err| structure_error(&err))?;
    match attr {
        Some(a) => {
            let value = a.unescape_value().map_err(|err| structure_error(&err))?;
            Ok(Some(value.into_owned()))
        }
        None => Ok(None),
    }
}

/// Walk the `gesmes:Envelope / Cube / Cube[@time] / Cube[@currency @rate]`
/// tree and collect the publication date plus the per-euro rate table.
///
/// The pivot itself is seeded with rate `1`, mirroring how the feed omits
/// the euro from its own listing.
fn parse_rates(xml: &str) -> Result<(String, HashMap<String, f64>), ElspotError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut saw_envelope = false;
    let mut saw_day_cube = false;
    let mut depth = 0usize;
    let mut date: Option<String> = None;
    let mut rates: HashMap<String, f64> = HashMap::from([(PIVOT.to_string(), 1.0)]);

    loop {
        match reader.read_event().map_err(|e| structure_error(&e))? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"Envelope" => saw_envelope = true,
                b"Cube" => {
                    depth += 1;
                    collect_cube(&e, depth, &mut saw_day_cube, &mut date, &mut rates)?;
                }
                _ => {}
            },
            Event::Empty(e) => {
                if e.local_name().as_ref() == b"Cube" {
                    collect_cube(&e, depth + 1, &mut saw_day_cube, &mut date, &mut rates)?;
                }
            }
            Event::End(e) => {
                if e.local_name().as_ref() == b"Cube" {
                    depth = depth.saturating_sub(1);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !saw_envelope || !saw_day_cube {
        return Err(ElspotError::provider(
            VENDOR,
            "unexpected currency XML structure",
        ));
    }
    let Some(date) = date else {
        return Err(ElspotError::provider(
            VENDOR,
            "currency feed missing date attribute",
        ));
    };
    Ok((date, rates))
}

fn collect_cube(
    e: &BytesStart<'_>,
    depth: usize,
    saw_day_cube: &mut bool,
    date: &mut Option<String>,
    rates: &mut HashMap<String, f64>,
) -> Result<(), ElspotError> {
    match depth {
        2 => {
            *saw_day_cube = true;
            if let Some(time) = attr_value(e, "time")? {
                *date = Some(time);
            }
        }
        3 => {
            if let (Some(code), Some(rate)) = (attr_value(e, "currency")?, attr_value(e, "rate")?)
                && let Ok(value) = rate.parse::<f64>()
            {
                rates.insert(code.to_uppercase(), value);
            }
        }
        _ => {}
    }
    Ok(())
}
