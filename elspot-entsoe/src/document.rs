//! Parser for transparency platform `Publication_MarketDocument` payloads.
//!
//! The platform answers with namespaced XML. Parsing walks the event stream
//! and keeps only the handful of elements the day-ahead mapping needs, so
//! unknown siblings pass through untouched.

use chrono::{DateTime, NaiveDateTime, Utc};
use elspot_core::ElspotError;
use quick_xml::Reader;
use quick_xml::events::Event;

use crate::VENDOR;

/// Everything the day-ahead mapping reads from one document.
#[derive(Debug, Clone, Default)]
pub struct PublicationDocument {
    /// Price series in document order.
    pub series: Vec<PriceSeries>,
}

/// One `TimeSeries` element.
#[derive(Debug, Clone, Default)]
pub struct PriceSeries {
    /// Series currency from `currency_Unit.name`, when present.
    pub currency: Option<String>,
    /// Delivery periods in document order.
    pub periods: Vec<SeriesPeriod>,
}

/// One `Period` element with its raw interval and point data.
#[derive(Debug, Clone, Default)]
pub struct SeriesPeriod {
    /// Raw `timeInterval/start` text.
    pub interval_start: Option<String>,
    /// Raw `resolution` text, e.g. `PT60M`.
    pub resolution: Option<String>,
    /// Points in document order.
    pub points: Vec<RawPoint>,
}

/// One `Point` element.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawPoint {
    /// 1-based position within the period.
    pub position: Option<i64>,
    /// Price amount per MWh.
    pub amount: Option<f64>,
}

fn structure_error(e: &impl std::fmt::Display) -> ElspotError {
    ElspotError::provider(VENDOR, format!("unexpected document structure: {e}"))
}

/// Parse an A44 publication document.
///
/// Fails when the payload is not well-formed XML or the root element is not
/// a `Publication_MarketDocument`. The platform answers with an
/// acknowledgement document when no data exists for the query, which lands
/// in the same error.
pub fn parse_document(xml: &str) -> Result<PublicationDocument, ElspotError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut doc = PublicationDocument::default();
    let mut saw_root = false;
    let mut stack: Vec<String> = Vec::new();
    let mut series: Option<PriceSeries> = None;
    let mut period: Option<SeriesPeriod> = None;
    let mut point: Option<RawPoint> = None;

    loop {
        match reader.read_event().map_err(|e| structure_error(&e))? {
            Event::Start(e) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                match name.as_str() {
                    "Publication_MarketDocument" => saw_root = true,
                    "TimeSeries" => series = Some(PriceSeries::default()),
                    "Period" if series.is_some() => period = Some(SeriesPeriod::default()),
                    "Point" if period.is_some() => point = Some(RawPoint::default()),
                    _ => {}
                }
                stack.push(name);
            }
            Event::End(_) => {
                let Some(name) = stack.pop() else { continue };
                match name.as_str() {
                    "Point" => {
                        if let (Some(p), Some(pt)) = (period.as_mut(), point.take()) {
                            p.points.push(pt);
                        }
                    }
                    "Period" => {
                        if let (Some(s), Some(p)) = (series.as_mut(), period.take()) {
                            s.periods.push(p);
                        }
                    }
                    "TimeSeries" => {
                        if let Some(s) = series.take() {
                            doc.series.push(s);
                        }
                    }
                    _ => {}
                }
            }
            Event::Text(t) => {
                let value = t.unescape().map_err(|e| structure_error(&e))?;
                let value = value.trim();
                if value.is_empty() {
                    continue;
                }
                let leaf = stack.last().map_or("", String::as_str);
                let parent = stack
                    .len()
                    .checked_sub(2)
                    .and_then(|i| stack.get(i))
                    .map_or("", String::as_str);
                match (parent, leaf) {
                    ("timeInterval", "start") => {
                        if let Some(p) = period.as_mut() {
                            p.interval_start = Some(value.to_string());
                        }
                    }
                    ("Period", "resolution") => {
                        if let Some(p) = period.as_mut() {
                            p.resolution = Some(value.to_string());
                        }
                    }
                    ("TimeSeries", "currency_Unit.name") => {
                        if let Some(s) = series.as_mut() {
                            s.currency = Some(value.to_string());
                        }
                    }
                    ("Point", "position") => {
                        if let Some(pt) = point.as_mut() {
                            pt.position = value.parse().ok();
                        }
                    }
                    ("Point", "price.amount") => {
                        if let Some(pt) = point.as_mut() {
                            pt.amount = value.parse().ok();
                        }
                    }
                    _ => {}
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !saw_root {
        return Err(ElspotError::provider(
            VENDOR,
            "unexpected document structure",
        ));
    }
    Ok(doc)
}

/// Minutes per point for an ISO 8601 duration the platform is known to emit.
///
/// Unrecognized payloads and non-positive values fall back to a 15 minute
/// step.
pub(crate) fn resolution_to_minutes(resolution: &str) -> i64 {
    match resolution {
        "PT60M" => 60,
        "PT15M" => 15,
        other => other
            .strip_prefix("PT")
            .and_then(|rest| rest.strip_suffix('M'))
            .and_then(|minutes| minutes.parse::<i64>().ok())
            .filter(|&minutes| minutes > 0)
            .unwrap_or(15),
    }
}

/// Interval stamps come as `2025-01-14T23:00Z`, occasionally with seconds.
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%MZ")
        .ok()
        .map(|naive| naive.and_utc())
}
