//! Cadence detection and resampling for day-ahead price series.

use chrono::{DateTime, Duration, Utc};

use crate::types::{PricePoint, Resolution};

/// Normalize a raw series onto the `target` cadence.
///
/// Behavior:
/// - Drops points whose `value` is not finite or whose interval is empty or
///   inverted (`start >= end`).
/// - Sorts ascending by `start`.
/// - Detects the native cadence (see [`detect_resolution`]) and returns the
///   cleaned series unchanged when it already matches `target`.
/// - Otherwise condenses quarter-hour points into hourly means, or splits
///   hourly points into energy-conserving quarter-hour slices.
///
/// The result is always sorted ascending by `start`.
#[must_use]
pub fn normalize(points: Vec<PricePoint>, target: Resolution) -> Vec<PricePoint> {
    let mut cleaned: Vec<PricePoint> = points
        .into_iter()
        .filter(|p| p.value.is_finite() && p.start < p.end)
        .collect();
    if cleaned.is_empty() {
        return cleaned;
    }
    cleaned.sort_by_key(|p| p.start);

    if detect_resolution(&cleaned) == target {
        return cleaned;
    }
    match target {
        Resolution::Hourly => condense_to_hourly(cleaned),
        Resolution::QuarterHour => expand_to_quarter_hour(cleaned),
    }
}

/// Detect the native cadence of a series sorted ascending by `start`.
///
/// The gap between the first two starts decides: 15 minutes reads as
/// quarter-hour, 60 as hourly. Any other gap, and series shorter than two
/// points, fall back to a count heuristic where more than 48 points reads as
/// quarter-hour. The fallback is a guess, not a guarantee; single-point and
/// gap-corrupted feeds cannot be classified reliably.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use elspot_core::normalize::detect_resolution;
/// use elspot_core::types::{PricePoint, Resolution};
///
/// let point = |m: u32| PricePoint {
///     start: Utc.with_ymd_and_hms(2025, 1, 15, 0, m, 0).unwrap(),
///     end: Utc.with_ymd_and_hms(2025, 1, 15, 0, m + 15, 0).unwrap(),
///     value: 1.0,
///     currency: "EUR".to_string(),
/// };
/// let series = vec![point(0), point(15)];
/// assert_eq!(detect_resolution(&series), Resolution::QuarterHour);
/// ```
#[must_use]
pub fn detect_resolution(sorted: &[PricePoint]) -> Resolution {
    if sorted.len() >= 2 {
        let gap = sorted[1].start - sorted[0].start;
        let minutes = (gap.num_seconds() as f64 / 60.0).round() as i64;
        match minutes {
            15 => return Resolution::QuarterHour,
            60 => return Resolution::Hourly,
            _ => {}
        }
    }
    if sorted.len() > 48 {
        Resolution::QuarterHour
    } else {
        Resolution::Hourly
    }
}

/// Epoch seconds truncated to the containing UTC hour.
fn hour_key(t: DateTime<Utc>) -> i64 {
    let secs = t.timestamp();
    secs - secs.rem_euclid(3600)
}

struct Bucket {
    key: i64,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    sum: f64,
    count: u32,
    currency: String,
}

fn finalize_bucket(b: Bucket) -> PricePoint {
    PricePoint {
        start: b.start,
        end: b.end,
        value: b.sum / f64::from(b.count),
        currency: b.currency,
    }
}

/// Merge quarter-hour points into hour buckets keyed by the truncated start.
///
/// Each bucket keeps the earliest constituent start, the latest end, the
/// arithmetic mean of the values, and the first non-empty currency.
fn condense_to_hourly(sorted: Vec<PricePoint>) -> Vec<PricePoint> {
    let mut out: Vec<PricePoint> = Vec::new();
    let mut cur: Option<Bucket> = None;

    for p in sorted {
        let key = hour_key(p.start);
        match cur.as_mut() {
            Some(b) if b.key == key => {
                b.sum += p.value;
                b.count += 1;
                if p.end > b.end {
                    b.end = p.end;
                }
                if b.currency.is_empty() && !p.currency.is_empty() {
                    b.currency = p.currency;
                }
            }
            _ => {
                if let Some(done) = cur.take() {
                    out.push(finalize_bucket(done));
                }
                cur = Some(Bucket {
                    key,
                    start: p.start,
                    end: p.end,
                    sum: p.value,
                    count: 1,
                    currency: p.currency,
                });
            }
        }
    }
    if let Some(done) = cur.take() {
        out.push(finalize_bucket(done));
    }
    out.sort_by_key(|p| p.start);
    out
}

/// Split each point into equal-width 15-minute slices.
///
/// The slice count is `max(1, round(duration_minutes / 15))` with the
/// duration floored at 15 minutes; each slice carries `value / slices` so
/// that summing the slices reproduces the original value.
fn expand_to_quarter_hour(sorted: Vec<PricePoint>) -> Vec<PricePoint> {
    let mut out: Vec<PricePoint> = Vec::new();
    for p in sorted {
        let minutes = ((p.end - p.start).num_seconds() as f64 / 60.0)
            .round()
            .max(15.0);
        let slices = (minutes / 15.0).round().max(1.0) as i64;
        let slice_value = p.value / slices as f64;
        for i in 0..slices {
            let start = p.start + Duration::minutes(i * 15);
            out.push(PricePoint {
                start,
                end: start + Duration::minutes(15),
                value: slice_value,
                currency: p.currency.clone(),
            });
        }
    }
    out.sort_by_key(|p| p.start);
    out
}
