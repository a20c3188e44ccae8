//! Daily aggregate statistics for normalized price series.

use crate::types::{DailyStats, HourlyEntry, PricePoint};

/// Round to four decimal places, half away from zero.
#[must_use]
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Map normalized points onto presentation entries with rounded prices.
#[must_use]
pub fn hourly_entries(points: &[PricePoint]) -> Vec<HourlyEntry> {
    points
        .iter()
        .map(|p| HourlyEntry {
            start_time: p.start,
            end_time: p.end,
            spot_price: round4(p.value),
        })
        .collect()
}

/// Compute min/max/average and peak/off-peak means over `entries`.
///
/// Behavior:
/// - An empty series yields the all-zero [`DailyStats`].
/// - A series longer than 48 entries is treated as quarter-hourly when the
///   peak window's hour boundaries are converted into entry indices.
/// - The peak mean covers the inclusive index range derived from the window;
///   the two off-peak means cover the entries strictly before and strictly
///   after it. An empty range yields `0`, not an error.
/// - Every output field is rounded to four decimals.
#[must_use]
pub fn build_daily_stats(
    entries: &[HourlyEntry],
    peak_start_hour: u32,
    peak_end_hour: u32,
) -> DailyStats {
    if entries.is_empty() {
        return DailyStats::default();
    }

    let entries_per_hour: i64 = if entries.len() > 48 { 4 } else { 1 };
    let len = entries.len() as i64;

    let peak_start = i64::from(peak_start_hour) * entries_per_hour;
    // Signed math so a zero end hour cannot wrap below the start index.
    let peak_end = peak_start.max(i64::from(peak_end_hour) * entries_per_hour - 1);

    let mean_of = |from: i64, to: i64| -> f64 {
        let from = from.max(0);
        let to = to.min(len - 1);
        if from > to {
            return 0.0;
        }
        let range = &entries[from as usize..=to as usize];
        range.iter().map(|e| e.spot_price).sum::<f64>() / range.len() as f64
    };

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0;
    for e in entries {
        min = min.min(e.spot_price);
        max = max.max(e.spot_price);
        sum += e.spot_price;
    }

    DailyStats {
        min_price: round4(min),
        max_price: round4(max),
        avg_price: round4(sum / len as f64),
        peak_price: round4(mean_of(peak_start, peak_end)),
        off_peak_price_1: round4(mean_of(0, peak_start - 1)),
        off_peak_price_2: round4(mean_of(peak_end + 1, len - 1)),
    }
}
