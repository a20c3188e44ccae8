//! Scalar conversion through the pivot currency and per-point series
//! preparation.

use crate::currency::{PIVOT, RateLookup};
use crate::error::ElspotError;
use crate::types::PricePoint;

/// Convert `value` from one currency to another through the EUR pivot.
///
/// Identity conversions return the value untouched without consulting the
/// rate lookup. Otherwise the value is divided by the pivot rate of `from`
/// (skipped when `from` is the pivot) and multiplied by the pivot rate of
/// `to` (skipped when `to` is the pivot).
///
/// # Errors
/// Returns [`ElspotError::RateUnavailable`] when a required rate resolves to
/// zero or not-a-number, or whatever error the lookup itself reports.
pub async fn convert(
    value: f64,
    from: &str,
    to: &str,
    rates: &dyn RateLookup,
) -> Result<f64, ElspotError> {
    let from = from.to_uppercase();
    let to = to.to_uppercase();
    if from == to {
        return Ok(value);
    }

    let in_pivot = if from == PIVOT {
        value
    } else {
        value / usable_rate(rates, &from).await?
    };

    if to == PIVOT {
        return Ok(in_pivot);
    }
    Ok(in_pivot * usable_rate(rates, &to).await?)
}

async fn usable_rate(rates: &dyn RateLookup, code: &str) -> Result<f64, ElspotError> {
    let rate = rates.rate(code).await?;
    if rate == 0.0 || rate.is_nan() {
        return Err(ElspotError::rate_unavailable(code));
    }
    Ok(rate)
}

/// Rewrite every point onto `target_currency`, converting values where the
/// point's own currency differs.
///
/// Rate lookups are engaged only when at least one point actually needs
/// conversion; a series already quoted in the target currency passes through
/// with only its currency labels canonicalized. Points without a currency of
/// their own are assumed to already be in the target currency.
///
/// # Errors
/// Returns [`ElspotError::NoRateProvider`] when conversion is needed and no
/// lookup was supplied, plus any error [`convert`] reports.
pub async fn prepare_points(
    points: Vec<PricePoint>,
    target_currency: &str,
    rates: Option<&dyn RateLookup>,
) -> Result<Vec<PricePoint>, ElspotError> {
    let target = target_currency.to_uppercase();
    let source_of = |p: &PricePoint| {
        if p.currency.is_empty() {
            target.clone()
        } else {
            p.currency.to_uppercase()
        }
    };

    let needs_conversion = points.iter().any(|p| source_of(p) != target);
    if needs_conversion && rates.is_none() {
        return Err(ElspotError::NoRateProvider);
    }

    let mut prepared = Vec::with_capacity(points.len());
    for p in points {
        let source = source_of(&p);
        let value = if source == target {
            p.value
        } else {
            let lookup = rates.ok_or(ElspotError::NoRateProvider)?;
            convert(p.value, &source, &target, lookup).await?
        };
        prepared.push(PricePoint {
            start: p.start,
            end: p.end,
            value,
            currency: target.clone(),
        });
    }
    Ok(prepared)
}
