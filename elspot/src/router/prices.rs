use std::sync::Arc;

use chrono::Utc;
use elspot_core::{
    DayAheadQuery, DayAheadSeries, ElspotConnector, ElspotError, PriceRequest, PriceResult,
    build_daily_stats, hourly_entries, normalize, prepare_points,
};

use crate::Elspot;
use crate::core::tag_err;

impl Elspot {
    /// Fetch, convert and aggregate day-ahead prices for one region and
    /// delivery day.
    ///
    /// Behavior and trade-offs:
    /// - Candidates are tried strictly in order; the first connector that
    ///   delivers a series wins and no further connectors are contacted.
    /// - When every candidate fails, the error of the last attempt is
    ///   returned, tagged with the connector that produced it.
    /// - Conversion, normalization and statistics run on the winning series
    ///   only; a failure in that stage is not retried against other
    ///   connectors.
    ///
    /// # Errors
    /// Returns [`ElspotError::InvalidInput`] for a missing region or blank
    /// currency, [`ElspotError::NoProvidersAvailable`] when no registered
    /// connector can currently serve the request, the last connector error
    /// when all attempts fail, and the currency errors surfaced by
    /// conversion.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "elspot::router::prices",
            skip(self, request),
            fields(region = %request.region, currency = %request.currency),
        )
    )]
    pub async fn prices(&self, request: &PriceRequest) -> Result<PriceResult, ElspotError> {
        request.validate()?;
        let date = request.date.unwrap_or_else(|| Utc::now().date_naive());

        let candidates = self.candidates(request);
        if candidates.is_empty() {
            return Err(ElspotError::NoProvidersAvailable);
        }

        let query = DayAheadQuery {
            region: request.region.clone(),
            currency: request.currency.clone(),
            date,
        };
        let series = fetch_with_fallback(&candidates, &query).await?;
        let DayAheadSeries {
            provider,
            provider_url,
            points,
            ..
        } = series;

        let rates = request.rates.as_deref().or(self.rates.as_deref());
        let prepared = prepare_points(points, &request.currency, rates).await?;
        let normalized = normalize(prepared, request.resolution);
        let hourly = hourly_entries(&normalized);
        let daily = build_daily_stats(&hourly, request.peak.start_hour, request.peak.end_hour);

        Ok(PriceResult {
            price_date: date,
            provider,
            provider_url,
            region_code: request.region.clone(),
            currency: request.currency.to_uppercase(),
            hourly,
            daily,
        })
    }
}

async fn fetch_with_fallback(
    candidates: &[Arc<dyn ElspotConnector>],
    query: &DayAheadQuery,
) -> Result<DayAheadSeries, ElspotError> {
    // Candidates are never empty here, so the loop always overwrites this.
    let mut last_error = ElspotError::NoProvidersAvailable;
    for connector in candidates {
        let Some(provider) = connector.as_day_ahead_provider() else {
            continue;
        };
        match provider.day_ahead(query).await {
            Ok(series) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    connector = connector.name(),
                    points = series.points.len(),
                    "day-ahead fetch succeeded"
                );
                return Ok(series);
            }
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    connector = connector.name(),
                    error = %e,
                    "day-ahead fetch failed, falling back"
                );
                last_error = tag_err(connector.name(), e);
            }
        }
    }
    Err(last_error)
}
