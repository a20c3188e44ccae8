use std::sync::Arc;

use elspot::{Elspot, PriceRequest, Resolution};
use elspot_mock::{MockConnector, MockRates};
use proptest::prelude::*;

use crate::helpers::{dt, fixture_date, hourly_points, m_series, points, rates, series};

#[tokio::test]
async fn points_are_converted_into_the_requested_currency() {
    let connector = m_series(
        "first",
        series(
            "first",
            "PT60M",
            hourly_points(fixture_date(), &[0.5, 1.0], "EUR"),
        ),
    );
    let elspot = Elspot::builder()
        .with_connector(connector)
        .with_rates(rates(&[("NOK", 10.0)]))
        .build()
        .unwrap();

    let request = PriceRequest::new("NO1").with_date(fixture_date());
    let result = elspot.prices(&request).await.unwrap();

    assert_eq!(result.currency, "NOK");
    assert_eq!(result.hourly.len(), 2);
    assert!((result.hourly[0].spot_price - 5.0).abs() < 1e-9);
    assert!((result.hourly[1].spot_price - 10.0).abs() < 1e-9);
}

#[tokio::test]
async fn request_rates_override_the_builder_rates() {
    let connector = m_series(
        "first",
        series(
            "first",
            "PT60M",
            hourly_points(fixture_date(), &[0.5], "EUR"),
        ),
    );
    let elspot = Elspot::builder()
        .with_connector(connector)
        .with_rates(rates(&[("NOK", 10.0)]))
        .build()
        .unwrap();

    let request = PriceRequest::new("NO1")
        .with_date(fixture_date())
        .with_rates(rates(&[("NOK", 20.0)]));
    let result = elspot.prices(&request).await.unwrap();
    assert!((result.hourly[0].spot_price - 10.0).abs() < 1e-9);
}

#[tokio::test]
async fn matching_currency_needs_no_rate_source() {
    let connector = m_series(
        "first",
        series(
            "first",
            "PT60M",
            hourly_points(fixture_date(), &[1.234_567_8], "NOK"),
        ),
    );
    let elspot = Elspot::builder().with_connector(connector).build().unwrap();

    // Lowercase request currency still matches and is canonicalized.
    let request = PriceRequest::new("NO1")
        .with_currency("nok")
        .with_date(fixture_date());
    let result = elspot.prices(&request).await.unwrap();

    assert_eq!(result.currency, "NOK");
    assert!((result.hourly[0].spot_price - 1.2346).abs() < 1e-9);
}

#[tokio::test]
async fn quarter_hour_series_condenses_to_hourly_by_default() {
    let quarter = points(
        dt(2025, 1, 15, 0),
        15,
        &[1.0, 2.0, 3.0, 4.0, 10.0, 20.0, 30.0, 40.0],
        "NOK",
    );
    let connector = m_series("first", series("first", "PT15M", quarter));
    let elspot = Elspot::builder().with_connector(connector).build().unwrap();

    let request = PriceRequest::new("NO1").with_date(fixture_date());
    let result = elspot.prices(&request).await.unwrap();

    assert_eq!(result.hourly.len(), 2);
    assert!((result.hourly[0].spot_price - 2.5).abs() < 1e-9);
    assert!((result.hourly[1].spot_price - 25.0).abs() < 1e-9);
    assert_eq!(result.hourly[0].start_time, dt(2025, 1, 15, 0));
    assert_eq!(result.hourly[0].end_time, dt(2025, 1, 15, 1));
}

#[tokio::test]
async fn hourly_series_expands_when_quarter_hour_is_requested() {
    let connector = m_series(
        "first",
        series(
            "first",
            "PT60M",
            hourly_points(fixture_date(), &[4.0, 8.0], "NOK"),
        ),
    );
    let elspot = Elspot::builder().with_connector(connector).build().unwrap();

    let request = PriceRequest::new("NO1")
        .with_date(fixture_date())
        .with_resolution(Resolution::QuarterHour);
    let result = elspot.prices(&request).await.unwrap();

    assert_eq!(result.hourly.len(), 8);
    assert!((result.hourly[0].spot_price - 1.0).abs() < 1e-9);
    assert!((result.hourly[4].spot_price - 2.0).abs() < 1e-9);
    let gap = result.hourly[1].start_time - result.hourly[0].start_time;
    assert_eq!(gap.num_minutes(), 15);
}

#[tokio::test]
async fn daily_stats_reflect_the_default_peak_window() {
    let values: Vec<f64> = (0..24).map(f64::from).collect();
    let connector = m_series(
        "first",
        series(
            "first",
            "PT60M",
            hourly_points(fixture_date(), &values, "NOK"),
        ),
    );
    let elspot = Elspot::builder().with_connector(connector).build().unwrap();

    let request = PriceRequest::new("NO1").with_date(fixture_date());
    let result = elspot.prices(&request).await.unwrap();

    let daily = result.daily;
    assert!((daily.min_price - 0.0).abs() < 1e-9);
    assert!((daily.max_price - 23.0).abs() < 1e-9);
    assert!((daily.avg_price - 11.5).abs() < 1e-9);
    // Default window covers hours 6 through 21 inclusive.
    assert!((daily.peak_price - 13.5).abs() < 1e-9);
    assert!((daily.off_peak_price_1 - 2.5).abs() < 1e-9);
    assert!((daily.off_peak_price_2 - 22.5).abs() < 1e-9);
}

#[tokio::test]
async fn a_custom_peak_window_shifts_the_aggregates() {
    let values: Vec<f64> = (0..24).map(f64::from).collect();
    let connector = m_series(
        "first",
        series(
            "first",
            "PT60M",
            hourly_points(fixture_date(), &values, "NOK"),
        ),
    );
    let elspot = Elspot::builder().with_connector(connector).build().unwrap();

    let request = PriceRequest::new("NO1")
        .with_date(fixture_date())
        .with_peak_window(0, 6);
    let result = elspot.prices(&request).await.unwrap();

    let daily = result.daily;
    assert!((daily.peak_price - 2.5).abs() < 1e-9);
    assert!((daily.off_peak_price_1 - 0.0).abs() < 1e-9);
    assert!((daily.off_peak_price_2 - 14.5).abs() < 1e-9);
}

#[tokio::test]
async fn an_empty_series_yields_no_entries_and_zeroed_stats() {
    let connector = m_series("first", series("first", "PT60M", vec![]));
    let elspot = Elspot::builder().with_connector(connector).build().unwrap();

    let request = PriceRequest::new("NO1").with_date(fixture_date());
    let result = elspot.prices(&request).await.unwrap();

    assert!(result.hourly.is_empty());
    assert_eq!(result.daily, elspot::DailyStats::default());
}

#[tokio::test]
async fn provider_metadata_flows_into_the_result() {
    let connector = m_series(
        "alpha",
        series(
            "Alpha",
            "PT60M",
            hourly_points(fixture_date(), &[1.0], "NOK"),
        ),
    );
    let elspot = Elspot::builder().with_connector(connector).build().unwrap();

    let request = PriceRequest::new("SE3").with_date(fixture_date());
    let result = elspot.prices(&request).await.unwrap();

    assert_eq!(result.provider, "Alpha");
    assert_eq!(result.provider_url, "https://example.test/alpha");
    assert_eq!(result.region_code, "SE3");
    assert_eq!(result.price_date, fixture_date());
}

#[tokio::test]
async fn the_mock_stack_runs_the_whole_pipeline_offline() {
    let elspot = Elspot::builder()
        .with_connector(Arc::new(MockConnector::new()))
        .with_rates(Arc::new(MockRates::new()))
        .build()
        .unwrap();

    let request = PriceRequest::new("NO1").with_date(fixture_date());
    let result = elspot.prices(&request).await.unwrap();

    assert_eq!(result.provider, "Mock");
    assert_eq!(result.currency, "NOK");
    assert_eq!(result.hourly.len(), 24);
    // Fixture hour zero is 0.2210 EUR at 11.66 NOK per EUR.
    assert!((result.hourly[0].spot_price - 2.5769).abs() < 1e-9);
    assert!((result.daily.min_price - 2.3472).abs() < 1e-9);
    assert!((result.daily.max_price - 9.5146).abs() < 1e-9);
}

proptest! {
    #[test]
    fn aggregates_stay_within_the_served_range(
        values in proptest::collection::vec(-100.0f64..100.0, 1..48),
    ) {
        tokio_test::block_on(async move {
            let connector = m_series(
                "first",
                series(
                    "first",
                    "PT60M",
                    hourly_points(fixture_date(), &values, "NOK"),
                ),
            );
            let elspot = Elspot::builder().with_connector(connector).build().unwrap();

            let request = PriceRequest::new("NO1").with_date(fixture_date());
            let result = elspot.prices(&request).await.unwrap();

            assert_eq!(result.hourly.len(), values.len());
            let daily = result.daily;
            assert!(daily.min_price <= daily.avg_price);
            assert!(daily.avg_price <= daily.max_price);
            for window in result.hourly.windows(2) {
                assert!(window[0].start_time <= window[1].start_time);
            }
        });
    }
}
