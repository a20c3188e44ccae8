use elspot::{Elspot, PriceRequest, PriceResult};

use crate::helpers::{fixture_date, hourly_points, m_series, series};

async fn fixture_result() -> PriceResult {
    let connector = m_series(
        "first",
        series(
            "first",
            "PT60M",
            hourly_points(fixture_date(), &[0.5, 0.75], "NOK"),
        ),
    );
    let elspot = Elspot::builder().with_connector(connector).build().unwrap();
    let request = PriceRequest::new("NO1").with_date(fixture_date());
    elspot.prices(&request).await.unwrap()
}

#[tokio::test]
async fn results_serialize_with_camel_case_keys() {
    let json = serde_json::to_value(fixture_result().await).unwrap();

    let mut keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec![
            "currency",
            "daily",
            "hourly",
            "priceDate",
            "provider",
            "providerUrl",
            "regionCode",
        ]
    );

    let mut entry_keys: Vec<&str> = json["hourly"][0]
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    entry_keys.sort_unstable();
    assert_eq!(entry_keys, vec!["endTime", "spotPrice", "startTime"]);

    let mut daily_keys: Vec<&str> = json["daily"]
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    daily_keys.sort_unstable();
    assert_eq!(
        daily_keys,
        vec![
            "avgPrice",
            "maxPrice",
            "minPrice",
            "offPeakPrice1",
            "offPeakPrice2",
            "peakPrice",
        ]
    );
}

#[tokio::test]
async fn dates_and_timestamps_use_iso_8601() {
    let json = serde_json::to_value(fixture_result().await).unwrap();
    assert_eq!(json["priceDate"], "2025-01-15");
    assert_eq!(json["hourly"][0]["startTime"], "2025-01-15T00:00:00Z");
    assert_eq!(json["hourly"][0]["endTime"], "2025-01-15T01:00:00Z");
}

#[tokio::test]
async fn results_round_trip_through_json() {
    let result = fixture_result().await;
    let json = serde_json::to_string(&result).unwrap();
    let back: PriceResult = serde_json::from_str(&json).unwrap();
    assert_eq!(back, result);
}
