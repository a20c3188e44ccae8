use std::sync::{Arc, Mutex};

use elspot::{Elspot, ElspotError, PriceRequest};

use crate::helpers::{ScriptedConnector, fixture_date, hourly_points, m_conn, m_fail, series};

type Log = Arc<Mutex<Vec<&'static str>>>;

fn serving(name: &'static str, log: &Log) -> Arc<ScriptedConnector> {
    let log = Arc::clone(log);
    m_conn(name, move |q| {
        log.lock().unwrap().push(name);
        Ok(series(
            name,
            "PT60M",
            hourly_points(q.date, &[0.5, 0.75], "NOK"),
        ))
    })
}

#[tokio::test]
async fn the_first_success_stops_the_chain() {
    let log: Log = Arc::default();
    let elspot = Elspot::builder()
        .with_connector(serving("first", &log))
        .with_connector(serving("second", &log))
        .build()
        .unwrap();

    let result = elspot.prices(&PriceRequest::new("NO1")).await.unwrap();
    assert_eq!(result.provider, "first");
    assert_eq!(*log.lock().unwrap(), vec!["first"]);
}

#[tokio::test]
async fn failures_fall_through_to_the_next_connector() {
    let log: Log = Arc::default();
    let failing = {
        let log = Arc::clone(&log);
        m_conn("first", move |_| {
            log.lock().unwrap().push("first");
            Err(ElspotError::provider("first", "upstream outage"))
        })
    };
    let elspot = Elspot::builder()
        .with_connector(failing)
        .with_connector(serving("second", &log))
        .build()
        .unwrap();

    let result = elspot.prices(&PriceRequest::new("NO1")).await.unwrap();
    assert_eq!(result.provider, "second");
    assert_eq!(*log.lock().unwrap(), vec!["first", "second"]);
}

#[tokio::test]
async fn the_last_error_is_returned_when_every_connector_fails() {
    let elspot = Elspot::builder()
        .with_connector(m_fail("first", "first down"))
        .with_connector(m_fail("second", "second down"))
        .build()
        .unwrap();

    let err = elspot.prices(&PriceRequest::new("NO1")).await.unwrap_err();
    assert!(matches!(
        err,
        ElspotError::Provider { provider, msg }
            if provider == "second" && msg.contains("second down")
    ));
}

#[tokio::test]
async fn untagged_errors_are_wrapped_with_the_connector_name() {
    let odd = m_conn("odd", |_| {
        Err(ElspotError::invalid_input("date out of range"))
    });
    let elspot = Elspot::builder().with_connector(odd).build().unwrap();

    let err = elspot.prices(&PriceRequest::new("NO1")).await.unwrap_err();
    assert!(matches!(
        err,
        ElspotError::Provider { provider, msg }
            if provider == "odd" && msg.contains("date out of range")
    ));
}

#[tokio::test]
async fn conversion_failures_are_not_retried_on_other_connectors() {
    let log: Log = Arc::default();
    let eur_series = {
        let log = Arc::clone(&log);
        m_conn("first", move |q| {
            log.lock().unwrap().push("first");
            Ok(series(
                "first",
                "PT60M",
                hourly_points(q.date, &[0.4], "EUR"),
            ))
        })
    };
    let elspot = Elspot::builder()
        .with_connector(eur_series)
        .with_connector(serving("second", &log))
        .build()
        .unwrap();

    // The fetch succeeds on "first"; conversion then fails because no rate
    // source is configured. "second" must not be consulted.
    let request = PriceRequest::new("NO1")
        .with_currency("NOK")
        .with_date(fixture_date());
    let err = elspot.prices(&request).await.unwrap_err();
    assert!(matches!(err, ElspotError::NoRateProvider));
    assert_eq!(*log.lock().unwrap(), vec!["first"]);
}
