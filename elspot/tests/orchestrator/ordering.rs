use std::sync::{Arc, Mutex};

use elspot::{ConnectorKey, Elspot, ElspotError, PriceRequest};

use crate::helpers::{ScriptedConnector, hourly_points, m_conn, m_unsupported, series};

type Log = Arc<Mutex<Vec<&'static str>>>;

fn serving(name: &'static str, log: &Log) -> Arc<ScriptedConnector> {
    let log = Arc::clone(log);
    m_conn(name, move |q| {
        log.lock().unwrap().push(name);
        Ok(series(
            name,
            "PT60M",
            hourly_points(q.date, &[1.0, 2.0], "NOK"),
        ))
    })
}

fn failing(name: &'static str, log: &Log) -> Arc<ScriptedConnector> {
    let log = Arc::clone(log);
    m_conn(name, move |_| {
        log.lock().unwrap().push(name);
        Err(ElspotError::provider(name, "unavailable"))
    })
}

#[tokio::test]
async fn registration_order_is_the_default_candidate_order() {
    let log: Log = Arc::default();
    let elspot = Elspot::builder()
        .with_connector(failing("first", &log))
        .with_connector(serving("second", &log))
        .build()
        .unwrap();

    let result = elspot.prices(&PriceRequest::new("NO1")).await.unwrap();
    assert_eq!(result.provider, "second");
    assert_eq!(*log.lock().unwrap(), vec!["first", "second"]);
}

#[tokio::test]
async fn preferred_connector_moves_to_the_front() {
    let log: Log = Arc::default();
    let elspot = Elspot::builder()
        .with_connector(serving("first", &log))
        .with_connector(serving("second", &log))
        .build()
        .unwrap();

    let request = PriceRequest::new("NO1").with_preferred(ConnectorKey::new("second"));
    let result = elspot.prices(&request).await.unwrap();
    assert_eq!(result.provider, "second");
    assert_eq!(*log.lock().unwrap(), vec!["second"]);
}

#[tokio::test]
async fn unknown_preference_keeps_registration_order() {
    let log: Log = Arc::default();
    let elspot = Elspot::builder()
        .with_connector(serving("first", &log))
        .with_connector(serving("second", &log))
        .build()
        .unwrap();

    let request = PriceRequest::new("NO1").with_preferred(ConnectorKey::new("nope"));
    let result = elspot.prices(&request).await.unwrap();
    assert_eq!(result.provider, "first");
    assert_eq!(*log.lock().unwrap(), vec!["first"]);
}

#[tokio::test]
async fn explicit_order_replaces_the_registration_order() {
    let log: Log = Arc::default();
    let elspot = Elspot::builder()
        .with_connector(serving("first", &log))
        .with_connector(serving("second", &log))
        .with_connector(failing("third", &log))
        .build()
        .unwrap();

    let request = PriceRequest::new("NO1").with_order(vec![
        ConnectorKey::new("third"),
        ConnectorKey::new("first"),
    ]);
    let result = elspot.prices(&request).await.unwrap();

    // "second" is registered but unlisted, so it is never consulted.
    assert_eq!(result.provider, "first");
    assert_eq!(*log.lock().unwrap(), vec!["third", "first"]);
}

#[tokio::test]
async fn unknown_keys_in_an_explicit_order_are_skipped() {
    let log: Log = Arc::default();
    let elspot = Elspot::builder()
        .with_connector(serving("first", &log))
        .build()
        .unwrap();

    let request = PriceRequest::new("NO1").with_order(vec![
        ConnectorKey::new("ghost"),
        ConnectorKey::new("first"),
    ]);
    let result = elspot.prices(&request).await.unwrap();
    assert_eq!(result.provider, "first");
    assert_eq!(*log.lock().unwrap(), vec!["first"]);
}

#[tokio::test]
async fn duplicate_order_keys_collapse_onto_the_first_mention() {
    let log: Log = Arc::default();
    let elspot = Elspot::builder()
        .with_connector(serving("first", &log))
        .with_connector(failing("second", &log))
        .build()
        .unwrap();

    let request = PriceRequest::new("NO1").with_order(vec![
        ConnectorKey::new("second"),
        ConnectorKey::new("second"),
        ConnectorKey::new("first"),
    ]);
    let result = elspot.prices(&request).await.unwrap();
    assert_eq!(result.provider, "first");
    assert_eq!(*log.lock().unwrap(), vec!["second", "first"]);
}

#[tokio::test]
async fn an_empty_explicit_order_leaves_no_candidates() {
    let log: Log = Arc::default();
    let elspot = Elspot::builder()
        .with_connector(serving("first", &log))
        .build()
        .unwrap();

    let request = PriceRequest::new("NO1").with_order(vec![]);
    let err = elspot.prices(&request).await.unwrap_err();
    assert!(matches!(err, ElspotError::NoProvidersAvailable));
    assert!(log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn connectors_without_the_capability_are_filtered_out() {
    let log: Log = Arc::default();
    let elspot = Elspot::builder()
        .with_connector(m_unsupported("tokenless"))
        .with_connector(serving("usable", &log))
        .build()
        .unwrap();

    let result = elspot.prices(&PriceRequest::new("NO1")).await.unwrap();
    assert_eq!(result.provider, "usable");
    assert_eq!(*log.lock().unwrap(), vec!["usable"]);
}

#[tokio::test]
async fn nothing_but_unsupported_connectors_yields_no_providers() {
    let elspot = Elspot::builder()
        .with_connector(m_unsupported("tokenless"))
        .build()
        .unwrap();

    let err = elspot.prices(&PriceRequest::new("NO1")).await.unwrap_err();
    assert!(matches!(err, ElspotError::NoProvidersAvailable));
}
