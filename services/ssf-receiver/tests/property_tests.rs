//! Property tests over the HTTP ingestion path.

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use proptest::prelude::*;
use serde_json::Value;
use ssf_caep::EventLog;
use ssf_receiver::{AppState, Config, router};
use test_utils::{malformed_set_strategy, valid_set_strategy};
use tower::ServiceExt;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

fn test_app() -> (Router, EventLog) {
    let config = Config::from_lookup(|_| None).unwrap();
    let log = EventLog::new();
    (router(AppState::with_log(&config, log.clone())), log)
}

async fn post(app: &Router, payload: &Value) -> (StatusCode, Value) {
    let request = Request::post("/events")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_valid_set_is_received(set in valid_set_strategy()) {
        let rt = runtime();
        let (app, log) = test_app();

        let (status, body) = rt.block_on(post(&app, &set));

        prop_assert_eq!(status, StatusCode::OK);
        prop_assert_eq!(&body["status"], "received");
        prop_assert_eq!(log.len(), 1);
    }

    #[test]
    fn prop_malformed_set_is_rejected_without_mutation(set in malformed_set_strategy()) {
        let rt = runtime();
        let (app, log) = test_app();

        let (status, body) = rt.block_on(post(&app, &set));

        prop_assert_eq!(status, StatusCode::BAD_REQUEST);
        prop_assert_eq!(&body["error"], "Invalid event format");
        prop_assert!(log.is_empty());
    }
}
