//! Whole-pipeline scenarios: call site → policy → render → sink.

use std::sync::Arc;
use std::time::Duration;

use request_logger::http::context::{scope, TransportContext};
use request_logger::interceptor::{arg, CallSite, Severity};
use request_logger::ResponseEntity;

mod common;

#[derive(Debug, PartialEq, thiserror::Error)]
#[error("{0}")]
struct Boom(String);

#[tokio::test(start_paused = true)]
async fn test_timed_call_under_debug_emits_one_line() {
    const SITE: CallSite = CallSite::new("compute").timed();
    let (logger, sink) = common::logger(true, Severity::Debug);

    let result: Result<ResponseEntity<u32>, Boom> = logger
        .intercept(&SITE, &[], || async {
            tokio::time::sleep(Duration::from_millis(5)).await;
            Ok(ResponseEntity::new(axum::http::StatusCode::NOT_FOUND, None))
        })
        .await;

    assert!(result.is_ok());
    assert_eq!(sink.len(), 1);
    let line = &sink.at(Severity::Debug)[0];
    assert!(line.contains("Method compute executed in"));
    assert!(line.contains("5ms"));
}

#[tokio::test]
async fn test_inbound_request_under_all() {
    const SITE: CallSite = CallSite::controller("get_item");
    let (logger, sink) = common::logger(true, Severity::All);
    let body = serde_json::json!({"id": 1});
    let echoed = body.clone();

    let result: Result<ResponseEntity<serde_json::Value>, Boom> = scope(
        TransportContext::new("GET", "/items/1"),
        logger.intercept(&SITE, &[arg(&body)], || async move { Ok(ResponseEntity::ok(echoed)) }),
    )
    .await;

    assert!(result.is_ok());
    let debug = sink.at(Severity::Debug);
    assert_eq!(debug.len(), 1);
    assert!(debug[0].contains("GET /items/1"));
    assert!(debug[0].contains(r#"{"id":1}"#));
}

#[tokio::test]
async fn test_service_failure_under_error() {
    const SITE: CallSite = CallSite::service("process").timed();
    let (logger, sink) = common::logger(true, Severity::Error);
    let order = 17u32;
    let label = "rush";

    let result: Result<u32, Boom> = scope(
        TransportContext::new("POST", "/orders"),
        logger.intercept(&SITE, &[arg(&order), arg(&label)], || async {
            Err(Boom("boom".into()))
        }),
    )
    .await;

    assert_eq!(result, Err(Boom("boom".into())));
    assert_eq!(sink.len(), 1);
    let line = &sink.at(Severity::Error)[0];
    assert!(line.contains("boom"));
    assert!(line.contains(r#"[17, "rush"]"#));
    assert!(sink.at(Severity::Debug).is_empty());
    assert!(sink.at(Severity::Info).is_empty());
}

#[tokio::test]
async fn test_failure_passes_through_untouched() {
    const SITE: CallSite = CallSite::service("load").timed();
    let (logger, sink) = common::logger(true, Severity::All);
    let error = Arc::new(Boom("disk".into()));
    let raised = error.clone();

    struct Shared(Arc<Boom>);
    impl std::fmt::Display for Shared {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            self.0.fmt(f)
        }
    }

    let result: Result<u32, Shared> = logger
        .intercept(&SITE, &[], || async move { Err(Shared(raised)) })
        .await;

    let Err(Shared(returned)) = result else {
        panic!("expected the failure to propagate");
    };
    assert!(Arc::ptr_eq(&returned, &error));
    // Failure line only; a failed timed call reports no latency.
    assert_eq!(sink.len(), 1);
    assert!(sink.at(Severity::Debug).is_empty());
}

#[tokio::test]
async fn test_request_hook_noop_without_transport() {
    const SITE: CallSite = CallSite::controller("get_item");
    let (logger, sink) = common::logger(true, Severity::All);
    let id = 1u32;

    let result: Result<ResponseEntity<u32>, Boom> = logger
        .intercept(&SITE, &[arg(&id)], || async { Ok(ResponseEntity::ok(1)) })
        .await;

    assert!(result.is_ok());
    assert!(sink.at(Severity::Debug).is_empty());
    assert!(sink.at(Severity::Info)[0].contains("Response to unknown: HTTP 200"));
}
