//! Shared utilities for integration tests.

use std::sync::Arc;

use arc_swap::ArcSwap;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use tower::ServiceExt;

use request_logger::app::{self, AppState};
use request_logger::interceptor::{CapturingSink, LoggingConfiguration, RequestLogger, Severity};

/// Logger writing into a fresh capturing sink.
#[allow(dead_code)]
pub fn logger(enabled: bool, level: Severity) -> (RequestLogger, Arc<CapturingSink>) {
    let sink = Arc::new(CapturingSink::new());
    let logger = RequestLogger::new(LoggingConfiguration::new(enabled, level), sink.clone());
    (logger, sink)
}

/// The items router with a capturing logger behind it.
#[allow(dead_code)]
pub fn items_app(enabled: bool, level: Severity) -> (Router, Arc<CapturingSink>) {
    let (logger, sink) = logger(enabled, level);
    let state = AppState::new(Arc::new(ArcSwap::from_pointee(logger)));
    (app::router(state), sink)
}

/// Send one request through the router and collect status and body.
#[allow(dead_code)]
pub async fn send(router: &Router, method: &str, uri: &str, json: Option<&str>) -> (StatusCode, String) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match json {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let response = router
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}
