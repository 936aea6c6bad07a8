//! Request logging observed through the items API.

use axum::http::StatusCode;
use request_logger::config::{ResolvedConfig, ServiceConfig};
use request_logger::interceptor::{LoggingConfiguration, Severity};
use request_logger::HttpServer;

mod common;

#[tokio::test]
async fn test_create_logs_request_and_response() {
    let (app, sink) = common::items_app(true, Severity::All);

    let (status, body) = common::send(&app, "POST", "/items", Some(r#"{"name":"widget"}"#)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, r#"{"id":1,"name":"widget"}"#);

    let debug = sink.at(Severity::Debug);
    assert_eq!(debug.len(), 1);
    assert!(debug[0].ends_with(r#"Request: POST /items with body: {"name":"widget"}"#));

    let info = sink.at(Severity::Info);
    assert_eq!(info.len(), 1);
    assert!(info[0].contains("Response to /items: HTTP 201"));
    assert!(info[0].contains("[Item]"));
    assert!(info[0].ends_with(r#"-> {"id":1,"name":"widget"}"#));
}

#[tokio::test]
async fn test_missing_item_is_error_and_timed() {
    let (app, sink) = common::items_app(true, Severity::All);

    let (status, _) = common::send(&app, "GET", "/items/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let errors = sink.at(Severity::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].ends_with("Response to /items/99: HTTP 404 null"));

    let debug = sink.at(Severity::Debug);
    assert!(debug.iter().any(|l| l.ends_with("Request: GET /items/99 with body: 99")));
    assert!(debug.iter().any(|l| l.contains("Method get_item executed in")));
    assert!(sink.at(Severity::Warning).is_empty());
}

#[tokio::test]
async fn test_not_found_suppressed_under_info() {
    let (app, sink) = common::items_app(true, Severity::Info);

    let (status, _) = common::send(&app, "GET", "/items/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_service_failure_and_response_under_error() {
    let (app, sink) = common::items_app(true, Severity::Error);

    let (status, _) = common::send(&app, "DELETE", "/items/5", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let errors = sink.at(Severity::Error);
    assert_eq!(errors.len(), 2);
    assert!(errors[0].contains("Error in method delete with arguments: [5]"));
    assert!(errors[0].contains("Message: item 5 not found"));
    assert!(errors[1].contains("Response to /items/5: HTTP 404"));
    assert_eq!(sink.len(), 2);
}

#[tokio::test]
async fn test_bad_request_is_warning() {
    let (app, sink) = common::items_app(true, Severity::Warning);

    let (status, _) = common::send(&app, "POST", "/items", Some(r#"{"name":""}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let warnings = sink.at(Severity::Warning);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("Response to /items: HTTP 400 null"));
    assert_eq!(sink.len(), 1);
}

#[tokio::test]
async fn test_plain_value_response_only() {
    let (app, sink) = common::items_app(true, Severity::All);

    let (status, body) = common::send(&app, "GET", "/items/count", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "0");

    let info = sink.at(Severity::Info);
    assert_eq!(info.len(), 1);
    assert!(info[0].contains("Response to /items/count:"));
    assert!(info[0].contains("[usize]"));
    assert!(info[0].ends_with("-> 0"));

    // count_items is response-only; the only DEBUG line is the timed list call.
    let debug = sink.at(Severity::Debug);
    assert_eq!(debug.len(), 1);
    assert!(debug[0].contains("Method list executed in"));
}

#[tokio::test]
async fn test_disabled_logger_is_silent() {
    let (app, sink) = common::items_app(false, Severity::All);

    common::send(&app, "POST", "/items", Some(r#"{"name":"a"}"#)).await;
    common::send(&app, "GET", "/items/1", None).await;
    common::send(&app, "DELETE", "/items/42", None).await;
    common::send(&app, "GET", "/items", None).await;

    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_round_trip_through_api() {
    let (app, _) = common::items_app(true, Severity::None);

    common::send(&app, "POST", "/items", Some(r#"{"name":"a"}"#)).await;
    common::send(&app, "POST", "/items", Some(r#"{"name":"b"}"#)).await;

    let (status, body) = common::send(&app, "GET", "/items", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"[{"id":1,"name":"a"},{"id":2,"name":"b"}]"#);

    let (status, _) = common::send(&app, "DELETE", "/items/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, body) = common::send(&app, "GET", "/items/2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"id":2,"name":"b"}"#);
}

#[tokio::test]
async fn test_server_router_serves_items() {
    let server = HttpServer::new(ResolvedConfig {
        service: ServiceConfig::default(),
        logging: LoggingConfiguration::disabled(),
    });
    let app = server.router();

    let (status, body) = common::send(&app, "POST", "/items", Some(r#"{"name":"a"}"#)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, r#"{"id":1,"name":"a"}"#);

    let (status, body) = common::send(&app, "GET", "/items/count", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "1");
}
