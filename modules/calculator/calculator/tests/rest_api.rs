#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Router-level tests for `POST /calculate` and `GET /health`.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use calc_logging::{Logger, MemorySink, Severity};
use calculator::Service;
use calculator::api::rest;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

const MAX_BODY: usize = 1024;

fn app() -> (Router, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    let service = Arc::new(Service::new(&Logger::from_sink(sink.clone())));
    (rest::router(service, MAX_BODY), sink)
}

async fn send(router: Router, req: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Value) {
    let resp = router.oneshot(req).await.unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, headers, body)
}

fn post_calculate(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/calculate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

#[tokio::test]
async fn add_returns_result() {
    let (router, _) = app();
    let (status, headers, body) =
        send(router, post_calculate(r#"{"operation":"add","a":5,"b":3}"#)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"result": 8, "success": true}));
    assert_eq!(headers[header::CONTENT_TYPE], "application/json");
}

#[tokio::test]
async fn all_operations() {
    for (op, a, b, expected) in [
        ("add", -5, 3, -2),
        ("subtract", 10, 4, 6),
        ("multiply", 6, 7, 42),
        ("divide", -7, 2, -3),
    ] {
        let (router, _) = app();
        let (status, _, body) = send(
            router,
            post_calculate(json!({"operation": op, "a": a, "b": b}).to_string()),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{op}");
        assert_eq!(body["result"], expected, "{op}");
    }
}

#[tokio::test]
async fn divide_by_zero_is_bad_request() {
    let (router, sink) = app();
    let (status, _, body) =
        send(router, post_calculate(r#"{"operation":"divide","a":10,"b":0}"#)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"success": false, "error": "Division by zero"}));
    assert!(sink.contains(
        Severity::Warn,
        "Error response: Division by zero (code: 400)"
    ));
    assert!(!sink.contains(Severity::Info, "Calculating division"));
}

#[tokio::test]
async fn unknown_operation_is_bad_request() {
    let (router, _) = app();
    let (status, _, body) =
        send(router, post_calculate(r#"{"operation":"power","a":2,"b":3}"#)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"success": false, "error": "Unknown operation: power"})
    );
}

#[tokio::test]
async fn empty_object_means_empty_operation() {
    let (router, _) = app();
    let (status, _, body) = send(router, post_calculate("{}")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Unknown operation: ");
}

#[tokio::test]
async fn malformed_json_is_invalid_request_format() {
    for payload in ["not json", r#"{"operation":"add","a":1.5,"b":2}"#, ""] {
        let (router, sink) = app();
        let (status, _, body) = send(router, post_calculate(payload)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{payload:?}");
        assert_eq!(
            body,
            json!({"success": false, "error": "Invalid request format"})
        );
        assert!(sink.contains(Severity::Warn, "Invalid request format (code: 400)"));
    }
}

#[tokio::test]
async fn decoding_is_strict() {
    for payload in ["null", r#"{"operation":"add","a":1,"b":2} {}"#] {
        let (router, _) = app();
        let (status, _, body) = send(router, post_calculate(payload)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{payload:?}");
        assert_eq!(body["error"], "Invalid request format", "{payload:?}");
    }

    // Keys are case-sensitive, so a capitalized key is an unknown field.
    let (router, _) = app();
    let (status, _, body) = send(router, post_calculate(r#"{"Operation":"add","a":1,"b":2}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Unknown operation: ");
}

#[tokio::test]
async fn content_type_is_not_required() {
    let (router, _) = app();
    let req = Request::builder()
        .method(Method::POST)
        .uri("/calculate")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from(r#"{"operation":"multiply","a":3,"b":4}"#))
        .unwrap();

    let (status, _, body) = send(router, req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], 12);
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let (router, _) = app();
    let padding = "x".repeat(MAX_BODY * 2);
    let payload = json!({"operation": "add", "a": 1, "b": 2, "pad": padding}).to_string();

    let (status, _, body) = send(router, post_calculate(payload)).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn health_reports_status_true() {
    let (router, _) = app();
    let req = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let (status, _, body) = send(router, req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": true}));
}

#[tokio::test]
async fn wrong_method_and_unknown_path() {
    let (router, _) = app();
    let req = Request::builder()
        .method(Method::GET)
        .uri("/calculate")
        .body(Body::empty())
        .unwrap();
    let (status, _, _) = send(router, req).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

    let (router, _) = app();
    let req = Request::builder()
        .method(Method::POST)
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let (status, _, _) = send(router, req).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

    let (router, _) = app();
    let req = Request::builder().uri("/nope").body(Body::empty()).unwrap();
    let (status, _, _) = send(router, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn request_id_is_generated_or_propagated() {
    let (router, _) = app();
    let req = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let (_, headers, _) = send(router, req).await;
    assert!(headers.contains_key("x-request-id"));

    let (router, _) = app();
    let req = Request::builder()
        .uri("/health")
        .header("x-request-id", "abc-123")
        .body(Body::empty())
        .unwrap();
    let (_, headers, _) = send(router, req).await;
    assert_eq!(headers["x-request-id"], "abc-123");
}
