use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderName, Request};
use axum::routing::{get, post};
use axum::{Extension, Router};
use calculator_sdk::{CALCULATE_PATH, HEALTH_PATH};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::domain::Service;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Build the service router.
///
/// Unknown paths answer 404 and known paths with the wrong method answer
/// 405, both with axum's default empty bodies.
///
/// Request flow, outermost first:
/// `SetRequestId` -> `PropagateRequestId` -> Trace -> `BodyLimit` -> handlers.
pub fn router(service: Arc<Service>, max_body_bytes: usize) -> Router {
    let mut router = Router::new()
        .route(CALCULATE_PATH, post(handlers::calculate))
        .route(HEALTH_PATH, get(handlers::health_check))
        .layer(Extension(service));

    // 4) Body limit
    router = router.layer(DefaultBodyLimit::max(max_body_bytes));

    // 3) Trace
    router = router.layer(TraceLayer::new_for_http().make_span_with(
        |req: &Request<axum::body::Body>| {
            let rid = req
                .headers()
                .get(REQUEST_ID_HEADER)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("n/a");

            tracing::info_span!(
                "http_request",
                method = %req.method(),
                uri = %req.uri().path(),
                request_id = %rid,
            )
        },
    ));

    // 2) PropagateRequestId
    let x_request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    router = router.layer(PropagateRequestIdLayer::new(x_request_id.clone()));

    // 1) SetRequestId (registered last, runs first)
    router.layer(SetRequestIdLayer::new(x_request_id, MakeRequestUuid))
}
