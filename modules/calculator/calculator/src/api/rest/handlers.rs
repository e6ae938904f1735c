use std::sync::Arc;

use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use bytes::Bytes;
use calculator_sdk::{CalculationRequest, CalculationResponse, HealthResponse};

use super::error::{
    INVALID_REQUEST_FORMAT, body_rejection_response, domain_error_response, error_response,
};
use crate::domain::Service;

/// `POST /calculate`
///
/// The body is decoded as JSON whatever its `Content-Type`.
pub async fn calculate(
    Extension(svc): Extension<Arc<Service>>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let log = svc.logger();

    let body = match body {
        Ok(body) => body,
        Err(rejection) => return body_rejection_response(log, &rejection),
    };

    let request: CalculationRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            tracing::debug!(error = %e, "failed to decode calculation request");
            return error_response(log, StatusCode::BAD_REQUEST, INVALID_REQUEST_FORMAT);
        }
    };

    match svc.dispatch(&request) {
        Ok(result) => (StatusCode::OK, Json(CalculationResponse::success(result))).into_response(),
        Err(e) => domain_error_response(log, &e),
    }
}

/// `GET /health`
#[allow(clippy::unused_async)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
