//! Failure responses for the REST layer.
//!
//! Every failure leaves through [`error_response`], so each one is logged at
//! Warn with its message and status code.

use axum::Json;
use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use calc_logging::Logger;
use calculator_sdk::CalculationResponse;

use crate::domain::DomainError;

pub const INVALID_REQUEST_FORMAT: &str = "Invalid request format";
pub const BODY_TOO_LARGE: &str = "Request body too large";

/// Log `message` at Warn and render the failure envelope with `status`.
pub fn error_response(log: &Logger, status: StatusCode, message: &str) -> Response {
    log.warn(format_args!(
        "Error response: {message} (code: {})",
        status.as_u16()
    ));
    (status, Json(CalculationResponse::failure(message))).into_response()
}

/// Every domain refusal is a client fault.
pub fn domain_error_response(log: &Logger, err: &DomainError) -> Response {
    error_response(log, StatusCode::BAD_REQUEST, &err.to_string())
}

/// The body could not be read, either oversized or cut off.
pub fn body_rejection_response(log: &Logger, rejection: &BytesRejection) -> Response {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        error_response(log, StatusCode::PAYLOAD_TOO_LARGE, BODY_TOO_LARGE)
    } else {
        error_response(log, StatusCode::BAD_REQUEST, INVALID_REQUEST_FORMAT)
    }
}
