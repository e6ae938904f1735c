//! Wire models shared by the service and its clients.
//!
//! Request, response and health payloads are plain JSON objects:
//!
//! ```text
//! POST /calculate  {"operation":"add","a":5,"b":3}
//! 200              {"result":8,"success":true}
//! 400              {"success":false,"error":"Division by zero"}
//! GET /health 200  {"status":true}
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const CALCULATE_PATH: &str = "/calculate";
pub const HEALTH_PATH: &str = "/health";

/// Arithmetic operation selected by exact, case-sensitive name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    pub const ALL: [Self; 4] = [Self::Add, Self::Subtract, Self::Multiply, Self::Divide];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The operation name matched none of the supported operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown operation: {0}")]
pub struct UnknownOperation(pub String);

impl FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| UnknownOperation(s.to_owned()))
    }
}

/// Body of `POST /calculate`.
///
/// `operation` stays a string on the wire so that unsupported names decode
/// and can be rejected with their literal value. Missing fields take their
/// zero value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculationRequest {
    pub operation: String,
    pub a: i64,
    pub b: i64,
}

impl CalculationRequest {
    #[must_use]
    pub fn new(operation: Operation, a: i64, b: i64) -> Self {
        Self {
            operation: operation.as_str().to_owned(),
            a,
            b,
        }
    }

    /// Resolve the requested operation.
    ///
    /// # Errors
    /// Returns [`UnknownOperation`] carrying the literal name when it is not supported.
    pub fn operation(&self) -> Result<Operation, UnknownOperation> {
        self.operation.parse()
    }
}

/// Result envelope for `POST /calculate`.
///
/// Either `result` + `success = true`, or `success = false` + `error`.
/// Build it with [`CalculationResponse::success`] or [`CalculationResponse::failure`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<i64>,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CalculationResponse {
    #[must_use]
    pub fn success(result: i64) -> Self {
        Self {
            result: Some(result),
            success: true,
            error: None,
        }
    }

    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            result: None,
            success: false,
            error: Some(message.into()),
        }
    }

    /// Collapse the envelope into the result or the server-provided message.
    ///
    /// # Errors
    /// Returns the `error` message (empty if absent) when `success` is false.
    pub fn into_result(self) -> Result<i64, String> {
        if self.success {
            Ok(self.result.unwrap_or_default())
        } else {
            Err(self.error.unwrap_or_default())
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: bool,
}

impl HealthResponse {
    #[must_use]
    pub fn healthy() -> Self {
        Self { status: true }
    }
}
