//! Error types for the calculator SDK.

use std::fmt;
use std::num::ParseIntError;
use std::time::Duration;

/// Which operand of `<operation> <a> <b>` failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    First,
    Second,
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::First => "first",
            Self::Second => "second",
        })
    }
}

#[derive(thiserror::Error, Debug)]
pub enum CalculatorError {
    /// Fewer than three tokens in an interactive command.
    #[error("invalid input, expected format: <operation> <number1> <number2>")]
    InvalidInput,

    #[error(
        "unknown operation: {0}, supported operations are add, subtract, multiply, and divide"
    )]
    UnknownOperation(String),

    #[error("{operand} number is invalid: {source}")]
    InvalidOperand {
        operand: Operand,
        #[source]
        source: ParseIntError,
    },

    #[error("invalid server URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("failed to build request: {0}")]
    RequestBuild(#[from] http::Error),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// Non-200 answer; `body` is the raw response text.
    #[error("API error (status {status}): {body}")]
    Status { status: u16, body: String },

    #[error("failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The service answered `success = false`.
    #[error("API error: {0}")]
    Api(String),

    /// An in-process calculator refused the operands.
    #[error("{0}")]
    Rejected(String),

    /// Health probe did not pass; no calculation may be attempted.
    #[error("calculator service is not available: {0}")]
    Unavailable(String),
}

impl CalculatorError {
    #[must_use]
    pub fn invalid_operand(operand: Operand, source: ParseIntError) -> Self {
        Self::InvalidOperand { operand, source }
    }

    #[must_use]
    pub fn invalid_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Render `err` with its whole source chain, e.g.
    /// `client error (Connect): tcp connect error: Connection refused`.
    pub(crate) fn transport(err: &(dyn std::error::Error + 'static)) -> Self {
        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            let text = cause.to_string();
            if !message.contains(&text) {
                message.push_str(": ");
                message.push_str(&text);
            }
            source = cause.source();
        }
        Self::Transport(message)
    }
}
