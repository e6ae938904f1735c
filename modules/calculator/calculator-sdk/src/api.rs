//! Calculator API trait
//!
//! Contract shared by the HTTP client and the in-process client.

use async_trait::async_trait;

use crate::errors::CalculatorError;
use crate::models::Operation;

/// Calculator API trait
///
/// Implemented by [`crate::HttpCalculatorClient`] for the remote service and by
/// the calculator module's local client for in-process use.
#[async_trait]
pub trait CalculatorClientV1: Send + Sync {
    /// Apply `operation` to `a` and `b`.
    async fn calculate(&self, operation: Operation, a: i64, b: i64)
    -> Result<i64, CalculatorError>;
}
