//! Domain errors for the calculator module.

use calculator_sdk::{CalculatorError, UnknownOperation};
use thiserror::Error;

/// Why a calculation request was refused.
///
/// The `Display` text is exactly the message returned to callers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The operation name is not one of add, subtract, multiply or divide.
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    #[error("Division by zero")]
    DivisionByZero,
}

impl From<UnknownOperation> for DomainError {
    fn from(UnknownOperation(name): UnknownOperation) -> Self {
        Self::UnknownOperation(name)
    }
}

impl From<DomainError> for CalculatorError {
    fn from(e: DomainError) -> Self {
        Self::Rejected(e.to_string())
    }
}
