//! Integer arithmetic engine.
//!
//! All operations are total on `i64`: overflow wraps in two's complement,
//! division truncates toward zero, and `i64::MIN / -1` yields `i64::MIN`.

use calc_logging::Logger;
use calculator_sdk::Operation;

use super::error::DomainError;

/// Stateless calculator; the only state is the logging capability.
///
/// Every operation logs its operands at Info before computing and the
/// result at Debug after.
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    log: Logger,
}

impl Calculator {
    #[must_use]
    pub fn new(log: Logger) -> Self {
        Self { log }
    }

    #[must_use]
    pub fn add(&self, a: i64, b: i64) -> i64 {
        self.log
            .info(format_args!("Calculating addition: {a} + {b}"));
        let result = a.wrapping_add(b);
        self.log.debug(format_args!("Addition result: {result}"));
        result
    }

    #[must_use]
    pub fn subtract(&self, a: i64, b: i64) -> i64 {
        self.log
            .info(format_args!("Calculating subtraction: {a} - {b}"));
        let result = a.wrapping_sub(b);
        self.log.debug(format_args!("Subtraction result: {result}"));
        result
    }

    #[must_use]
    pub fn multiply(&self, a: i64, b: i64) -> i64 {
        self.log
            .info(format_args!("Calculating multiplication: {a} * {b}"));
        let result = a.wrapping_mul(b);
        self.log
            .debug(format_args!("Multiplication result: {result}"));
        result
    }

    /// Truncating division.
    ///
    /// A zero divisor logs an Error and returns 0. Callers that need to tell
    /// that apart from a real zero quotient use [`Calculator::checked_divide`].
    #[must_use]
    pub fn divide(&self, a: i64, b: i64) -> i64 {
        self.log
            .info(format_args!("Calculating division: {a} / {b}"));
        if b == 0 {
            self.log.error("Division by zero");
            return 0;
        }
        let result = a.wrapping_div(b);
        self.log.debug(format_args!("Division result: {result}"));
        result
    }

    /// # Errors
    /// Returns [`DomainError::DivisionByZero`] when `b` is zero; nothing is logged in that case.
    pub fn checked_divide(&self, a: i64, b: i64) -> Result<i64, DomainError> {
        if b == 0 {
            return Err(DomainError::DivisionByZero);
        }
        Ok(self.divide(a, b))
    }

    #[must_use]
    pub fn apply(&self, operation: Operation, a: i64, b: i64) -> i64 {
        match operation {
            Operation::Add => self.add(a, b),
            Operation::Subtract => self.subtract(a, b),
            Operation::Multiply => self.multiply(a, b),
            Operation::Divide => self.divide(a, b),
        }
    }
}

#[must_use]
pub fn add(a: i64, b: i64) -> i64 {
    Calculator::default().add(a, b)
}

#[must_use]
pub fn subtract(a: i64, b: i64) -> i64 {
    Calculator::default().subtract(a, b)
}

#[must_use]
pub fn multiply(a: i64, b: i64) -> i64 {
    Calculator::default().multiply(a, b)
}

#[must_use]
pub fn divide(a: i64, b: i64) -> i64 {
    Calculator::default().divide(a, b)
}
