use calc_logging::Logger;
use calculator_sdk::{CalculationRequest, Operation};

use super::engine::Calculator;
use super::error::DomainError;

/// Operation dispatcher.
///
/// Resolves the requested operation, refuses inputs the engine must never
/// see, and forwards the rest to the [`Calculator`].
#[derive(Debug, Clone)]
pub struct Service {
    calculator: Calculator,
    log: Logger,
}

impl Service {
    /// Dispatcher and engine sharing `log`, tagged `dispatcher` and `engine`.
    #[must_use]
    pub fn new(log: &Logger) -> Self {
        Self::with_calculator(Calculator::new(log.named("engine")), log.named("dispatcher"))
    }

    #[must_use]
    pub fn with_calculator(calculator: Calculator, log: Logger) -> Self {
        Self { calculator, log }
    }

    #[must_use]
    pub fn logger(&self) -> &Logger {
        &self.log
    }

    /// Handle one decoded `POST /calculate` body.
    ///
    /// # Errors
    /// - [`DomainError::UnknownOperation`] with the literal name (possibly empty)
    /// - [`DomainError::DivisionByZero`] for `divide` with `b == 0`
    pub fn dispatch(&self, request: &CalculationRequest) -> Result<i64, DomainError> {
        self.log.info(format_args!(
            "Received calculation request: operation={:?}, a={}, b={}",
            request.operation, request.a, request.b
        ));

        let operation = request.operation()?;
        self.calculate(operation, request.a, request.b)
    }

    /// # Errors
    /// Returns [`DomainError::DivisionByZero`] for `divide` with `b == 0`; the
    /// engine is not invoked in that case.
    pub fn calculate(&self, operation: Operation, a: i64, b: i64) -> Result<i64, DomainError> {
        match operation {
            Operation::Divide if b == 0 => Err(DomainError::DivisionByZero),
            op => Ok(self.calculator.apply(op, a, b)),
        }
    }
}
