use std::sync::Arc;

use async_trait::async_trait;
use calculator_sdk::{CalculatorClientV1, CalculatorError, Operation};

use crate::domain::service::Service;

/// In-process `CalculatorClientV1` that calls the dispatcher directly.
pub struct LocalCalculatorClient {
    service: Arc<Service>,
}

impl LocalCalculatorClient {
    #[must_use]
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl CalculatorClientV1 for LocalCalculatorClient {
    async fn calculate(
        &self,
        operation: Operation,
        a: i64,
        b: i64,
    ) -> Result<i64, CalculatorError> {
        self.service.calculate(operation, a, b).map_err(Into::into)
    }
}
