//! HTTP client implementation of `CalculatorClientV1`.

use async_trait::async_trait;
use bytes::Bytes;
use http::{Method, Request, StatusCode, Uri, header};
use http_body_util::{BodyExt, Full};
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::api::CalculatorClientV1;
use crate::config::ClientConfig;
use crate::errors::CalculatorError;
use crate::models::{
    CALCULATE_PATH, CalculationRequest, CalculationResponse, HEALTH_PATH, HealthResponse,
    Operation,
};

/// Client for the calculator HTTP service.
///
/// The only way to obtain one is [`HttpCalculatorClient::connect`], which runs
/// the health probe first: if the service is not healthy there is no client
/// and no calculation call can be made.
///
/// Each call is bounded by [`ClientConfig::timeout`] unless it is zero. Calls
/// are never retried.
#[derive(Debug, Clone)]
pub struct HttpCalculatorClient {
    http: Client<HttpConnector, Full<Bytes>>,
    config: ClientConfig,
    health_uri: Uri,
    calculate_uri: Uri,
}

impl HttpCalculatorClient {
    /// Build a client and verify the service with `GET /health`.
    ///
    /// # Errors
    /// - [`CalculatorError::InvalidUrl`] if the server URL is not a usable `http` URL
    /// - [`CalculatorError::Unavailable`] if the probe fails, times out, gets a
    ///   non-200 answer or a payload with `status: false`
    pub async fn connect(config: ClientConfig) -> Result<Self, CalculatorError> {
        let client = Self {
            http: Client::builder(TokioExecutor::new()).build_http(),
            health_uri: config.endpoint(HEALTH_PATH)?,
            calculate_uri: config.endpoint(CALCULATE_PATH)?,
            config,
        };
        client.check_health().await?;
        debug!(server = %client.config.server_url, "calculator service is healthy");
        Ok(client)
    }

    async fn check_health(&self) -> Result<(), CalculatorError> {
        let request = Request::builder()
            .method(Method::GET)
            .uri(self.health_uri.clone())
            .body(Full::new(Bytes::new()))?;

        let (status, body) = self.send(request).await.map_err(|e| {
            warn!(error = %e, "health check failed");
            CalculatorError::Unavailable(format!("health check failed: {e}"))
        })?;

        if status != StatusCode::OK {
            return Err(CalculatorError::Unavailable(format!(
                "health check failed with status: {status}"
            )));
        }

        let health: HealthResponse = decode(&body).map_err(|e| {
            CalculatorError::Unavailable(format!("failed to parse health response: {e}"))
        })?;
        if health.status {
            Ok(())
        } else {
            Err(CalculatorError::Unavailable(
                "service reported unhealthy status".to_owned(),
            ))
        }
    }

    /// Execute one exchange and read the whole body, bounded by the timeout.
    /// A zero timeout leaves the exchange unbounded.
    async fn send(
        &self,
        request: Request<Full<Bytes>>,
    ) -> Result<(StatusCode, Bytes), CalculatorError> {
        let exchange = async {
            let response = self
                .http
                .request(request)
                .await
                .map_err(|e| CalculatorError::transport(&e))?;
            let status = response.status();
            let body = response
                .into_body()
                .collect()
                .await
                .map_err(|e| CalculatorError::transport(&e))?
                .to_bytes();
            Ok::<_, CalculatorError>((status, body))
        };

        if self.config.timeout.is_zero() {
            return exchange.await;
        }
        tokio::time::timeout(self.config.timeout, exchange)
            .await
            .map_err(|_| CalculatorError::Timeout(self.config.timeout))?
    }
}

#[async_trait]
impl CalculatorClientV1 for HttpCalculatorClient {
    async fn calculate(
        &self,
        operation: Operation,
        a: i64,
        b: i64,
    ) -> Result<i64, CalculatorError> {
        let payload = serde_json::to_vec(&CalculationRequest::new(operation, a, b))?;
        let request = Request::builder()
            .method(Method::POST)
            .uri(self.calculate_uri.clone())
            .header(header::CONTENT_TYPE, "application/json")
            .body(Full::new(Bytes::from(payload)))?;

        debug!(%operation, a, b, "sending calculation request");
        let (status, body) = self.send(request).await?;

        if status != StatusCode::OK {
            return Err(CalculatorError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        let response: CalculationResponse = decode(&body)?;
        response.into_result().map_err(CalculatorError::Api)
    }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, CalculatorError> {
    Ok(serde_json::from_slice(body)?)
}
