use std::time::Duration;

use http::Uri;

use crate::errors::CalculatorError;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Client settings, fixed for the lifetime of a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the service, e.g. `http://localhost:8080`.
    pub server_url: String,
    /// Upper bound for one request, connect through body read. Zero disables it.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    #[must_use]
    pub fn new(server_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            server_url: server_url.into(),
            timeout,
        }
    }

    /// Absolute URI for `path` under the configured server.
    ///
    /// Only plain `http://` URLs with a host are accepted.
    ///
    /// # Errors
    /// Returns [`CalculatorError::InvalidUrl`] when the result is not an absolute `http` URI.
    pub fn endpoint(&self, path: &str) -> Result<Uri, CalculatorError> {
        let raw = format!("{}{}", self.server_url.trim_end_matches('/'), path);
        let uri: Uri = raw
            .parse()
            .map_err(|e: http::uri::InvalidUri| CalculatorError::invalid_url(&raw, e.to_string()))?;

        match uri.scheme_str() {
            Some("http") => {}
            Some(other) => {
                return Err(CalculatorError::invalid_url(
                    &raw,
                    format!("scheme '{other}' is not supported, use http"),
                ));
            }
            None => return Err(CalculatorError::invalid_url(&raw, "missing scheme")),
        }
        if uri.authority().is_none() {
            return Err(CalculatorError::invalid_url(&raw, "missing host"));
        }
        Ok(uri)
    }
}
