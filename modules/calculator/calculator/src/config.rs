//! Server configuration.
//!
//! Layers, lowest precedence first:
//! 1. built-in defaults
//! 2. optional YAML file
//! 3. `CALC_SERVER_*` environment variables
//! 4. command-line overrides ([`ServerOverrides`])

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use calc_logging::{LogFormat, LogLevel, LoggingConfig};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};

pub const ENV_PREFIX: &str = "CALC_SERVER_";

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_READ_HEADER_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("config file does not exist: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("invalid configuration: {field} {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Settings for `calc-server`, fixed once the process has started.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub log_level: LogLevel,
    pub log_format: LogFormat,
    /// Per-connection limit for receiving a complete request head.
    #[serde(with = "crate::humantime_serde")]
    pub read_header_timeout: Duration,
    /// How long shutdown waits for in-flight connections.
    #[serde(with = "crate::humantime_serde")]
    pub shutdown_timeout: Duration,
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            log_level: LogLevel::default(),
            log_format: LogFormat::default(),
            read_header_timeout: DEFAULT_READ_HEADER_TIMEOUT,
            shutdown_timeout: DEFAULT_SHUTDOWN_TIMEOUT,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

/// Values given on the command line; `None` keeps the lower layers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerOverrides {
    pub host: Option<IpAddr>,
    pub port: Option<u16>,
    pub log_level: Option<LogLevel>,
    pub log_format: Option<LogFormat>,
    pub read_header_timeout: Option<Duration>,
    pub shutdown_timeout: Option<Duration>,
}

impl ServerConfig {
    /// Merge defaults, the optional YAML file at `path`, the environment and
    /// `overrides`, then validate the result.
    ///
    /// # Errors
    /// - [`ConfigError::MissingFile`] if `path` is given but is not a file
    /// - [`ConfigError::Load`] if a layer cannot be parsed
    /// - [`ConfigError::Invalid`] if a merged value is out of range
    pub fn load(path: Option<&Path>, overrides: ServerOverrides) -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(path) = path {
            if !path.is_file() {
                return Err(ConfigError::MissingFile(path.to_path_buf()));
            }
            figment = figment.merge(Yaml::file(path));
        }

        let mut config: Self = figment
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
            .map_err(Box::new)?;
        config.apply_overrides(overrides);

        if config.port == 0 {
            return Err(ConfigError::Invalid {
                field: "port",
                reason: "must be between 1 and 65535",
            });
        }
        config.validate()?;
        Ok(config)
    }

    pub fn apply_overrides(&mut self, overrides: ServerOverrides) {
        let ServerOverrides {
            host,
            port,
            log_level,
            log_format,
            read_header_timeout,
            shutdown_timeout,
        } = overrides;

        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        if let Some(level) = log_level {
            self.log_level = level;
        }
        if let Some(format) = log_format {
            self.log_format = format;
        }
        if let Some(timeout) = read_header_timeout {
            self.read_header_timeout = timeout;
        }
        if let Some(timeout) = shutdown_timeout {
            self.shutdown_timeout = timeout;
        }
    }

    /// Range checks that do not depend on where the values came from.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.read_header_timeout.is_zero() {
            return Err(ConfigError::Invalid {
                field: "read_header_timeout",
                reason: "must be greater than zero",
            });
        }
        if self.max_body_bytes == 0 {
            return Err(ConfigError::Invalid {
                field: "max_body_bytes",
                reason: "must be greater than zero",
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    #[must_use]
    pub fn logging(&self) -> LoggingConfig {
        LoggingConfig::new(self.log_level, self.log_format)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.bind_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(cfg.log_level, LogLevel::Info);
        assert_eq!(cfg.read_header_timeout, Duration::from_secs(5));
        assert_eq!(cfg.shutdown_timeout, Duration::from_secs(10));
    }

    #[test]
    fn yaml_then_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "host: 127.0.0.1\nport: 9000\nlog_level: debug\nread_header_timeout: 250ms"
        )
        .unwrap();

        let cfg = ServerConfig::load(
            Some(file.path()),
            ServerOverrides {
                port: Some(9100),
                log_format: Some(LogFormat::Json),
                ..ServerOverrides::default()
            },
        )
        .unwrap();

        assert_eq!(cfg.bind_addr().to_string(), "127.0.0.1:9100");
        assert_eq!(cfg.log_level, LogLevel::Debug);
        assert_eq!(cfg.log_format, LogFormat::Json);
        assert_eq!(cfg.read_header_timeout, Duration::from_millis(250));
        assert_eq!(cfg.shutdown_timeout, DEFAULT_SHUTDOWN_TIMEOUT);
    }

    #[test]
    fn missing_file_is_reported() {
        let err = ServerConfig::load(
            Some(Path::new("/definitely/not/here.yaml")),
            ServerOverrides::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingFile(_)));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "prot: 9000").unwrap();

        let err = ServerConfig::load(Some(file.path()), ServerOverrides::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)), "{err}");
    }

    #[test]
    fn zero_port_and_timeout_are_invalid() {
        let err = ServerConfig::load(
            None,
            ServerOverrides {
                port: Some(0),
                ..ServerOverrides::default()
            },
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid configuration: port must be between 1 and 65535"
        );

        let cfg = ServerConfig {
            read_header_timeout: Duration::ZERO,
            ..ServerConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
