use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;

use crate::config::{LogFormat, LoggingConfig};

#[derive(thiserror::Error, Debug)]
pub enum LoggingError {
    #[error("invalid log filter: {0}")]
    Filter(#[from] ParseError),

    #[error("failed to install log subscriber: {0}")]
    Install(String),
}

/// Install the global subscriber for this process.
///
/// The level comes from `config`; a non-empty `RUST_LOG` takes precedence and
/// accepts the full `EnvFilter` directive syntax. Records go to stderr so that
/// interactive output on stdout stays clean; colors are used only when stderr
/// is a terminal.
///
/// # Errors
/// Returns [`LoggingError::Filter`] if `RUST_LOG` cannot be parsed and
/// [`LoggingError::Install`] if a global subscriber is already set.
pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(config, rust_log.as_deref())?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);

    let installed = match config.format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    installed.map_err(|e| LoggingError::Install(e.to_string()))?;
    tracing::debug!(level = %config.level, format = %config.format, "logging initialized");
    Ok(())
}

/// `rust_log` wins over the configured level unless it is blank.
fn build_filter(config: &LoggingConfig, rust_log: Option<&str>) -> Result<EnvFilter, LoggingError> {
    match rust_log {
        Some(directives) if !directives.trim().is_empty() => Ok(EnvFilter::try_new(directives)?),
        _ => Ok(EnvFilter::new(config.level.as_str())),
    }
}
