#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Logging for the calculator workspace.
//!
//! Two halves:
//! - [`Logger`]: an explicitly constructed capability that domain code receives
//!   by value. It forwards to a [`LogSink`]; the stock sinks are
//!   [`TracingSink`] (forwards to `tracing`), [`NoopSink`] and [`MemorySink`].
//! - [`init_logging`]: installs the process-wide `tracing` subscriber for a
//!   binary, choosing the text or JSON backend at runtime.
//!
//! ```ignore
//! use calc_logging::{init_logging, Logger, LoggingConfig};
//!
//! init_logging(&LoggingConfig::default())?;
//! let log = Logger::tracing().named("engine");
//! log.info(format_args!("Calculating addition: {} + {}", 2, 3));
//! ```

mod config;
mod init;
mod logger;

pub use config::{LogFormat, LogLevel, LoggingConfig, ParseLogSettingError};
pub use init::{LoggingError, init_logging};
pub use logger::{LogSink, Logger, MemorySink, NoopSink, Severity, TracingSink};
