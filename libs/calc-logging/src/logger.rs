use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

/// Severity of a single record sent through a [`Logger`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Debug,
    Info,
    Warn,
    Error,
    /// Unrecoverable condition. Logged like `Error` with `fatal = true`;
    /// terminating the process is left to the caller.
    Fatal,
}

/// Destination for records emitted through a [`Logger`].
///
/// Implementations must not fail: a sink that cannot write drops the record.
pub trait LogSink: Send + Sync {
    fn log(&self, severity: Severity, component: &'static str, message: fmt::Arguments<'_>);
}

/// Forwards records to the `tracing` dispatcher under the `calc` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, severity: Severity, component: &'static str, message: fmt::Arguments<'_>) {
        match severity {
            Severity::Debug => tracing::debug!(target: "calc", component, "{message}"),
            Severity::Info => tracing::info!(target: "calc", component, "{message}"),
            Severity::Warn => tracing::warn!(target: "calc", component, "{message}"),
            Severity::Error => tracing::error!(target: "calc", component, "{message}"),
            Severity::Fatal => {
                tracing::error!(target: "calc", component, fatal = true, "{message}");
            }
        }
    }
}

/// Discards every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl LogSink for NoopSink {
    fn log(&self, _severity: Severity, _component: &'static str, _message: fmt::Arguments<'_>) {}
}

/// Keeps rendered records in memory, mostly for assertions in tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<(Severity, String)>>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything logged so far, oldest first.
    #[must_use]
    pub fn records(&self) -> Vec<(Severity, String)> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether any record at `severity` contains `needle`.
    #[must_use]
    pub fn contains(&self, severity: Severity, needle: &str) -> bool {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|(s, msg)| *s == severity && msg.contains(needle))
    }
}

impl LogSink for MemorySink {
    fn log(&self, severity: Severity, component: &'static str, message: fmt::Arguments<'_>) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((severity, format!("[{component}] {message}")));
    }
}

/// Leveled logging capability handed to domain code.
///
/// Cloning is cheap; clones share the sink. Every method accepts anything
/// `Display`, so both plain and formatted messages work:
///
/// ```ignore
/// log.warn("Division by zero");
/// log.info(format_args!("Calculating addition: {a} + {b}"));
/// ```
#[derive(Clone)]
pub struct Logger {
    sink: Arc<dyn LogSink>,
    component: &'static str,
}

impl Logger {
    const DEFAULT_COMPONENT: &'static str = "calc";

    /// Logger backed by the process-wide `tracing` subscriber.
    #[must_use]
    pub fn tracing() -> Self {
        Self::from_sink(Arc::new(TracingSink))
    }

    /// Logger that drops everything.
    #[must_use]
    pub fn noop() -> Self {
        Self::from_sink(Arc::new(NoopSink))
    }

    #[must_use]
    pub fn from_sink(sink: Arc<dyn LogSink>) -> Self {
        Self {
            sink,
            component: Self::DEFAULT_COMPONENT,
        }
    }

    /// Same sink, records tagged with `component`.
    #[must_use]
    pub fn named(&self, component: &'static str) -> Self {
        Self {
            sink: Arc::clone(&self.sink),
            component,
        }
    }

    #[must_use]
    pub fn component(&self) -> &'static str {
        self.component
    }

    pub fn log(&self, severity: Severity, message: impl fmt::Display) {
        self.sink
            .log(severity, self.component, format_args!("{message}"));
    }

    pub fn debug(&self, message: impl fmt::Display) {
        self.log(Severity::Debug, message);
    }

    pub fn info(&self, message: impl fmt::Display) {
        self.log(Severity::Info, message);
    }

    pub fn warn(&self, message: impl fmt::Display) {
        self.log(Severity::Warn, message);
    }

    pub fn error(&self, message: impl fmt::Display) {
        self.log(Severity::Error, message);
    }

    pub fn fatal(&self, message: impl fmt::Display) {
        self.log(Severity::Fatal, message);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::noop()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("component", &self.component)
            .finish_non_exhaustive()
    }
}
