use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;
use std::collections::BTreeMap;

/// Severity of a [`LogEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl LogLevel {
    /// Canonical symbolic name of the level, as written into the `Level`
    /// field of the output (`"Trace"`, `"Warn"`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "Trace",
            LogLevel::Debug => "Debug",
            LogLevel::Info => "Info",
            LogLevel::Warn => "Warn",
            LogLevel::Error => "Error",
            LogLevel::Fatal => "Fatal",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exception details attached to a [`LogEvent`].
///
/// `dump` is the full human-readable form of the failure: type, message and
/// the chain of underlying causes, the way the error would print when shown
/// to an operator.
#[derive(Debug, Clone)]
pub struct ExceptionRecord {
    /// Fully qualified type name, e.g. `std::io::Error`.
    pub type_name: String,
    /// The error's own message text.
    pub message: String,
    /// Full textual dump (type, message, causes).
    pub dump: String,
}

impl ExceptionRecord {
    pub fn new(
        type_name: impl Into<String>,
        message: impl Into<String>,
        dump: impl Into<String>,
    ) -> Self {
        ExceptionRecord {
            type_name: type_name.into(),
            message: message.into(),
            dump: dump.into(),
        }
    }

    /// Build an exception record from any [`std::error::Error`] value.
    ///
    /// The type name is taken from the concrete error type, the message from
    /// its `Display` form, and the dump is the message followed by one
    /// `Caused by:` line per `source()` link.
    pub fn from_error<E: std::error::Error>(error: &E) -> Self {
        let type_name = std::any::type_name::<E>().to_string();
        let message = error.to_string();

        let mut dump = format!("{}: {}", type_name, message);
        let mut source = error.source();
        while let Some(cause) = source {
            dump.push_str(&format!("\nCaused by: {}", cause));
            source = cause.source();
        }

        ExceptionRecord {
            type_name,
            message,
            dump,
        }
    }
}

/// One structured log event, as handed over by the host logging framework.
///
/// All fields are plain data; the layout never mutates an event. Timestamps
/// are kept in UTC, and the `with_timestamp` builder normalizes whatever
/// zone the host supplies.
#[derive(Debug, Clone)]
pub struct LogEvent {
    pub level: LogLevel,
    pub logger_name: Option<String>,
    /// Fully formatted message text. May span multiple lines and contain
    /// non-ASCII characters; may be absent for property-only events.
    pub message: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub exception: Option<ExceptionRecord>,
    /// Stack captured by the host at the log site; distinct from whatever
    /// trace the exception itself carries.
    pub stack_trace: Option<String>,
    pub nested_diagnostics_context: Option<String>,
    pub mapped_diagnostics_context: Option<String>,
    /// Arbitrary key/value pairs attached by the caller.
    pub properties: BTreeMap<String, Value>,
}

impl LogEvent {
    /// Create an event carrying `message`, stamped with the current time.
    pub fn new(level: LogLevel, logger_name: impl Into<String>, message: impl Into<String>) -> Self {
        LogEvent {
            level,
            logger_name: Some(logger_name.into()),
            message: Some(message.into()),
            timestamp: Utc::now(),
            exception: None,
            stack_trace: None,
            nested_diagnostics_context: None,
            mapped_diagnostics_context: None,
            properties: BTreeMap::new(),
        }
    }

    /// Replace the event time. Any time zone is accepted; the value is
    /// stored normalized to UTC.
    pub fn with_timestamp<Tz: TimeZone>(mut self, timestamp: DateTime<Tz>) -> Self {
        self.timestamp = timestamp.with_timezone(&Utc);
        self
    }

    pub fn with_exception(mut self, exception: ExceptionRecord) -> Self {
        self.exception = Some(exception);
        self
    }

    pub fn with_stack_trace(mut self, stack_trace: impl Into<String>) -> Self {
        self.stack_trace = Some(stack_trace.into());
        self
    }

    pub fn with_nested_diagnostics_context(mut self, ndc: impl Into<String>) -> Self {
        self.nested_diagnostics_context = Some(ndc.into());
        self
    }

    pub fn with_mapped_diagnostics_context(mut self, mdc: impl Into<String>) -> Self {
        self.mapped_diagnostics_context = Some(mdc.into());
        self
    }

    /// Attach a property. Non-string keys are stored under their string
    /// representation, so they round-trip through JSON unchanged.
    pub fn with_property(mut self, key: impl ToString, value: impl Into<Value>) -> Self {
        self.properties.insert(key.to_string(), value.into());
        self
    }
}
