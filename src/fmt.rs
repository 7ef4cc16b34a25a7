use std::collections::BTreeMap;
use std::fmt;

use chrono::Utc;
use serde_json::Value;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

use crate::event::{LogEvent, LogLevel};
use crate::layout::JsonEventLayout;

// tracing has no Fatal; events can only reach Error here.
impl From<tracing::Level> for LogLevel {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::TRACE => LogLevel::Trace,
            tracing::Level::DEBUG => LogLevel::Debug,
            tracing::Level::INFO => LogLevel::Info,
            tracing::Level::WARN => LogLevel::Warn,
            tracing::Level::ERROR => LogLevel::Error,
        }
    }
}

/// Collects a tracing event's fields: `message` is captured separately,
/// every other field lands in the property map.
#[derive(Default)]
pub struct EventVisitor {
    pub message: Option<String>,
    pub properties: BTreeMap<String, Value>,
}

impl Visit for EventVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.properties
                .insert(field.name().to_string(), Value::String(value.to_string()));
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.properties
            .insert(field.name().to_string(), Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.properties
            .insert(field.name().to_string(), Value::from(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.properties
            .insert(field.name().to_string(), Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.properties
            .insert(field.name().to_string(), Value::from(value));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        // The message of `info!("...")`-style events arrives here as
        // `fmt::Arguments`, whose Debug form is the plain text.
        if field.name() == "message" {
            self.message = Some(format!("{:?}", value));
        } else {
            self.properties
                .insert(field.name().to_string(), Value::String(format!("{:?}", value)));
        }
    }
}

/// Convert a tracing event into a [`LogEvent`], stamped with the current
/// time. The event target becomes the logger name and recorded fields
/// become properties.
pub fn capture_event(event: &Event<'_>) -> LogEvent {
    let mut visitor = EventVisitor::default();
    event.record(&mut visitor);

    let meta = event.metadata();
    LogEvent {
        level: LogLevel::from(*meta.level()),
        logger_name: Some(meta.target().to_string()),
        message: visitor.message,
        timestamp: Utc::now(),
        exception: None,
        stack_trace: None,
        nested_diagnostics_context: None,
        mapped_diagnostics_context: None,
        properties: visitor.properties,
    }
}

impl<S, N> FormatEvent<S, N> for JsonEventLayout
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let log_event = capture_event(event);
        let line = self.render(&log_event).map_err(|_| fmt::Error)?;
        writer.write_str(&line)?;
        writer.write_char('\n')
    }
}
