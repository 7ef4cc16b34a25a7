use std::sync::Arc;

use serde_json::Value;

use crate::config::LayoutConfig;
use crate::environment::HostEnvironment;
use crate::event::LogEvent;
use crate::record::{EventFields, ExceptionInfo, JsonEvent};
use crate::system_env::SystemEnvironment;

/// Error returned when a [`LogEvent`] cannot be rendered.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    /// The composed record could not be serialized to JSON text.
    #[error("failed to serialize log event to JSON: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Renders [`LogEvent`]s as single-line Logstash/GELF-style JSON documents.
///
/// Each call to [`render`](Self::render) is a pure, stateless
/// transformation: it builds a fresh output record from the event, the
/// immutable configuration and a per-call snapshot of the injected
/// [`HostEnvironment`], then serializes it compactly with absent fields
/// omitted. The layout holds no mutable state, so one instance can render
/// events from any number of threads concurrently.
///
/// ```
/// use tracing_logstash_layout::config::LayoutConfig;
/// use tracing_logstash_layout::event::{LogEvent, LogLevel};
/// use tracing_logstash_layout::layout::JsonEventLayout;
///
/// let layout = JsonEventLayout::new(LayoutConfig::default());
/// let event = LogEvent::new(LogLevel::Info, "app::startup", "listening on :8080");
/// let line = layout.render(&event).unwrap();
/// assert!(line.contains("\"@message\":\"listening on :8080\""));
/// ```
pub struct JsonEventLayout {
    config: LayoutConfig,
    environment: Arc<dyn HostEnvironment>,
}

impl JsonEventLayout {
    /// Create a layout backed by the real
    /// [`SystemEnvironment`](crate::system_env::SystemEnvironment).
    pub fn new(config: LayoutConfig) -> Self {
        Self::with_environment(config, Arc::new(SystemEnvironment::new()))
    }

    /// Create a layout with an explicit environment, typically a
    /// [`StaticEnvironment`](crate::static_env::StaticEnvironment) fixture.
    pub fn with_environment(config: LayoutConfig, environment: Arc<dyn HostEnvironment>) -> Self {
        JsonEventLayout {
            config,
            environment,
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Render one event. The returned line is compact JSON with no
    /// trailing newline.
    pub fn render(&self, event: &LogEvent) -> Result<String, LayoutError> {
        let record = self.build_record(event);
        Ok(serde_json::to_string(&record.to_json())?)
    }

    fn build_record(&self, event: &LogEvent) -> JsonEvent {
        let (short_message, full_message) = self.split_message(event.message.as_deref());
        JsonEvent {
            source_host: self.environment.machine_name(),
            short_message,
            full_message,
            timestamp: event.timestamp,
            fields: self.collect_fields(event),
        }
    }

    /// Produce the `@message` / `@full_message` pair.
    ///
    /// With short-message mode off the complete text travels in `@message`
    /// alone. With it on, `@message` is bounded by the configured length
    /// and `@full_message` always carries the untruncated text.
    fn split_message(&self, message: Option<&str>) -> (Option<String>, Option<String>) {
        let message = match message {
            Some(message) => message,
            None => return (None, None),
        };
        if !self.config.enable_short_message {
            return (Some(message.to_string()), None);
        }
        (Some(self.shorten(message)), Some(message.to_string()))
    }

    /// Position-based truncation, counting characters rather than bytes so
    /// the cut never lands inside a UTF-8 sequence. Not word-aware.
    fn shorten(&self, message: &str) -> String {
        if message.chars().count() <= self.config.short_message_length {
            return message.to_string();
        }
        let head: String = message
            .chars()
            .take(self.config.effective_head_length())
            .collect();
        head + &self.config.append_to_shortened_message
    }

    fn collect_fields(&self, event: &LogEvent) -> EventFields {
        EventFields {
            exception: exception_info(event),
            logger_name: event.logger_name.clone(),
            correlation_context: self.correlation_context(event),
            level: event.level.as_str().to_string(),
            thread_name: self.environment.thread_name(),
            process_name: self.environment.process_name(),
            thread_id: self.environment.thread_id(),
            process_id: self.environment.process_id(),
            user_name: self.environment.user_name(),
            app_domain_name: self.environment.app_domain_name(),
            nested_diagnostics_context: event.nested_diagnostics_context.clone(),
            mapped_diagnostics_context: event.mapped_diagnostics_context.clone(),
            properties: event
                .properties
                .iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        }
    }

    /// Look up the configured correlation key among the event properties.
    /// String values pass through verbatim; anything else is rendered as
    /// its compact JSON text.
    fn correlation_context(&self, event: &LogEvent) -> Option<String> {
        let value = event.properties.get(&self.config.correlation_context_key)?;
        Some(match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        })
    }
}

fn exception_info(event: &LogEvent) -> Option<ExceptionInfo> {
    let exception = event.exception.as_ref()?;
    Some(ExceptionInfo {
        exception_type: exception.type_name.clone(),
        exception_message: exception.message.clone(),
        exception_dump: exception.dump.clone(),
        stack_trace: event.stack_trace.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::LogLevel;
    use crate::static_env::StaticEnvironment;

    const GERMAN_MESSAGE: &str =
        "My message with some newlines and german öäüß Sonderzeichen!";

    fn layout(length: usize, suffix: &str) -> JsonEventLayout {
        let config = LayoutConfig {
            enable_short_message: true,
            short_message_length: length,
            append_to_shortened_message: suffix.to_string(),
            ..LayoutConfig::default()
        };
        JsonEventLayout::with_environment(config, Arc::new(StaticEnvironment::default()))
    }

    #[test]
    fn shorten_keeps_messages_within_the_limit() {
        let layout = layout(200, "...");
        assert_eq!(layout.shorten(GERMAN_MESSAGE), GERMAN_MESSAGE);
    }

    #[test]
    fn shorten_cuts_at_the_limit_minus_suffix() {
        let layout = layout(20, "___");
        assert_eq!(layout.shorten(GERMAN_MESSAGE), "My message with s___");
    }

    #[test]
    fn shorten_with_empty_suffix_cuts_at_the_limit() {
        let layout = layout(20, "");
        assert_eq!(layout.shorten(GERMAN_MESSAGE), "My message with some");
    }

    #[test]
    fn shorten_counts_characters_not_bytes() {
        // Four characters, eight bytes; a byte-based cut at 6 would split
        // the third umlaut.
        let layout = layout(3, "");
        assert_eq!(layout.shorten("öäüß"), "öäü");
    }

    #[test]
    fn oversized_suffix_degrades_to_the_bare_suffix() {
        let layout = layout(2, "12345");
        assert_eq!(layout.shorten(GERMAN_MESSAGE), "12345");
    }

    #[test]
    fn split_returns_nothing_for_absent_messages() {
        let layout = layout(20, "___");
        assert_eq!(layout.split_message(None), (None, None));
    }

    #[test]
    fn split_disabled_emits_only_the_complete_message() {
        let config = LayoutConfig::default();
        let layout =
            JsonEventLayout::with_environment(config, Arc::new(StaticEnvironment::default()));

        let (short, full) = layout.split_message(Some(GERMAN_MESSAGE));
        assert_eq!(short.as_deref(), Some(GERMAN_MESSAGE));
        assert_eq!(full, None);
    }

    #[test]
    fn split_enabled_always_carries_the_full_message() {
        let layout = layout(20, "___");

        let (short, full) = layout.split_message(Some(GERMAN_MESSAGE));
        assert_eq!(short.as_deref(), Some("My message with s___"));
        assert_eq!(full.as_deref(), Some(GERMAN_MESSAGE));

        let (short, full) = layout.split_message(Some("tiny"));
        assert_eq!(short.as_deref(), Some("tiny"));
        assert_eq!(full.as_deref(), Some("tiny"));
    }

    #[test]
    fn correlation_context_uses_the_configured_key() {
        let config = LayoutConfig {
            correlation_context_key: "_gfkCorrelationContext_".to_string(),
            ..LayoutConfig::default()
        };
        let layout =
            JsonEventLayout::with_environment(config, Arc::new(StaticEnvironment::default()));

        let event = LogEvent::new(LogLevel::Info, "test", "msg")
            .with_property("_gfkCorrelationContext_", "req-5512");
        assert_eq!(layout.correlation_context(&event).as_deref(), Some("req-5512"));

        let unrelated = LogEvent::new(LogLevel::Info, "test", "msg")
            .with_property("__correlationContext__", "req-5512");
        assert_eq!(layout.correlation_context(&unrelated), None);
    }

    #[test]
    fn non_string_correlation_values_render_as_json_text() {
        let layout = layout(20, "___");
        let event =
            LogEvent::new(LogLevel::Info, "test", "msg").with_property("__correlationContext__", 42);

        assert_eq!(layout.correlation_context(&event).as_deref(), Some("42"));
    }
}
