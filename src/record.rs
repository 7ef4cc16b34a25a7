use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Wire names of every JSON key the layout emits.
///
/// Downstream log consumers match on these exact strings, so they live in
/// one table instead of being scattered over serializer attributes. The
/// `Deserialize` derives below carry the same literals; a test keeps the
/// two in sync.
pub mod keys {
    pub const SOURCE_HOST: &str = "@source_host";
    pub const MESSAGE: &str = "@message";
    pub const FULL_MESSAGE: &str = "@full_message";
    pub const TIMESTAMP: &str = "@timestamp";
    pub const FIELDS: &str = "@fields";

    pub const EXCEPTION: &str = "exception";
    pub const LOGGER_NAME: &str = "LoggerName";
    pub const CORRELATION_CONTEXT: &str = "CorrelationContext";
    pub const LEVEL: &str = "Level";
    pub const THREAD_NAME: &str = "ThreadName";
    pub const PROCESS_NAME: &str = "ProcessName";
    pub const THREAD_ID: &str = "ThreadId";
    pub const PROCESS_ID: &str = "ProcessId";
    pub const USER_NAME: &str = "UserName";
    pub const APP_DOMAIN_NAME: &str = "AppDomainName";
    pub const NESTED_DIAGNOSTICS_CONTEXT: &str = "NestedDiagnosticsContext";
    pub const MAPPED_DIAGNOSTICS_CONTEXT: &str = "MappedDiagnosticsContext";
    pub const PROPERTIES: &str = "Properties";

    pub const EXCEPTION_TYPE: &str = "ExceptionType";
    pub const EXCEPTION_MESSAGE: &str = "ExceptionMessage";
    pub const EXCEPTION_DUMP: &str = "ExceptionDump";
    pub const STACK_TRACE: &str = "StackTrace";
}

/// The composed output document. Built fresh for every rendered event and
/// discarded after serialization.
///
/// `to_json` performs the explicit field-to-key mapping; absent values are
/// skipped there, never emitted as JSON `null`. The `Deserialize` derive
/// lets consumers and tests parse a rendered line back into this type.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JsonEvent {
    #[serde(rename = "@source_host")]
    pub source_host: String,
    #[serde(rename = "@message", default)]
    pub short_message: Option<String>,
    #[serde(rename = "@full_message", default)]
    pub full_message: Option<String>,
    #[serde(rename = "@timestamp")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "@fields")]
    pub fields: EventFields,
}

impl JsonEvent {
    /// Build the wire object. Timestamps are rendered in UTC with
    /// millisecond precision and a `Z` designator.
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert(
            keys::SOURCE_HOST.to_string(),
            Value::String(self.source_host.clone()),
        );
        if let Some(short) = &self.short_message {
            map.insert(keys::MESSAGE.to_string(), Value::String(short.clone()));
        }
        if let Some(full) = &self.full_message {
            map.insert(keys::FULL_MESSAGE.to_string(), Value::String(full.clone()));
        }
        map.insert(
            keys::TIMESTAMP.to_string(),
            Value::String(self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        map.insert(keys::FIELDS.to_string(), self.fields.to_json());
        Value::Object(map)
    }
}

/// The `@fields` block: everything about the event that is not the message.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EventFields {
    #[serde(rename = "exception", default)]
    pub exception: Option<ExceptionInfo>,
    #[serde(default)]
    pub logger_name: Option<String>,
    #[serde(default)]
    pub correlation_context: Option<String>,
    pub level: String,
    #[serde(default)]
    pub thread_name: Option<String>,
    #[serde(default)]
    pub process_name: Option<String>,
    #[serde(default)]
    pub thread_id: Option<u64>,
    #[serde(default)]
    pub process_id: Option<u32>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub app_domain_name: Option<String>,
    #[serde(default)]
    pub nested_diagnostics_context: Option<String>,
    #[serde(default)]
    pub mapped_diagnostics_context: Option<String>,
    /// Caller-supplied properties. Always emitted, empty or not.
    #[serde(default)]
    pub properties: Map<String, Value>,
}

impl EventFields {
    fn to_json(&self) -> Value {
        let mut map = Map::new();
        if let Some(exception) = &self.exception {
            map.insert(keys::EXCEPTION.to_string(), exception.to_json());
        }
        if let Some(logger_name) = &self.logger_name {
            map.insert(
                keys::LOGGER_NAME.to_string(),
                Value::String(logger_name.clone()),
            );
        }
        if let Some(correlation_context) = &self.correlation_context {
            map.insert(
                keys::CORRELATION_CONTEXT.to_string(),
                Value::String(correlation_context.clone()),
            );
        }
        map.insert(keys::LEVEL.to_string(), Value::String(self.level.clone()));
        if let Some(thread_name) = &self.thread_name {
            map.insert(
                keys::THREAD_NAME.to_string(),
                Value::String(thread_name.clone()),
            );
        }
        if let Some(process_name) = &self.process_name {
            map.insert(
                keys::PROCESS_NAME.to_string(),
                Value::String(process_name.clone()),
            );
        }
        if let Some(thread_id) = self.thread_id {
            map.insert(keys::THREAD_ID.to_string(), Value::from(thread_id));
        }
        if let Some(process_id) = self.process_id {
            map.insert(keys::PROCESS_ID.to_string(), Value::from(process_id));
        }
        if let Some(user_name) = &self.user_name {
            map.insert(
                keys::USER_NAME.to_string(),
                Value::String(user_name.clone()),
            );
        }
        if let Some(app_domain_name) = &self.app_domain_name {
            map.insert(
                keys::APP_DOMAIN_NAME.to_string(),
                Value::String(app_domain_name.clone()),
            );
        }
        if let Some(ndc) = &self.nested_diagnostics_context {
            map.insert(
                keys::NESTED_DIAGNOSTICS_CONTEXT.to_string(),
                Value::String(ndc.clone()),
            );
        }
        if let Some(mdc) = &self.mapped_diagnostics_context {
            map.insert(
                keys::MAPPED_DIAGNOSTICS_CONTEXT.to_string(),
                Value::String(mdc.clone()),
            );
        }
        map.insert(
            keys::PROPERTIES.to_string(),
            Value::Object(self.properties.clone()),
        );
        Value::Object(map)
    }
}

/// Exception details inside `@fields`, present only when the event carried
/// an exception.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExceptionInfo {
    pub exception_type: String,
    pub exception_message: String,
    pub exception_dump: String,
    /// Stack captured by the event, not the exception's own trace; kept
    /// nullable because hosts rarely capture one.
    #[serde(default)]
    pub stack_trace: Option<String>,
}

impl ExceptionInfo {
    fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert(
            keys::EXCEPTION_TYPE.to_string(),
            Value::String(self.exception_type.clone()),
        );
        map.insert(
            keys::EXCEPTION_MESSAGE.to_string(),
            Value::String(self.exception_message.clone()),
        );
        map.insert(
            keys::EXCEPTION_DUMP.to_string(),
            Value::String(self.exception_dump.clone()),
        );
        if let Some(stack_trace) = &self.stack_trace {
            map.insert(
                keys::STACK_TRACE.to_string(),
                Value::String(stack_trace.clone()),
            );
        }
        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_event() -> JsonEvent {
        JsonEvent {
            source_host: "build-07".to_string(),
            short_message: Some("short".to_string()),
            full_message: Some("short but complete".to_string()),
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 14, 30, 0).unwrap(),
            fields: EventFields {
                exception: Some(ExceptionInfo {
                    exception_type: "std::io::Error".to_string(),
                    exception_message: "broken pipe".to_string(),
                    exception_dump: "std::io::Error: broken pipe".to_string(),
                    stack_trace: None,
                }),
                logger_name: Some("api::orders".to_string()),
                correlation_context: None,
                level: "Error".to_string(),
                thread_name: Some("worker-1".to_string()),
                process_name: Some("orders-api".to_string()),
                thread_id: Some(7),
                process_id: Some(4242),
                user_name: None,
                app_domain_name: Some("orders-api".to_string()),
                nested_diagnostics_context: None,
                mapped_diagnostics_context: None,
                properties: Map::new(),
            },
        }
    }

    #[test]
    fn absent_values_produce_no_keys() {
        let json = sample_event().to_json();
        let fields = &json[keys::FIELDS];

        assert!(fields.get(keys::CORRELATION_CONTEXT).is_none());
        assert!(fields.get(keys::USER_NAME).is_none());
        assert!(fields.get(keys::NESTED_DIAGNOSTICS_CONTEXT).is_none());
        assert!(fields[keys::EXCEPTION].get(keys::STACK_TRACE).is_none());
    }

    #[test]
    fn present_values_use_the_key_table() {
        let json = sample_event().to_json();

        assert_eq!(json[keys::SOURCE_HOST], "build-07");
        assert_eq!(json[keys::MESSAGE], "short");
        assert_eq!(json[keys::FULL_MESSAGE], "short but complete");
        assert_eq!(json[keys::FIELDS][keys::LEVEL], "Error");
        assert_eq!(json[keys::FIELDS][keys::THREAD_ID], 7);
        assert_eq!(
            json[keys::FIELDS][keys::EXCEPTION][keys::EXCEPTION_MESSAGE],
            "broken pipe"
        );
    }

    #[test]
    fn timestamps_render_with_millis_and_utc_designator() {
        let json = sample_event().to_json();

        assert_eq!(json[keys::TIMESTAMP], "2024-03-01T14:30:00.000Z");
    }

    #[test]
    fn properties_key_is_always_present() {
        let json = sample_event().to_json();

        assert_eq!(json[keys::FIELDS][keys::PROPERTIES], Value::Object(Map::new()));
    }

    #[test]
    fn serialized_output_parses_back_into_the_same_record() {
        let original = sample_event();
        let text = serde_json::to_string(&original.to_json()).unwrap();

        let parsed: JsonEvent = serde_json::from_str(&text).expect("parse rendered line");

        assert_eq!(parsed, original);
    }
}
