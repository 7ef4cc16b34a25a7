use serde::{Deserialize, Deserializer, Serialize};

/// Default truncation limit for the short message, in characters.
pub const DEFAULT_SHORT_MESSAGE_LENGTH: usize = 200;

/// Default suffix appended to a truncated short message.
pub const DEFAULT_SHORTENED_MESSAGE_SUFFIX: &str = "...";

/// Default property key looked up for the correlation context.
pub const DEFAULT_CORRELATION_CONTEXT_KEY: &str = "__correlationContext__";

/// Configuration of the JSON event layout.
///
/// Serializes under the PascalCase names hosts use in their own config
/// files (`EnableShortMessage`, `ShortMessageLength`,
/// `AppendToShortenedMessage`, `CorrelationContextKey`); every field is
/// optional there and falls back to the defaults below.
///
/// **Fields**
/// - `enable_short_message`: when `false` (the default) the output carries
///   a single `@message` with the complete text; when `true`, `@message`
///   is bounded by `short_message_length` and the untruncated text is
///   always emitted as `@full_message`.
/// - `short_message_length`: maximum character count of `@message` in
///   short-message mode.
/// - `append_to_shortened_message`: suffix appended when truncation
///   happens. A `null` in host config is stored as the empty string.
/// - `correlation_context_key`: property key whose value becomes the
///   `CorrelationContext` field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LayoutConfig {
    pub enable_short_message: bool,
    pub short_message_length: usize,
    #[serde(deserialize_with = "null_to_empty")]
    pub append_to_shortened_message: String,
    pub correlation_context_key: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            enable_short_message: false,
            short_message_length: DEFAULT_SHORT_MESSAGE_LENGTH,
            append_to_shortened_message: DEFAULT_SHORTENED_MESSAGE_SUFFIX.to_string(),
            correlation_context_key: DEFAULT_CORRELATION_CONTEXT_KEY.to_string(),
        }
    }
}

impl LayoutConfig {
    /// Set the truncation suffix from an optional value; `None` is stored
    /// as the empty string. The coercion happens here, never at render
    /// time.
    pub fn set_append_to_shortened_message(&mut self, suffix: Option<String>) {
        self.append_to_shortened_message = suffix.unwrap_or_default();
    }

    /// Number of leading message characters kept when truncation applies.
    ///
    /// Saturates at zero when the suffix is longer than
    /// `short_message_length`, so a degenerate configuration shortens the
    /// message down to the bare suffix instead of failing mid-render.
    pub fn effective_head_length(&self) -> usize {
        self.short_message_length
            .saturating_sub(self.append_to_shortened_message.chars().count())
    }
}

fn null_to_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = LayoutConfig::default();

        assert!(!config.enable_short_message);
        assert_eq!(config.short_message_length, 200);
        assert_eq!(config.append_to_shortened_message, "...");
        assert_eq!(config.correlation_context_key, "__correlationContext__");
    }

    #[test]
    fn deserializes_pascal_case_host_config() {
        let config: LayoutConfig = serde_json::from_str(
            r#"{
                "EnableShortMessage": true,
                "ShortMessageLength": 64,
                "AppendToShortenedMessage": "___",
                "CorrelationContextKey": "_gfkCorrelationContext_"
            }"#,
        )
        .expect("parse config");

        assert!(config.enable_short_message);
        assert_eq!(config.short_message_length, 64);
        assert_eq!(config.append_to_shortened_message, "___");
        assert_eq!(config.correlation_context_key, "_gfkCorrelationContext_");
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: LayoutConfig = serde_json::from_str(r#"{"ShortMessageLength": 20}"#).unwrap();

        assert_eq!(config.short_message_length, 20);
        assert_eq!(config.append_to_shortened_message, "...");
        assert!(!config.enable_short_message);
    }

    #[test]
    fn null_suffix_coerces_to_empty_at_parse_time() {
        let config: LayoutConfig =
            serde_json::from_str(r#"{"AppendToShortenedMessage": null}"#).unwrap();

        assert_eq!(config.append_to_shortened_message, "");
    }

    #[test]
    fn setter_coerces_none_to_empty() {
        let mut config = LayoutConfig::default();
        config.set_append_to_shortened_message(None);
        assert_eq!(config.append_to_shortened_message, "");

        config.set_append_to_shortened_message(Some("___".to_string()));
        assert_eq!(config.append_to_shortened_message, "___");
    }

    #[test]
    fn head_length_saturates_when_suffix_exceeds_limit() {
        let config = LayoutConfig {
            short_message_length: 2,
            append_to_shortened_message: "12345".to_string(),
            ..LayoutConfig::default()
        };

        assert_eq!(config.effective_head_length(), 0);
    }

    #[test]
    fn serializes_with_pascal_case_keys() {
        let json = serde_json::to_value(LayoutConfig::default()).unwrap();

        assert!(json.get("EnableShortMessage").is_some());
        assert!(json.get("ShortMessageLength").is_some());
        assert!(json.get("AppendToShortenedMessage").is_some());
        assert!(json.get("CorrelationContextKey").is_some());
    }
}
