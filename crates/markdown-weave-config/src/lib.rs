use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse render config: {source}")]
    ConfigParseError { source: toml::de::Error },
}

/// Options for turning a document into a render tree.
///
/// Every field has a default, so TOML input only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Run the syntax highlighter over code blocks.
    pub highlight: bool,
    /// Attach slug `id`s to headings.
    pub heading_ids: bool,
    /// `pre` class is this prefix followed by the code block's language.
    pub language_class_prefix: String,
    /// Highlighted span class is this prefix followed by the span type.
    pub highlight_class_prefix: String,
    pub inline_code_class: String,
    pub task_item_class: String,
    /// Class of the fallback node rendered for unknown components.
    pub unknown_component_class: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            highlight: true,
            heading_ids: true,
            language_class_prefix: "language-".to_string(),
            highlight_class_prefix: "hl-".to_string(),
            inline_code_class: "inline-code".to_string(),
            task_item_class: "task-list-item".to_string(),
            unknown_component_class: "unknown-component".to_string(),
        }
    }
}

impl RenderConfig {
    /// Reads a config from TOML text supplied by the host.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::ConfigParseError { source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = RenderConfig::default();
        assert!(config.highlight);
        assert!(config.heading_ids);
        assert_eq!(config.language_class_prefix, "language-");
        assert_eq!(config.highlight_class_prefix, "hl-");
        assert_eq!(config.inline_code_class, "inline-code");
        assert_eq!(config.task_item_class, "task-list-item");
        assert_eq!(config.unknown_component_class, "unknown-component");
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config = RenderConfig::from_toml_str(
            r#"
highlight = false
language_class_prefix = "lang-"
"#,
        )
        .unwrap();

        assert_eq!(
            config,
            RenderConfig {
                highlight: false,
                language_class_prefix: "lang-".to_string(),
                ..RenderConfig::default()
            }
        );
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(
            RenderConfig::from_toml_str("").unwrap(),
            RenderConfig::default()
        );
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let original = RenderConfig {
            heading_ids: false,
            inline_code_class: "mono".to_string(),
            ..RenderConfig::default()
        };

        let toml_str = toml::to_string(&original).unwrap();
        let deserialized = RenderConfig::from_toml_str(&toml_str).unwrap();

        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_invalid_toml_is_a_parse_error() {
        let err = RenderConfig::from_toml_str("highlight = \"yes\"").unwrap_err();

        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
        assert!(err.to_string().starts_with("Failed to parse render config"));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let config = RenderConfig::from_toml_str("theme = \"dark\"\nheading_ids = false").unwrap();

        assert_eq!(
            config,
            RenderConfig {
                heading_ids: false,
                ..RenderConfig::default()
            }
        );
    }
}
