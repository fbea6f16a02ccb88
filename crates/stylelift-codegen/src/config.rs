//! Plugin configuration and its persistence.
//!
//! The configuration travels as a camelCase JSON blob between the settings
//! UI, the host's key-value store and the core. Persisted values are merged
//! over defaults one option at a time, so a stale or unknown option never
//! discards the rest.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Key the configuration blob is stored under.
pub const SETTINGS_KEY: &str = "stylelift-config";

/// Length unit for every emitted size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CssUnit {
    #[default]
    Px,
    Rem,
    Em,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NamingStrategy {
    #[default]
    LayerBased,
    Bem,
    UniqueId,
}

/// Casing of CSS property names in JSON views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AttributeCasing {
    #[default]
    #[serde(rename = "kebab-case")]
    KebabCase,
    #[serde(rename = "camelCase")]
    CamelCase,
}

impl AttributeCasing {
    /// Apply the casing to a kebab-case property name. Custom properties
    /// keep their spelling.
    pub fn apply(self, property: &str) -> String {
        match self {
            AttributeCasing::KebabCase => property.to_string(),
            AttributeCasing::CamelCase if property.starts_with("--") => property.to_string(),
            AttributeCasing::CamelCase => {
                let mut out = String::with_capacity(property.len());
                let mut upper = false;
                for ch in property.chars() {
                    if ch == '-' {
                        upper = !out.is_empty();
                    } else if upper {
                        out.push(ch.to_ascii_uppercase());
                        upper = false;
                    } else {
                        out.push(ch);
                    }
                }
                out
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutPreference {
    #[default]
    Flexbox,
    Grid,
    AllowAbsolute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SvgExportMode {
    #[default]
    Inline,
    External,
}

/// User-editable options of the plugin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PluginConfig {
    pub css_units: CssUnit,
    pub class_naming_strategy: NamingStrategy,
    pub attribute_casing: AttributeCasing,
    pub layout_preference: LayoutPreference,
    pub svg_export_mode: SvgExportMode,
    pub extract_design_tokens: bool,
    pub extract_layout_info: bool,
    pub extract_component_info: bool,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            css_units: CssUnit::default(),
            class_naming_strategy: NamingStrategy::default(),
            attribute_casing: AttributeCasing::default(),
            layout_preference: LayoutPreference::default(),
            svg_export_mode: SvgExportMode::default(),
            extract_design_tokens: true,
            extract_layout_info: true,
            extract_component_info: true,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Malformed configuration: {0}")]
    Malformed(#[source] serde_json::Error),
    #[error("Unknown option '{0}'")]
    UnknownOption(String),
    #[error("Invalid value for '{key}': {source}")]
    InvalidValue {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl PluginConfig {
    /// Merge a persisted blob over the defaults. Options that fail to parse
    /// keep their default and are logged.
    pub fn merge_persisted(blob: &str) -> Result<Self, ConfigError> {
        let persisted: serde_json::Map<String, Value> =
            serde_json::from_str(blob).map_err(ConfigError::Malformed)?;
        let mut config = Self::default();
        for (key, value) in persisted {
            if let Err(e) = config.set(&key, value) {
                log::warn!("ignoring persisted option: {e}");
            }
        }
        Ok(config)
    }

    /// Set one option by its camelCase name.
    pub fn set(&mut self, key: &str, value: Value) -> Result<(), ConfigError> {
        fn parse<T: serde::de::DeserializeOwned>(key: &str, value: Value) -> Result<T, ConfigError> {
            serde_json::from_value(value).map_err(|source| ConfigError::InvalidValue {
                key: key.to_string(),
                source,
            })
        }

        match key {
            "cssUnits" => self.css_units = parse(key, value)?,
            "classNamingStrategy" => self.class_naming_strategy = parse(key, value)?,
            "attributeCasing" => self.attribute_casing = parse(key, value)?,
            "layoutPreference" => self.layout_preference = parse(key, value)?,
            "svgExportMode" => self.svg_export_mode = parse(key, value)?,
            "extractDesignTokens" => self.extract_design_tokens = parse(key, value)?,
            "extractLayoutInfo" => self.extract_layout_info = parse(key, value)?,
            "extractComponentInfo" => self.extract_component_info = parse(key, value)?,
            other => return Err(ConfigError::UnknownOption(other.to_string())),
        }
        Ok(())
    }

    pub fn to_blob(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

// =========================================================================
// Settings store
// =========================================================================

/// Settings store error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Settings store error: {message}")]
pub struct StoreError {
    pub message: String,
}

/// Key-value persistence supplied by the host.
pub trait SettingsStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn save(&mut self, key: &str, blob: &str) -> Result<(), StoreError>;
}

/// In-memory store, for hosts without persistence.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, blob: &str) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.to_string(), blob.to_string());
        store
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl SettingsStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, blob: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), blob.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let config = PluginConfig::default();
        assert_eq!(config.css_units, CssUnit::Px);
        assert_eq!(config.class_naming_strategy, NamingStrategy::LayerBased);
        assert_eq!(config.layout_preference, LayoutPreference::Flexbox);
        assert_eq!(config.svg_export_mode, SvgExportMode::Inline);
        assert!(config.extract_design_tokens);
        assert!(config.extract_layout_info);
        assert!(config.extract_component_info);
    }

    #[test]
    fn test_blob_field_names() {
        let blob = PluginConfig::default().to_blob().unwrap();
        let value: Value = serde_json::from_str(&blob).unwrap();
        assert_eq!(
            value,
            json!({
                "cssUnits": "px",
                "classNamingStrategy": "layer-based",
                "attributeCasing": "kebab-case",
                "layoutPreference": "flexbox",
                "svgExportMode": "inline",
                "extractDesignTokens": true,
                "extractLayoutInfo": true,
                "extractComponentInfo": true
            })
        );
    }

    #[test]
    fn test_merge_partial_blob() {
        let config =
            PluginConfig::merge_persisted(r#"{"cssUnits": "rem", "attributeCasing": "camelCase"}"#)
                .unwrap();
        assert_eq!(config.css_units, CssUnit::Rem);
        assert_eq!(config.attribute_casing, AttributeCasing::CamelCase);
        assert_eq!(config.layout_preference, LayoutPreference::Flexbox);
    }

    #[test]
    fn test_merge_skips_bad_options() {
        let config = PluginConfig::merge_persisted(
            r#"{"cssUnits": "furlong", "layoutPreference": "grid", "legacy": 1}"#,
        )
        .unwrap();
        assert_eq!(config.css_units, CssUnit::Px);
        assert_eq!(config.layout_preference, LayoutPreference::Grid);
    }

    #[test]
    fn test_merge_malformed_blob() {
        assert!(matches!(
            PluginConfig::merge_persisted("not json"),
            Err(ConfigError::Malformed(_))
        ));
    }

    #[test]
    fn test_set_unknown_option() {
        let mut config = PluginConfig::default();
        assert!(matches!(
            config.set("theme", json!("dark")),
            Err(ConfigError::UnknownOption(_))
        ));
    }

    #[test]
    fn test_camel_case_property() {
        assert_eq!(AttributeCasing::CamelCase.apply("background-color"), "backgroundColor");
        assert_eq!(AttributeCasing::CamelCase.apply("gap"), "gap");
        assert_eq!(AttributeCasing::CamelCase.apply("--color-1"), "--color-1");
        assert_eq!(AttributeCasing::KebabCase.apply("flex-direction"), "flex-direction");
    }

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load(SETTINGS_KEY).unwrap(), None);
        store.save(SETTINGS_KEY, "{}").unwrap();
        assert_eq!(store.load(SETTINGS_KEY).unwrap().as_deref(), Some("{}"));
    }
}
