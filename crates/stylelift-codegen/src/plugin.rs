//! Orchestration: output formats, the generate-JSON action, and the
//! configuration round-trip with the host.
//!
//! `Converter` runs one conversion with a fixed configuration. `Plugin`
//! owns the live configuration and its settings store, and answers the
//! settings UI's messages.

use crate::components::extract_components;
use crate::config::{PluginConfig, SettingsStore, SETTINGS_KEY};
use crate::css::Stylesheet;
use crate::html::{render, MarkupNode, MarkupProcessor};
use crate::layout_info::extract_layout;
use crate::naming::pascal_case;
use crate::tokens::extract_tokens;
use crate::vector::{fetch_exports, VectorExporter, VectorExports};
use crate::{CodegenError, SelectionError};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::str::FromStr;
use stylelift_scene::{NodeKind, SceneIndex, SceneNode};

// =========================================================================
// Output formats
// =========================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Html,
    Css,
    DesignTokens,
    LayoutInfo,
    ComponentInfo,
    AiPackage,
}

/// A format name no generator exists for.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Format \"{0}\" is not supported.")]
pub struct UnsupportedFormat(pub String);

impl FromStr for OutputFormat {
    type Err = UnsupportedFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HTML" => Ok(OutputFormat::Html),
            "CSS" => Ok(OutputFormat::Css),
            "DESIGN_TOKENS" => Ok(OutputFormat::DesignTokens),
            "LAYOUT_INFO" => Ok(OutputFormat::LayoutInfo),
            "COMPONENT_INFO" => Ok(OutputFormat::ComponentInfo),
            "AI_PACKAGE" => Ok(OutputFormat::AiPackage),
            other => Err(UnsupportedFormat(other.to_string())),
        }
    }
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 6] = [
        OutputFormat::Html,
        OutputFormat::Css,
        OutputFormat::DesignTokens,
        OutputFormat::LayoutInfo,
        OutputFormat::ComponentInfo,
        OutputFormat::AiPackage,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Html => "HTML",
            OutputFormat::Css => "CSS",
            OutputFormat::DesignTokens => "DESIGN_TOKENS",
            OutputFormat::LayoutInfo => "LAYOUT_INFO",
            OutputFormat::ComponentInfo => "COMPONENT_INFO",
            OutputFormat::AiPackage => "AI_PACKAGE",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            OutputFormat::Html => "HTML",
            OutputFormat::Css => "CSS",
            OutputFormat::DesignTokens => "Design Tokens",
            OutputFormat::LayoutInfo => "Layout Info",
            OutputFormat::ComponentInfo => "Component Info",
            OutputFormat::AiPackage => "AI Package",
        }
    }

    pub fn language(self) -> &'static str {
        match self {
            OutputFormat::Html => "HTML",
            OutputFormat::Css => "CSS",
            _ => "JSON",
        }
    }

    /// File extension for written artifacts.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Html => "html",
            OutputFormat::Css => "css",
            _ => "json",
        }
    }
}

/// One generated artifact, as shown in the host's code panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodegenResult {
    pub title: String,
    pub language: String,
    pub code: String,
}

impl CodegenResult {
    fn unsupported(err: &UnsupportedFormat) -> Self {
        Self {
            title: err.0.clone(),
            language: "PLAINTEXT".into(),
            code: format!("// {err}"),
        }
    }
}

/// Markup tree and stylesheet of one conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub root: Option<MarkupNode>,
    pub stylesheet: Stylesheet,
}

impl Conversion {
    fn empty() -> Self {
        Self {
            root: None,
            stylesheet: Stylesheet::new(),
        }
    }

    pub fn html(&self) -> String {
        self.root.as_ref().map(render).unwrap_or_default()
    }

    pub fn css(&self) -> String {
        self.stylesheet.build()
    }
}

// =========================================================================
// Converter
// =========================================================================

/// Runs conversions under one configuration.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    config: PluginConfig,
}

impl Converter {
    pub fn new(config: PluginConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    /// Export vectors, then build markup and stylesheet.
    pub async fn convert<E: VectorExporter>(
        &self,
        root: &SceneNode,
        exporter: &E,
    ) -> Result<Conversion, CodegenError> {
        let exports = fetch_exports(root, &self.config, exporter).await;
        self.convert_with_exports(root, &exports)
    }

    /// Build markup and stylesheet from already settled exports.
    pub fn convert_with_exports(
        &self,
        root: &SceneNode,
        exports: &VectorExports,
    ) -> Result<Conversion, CodegenError> {
        let index = SceneIndex::new(root);
        MarkupProcessor::new(&self.config, &index, exports).process(root)
    }

    /// Generate one named format. Never fails: unknown formats yield a stub
    /// and processing errors are reported in the result.
    pub async fn generate<E: VectorExporter>(
        &self,
        root: &SceneNode,
        format: &str,
        exporter: &E,
    ) -> CodegenResult {
        let format = match format.parse::<OutputFormat>() {
            Ok(format) => format,
            Err(e) => return CodegenResult::unsupported(&e),
        };

        match self.generate_format(root, format, exporter).await {
            Ok(code) => CodegenResult {
                title: format.title().into(),
                language: format.language().into(),
                code,
            },
            Err(e) => {
                log::error!("failed to generate {}: {e}", format.as_str());
                CodegenResult {
                    title: format.title().into(),
                    language: "PLAINTEXT".into(),
                    code: format!("Error processing: {e}"),
                }
            }
        }
    }

    /// Generate every format from a single conversion.
    pub async fn generate_all<E: VectorExporter>(
        &self,
        root: &SceneNode,
        exporter: &E,
    ) -> Result<Vec<(OutputFormat, String)>, CodegenError> {
        let conversion = self.convert(root, exporter).await?;
        OutputFormat::ALL
            .iter()
            .map(|&format| Ok((format, self.render_format(root, format, &conversion)?)))
            .collect()
    }

    async fn generate_format<E: VectorExporter>(
        &self,
        root: &SceneNode,
        format: OutputFormat,
        exporter: &E,
    ) -> Result<String, CodegenError> {
        match format {
            OutputFormat::Html | OutputFormat::Css | OutputFormat::AiPackage => {
                let conversion = self.convert(root, exporter).await?;
                self.render_format(root, format, &conversion)
            }
            _ => self.render_format(root, format, &Conversion::empty()),
        }
    }

    fn render_format(
        &self,
        root: &SceneNode,
        format: OutputFormat,
        conversion: &Conversion,
    ) -> Result<String, CodegenError> {
        let code = match format {
            OutputFormat::Html => conversion.html(),
            OutputFormat::Css => conversion.css(),
            OutputFormat::DesignTokens => serde_json::to_string_pretty(&extract_tokens(root))?,
            OutputFormat::LayoutInfo => {
                serde_json::to_string_pretty(&extract_layout(root, &self.config))?
            }
            OutputFormat::ComponentInfo => {
                serde_json::to_string_pretty(&extract_components(root))?
            }
            OutputFormat::AiPackage => {
                serde_json::to_string_pretty(&self.package(root, conversion)?)?
            }
        };
        Ok(code)
    }

    /// HTML, CSS and every enabled extraction in one document.
    fn package(&self, root: &SceneNode, conversion: &Conversion) -> Result<Value, CodegenError> {
        let config = &self.config;
        let tokens = match config.extract_design_tokens {
            true => serde_json::to_value(extract_tokens(root))?,
            false => Value::Null,
        };
        let layout = match config.extract_layout_info {
            true => serde_json::to_value(extract_layout(root, config))?,
            false => Value::Null,
        };
        let components = match config.extract_component_info {
            true => serde_json::to_value(extract_components(root))?,
            false => Value::Null,
        };
        Ok(json!({
            "html": conversion.html(),
            "css": conversion.css(),
            "designTokens": tokens,
            "layoutInfo": layout,
            "componentInfo": components,
        }))
    }

    /// The manual "generate JSON" action over the current selection.
    pub async fn generate_json<E: VectorExporter>(
        &self,
        selection: &[SceneNode],
        exporter: &E,
    ) -> Result<Value, CodegenError> {
        let node = validate_selection(selection)?;
        let conversion = self.convert(node, exporter).await?;
        let root_element = conversion
            .root
            .as_ref()
            .map(|root| root.to_json(self.config.attribute_casing))
            .unwrap_or(Value::Null);
        Ok(json!({
            "componentName": pascal_case(&node.name),
            "description": format!("Component generated from layer: {}", node.name),
            "rootElement": root_element,
        }))
    }
}

/// Exactly one frame, component or instance.
pub fn validate_selection(selection: &[SceneNode]) -> Result<&SceneNode, SelectionError> {
    match selection {
        [] => Err(SelectionError::Empty),
        [node] => match node.kind {
            NodeKind::Frame | NodeKind::Component | NodeKind::Instance => Ok(node),
            kind => Err(SelectionError::UnsupportedType(kind)),
        },
        _ => Err(SelectionError::Multiple),
    }
}

// =========================================================================
// Plugin
// =========================================================================

/// Message from the settings UI.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum PluginMessage {
    GetConfig,
    UpdateConfig { config: PluginConfig },
    GenerateJson,
}

/// Message to the settings UI.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum UiMessage {
    Config { config: PluginConfig },
    JsonGenerated { data: Value },
    Error { message: String },
}

/// Reply to a generate-json request. Selection problems are shown as is;
/// anything else is a processing error.
pub fn json_reply(result: Result<Value, CodegenError>) -> UiMessage {
    match result {
        Ok(data) => UiMessage::JsonGenerated { data },
        Err(CodegenError::Selection(e)) => UiMessage::Error {
            message: e.to_string(),
        },
        Err(e) => {
            log::error!("generate-json failed: {e}");
            UiMessage::Error {
                message: format!("Error processing: {e}"),
            }
        }
    }
}

/// Live configuration plus the store it persists to.
pub struct Plugin<S: SettingsStore> {
    config: PluginConfig,
    store: S,
}

impl<S: SettingsStore> Plugin<S> {
    /// Start with the persisted configuration merged over the defaults. An
    /// unreadable store or blob leaves the defaults in place.
    pub fn load(store: S) -> Self {
        let config = match store.load(SETTINGS_KEY) {
            Ok(Some(blob)) => PluginConfig::merge_persisted(&blob).unwrap_or_else(|e| {
                log::warn!("ignoring persisted configuration: {e}");
                PluginConfig::default()
            }),
            Ok(None) => PluginConfig::default(),
            Err(e) => {
                log::warn!("could not read configuration: {e}");
                PluginConfig::default()
            }
        };
        Self { config, store }
    }

    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Replace the configuration and persist it.
    pub fn update_config(&mut self, config: PluginConfig) {
        self.config = config;
        self.persist();
    }

    /// Change one option by name and persist.
    pub fn set_option(&mut self, key: &str, value: Value) -> Result<(), crate::config::ConfigError> {
        self.config.set(key, value)?;
        self.persist();
        Ok(())
    }

    /// A converter bound to the current configuration.
    pub fn converter(&self) -> Converter {
        Converter::new(self.config.clone())
    }

    pub async fn generate<E: VectorExporter>(
        &self,
        root: &SceneNode,
        format: &str,
        exporter: &E,
    ) -> CodegenResult {
        self.converter().generate(root, format, exporter).await
    }

    pub async fn handle_message<E: VectorExporter>(
        &mut self,
        message: PluginMessage,
        selection: &[SceneNode],
        exporter: &E,
    ) -> UiMessage {
        match message {
            PluginMessage::GetConfig => self.config_reply(),
            PluginMessage::UpdateConfig { config } => {
                self.update_config(config);
                self.config_reply()
            }
            PluginMessage::GenerateJson => {
                json_reply(self.converter().generate_json(selection, exporter).await)
            }
        }
    }

    pub fn config_reply(&self) -> UiMessage {
        UiMessage::Config {
            config: self.config.clone(),
        }
    }

    /// Best effort: a failed save is logged, never surfaced.
    fn persist(&mut self) {
        let blob = match self.config.to_blob() {
            Ok(blob) => blob,
            Err(e) => {
                log::warn!("could not serialize configuration: {e}");
                return;
            }
        };
        if let Err(e) = self.store.save(SETTINGS_KEY, &blob) {
            log::warn!("could not save configuration: {e}");
        }
    }
}
