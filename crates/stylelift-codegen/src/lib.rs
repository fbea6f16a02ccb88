//! stylelift code generator
//!
//! Turns a design scene graph into HTML, CSS and design-token JSON.
//! The markup pass classifies every node, collects its declarations into a
//! per-run stylesheet and builds a `MarkupNode` tree; the CSS pass renders
//! that stylesheet with shared values promoted to custom properties. The
//! token, layout and component extractors each make one independent walk.
//!
//! ```text
//! SceneNode ─┬─ html::MarkupProcessor ─→ MarkupNode + Stylesheet ─→ HTML, CSS
//!            ├─ tokens::extract        ─→ DesignTokens
//!            ├─ layout_info::extract   ─→ LayoutInfo
//!            └─ components::extract    ─→ ComponentInfo
//! ```

pub mod classify;
pub mod components;
pub mod config;
pub mod css;
pub mod html;
pub mod layout;
pub mod layout_info;
pub mod naming;
pub mod plugin;
pub mod style;
pub mod tokens;
pub mod vector;

pub use config::{PluginConfig, SettingsStore};
pub use css::{Declarations, Stylesheet};
pub use html::MarkupNode;
pub use plugin::{CodegenResult, Conversion, Converter, OutputFormat, Plugin};
pub use vector::{ExportError, NoExporter, VectorExporter};

use stylelift_scene::NodeKind;

/// Deepest node nesting the markup pass accepts.
///
/// A JSON snapshot nests two levels per node (the node and its `children`
/// array) and serde_json stops at 128, so this is the deepest node that
/// still parses with a gradient fill on it.
pub const MAX_DEPTH: usize = 60;

/// Code generation error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CodegenError {
    #[error(transparent)]
    Selection(#[from] SelectionError),
    #[error("node tree exceeds the maximum depth of {0}")]
    TooDeep(usize),
    #[error("failed to serialize output: {0}")]
    Serialize(String),
}

impl From<serde_json::Error> for CodegenError {
    fn from(err: serde_json::Error) -> Self {
        CodegenError::Serialize(err.to_string())
    }
}

/// Rejected selection for the manual generate action. The display text is
/// shown to the user as is.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SelectionError {
    #[error("Error: Please select a Frame.")]
    Empty,
    #[error("Error: Please select only one Frame.")]
    Multiple,
    #[error("Error: Please select a Frame, Component, or Instance (selected type: {0}).")]
    UnsupportedType(NodeKind),
}

/// Format a number, removing `.0` for integers.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.is_finite() {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// Round to two decimals, then format without trailing `.0`.
pub fn format_decimal(n: f64) -> String {
    format_number((n * 100.0).round() / 100.0)
}

/// A JSON number that stays integral when the value is.
pub fn json_number(n: f64) -> serde_json::Value {
    if n.fract() == 0.0 && n.is_finite() {
        serde_json::Value::from(n as i64)
    } else {
        serde_json::Value::from(n)
    }
}

/// Escape text for HTML content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
