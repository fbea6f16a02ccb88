//! Design-token extraction.
//!
//! Colors, type styles and spacing values used across the visible tree,
//! named by a handful of heuristics. The first node to produce a name owns
//! its value.

use crate::config::CssUnit;
use crate::format_number;
use crate::naming::sanitize;
use crate::style::{font_weight, format_length, format_letter_spacing, format_line_height, hex_color};
use indexmap::IndexMap;
use serde::Serialize;
use stylelift_scene::node::{Color, Paint};
use stylelift_scene::SceneNode;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypographyToken {
    pub font_family: String,
    pub font_size: String,
    pub font_weight: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpacingToken {
    pub value: String,
    pub value_in_rem: String,
}

impl SpacingToken {
    /// The px value is kept exact so it agrees with the token name.
    fn new(px: f64) -> Self {
        Self {
            value: format!("{}px", format_number(px)),
            value_in_rem: format_length(px, CssUnit::Rem),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DesignTokens {
    pub colors: IndexMap<String, String>,
    pub typography: IndexMap<String, TypographyToken>,
    pub spacing: IndexMap<String, SpacingToken>,
}

/// Collect tokens from every visible node.
pub fn extract_tokens(root: &SceneNode) -> DesignTokens {
    let mut tokens = DesignTokens::default();
    root.walk_visible(&mut |node| {
        collect_colors(node, &mut tokens.colors);
        collect_typography(node, &mut tokens.typography);
        collect_spacing(node, &mut tokens.spacing);
    });
    tokens
}

// =========================================================================
// Colors
// =========================================================================

fn collect_colors(node: &SceneNode, colors: &mut IndexMap<String, String>) {
    let solids = node
        .fill_list()
        .iter()
        .chain(node.strokes.iter())
        .filter(|p| p.is_visible())
        .filter_map(Paint::as_solid);
    for solid in solids {
        let name = color_name(node, solid.color);
        colors.entry(name).or_insert_with(|| hex_color(solid.color));
    }
}

const BLACK_MAX: u8 = 30;
const WHITE_MIN: u8 = 240;

fn color_name(node: &SceneNode, color: Color) -> String {
    let name = node.name.to_lowercase();
    if node.is_text() {
        return "text-color".into();
    }
    if name.contains("background") || name.contains("bg") {
        return "background".into();
    }
    if name.contains("button") || name.contains("btn") {
        return "primary".into();
    }
    let (r, g, b) = color.to_bytes();
    if r == g && g == b {
        return match r {
            r if r < BLACK_MAX => "black".into(),
            r if r > WHITE_MIN => "white".into(),
            r => format!("gray-{r}"),
        };
    }
    let sanitized = sanitize(&node.name);
    if sanitized.is_empty() {
        "color".into()
    } else {
        sanitized
    }
}

// =========================================================================
// Typography
// =========================================================================

fn collect_typography(node: &SceneNode, typography: &mut IndexMap<String, TypographyToken>) {
    let Some(text) = &node.text else {
        return;
    };
    let (Some(font), Some(size)) = (text.font_name.value(), text.font_size.get()) else {
        return;
    };

    let name = typography_name(&node.name.to_lowercase(), size);
    typography.entry(name).or_insert_with(|| TypographyToken {
        font_family: font.family.clone(),
        font_size: format_length(size, CssUnit::Px),
        font_weight: font_weight(text).unwrap_or(400),
        line_height: text
            .line_height
            .get()
            .and_then(|lh| format_line_height(lh, CssUnit::Px)),
        letter_spacing: text
            .letter_spacing
            .get()
            .filter(|ls| ls.value != 0.0)
            .map(|ls| format_letter_spacing(ls.value, ls.unit, CssUnit::Px)),
    });
}

fn typography_name(name: &str, size: f64) -> String {
    let tier = if size >= 32.0 {
        "heading-1"
    } else if size >= 24.0 {
        "heading-2"
    } else if size >= 20.0 {
        "heading-3"
    } else if size >= 14.0 {
        "body"
    } else {
        "small"
    };

    let named = if name.contains("heading") || name.contains("title") {
        if size >= 32.0 {
            "heading-1"
        } else if size >= 24.0 {
            "heading-2"
        } else {
            "heading-3"
        }
    } else if name.contains("body") || name.contains("paragraph") {
        "body"
    } else if name.contains("label") || name.contains("caption") {
        "caption"
    } else if name.contains("button") {
        "button"
    } else {
        tier
    };
    named.to_string()
}

// =========================================================================
// Spacing
// =========================================================================

fn collect_spacing(node: &SceneNode, spacing: &mut IndexMap<String, SpacingToken>) {
    let Some(layout) = &node.auto_layout else {
        return;
    };
    let padding = layout.padding;
    let values = [
        ("gap", layout.item_spacing),
        ("padding-top", padding.top),
        ("padding-right", padding.right),
        ("padding-bottom", padding.bottom),
        ("padding-left", padding.left),
    ];
    for (prefix, value) in values {
        if value > 0.0 {
            spacing
                .entry(format!("{prefix}-{}", format_number(value)))
                .or_insert_with(|| SpacingToken::new(value));
        }
    }
}
