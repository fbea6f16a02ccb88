//! Geometry and style converters.
//!
//! Each converter reads one attribute family of a node and writes CSS
//! declarations. A converter whose attribute is absent or mixed writes
//! nothing.

use crate::config::CssUnit;
use crate::css::Declarations;
use crate::format_decimal;
use stylelift_scene::node::{
    Color, ColorStop, CornerRadius, Effect, GradientPaint, ImagePaint, LengthUnit, LineHeight,
    Paint, ScaleMode, StrokeAlign, TextAlign, TextCase, TextDecoration, TextProps,
};
use stylelift_scene::{Attr, SceneNode};

/// Base font size for rem/em conversion.
pub const ROOT_FONT_SIZE: f64 = 16.0;

/// Format a pixel length in the configured unit.
pub fn format_length(px: f64, unit: CssUnit) -> String {
    match unit {
        CssUnit::Px => format!("{}px", px.round() as i64),
        CssUnit::Rem => format!("{:.2}rem", px / ROOT_FONT_SIZE),
        CssUnit::Em => format!("{:.2}em", px / ROOT_FONT_SIZE),
    }
}

/// `#rrggbb` when opaque, `rgba(r, g, b, a)` otherwise.
pub fn format_color(color: Color, alpha: f64) -> String {
    if (alpha - 1.0).abs() < f64::EPSILON {
        hex_color(color)
    } else {
        let (r, g, b) = color.to_bytes();
        format!("rgba({r}, {g}, {b}, {alpha:.2})")
    }
}

pub fn hex_color(color: Color) -> String {
    let (r, g, b) = color.to_bytes();
    format!("#{r:02x}{g:02x}{b:02x}")
}

fn set(out: &mut Declarations, property: &str, value: impl Into<String>) {
    out.insert(property.to_string(), value.into());
}

// =========================================================================
// Size
// =========================================================================

pub fn apply_size(node: &SceneNode, unit: CssUnit, out: &mut Declarations) {
    if let Some(geometry) = node.geometry {
        set(out, "width", format_length(geometry.width, unit));
        set(out, "height", format_length(geometry.height, unit));
    }
}

// =========================================================================
// Fills
// =========================================================================

/// The first visible paint decides; later paints are ignored.
pub fn apply_fills(node: &SceneNode, out: &mut Declarations) {
    let Some(paint) = node.fill_list().iter().find(|p| p.is_visible()) else {
        return;
    };

    match paint {
        Paint::Solid(solid) => {
            let property = if node.is_text() {
                "color"
            } else {
                "background-color"
            };
            set(out, property, format_color(solid.color, solid.opacity));
        }
        Paint::Image(image) => apply_image_fill(image, out),
        Paint::GradientRadial(gradient) => {
            set(
                out,
                "background-image",
                format!("radial-gradient(circle, {})", gradient_stops(gradient)),
            );
        }
        Paint::GradientLinear(gradient)
        | Paint::GradientAngular(gradient)
        | Paint::GradientDiamond(gradient) => {
            set(
                out,
                "background-image",
                format!("linear-gradient(180deg, {})", gradient_stops(gradient)),
            );
        }
        Paint::Unsupported => {}
    }
}

fn gradient_stops(gradient: &GradientPaint) -> String {
    gradient
        .gradient_stops
        .iter()
        .map(|ColorStop { color, position }| {
            format!(
                "{} {}%",
                format_color(*color, color.a * gradient.opacity),
                (position * 100.0).round() as i64
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn apply_image_fill(image: &ImagePaint, out: &mut Declarations) {
    let file = image.image_hash.as_deref().unwrap_or("image");
    set(out, "background-image", format!("url(\"assets/{file}.png\")"));
    match image.scale_mode {
        ScaleMode::Fill | ScaleMode::Crop => {
            set(out, "background-size", "cover");
            set(out, "background-position", "center");
        }
        ScaleMode::Fit => {
            set(out, "background-size", "contain");
            set(out, "background-repeat", "no-repeat");
            set(out, "background-position", "center");
        }
        ScaleMode::Tile => set(out, "background-repeat", "repeat"),
    }
}

// =========================================================================
// Strokes
// =========================================================================

pub fn apply_strokes(node: &SceneNode, unit: CssUnit, out: &mut Declarations) {
    let Some(stroke) = node
        .strokes
        .iter()
        .filter(|p| p.is_visible())
        .find_map(Paint::as_solid)
    else {
        return;
    };

    let color = format_color(stroke.color, stroke.opacity);
    let width = match node.stroke_weight {
        Attr::Value(w) => Some(format_length(w, unit)),
        Attr::Absent => Some(format_length(1.0, unit)),
        Attr::Mixed => None,
    };

    if node.stroke_align == Some(StrokeAlign::Outside) {
        let outline = match &width {
            Some(w) => format!("{w} solid {color}"),
            None => format!("solid {color}"),
        };
        set(out, "outline", outline);
        set(out, "outline-offset", "0");
        return;
    }

    set(out, "border-style", "solid");
    if let Some(width) = width {
        set(out, "border-width", width);
    }
    set(out, "border-color", color);
    if node.stroke_align == Some(StrokeAlign::Inside) {
        set(out, "box-sizing", "border-box");
    }
}

// =========================================================================
// Effects
// =========================================================================

pub fn apply_effects(node: &SceneNode, unit: CssUnit, out: &mut Declarations) {
    let mut shadows = Vec::new();
    let mut layer_blur = None;
    let mut background_blur = None;

    for effect in &node.effects {
        match effect {
            Effect::DropShadow(s) | Effect::InnerShadow(s) if s.visible => {
                let mut shadow = format!(
                    "{} {} {} {} {}",
                    format_length(s.offset.x, unit),
                    format_length(s.offset.y, unit),
                    format_length(s.radius, unit),
                    format_length(s.spread, unit),
                    format_color(s.color, s.color.a)
                );
                if matches!(effect, Effect::InnerShadow(_)) {
                    shadow.push_str(" inset");
                }
                shadows.push(shadow);
            }
            Effect::LayerBlur(b) if b.visible => layer_blur = layer_blur.or(Some(b.radius)),
            Effect::BackgroundBlur(b) if b.visible => {
                background_blur = background_blur.or(Some(b.radius))
            }
            _ => {}
        }
    }

    if !shadows.is_empty() {
        set(out, "box-shadow", shadows.join(", "));
    }
    if let Some(radius) = layer_blur {
        set(out, "filter", format!("blur({})", format_length(radius, unit)));
    }
    if let Some(radius) = background_blur {
        set(
            out,
            "backdrop-filter",
            format!("blur({})", format_length(radius, unit)),
        );
    }
}

// =========================================================================
// Corner radius
// =========================================================================

pub fn apply_corner_radius(node: &SceneNode, unit: CssUnit, out: &mut Declarations) {
    let Attr::Value(radius) = node.corner_radius else {
        return;
    };
    if let Some(uniform) = radius.uniform() {
        if uniform > 0.0 {
            set(out, "border-radius", format_length(uniform, unit));
        }
        return;
    }
    if let CornerRadius::PerCorner {
        top_left,
        top_right,
        bottom_right,
        bottom_left,
    } = radius
    {
        set(
            out,
            "border-radius",
            [top_left, top_right, bottom_right, bottom_left]
                .iter()
                .map(|r| format_length(*r, unit))
                .collect::<Vec<_>>()
                .join(" "),
        );
    }
}

// =========================================================================
// Typography
// =========================================================================

/// Weight implied by a font style name such as "Semi Bold Italic".
pub fn weight_from_style(style: &str) -> u16 {
    const KEYWORDS: &[(&str, u16)] = &[
        ("thin", 100),
        ("hairline", 100),
        ("extralight", 200),
        ("ultralight", 200),
        ("light", 300),
        ("medium", 500),
        ("semibold", 600),
        ("demibold", 600),
        ("extrabold", 800),
        ("ultrabold", 800),
        ("bold", 700),
        ("black", 900),
        ("heavy", 900),
    ];
    let normalized: String = style
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();
    KEYWORDS
        .iter()
        .find(|(keyword, _)| normalized.contains(keyword))
        .map(|(_, weight)| *weight)
        .unwrap_or(400)
}

/// Numeric weight when reported, otherwise derived from the style name.
pub fn font_weight(text: &TextProps) -> Option<u16> {
    match text.font_weight {
        Attr::Value(w) => Some(w.round().clamp(1.0, 1000.0) as u16),
        Attr::Mixed => None,
        Attr::Absent => text
            .font_name
            .value()
            .map(|font| weight_from_style(&font.style)),
    }
}

pub fn is_bold(text: &TextProps) -> bool {
    font_weight(text).is_some_and(|w| w >= 600)
}

pub fn format_line_height(line_height: LineHeight, unit: CssUnit) -> Option<String> {
    match line_height {
        LineHeight::Pixels { value } => Some(format_length(value, unit)),
        LineHeight::Percent { value } => Some(format_decimal(value / 100.0)),
        LineHeight::Auto => None,
    }
}

pub fn format_letter_spacing(value: f64, unit: LengthUnit, css_unit: CssUnit) -> String {
    match unit {
        LengthUnit::Pixels => format_length(value, css_unit),
        LengthUnit::Percent => format!("{}em", format_decimal(value / 100.0)),
    }
}

pub fn apply_typography(node: &SceneNode, unit: CssUnit, out: &mut Declarations) {
    let Some(text) = &node.text else {
        return;
    };

    if let Some(font) = text.font_name.value() {
        set(out, "font-family", format!("\"{}\", sans-serif", font.family));
        if font.style.to_lowercase().contains("italic") {
            set(out, "font-style", "italic");
        }
    }
    if let Some(weight) = font_weight(text) {
        set(out, "font-weight", weight.to_string());
    }
    if let Some(size) = text.font_size.get() {
        set(out, "font-size", format_length(size, unit));
    }
    if let Some(line_height) = text.line_height.get().and_then(|lh| format_line_height(lh, unit)) {
        set(out, "line-height", line_height);
    }
    if let Some(spacing) = text.letter_spacing.get() {
        if spacing.value != 0.0 {
            set(
                out,
                "letter-spacing",
                format_letter_spacing(spacing.value, spacing.unit, unit),
            );
        }
    }
    if let Some(align) = text.text_align {
        let value = match align {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
            TextAlign::Justified => "justify",
        };
        set(out, "text-align", value);
    }
    match text.decoration {
        Attr::Value(TextDecoration::Underline) => set(out, "text-decoration", "underline"),
        Attr::Value(TextDecoration::Strikethrough) => set(out, "text-decoration", "line-through"),
        _ => {}
    }
    match text.text_case {
        Attr::Value(TextCase::Upper) => set(out, "text-transform", "uppercase"),
        Attr::Value(TextCase::Lower) => set(out, "text-transform", "lowercase"),
        Attr::Value(TextCase::Title) => set(out, "text-transform", "capitalize"),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use stylelift_scene::Loader;

    fn node(value: serde_json::Value) -> SceneNode {
        Loader::load_value(value).unwrap()
    }

    fn run(f: impl Fn(&SceneNode, &mut Declarations), value: serde_json::Value) -> Declarations {
        let mut out = Declarations::new();
        f(&node(value), &mut out);
        out
    }

    // =========================================================================
    // Units and colors
    // =========================================================================

    #[test]
    fn test_length_px_rounds() {
        assert_eq!(format_length(119.6, CssUnit::Px), "120px");
        assert_eq!(format_length(0.0, CssUnit::Px), "0px");
    }

    #[test]
    fn test_length_rem_and_em() {
        assert_eq!(format_length(24.0, CssUnit::Rem), "1.50rem");
        assert_eq!(format_length(8.0, CssUnit::Em), "0.50em");
    }

    #[test]
    fn test_rem_round_trip() {
        for px in [1.0, 7.0, 13.0, 16.0, 120.0, 333.0] {
            let rem = format_length(px, CssUnit::Rem);
            let value: f64 = rem.trim_end_matches("rem").parse().unwrap();
            assert!((value * ROOT_FONT_SIZE - px).abs() <= 0.16 + 0.01);
            assert!((value - px / ROOT_FONT_SIZE).abs() <= 0.005 + f64::EPSILON);
        }
    }

    #[test]
    fn test_color_opaque_hex() {
        assert_eq!(format_color(Color::rgb(1.0, 0.0, 0.0), 1.0), "#ff0000");
    }

    #[test]
    fn test_color_translucent_rgba() {
        assert_eq!(
            format_color(Color::rgb(1.0, 0.0, 0.0), 0.5),
            "rgba(255, 0, 0, 0.50)"
        );
    }

    // =========================================================================
    // Size, fills, strokes
    // =========================================================================

    #[test]
    fn test_size() {
        let out = run(
            |n, o| apply_size(n, CssUnit::Px, o),
            json!({"type": "FRAME", "width": 120, "height": 40}),
        );
        assert_eq!(out.get("width").unwrap(), "120px");
        assert_eq!(out.get("height").unwrap(), "40px");
    }

    #[test]
    fn test_size_absent() {
        let out = run(|n, o| apply_size(n, CssUnit::Px, o), json!({"type": "FRAME"}));
        assert!(out.is_empty());
    }

    #[test]
    fn test_fill_background_and_text_color() {
        let fill = json!([{"type": "SOLID", "color": {"r": 0, "g": 0, "b": 1}}]);
        let out = run(apply_fills, json!({"type": "FRAME", "fills": fill.clone()}));
        assert_eq!(out.get("background-color").unwrap(), "#0000ff");
        let out = run(apply_fills, json!({"type": "TEXT", "fills": fill}));
        assert_eq!(out.get("color").unwrap(), "#0000ff");
        assert!(out.get("background-color").is_none());
    }

    #[test]
    fn test_fill_first_visible_wins() {
        let out = run(
            apply_fills,
            json!({"type": "FRAME", "fills": [
                {"type": "SOLID", "visible": false, "color": {"r": 1, "g": 1, "b": 1}},
                {"type": "SOLID", "color": {"r": 1, "g": 0, "b": 0}},
                {"type": "SOLID", "color": {"r": 0, "g": 1, "b": 0}}
            ]}),
        );
        assert_eq!(out.get("background-color").unwrap(), "#ff0000");
    }

    #[test]
    fn test_fill_mixed_emits_nothing() {
        let out = run(apply_fills, json!({"type": "TEXT", "fills": "mixed"}));
        assert!(out.is_empty());
    }

    #[test]
    fn test_image_fill_fit() {
        let out = run(
            apply_fills,
            json!({"type": "RECTANGLE", "fills": [{"type": "IMAGE", "scaleMode": "FIT", "imageHash": "h1"}]}),
        );
        assert_eq!(out.get("background-image").unwrap(), "url(\"assets/h1.png\")");
        assert_eq!(out.get("background-size").unwrap(), "contain");
        assert_eq!(out.get("background-repeat").unwrap(), "no-repeat");
    }

    #[test]
    fn test_linear_gradient() {
        let out = run(
            apply_fills,
            json!({"type": "FRAME", "fills": [{"type": "GRADIENT_LINEAR", "gradientStops": [
                {"color": {"r": 1, "g": 0, "b": 0, "a": 1}, "position": 0},
                {"color": {"r": 0, "g": 0, "b": 1, "a": 1}, "position": 1}
            ]}]}),
        );
        assert_eq!(
            out.get("background-image").unwrap(),
            "linear-gradient(180deg, #ff0000 0%, #0000ff 100%)"
        );
    }

    #[test]
    fn test_radial_gradient() {
        let out = run(
            apply_fills,
            json!({"type": "FRAME", "fills": [{"type": "GRADIENT_RADIAL", "gradientStops": [
                {"color": {"r": 1, "g": 1, "b": 1, "a": 1}, "position": 0},
                {"color": {"r": 0, "g": 0, "b": 0, "a": 0.5}, "position": 0.5}
            ]}]}),
        );
        assert_eq!(
            out.get("background-image").unwrap(),
            "radial-gradient(circle, #ffffff 0%, rgba(0, 0, 0, 0.50) 50%)"
        );
    }

    #[test]
    fn test_angular_and_diamond_fall_back_to_linear() {
        for kind in ["GRADIENT_ANGULAR", "GRADIENT_DIAMOND"] {
            let out = run(
                apply_fills,
                json!({"type": "FRAME", "fills": [{"type": kind, "gradientStops": [
                    {"color": {"r": 0, "g": 1, "b": 0, "a": 1}, "position": 0},
                    {"color": {"r": 0, "g": 0, "b": 1, "a": 1}, "position": 1}
                ]}]}),
            );
            assert_eq!(
                out.get("background-image").unwrap(),
                "linear-gradient(180deg, #00ff00 0%, #0000ff 100%)",
                "{kind}"
            );
        }
    }

    #[test]
    fn test_image_fill_tile_and_crop() {
        let out = run(
            apply_fills,
            json!({"type": "RECTANGLE", "fills": [{"type": "IMAGE", "scaleMode": "TILE", "imageHash": "t1"}]}),
        );
        assert_eq!(out.get("background-image").unwrap(), "url(\"assets/t1.png\")");
        assert_eq!(out.get("background-repeat").unwrap(), "repeat");
        assert!(out.get("background-size").is_none());

        let out = run(
            apply_fills,
            json!({"type": "RECTANGLE", "fills": [{"type": "IMAGE", "scaleMode": "CROP", "imageHash": "c1"}]}),
        );
        assert_eq!(out.get("background-size").unwrap(), "cover");
        assert_eq!(out.get("background-position").unwrap(), "center");
        assert!(out.get("background-repeat").is_none());
    }

    #[test]
    fn test_stroke_inside() {
        let out = run(
            |n, o| apply_strokes(n, CssUnit::Px, o),
            json!({"type": "FRAME", "strokeWeight": 2, "strokeAlign": "INSIDE",
                   "strokes": [{"type": "SOLID", "color": {"r": 0, "g": 0, "b": 0}}]}),
        );
        assert_eq!(out.get("border-style").unwrap(), "solid");
        assert_eq!(out.get("border-width").unwrap(), "2px");
        assert_eq!(out.get("border-color").unwrap(), "#000000");
        assert_eq!(out.get("box-sizing").unwrap(), "border-box");
    }

    #[test]
    fn test_stroke_outside_uses_outline() {
        let out = run(
            |n, o| apply_strokes(n, CssUnit::Px, o),
            json!({"type": "FRAME", "strokeWeight": 1, "strokeAlign": "OUTSIDE",
                   "strokes": [{"type": "SOLID", "color": {"r": 1, "g": 1, "b": 1}}]}),
        );
        assert_eq!(out.get("outline").unwrap(), "1px solid #ffffff");
        assert_eq!(out.get("outline-offset").unwrap(), "0");
        assert!(out.get("border-style").is_none());
    }

    #[test]
    fn test_stroke_mixed_weight_omits_width() {
        let out = run(
            |n, o| apply_strokes(n, CssUnit::Px, o),
            json!({"type": "FRAME", "strokeWeight": "mixed",
                   "strokes": [{"type": "SOLID", "color": {"r": 1, "g": 1, "b": 1}}]}),
        );
        assert!(out.get("border-width").is_none());
        assert_eq!(out.get("border-style").unwrap(), "solid");
    }

    // =========================================================================
    // Effects and radius
    // =========================================================================

    #[test]
    fn test_shadows_joined() {
        let out = run(
            |n, o| apply_effects(n, CssUnit::Px, o),
            json!({"type": "FRAME", "effects": [
                {"type": "DROP_SHADOW", "color": {"r": 0, "g": 0, "b": 0, "a": 0.25},
                 "offset": {"x": 0, "y": 4}, "radius": 8},
                {"type": "INNER_SHADOW", "color": {"r": 0, "g": 0, "b": 0, "a": 1},
                 "offset": {"x": 1, "y": 1}, "radius": 2, "spread": 1},
                {"type": "LAYER_BLUR", "radius": 3},
                {"type": "BACKGROUND_BLUR", "radius": 10, "visible": false}
            ]}),
        );
        assert_eq!(
            out.get("box-shadow").unwrap(),
            "0px 4px 8px 0px rgba(0, 0, 0, 0.25), 1px 1px 2px 1px #000000 inset"
        );
        assert_eq!(out.get("filter").unwrap(), "blur(3px)");
        assert!(out.get("backdrop-filter").is_none());
    }

    #[test]
    fn test_background_blur_in_rem() {
        let out = run(
            |n, o| apply_effects(n, CssUnit::Rem, o),
            json!({"type": "FRAME", "effects": [
                {"type": "BACKGROUND_BLUR", "radius": 8},
                {"type": "BACKGROUND_BLUR", "radius": 32}
            ]}),
        );
        assert_eq!(out.get("backdrop-filter").unwrap(), "blur(0.50rem)");
        assert!(out.get("filter").is_none());
        assert!(out.get("box-shadow").is_none());
    }

    #[test]
    fn test_radius_uniform() {
        let out = run(
            |n, o| apply_corner_radius(n, CssUnit::Px, o),
            json!({"type": "RECTANGLE", "cornerRadius": 8}),
        );
        assert_eq!(out.get("border-radius").unwrap(), "8px");
    }

    #[test]
    fn test_radius_zero_omitted() {
        let out = run(
            |n, o| apply_corner_radius(n, CssUnit::Px, o),
            json!({"type": "RECTANGLE", "cornerRadius": 0}),
        );
        assert!(out.is_empty());
    }

    #[test]
    fn test_radius_per_corner() {
        let out = run(
            |n, o| apply_corner_radius(n, CssUnit::Px, o),
            json!({"type": "RECTANGLE", "cornerRadius": "mixed", "topLeftRadius": 4,
                   "topRightRadius": 8, "bottomRightRadius": 12, "bottomLeftRadius": 16}),
        );
        assert_eq!(out.get("border-radius").unwrap(), "4px 8px 12px 16px");
    }

    #[test]
    fn test_radius_per_corner_collapses() {
        let out = run(
            |n, o| apply_corner_radius(n, CssUnit::Px, o),
            json!({"type": "RECTANGLE", "topLeftRadius": 6, "topRightRadius": 6,
                   "bottomRightRadius": 6, "bottomLeftRadius": 6}),
        );
        assert_eq!(out.get("border-radius").unwrap(), "6px");
    }

    #[test]
    fn test_radius_mixed_unresolved() {
        let out = run(
            |n, o| apply_corner_radius(n, CssUnit::Px, o),
            json!({"type": "RECTANGLE", "cornerRadius": "mixed"}),
        );
        assert!(out.is_empty());
    }

    // =========================================================================
    // Typography
    // =========================================================================

    #[test]
    fn test_weight_from_style() {
        assert_eq!(weight_from_style("Thin"), 100);
        assert_eq!(weight_from_style("Extra Light"), 200);
        assert_eq!(weight_from_style("Light Italic"), 300);
        assert_eq!(weight_from_style("Regular"), 400);
        assert_eq!(weight_from_style("Medium"), 500);
        assert_eq!(weight_from_style("Semi Bold"), 600);
        assert_eq!(weight_from_style("Bold"), 700);
        assert_eq!(weight_from_style("ExtraBold"), 800);
        assert_eq!(weight_from_style("Heavy"), 900);
        assert_eq!(weight_from_style("Condensed"), 400);
    }

    #[test]
    fn test_typography_full() {
        let out = run(
            |n, o| apply_typography(n, CssUnit::Px, o),
            json!({"type": "TEXT", "characters": "Hello",
                   "fontName": {"family": "Inter", "style": "Bold Italic"},
                   "fontSize": 18,
                   "lineHeight": {"unit": "PERCENT", "value": 150},
                   "letterSpacing": {"unit": "PIXELS", "value": 0.5},
                   "textAlignHorizontal": "JUSTIFIED",
                   "textDecoration": "STRIKETHROUGH",
                   "textCase": "UPPER"}),
        );
        assert_eq!(out.get("font-family").unwrap(), "\"Inter\", sans-serif");
        assert_eq!(out.get("font-style").unwrap(), "italic");
        assert_eq!(out.get("font-weight").unwrap(), "700");
        assert_eq!(out.get("font-size").unwrap(), "18px");
        assert_eq!(out.get("line-height").unwrap(), "1.5");
        assert_eq!(out.get("letter-spacing").unwrap(), "1px");
        assert_eq!(out.get("text-align").unwrap(), "justify");
        assert_eq!(out.get("text-decoration").unwrap(), "line-through");
        assert_eq!(out.get("text-transform").unwrap(), "uppercase");
    }

    #[test]
    fn test_typography_numeric_weight_wins() {
        let out = run(
            |n, o| apply_typography(n, CssUnit::Px, o),
            json!({"type": "TEXT", "fontName": {"family": "Inter", "style": "Regular"},
                   "fontWeight": 700}),
        );
        assert_eq!(out.get("font-weight").unwrap(), "700");
    }

    #[test]
    fn test_typography_auto_line_height_and_mixed_size() {
        let out = run(
            |n, o| apply_typography(n, CssUnit::Px, o),
            json!({"type": "TEXT", "fontSize": "mixed", "lineHeight": {"unit": "AUTO"}}),
        );
        assert!(out.get("font-size").is_none());
        assert!(out.get("line-height").is_none());
    }

    #[test]
    fn test_typography_pixel_line_height_in_rem() {
        let out = run(
            |n, o| apply_typography(n, CssUnit::Rem, o),
            json!({"type": "TEXT", "fontSize": 16, "lineHeight": {"unit": "PIXELS", "value": 24}}),
        );
        assert_eq!(out.get("font-size").unwrap(), "1.00rem");
        assert_eq!(out.get("line-height").unwrap(), "1.50rem");
    }

    #[test]
    fn test_typography_ignored_on_frames() {
        let out = run(
            |n, o| apply_typography(n, CssUnit::Px, o),
            json!({"type": "FRAME", "fontSize": 16}),
        );
        assert!(out.is_empty());
    }
}
