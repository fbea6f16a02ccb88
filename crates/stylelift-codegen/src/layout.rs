//! Auto-layout to CSS flex/grid mapping.

use crate::config::{CssUnit, LayoutPreference};
use crate::css::Declarations;
use crate::style::format_length;
use stylelift_scene::node::{AutoLayout, AxisAlign, LayoutDirection, Padding};
use stylelift_scene::SceneNode;

/// Fraction two track sizes may differ by and still count as equal.
const EQUAL_TRACK_TOLERANCE: f64 = 0.05;

/// Children count from which a grid pays off under the grid preference.
const GRID_MIN_CHILDREN: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutModel {
    Flex,
    Grid,
}

/// Pick flex or grid for an auto-layout node.
pub fn choose_model(node: &SceneNode, layout: &AutoLayout, preference: LayoutPreference) -> LayoutModel {
    if preference != LayoutPreference::Grid {
        return LayoutModel::Flex;
    }
    let visible = node.visible_children().count();
    let any_stretch = node
        .visible_children()
        .any(|c| c.child_layout.is_some_and(|l| l.is_stretch()));
    if layout.wrap || visible >= GRID_MIN_CHILDREN || any_stretch {
        LayoutModel::Grid
    } else {
        LayoutModel::Flex
    }
}

/// Emit the container declarations for a node's auto-layout. Returns the
/// model used, or `None` when the node has no auto-layout.
pub fn apply_layout(
    node: &SceneNode,
    preference: LayoutPreference,
    unit: CssUnit,
    out: &mut Declarations,
) -> Option<LayoutModel> {
    let layout = node.auto_layout.as_ref()?;
    let model = choose_model(node, layout, preference);
    let declarations = match model {
        LayoutModel::Flex => flex_declarations(layout, unit),
        LayoutModel::Grid => grid_declarations(node, layout, unit),
    };
    out.extend(declarations);
    Some(model)
}

/// Flex mapping of an auto-layout, shared with the layout extractor.
pub fn flex_declarations(layout: &AutoLayout, unit: CssUnit) -> Declarations {
    let mut out = Declarations::new();
    out.insert("display".into(), "flex".into());
    let direction = match layout.direction {
        LayoutDirection::Horizontal => "row",
        LayoutDirection::Vertical => "column",
    };
    out.insert("flex-direction".into(), direction.into());

    if let Some(justify) = layout.primary_align.and_then(flex_justify) {
        out.insert("justify-content".into(), justify.into());
    }
    if let Some(align) = layout.counter_align.and_then(flex_align) {
        out.insert("align-items".into(), align.into());
    }
    if layout.item_spacing > 0.0 {
        out.insert("gap".into(), format_length(layout.item_spacing, unit));
    }
    if layout.wrap {
        out.insert("flex-wrap".into(), "wrap".into());
        if let Some(spacing) = layout.counter_axis_spacing.filter(|s| *s > 0.0) {
            out.insert("row-gap".into(), format_length(spacing, unit));
        }
    }
    if let Some(padding) = format_padding(&layout.padding, unit) {
        out.insert("padding".into(), padding);
    }
    out
}

fn flex_justify(align: AxisAlign) -> Option<&'static str> {
    match align {
        AxisAlign::Min => Some("flex-start"),
        AxisAlign::Max => Some("flex-end"),
        AxisAlign::Center => Some("center"),
        AxisAlign::SpaceBetween => Some("space-between"),
        AxisAlign::Baseline => None,
    }
}

fn flex_align(align: AxisAlign) -> Option<&'static str> {
    match align {
        AxisAlign::Min => Some("flex-start"),
        AxisAlign::Max => Some("flex-end"),
        AxisAlign::Center => Some("center"),
        AxisAlign::Baseline => Some("baseline"),
        AxisAlign::SpaceBetween => None,
    }
}

fn grid_align(align: AxisAlign) -> Option<&'static str> {
    match align {
        AxisAlign::Min => Some("start"),
        AxisAlign::Max => Some("end"),
        AxisAlign::Center => Some("center"),
        AxisAlign::SpaceBetween => Some("space-between"),
        AxisAlign::Baseline => None,
    }
}

/// Shorthand padding, or `None` when every side is zero.
pub fn format_padding(padding: &Padding, unit: CssUnit) -> Option<String> {
    if padding.is_zero() {
        return None;
    }
    let side = |v: f64| format_length(v.max(0.0), unit);
    let Padding {
        top,
        right,
        bottom,
        left,
    } = *padding;
    let value = if top == bottom && left == right && top == left {
        side(top)
    } else if top == bottom && left == right {
        format!("{} {}", side(top), side(left))
    } else if left == right {
        format!("{} {} {}", side(top), side(left), side(bottom))
    } else {
        format!("{} {} {} {}", side(top), side(right), side(bottom), side(left))
    };
    Some(value)
}

// =========================================================================
// Grid
// =========================================================================

pub fn grid_declarations(node: &SceneNode, layout: &AutoLayout, unit: CssUnit) -> Declarations {
    let mut out = Declarations::new();
    out.insert("display".into(), "grid".into());

    let (template_property, main_align, cross_align) = match layout.direction {
        LayoutDirection::Horizontal => ("grid-template-columns", "justify-content", "align-content"),
        LayoutDirection::Vertical => ("grid-template-rows", "align-content", "justify-content"),
    };
    if let Some(template) = grid_template(node, layout, unit) {
        out.insert(template_property.into(), template);
    }
    if let Some(value) = layout.primary_align.and_then(grid_align) {
        out.insert(main_align.into(), value.into());
    }
    if let Some(value) = layout.counter_align.and_then(grid_align) {
        out.insert(cross_align.into(), value.into());
    }
    if layout.item_spacing > 0.0 {
        out.insert("gap".into(), format_length(layout.item_spacing, unit));
    }
    if let Some(padding) = format_padding(&layout.padding, unit) {
        out.insert("padding".into(), padding);
    }
    out
}

fn grid_template(node: &SceneNode, layout: &AutoLayout, unit: CssUnit) -> Option<String> {
    let children: Vec<&SceneNode> = node.visible_children().collect();
    if children.is_empty() {
        return None;
    }
    let along_axis = |child: &SceneNode| match layout.direction {
        LayoutDirection::Horizontal => child.width(),
        LayoutDirection::Vertical => child.height(),
    };

    let sizes: Option<Vec<f64>> = children.iter().map(|c| along_axis(c)).collect();
    if let Some(sizes) = sizes.filter(|s| tracks_are_equal(s)) {
        let count = if layout.wrap {
            fitting_tracks(node, layout, sizes[0]).unwrap_or(children.len())
        } else {
            children.len()
        };
        return Some(format!("repeat({count}, 1fr)"));
    }

    let tracks: Vec<String> = children
        .iter()
        .map(|child| {
            if child.child_layout.is_some_and(|l| l.is_stretch()) {
                "1fr".to_string()
            } else {
                along_axis(child)
                    .map(|size| format_length(size, unit))
                    .unwrap_or_else(|| "auto".to_string())
            }
        })
        .collect();
    Some(tracks.join(" "))
}

fn tracks_are_equal(sizes: &[f64]) -> bool {
    let max = sizes.iter().copied().fold(f64::MIN, f64::max);
    let min = sizes.iter().copied().fold(f64::MAX, f64::min);
    max > 0.0 && (max - min) <= max * EQUAL_TRACK_TOLERANCE
}

/// Tracks of `track` size that fit the container along its main axis.
fn fitting_tracks(node: &SceneNode, layout: &AutoLayout, track: f64) -> Option<usize> {
    let (extent, padding) = match layout.direction {
        LayoutDirection::Horizontal => (node.width()?, layout.padding.left + layout.padding.right),
        LayoutDirection::Vertical => (node.height()?, layout.padding.top + layout.padding.bottom),
    };
    let available = extent - padding + layout.item_spacing;
    let per_track = track + layout.item_spacing;
    if per_track <= 0.0 {
        return None;
    }
    Some(((available / per_track).floor() as usize).max(1))
}

// =========================================================================
// Children
// =========================================================================

/// Declarations a child of a flex container asks for.
pub fn apply_child_layout(child: &SceneNode, out: &mut Declarations) {
    let Some(layout) = child.child_layout else {
        return;
    };
    if layout.grow > 0.0 {
        out.insert("flex-grow".into(), "1".into());
    }
    if layout.is_stretch() {
        out.insert("align-self".into(), "stretch".into());
    }
}
