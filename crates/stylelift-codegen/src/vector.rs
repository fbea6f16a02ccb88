//! Vector export and placeholder graphics.
//!
//! Vector exports are the only asynchronous work of a conversion. They are
//! collected up front, issued together, and handed to the markup pass as
//! settled results keyed by node.

use crate::classify::{classify, ElementCategory};
use crate::config::{PluginConfig, SvgExportMode};
use crate::{format_decimal, format_number, MAX_DEPTH};
use futures::future::join_all;
use std::collections::HashMap;
use std::f64::consts::PI;
use stylelift_scene::{NodeKey, NodeKind, SceneNode};

/// Vector export error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExportError {
    #[error("vector export is not available")]
    Unavailable,
    #[error("vector export failed: {0}")]
    Failed(String),
}

/// Settled export results of one conversion.
pub type VectorExports = HashMap<NodeKey, Result<String, ExportError>>;

/// Host capability that renders a node as an SVG fragment.
#[allow(async_fn_in_trait)]
pub trait VectorExporter {
    async fn export_svg(&self, node: &SceneNode) -> Result<String, ExportError>;
}

/// Exporter for hosts that cannot render vectors. Every node falls back to
/// a placeholder.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoExporter;

impl VectorExporter for NoExporter {
    async fn export_svg(&self, _node: &SceneNode) -> Result<String, ExportError> {
        Err(ExportError::Unavailable)
    }
}

/// Visible nodes the markup pass renders as vectors, in document order.
/// Vectors, inputs and images are not descended into.
pub fn export_targets(root: &SceneNode) -> Vec<&SceneNode> {
    fn visit<'a>(node: &'a SceneNode, depth: usize, out: &mut Vec<&'a SceneNode>) {
        if !node.visible || depth > MAX_DEPTH {
            return;
        }
        match classify(node).category {
            category if category.is_vector() => out.push(node),
            ElementCategory::Input | ElementCategory::Image => {}
            _ => {
                for child in &node.children {
                    visit(child, depth + 1, out);
                }
            }
        }
    }

    let mut out = Vec::new();
    visit(root, 0, &mut out);
    out
}

/// Export every vector target concurrently. Only inline mode exports;
/// external mode references files instead.
pub async fn fetch_exports<E: VectorExporter>(
    root: &SceneNode,
    config: &PluginConfig,
    exporter: &E,
) -> VectorExports {
    if config.svg_export_mode != SvgExportMode::Inline {
        return VectorExports::new();
    }
    let targets = export_targets(root);
    let results = join_all(targets.iter().map(|node| exporter.export_svg(node))).await;

    targets
        .iter()
        .zip(results)
        .map(|(node, result)| {
            if let Err(e) = &result {
                log::debug!("export of '{}' failed, using placeholder: {e}", node.name);
            }
            (node.key, result)
        })
        .collect()
}

// =========================================================================
// Placeholders
// =========================================================================

/// Box used when a vector has no geometry.
const DEFAULT_SIZE: f64 = 24.0;
/// Inner radius of the placeholder star relative to the outer one.
const STAR_INNER_RATIO: f64 = 0.382;

/// Outline SVG standing in for a vector that could not be exported.
pub fn placeholder_svg(node: &SceneNode) -> String {
    let (w, h) = node
        .geometry
        .map(|g| (g.width, g.height))
        .unwrap_or((DEFAULT_SIZE, DEFAULT_SIZE));
    let (cx, cy) = (w / 2.0, h / 2.0);

    let shape = match node.kind {
        NodeKind::Star => {
            let points = star_points(cx, cy, cx.min(cy), 5);
            format!("<polygon points=\"{points}\" />")
        }
        NodeKind::Ellipse => format!(
            "<ellipse cx=\"{}\" cy=\"{}\" rx=\"{}\" ry=\"{}\" />",
            format_number(cx),
            format_number(cy),
            format_number(cx),
            format_number(cy)
        ),
        NodeKind::Polygon => {
            let points = polygon_points(cx, cy, cx.min(cy), 6);
            format!("<polygon points=\"{points}\" />")
        }
        NodeKind::Line => format!(
            "<line x1=\"0\" y1=\"0\" x2=\"{}\" y2=\"{}\" />",
            format_number(w),
            format_number(h)
        ),
        _ => format!(
            "<rect x=\"0\" y=\"0\" width=\"{}\" height=\"{}\" />",
            format_number(w),
            format_number(h)
        ),
    };

    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" stroke=\"currentColor\" fill=\"none\">\n  {shape}\n</svg>",
        w = format_number(w),
        h = format_number(h),
    )
}

fn format_points(points: impl Iterator<Item = (f64, f64)>) -> String {
    points
        .map(|(x, y)| format!("{},{}", format_decimal(x), format_decimal(y)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Regular polygon with its first vertex at the top.
fn polygon_points(cx: f64, cy: f64, r: f64, sides: usize) -> String {
    format_points((0..sides).map(|i| {
        let angle = -PI / 2.0 + 2.0 * PI * i as f64 / sides as f64;
        (cx + r * angle.cos(), cy + r * angle.sin())
    }))
}

/// Star alternating outer and inner vertices.
fn star_points(cx: f64, cy: f64, r: f64, tips: usize) -> String {
    let vertices = tips * 2;
    format_points((0..vertices).map(|i| {
        let radius = if i % 2 == 0 { r } else { r * STAR_INNER_RATIO };
        let angle = -PI / 2.0 + PI * i as f64 / tips as f64;
        (cx + radius * angle.cos(), cy + radius * angle.sin())
    }))
}
