//! Scene document loader.
//!
//! Reads the host's JSON snapshot (flat, camelCase properties as the host
//! exposes them) into typed `SceneNode` trees. Capability groups are built
//! only for node kinds that have them, every node gets a `NodeKey` in
//! pre-order, and each child records its parent's key.
//!
//! ```text
//! JSON snapshot → RawNode (serde) → Loader::build() → SceneNode tree
//! ```

use crate::attr::Attr;
use crate::node::{
    AutoLayout, AxisAlign, ChildAlign, ChildLayout, CornerRadius, Effect, FontName, Geometry,
    LayoutDirection, LetterSpacing, LineHeight, NodeKey, NodeKind, Padding, Paint, SceneNode,
    StrokeAlign, TextAlign, TextCase, TextDecoration, TextProps,
};
use crate::LoadError;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
enum RawLayoutMode {
    None,
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
enum RawWrap {
    NoWrap,
    Wrap,
}

/// A node exactly as the host serializes it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawNode {
    #[serde(rename = "type")]
    kind: NodeKind,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    visible: Option<bool>,

    #[serde(default)]
    x: Option<f64>,
    #[serde(default)]
    y: Option<f64>,
    #[serde(default)]
    width: Option<f64>,
    #[serde(default)]
    height: Option<f64>,

    #[serde(default)]
    fills: Attr<Vec<Paint>>,
    #[serde(default)]
    strokes: Option<Vec<Paint>>,
    #[serde(default)]
    stroke_weight: Attr<f64>,
    #[serde(default)]
    stroke_align: Option<StrokeAlign>,
    #[serde(default)]
    effects: Option<Vec<Effect>>,

    #[serde(default)]
    corner_radius: Attr<f64>,
    #[serde(default)]
    top_left_radius: Option<f64>,
    #[serde(default)]
    top_right_radius: Option<f64>,
    #[serde(default)]
    bottom_right_radius: Option<f64>,
    #[serde(default)]
    bottom_left_radius: Option<f64>,

    #[serde(default)]
    layout_mode: Option<RawLayoutMode>,
    #[serde(default)]
    item_spacing: Option<f64>,
    #[serde(default)]
    counter_axis_spacing: Option<f64>,
    #[serde(default)]
    padding_top: Option<f64>,
    #[serde(default)]
    padding_right: Option<f64>,
    #[serde(default)]
    padding_bottom: Option<f64>,
    #[serde(default)]
    padding_left: Option<f64>,
    #[serde(default)]
    primary_axis_align_items: Option<AxisAlign>,
    #[serde(default)]
    counter_axis_align_items: Option<AxisAlign>,
    #[serde(default)]
    layout_wrap: Option<RawWrap>,
    #[serde(default)]
    layout_grow: Option<f64>,
    #[serde(default)]
    layout_align: Option<ChildAlign>,

    #[serde(default)]
    characters: Option<String>,
    #[serde(default)]
    font_name: Attr<FontName>,
    #[serde(default)]
    font_weight: Attr<f64>,
    #[serde(default)]
    font_size: Attr<f64>,
    #[serde(default)]
    line_height: Attr<LineHeight>,
    #[serde(default)]
    letter_spacing: Attr<LetterSpacing>,
    #[serde(default)]
    text_align_horizontal: Option<TextAlign>,
    #[serde(default)]
    text_decoration: Attr<TextDecoration>,
    #[serde(default)]
    text_case: Attr<TextCase>,

    #[serde(default)]
    children: Vec<RawNode>,
}

/// Builds typed trees from the host's JSON snapshot.
pub struct Loader {
    next_key: usize,
}

impl Loader {
    fn new() -> Self {
        Self { next_key: 0 }
    }

    /// Load a single root node.
    pub fn load(source: &str) -> Result<SceneNode, LoadError> {
        let raw: RawNode = serde_json::from_str(source).map_err(LoadError::from)?;
        Ok(Loader::new().build(raw, None))
    }

    /// Load a selection (a JSON array of root nodes). Each root gets its own
    /// key space.
    pub fn load_selection(source: &str) -> Result<Vec<SceneNode>, LoadError> {
        let raws: Vec<RawNode> = serde_json::from_str(source).map_err(LoadError::from)?;
        Ok(raws
            .into_iter()
            .map(|raw| Loader::new().build(raw, None))
            .collect())
    }

    /// Load a single root from an already-parsed JSON value.
    pub fn load_value(value: serde_json::Value) -> Result<SceneNode, LoadError> {
        let raw: RawNode = serde_json::from_value(value).map_err(LoadError::from)?;
        Ok(Loader::new().build(raw, None))
    }

    fn build(&mut self, raw: RawNode, parent: Option<NodeKey>) -> SceneNode {
        let key = NodeKey(self.next_key);
        self.next_key += 1;

        let kind = raw.kind;
        let geometry = match (raw.width, raw.height) {
            (Some(width), Some(height)) => Some(Geometry {
                x: raw.x.unwrap_or(0.0),
                y: raw.y.unwrap_or(0.0),
                width,
                height,
            }),
            _ => None,
        };

        // Reads the whole raw node, so it runs before any field moves out.
        let auto_layout = if kind.supports_auto_layout() {
            auto_layout(&raw)
        } else {
            None
        };

        let corner_radius = corner_radius(
            raw.corner_radius,
            [
                raw.top_left_radius,
                raw.top_right_radius,
                raw.bottom_right_radius,
                raw.bottom_left_radius,
            ],
        );

        let child_layout = if raw.layout_grow.is_some() || raw.layout_align.is_some() {
            Some(ChildLayout {
                grow: raw.layout_grow.unwrap_or(0.0),
                align: raw.layout_align,
            })
        } else {
            None
        };

        let text = if kind == NodeKind::Text {
            Some(TextProps {
                characters: raw.characters.unwrap_or_default(),
                font_name: raw.font_name,
                font_weight: raw.font_weight,
                font_size: raw.font_size,
                line_height: raw.line_height,
                letter_spacing: raw.letter_spacing,
                text_align: raw.text_align_horizontal,
                decoration: raw.text_decoration,
                text_case: raw.text_case,
            })
        } else {
            None
        };

        let children = raw
            .children
            .into_iter()
            .map(|child| self.build(child, Some(key)))
            .collect();

        SceneNode {
            key,
            parent,
            id: raw.id.filter(|id| !id.is_empty()),
            name: raw.name,
            kind,
            visible: raw.visible.unwrap_or(true),
            geometry,
            fills: raw.fills,
            strokes: raw.strokes.unwrap_or_default(),
            stroke_weight: raw.stroke_weight,
            stroke_align: raw.stroke_align,
            effects: raw.effects.unwrap_or_default(),
            corner_radius,
            auto_layout,
            child_layout,
            text,
            children,
        }
    }
}

/// A mixed uniform radius means the per-corner fields hold the real values.
fn corner_radius(uniform: Attr<f64>, corners: [Option<f64>; 4]) -> Attr<CornerRadius> {
    let per_corner = || match corners {
        [Some(top_left), Some(top_right), Some(bottom_right), Some(bottom_left)] => {
            Attr::Value(CornerRadius::PerCorner {
                top_left,
                top_right,
                bottom_right,
                bottom_left,
            })
        }
        _ => Attr::Absent,
    };
    match uniform {
        Attr::Value(r) => Attr::Value(CornerRadius::Uniform(r)),
        Attr::Mixed => match per_corner() {
            Attr::Absent => Attr::Mixed,
            resolved => resolved,
        },
        Attr::Absent => per_corner(),
    }
}

fn auto_layout(raw: &RawNode) -> Option<AutoLayout> {
    let direction = match raw.layout_mode? {
        RawLayoutMode::None => return None,
        RawLayoutMode::Horizontal => LayoutDirection::Horizontal,
        RawLayoutMode::Vertical => LayoutDirection::Vertical,
    };
    Some(AutoLayout {
        direction,
        item_spacing: raw.item_spacing.unwrap_or(0.0),
        counter_axis_spacing: raw.counter_axis_spacing,
        padding: Padding {
            top: raw.padding_top.unwrap_or(0.0),
            right: raw.padding_right.unwrap_or(0.0),
            bottom: raw.padding_bottom.unwrap_or(0.0),
            left: raw.padding_left.unwrap_or(0.0),
        },
        primary_align: raw.primary_axis_align_items,
        counter_align: raw.counter_axis_align_items,
        wrap: raw.layout_wrap == Some(RawWrap::Wrap),
    })
}

/// Back-reference index over one loaded tree.
///
/// Borrows every node by its key so ancestors can be looked up without the
/// tree owning upward links.
pub struct SceneIndex<'a> {
    nodes: Vec<&'a SceneNode>,
}

impl<'a> SceneIndex<'a> {
    pub fn new(root: &'a SceneNode) -> Self {
        let mut nodes = Vec::new();
        root.walk(&mut |node| nodes.push(node));
        nodes.sort_by_key(|n| n.key);
        Self { nodes }
    }

    pub fn get(&self, key: NodeKey) -> Option<&'a SceneNode> {
        self.nodes
            .binary_search_by_key(&key, |n| n.key)
            .ok()
            .map(|i| self.nodes[i])
    }

    pub fn parent(&self, node: &SceneNode) -> Option<&'a SceneNode> {
        node.parent.and_then(|key| self.get(key))
    }

    /// Ancestors from the direct parent up to the root.
    pub fn ancestors(&self, node: &SceneNode) -> Vec<&'a SceneNode> {
        let mut out = Vec::new();
        let mut current = self.parent(node);
        while let Some(n) = current {
            out.push(n);
            current = self.parent(n);
        }
        out
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
