//! Typed scene-graph nodes.
//!
//! A `SceneNode` carries the attributes common to every node plus optional
//! capability groups (geometry, auto-layout, text, ...). The loader only
//! fills a group for node kinds that legitimately have it, so consumers
//! match on `Option`s instead of probing for properties.

use crate::attr::Attr;
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// Pre-order position of a node within its loaded tree.
///
/// Assigned by the loader. Parents are referenced by key, never owned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey(pub usize);

/// Node type as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeKind {
    Frame,
    Group,
    Component,
    ComponentSet,
    Instance,
    Text,
    Rectangle,
    Vector,
    Star,
    Ellipse,
    Polygon,
    Line,
    BooleanOperation,
    #[serde(other)]
    Other,
}

impl NodeKind {
    /// The host's spelling of the kind (`FRAME`, `COMPONENT_SET`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Frame => "FRAME",
            NodeKind::Group => "GROUP",
            NodeKind::Component => "COMPONENT",
            NodeKind::ComponentSet => "COMPONENT_SET",
            NodeKind::Instance => "INSTANCE",
            NodeKind::Text => "TEXT",
            NodeKind::Rectangle => "RECTANGLE",
            NodeKind::Vector => "VECTOR",
            NodeKind::Star => "STAR",
            NodeKind::Ellipse => "ELLIPSE",
            NodeKind::Polygon => "POLYGON",
            NodeKind::Line => "LINE",
            NodeKind::BooleanOperation => "BOOLEAN_OPERATION",
            NodeKind::Other => "OTHER",
        }
    }

    /// Lowercase, hyphenated kind (`component-set`).
    pub fn kebab(self) -> String {
        self.as_str().to_ascii_lowercase().replace('_', "-")
    }

    /// Shapes drawn from path data.
    pub fn is_vector_like(self) -> bool {
        matches!(
            self,
            NodeKind::Vector
                | NodeKind::Star
                | NodeKind::Ellipse
                | NodeKind::Polygon
                | NodeKind::Line
                | NodeKind::BooleanOperation
        )
    }

    /// Kinds that behave like boxes holding other content.
    pub fn is_container_like(self) -> bool {
        matches!(
            self,
            NodeKind::Frame
                | NodeKind::Component
                | NodeKind::ComponentSet
                | NodeKind::Instance
                | NodeKind::Group
                | NodeKind::Rectangle
        )
    }

    /// Kinds that can carry auto-layout.
    pub fn supports_auto_layout(self) -> bool {
        matches!(
            self,
            NodeKind::Frame | NodeKind::Component | NodeKind::ComponentSet | NodeKind::Instance
        )
    }

    /// Kinds that act as a reusable component boundary.
    pub fn is_component_like(self) -> bool {
        matches!(
            self,
            NodeKind::Component | NodeKind::ComponentSet | NodeKind::Instance
        )
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Paint and effects
// ---------------------------------------------------------------------------

fn one() -> f64 {
    1.0
}

fn visible_by_default() -> bool {
    true
}

/// Color channels in the host's 0..=1 range.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default = "one")]
    pub a: f64,
}

impl Color {
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Channels scaled to 0..=255.
    pub fn to_bytes(self) -> (u8, u8, u8) {
        let scale = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        (scale(self.r), scale(self.g), scale(self.b))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolidPaint {
    pub color: Color,
    #[serde(default = "one")]
    pub opacity: f64,
    #[serde(default = "visible_by_default")]
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ColorStop {
    pub color: Color,
    pub position: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradientPaint {
    #[serde(default)]
    pub gradient_stops: Vec<ColorStop>,
    #[serde(default = "one")]
    pub opacity: f64,
    #[serde(default = "visible_by_default")]
    pub visible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScaleMode {
    #[default]
    Fill,
    Fit,
    Tile,
    Crop,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePaint {
    #[serde(default)]
    pub scale_mode: ScaleMode,
    #[serde(default)]
    pub image_hash: Option<String>,
    #[serde(default = "one")]
    pub opacity: f64,
    #[serde(default = "visible_by_default")]
    pub visible: bool,
}

/// One entry of a fill or stroke list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Paint {
    Solid(SolidPaint),
    GradientLinear(GradientPaint),
    GradientRadial(GradientPaint),
    GradientAngular(GradientPaint),
    GradientDiamond(GradientPaint),
    Image(ImagePaint),
    #[serde(other)]
    Unsupported,
}

impl Paint {
    pub fn is_visible(&self) -> bool {
        match self {
            Paint::Solid(p) => p.visible,
            Paint::GradientLinear(p)
            | Paint::GradientRadial(p)
            | Paint::GradientAngular(p)
            | Paint::GradientDiamond(p) => p.visible,
            Paint::Image(p) => p.visible,
            Paint::Unsupported => false,
        }
    }

    pub fn as_solid(&self) -> Option<&SolidPaint> {
        match self {
            Paint::Solid(p) => Some(p),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Shadow {
    pub color: Color,
    #[serde(default)]
    pub offset: Vector2,
    #[serde(default)]
    pub radius: f64,
    #[serde(default)]
    pub spread: f64,
    #[serde(default = "visible_by_default")]
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Blur {
    #[serde(default)]
    pub radius: f64,
    #[serde(default = "visible_by_default")]
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Effect {
    DropShadow(Shadow),
    InnerShadow(Shadow),
    LayerBlur(Blur),
    BackgroundBlur(Blur),
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StrokeAlign {
    Inside,
    Outside,
    Center,
}

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Geometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Corner rounding, either one radius or one per corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CornerRadius {
    Uniform(f64),
    PerCorner {
        top_left: f64,
        top_right: f64,
        bottom_right: f64,
        bottom_left: f64,
    },
}

impl CornerRadius {
    /// The single radius, when all corners agree.
    pub fn uniform(&self) -> Option<f64> {
        match *self {
            CornerRadius::Uniform(r) => Some(r),
            CornerRadius::PerCorner {
                top_left,
                top_right,
                bottom_right,
                bottom_left,
            } => (top_left == top_right && top_right == bottom_right && bottom_right == bottom_left)
                .then_some(top_left),
        }
    }
}

// ---------------------------------------------------------------------------
// Auto-layout
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutDirection {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AxisAlign {
    Min,
    Max,
    Center,
    SpaceBetween,
    Baseline,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Padding {
    pub fn is_zero(&self) -> bool {
        self.top <= 0.0 && self.right <= 0.0 && self.bottom <= 0.0 && self.left <= 0.0
    }
}

/// Flex-like layout attached to a container.
#[derive(Debug, Clone, PartialEq)]
pub struct AutoLayout {
    pub direction: LayoutDirection,
    pub item_spacing: f64,
    pub counter_axis_spacing: Option<f64>,
    pub padding: Padding,
    pub primary_align: Option<AxisAlign>,
    pub counter_align: Option<AxisAlign>,
    pub wrap: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChildAlign {
    Inherit,
    Stretch,
    Min,
    Center,
    Max,
}

/// How a child asks its auto-layout parent to size it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChildLayout {
    pub grow: f64,
    pub align: Option<ChildAlign>,
}

impl ChildLayout {
    pub fn is_stretch(&self) -> bool {
        self.align == Some(ChildAlign::Stretch)
    }
}

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FontName {
    pub family: String,
    #[serde(default)]
    pub style: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "unit", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LineHeight {
    Pixels { value: f64 },
    Percent { value: f64 },
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LengthUnit {
    Pixels,
    Percent,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct LetterSpacing {
    pub value: f64,
    pub unit: LengthUnit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextAlign {
    Left,
    Center,
    Right,
    Justified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextDecoration {
    None,
    Underline,
    Strikethrough,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextCase {
    Original,
    Upper,
    Lower,
    Title,
    #[serde(other)]
    Other,
}

/// Text-node attributes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextProps {
    pub characters: String,
    pub font_name: Attr<FontName>,
    pub font_weight: Attr<f64>,
    pub font_size: Attr<f64>,
    pub line_height: Attr<LineHeight>,
    pub letter_spacing: Attr<LetterSpacing>,
    pub text_align: Option<TextAlign>,
    pub decoration: Attr<TextDecoration>,
    pub text_case: Attr<TextCase>,
}

// ---------------------------------------------------------------------------
// Nodes
// ---------------------------------------------------------------------------

/// A node of the host's design document.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub key: NodeKey,
    pub parent: Option<NodeKey>,
    pub id: Option<String>,
    pub name: String,
    pub kind: NodeKind,
    pub visible: bool,
    pub geometry: Option<Geometry>,
    pub fills: Attr<Vec<Paint>>,
    pub strokes: Vec<Paint>,
    pub stroke_weight: Attr<f64>,
    pub stroke_align: Option<StrokeAlign>,
    pub effects: Vec<Effect>,
    pub corner_radius: Attr<CornerRadius>,
    pub auto_layout: Option<AutoLayout>,
    pub child_layout: Option<ChildLayout>,
    pub text: Option<TextProps>,
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    /// A bare node of the given kind, with no capabilities.
    pub fn new(kind: NodeKind, name: impl Into<String>) -> Self {
        Self {
            key: NodeKey(0),
            parent: None,
            id: None,
            name: name.into(),
            kind,
            visible: true,
            geometry: None,
            fills: Attr::Absent,
            strokes: Vec::new(),
            stroke_weight: Attr::Absent,
            stroke_align: None,
            effects: Vec::new(),
            corner_radius: Attr::Absent,
            auto_layout: None,
            child_layout: None,
            text: None,
            children: Vec::new(),
        }
    }

    pub fn is_text(&self) -> bool {
        self.kind == NodeKind::Text
    }

    pub fn width(&self) -> Option<f64> {
        self.geometry.map(|g| g.width)
    }

    pub fn height(&self) -> Option<f64> {
        self.geometry.map(|g| g.height)
    }

    /// Fill paints, or nothing when absent or mixed.
    pub fn fill_list(&self) -> &[Paint] {
        self.fills.value().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn visible_children(&self) -> impl Iterator<Item = &SceneNode> {
        self.children.iter().filter(|c| c.visible)
    }

    /// Pre-order walk over visible nodes. An invisible node prunes its whole
    /// subtree.
    pub fn walk_visible<'a>(&'a self, visitor: &mut impl FnMut(&'a SceneNode)) {
        if !self.visible {
            return;
        }
        visitor(self);
        for child in &self.children {
            child.walk_visible(visitor);
        }
    }

    /// Pre-order walk over every node, visible or not.
    pub fn walk<'a>(&'a self, visitor: &mut impl FnMut(&'a SceneNode)) {
        visitor(self);
        for child in &self.children {
            child.walk(visitor);
        }
    }

    /// Characters of the first text node in this subtree, if any.
    pub fn first_text(&self) -> Option<&str> {
        if let Some(text) = &self.text {
            return Some(text.characters.as_str());
        }
        self.visible_children().find_map(SceneNode::first_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_kind_kebab() {
        assert_eq!(NodeKind::ComponentSet.kebab(), "component-set");
        assert_eq!(NodeKind::Frame.kebab(), "frame");
    }

    #[test]
    fn test_kind_groups() {
        assert!(NodeKind::Star.is_vector_like());
        assert!(!NodeKind::Rectangle.is_vector_like());
        assert!(NodeKind::Rectangle.is_container_like());
        assert!(NodeKind::Instance.supports_auto_layout());
        assert!(!NodeKind::Group.supports_auto_layout());
    }

    #[test]
    fn test_color_bytes() {
        assert_eq!(Color::rgb(1.0, 0.5, 0.0).to_bytes(), (255, 128, 0));
    }

    #[test]
    fn test_corner_uniform_collapse() {
        let equal = CornerRadius::PerCorner {
            top_left: 4.0,
            top_right: 4.0,
            bottom_right: 4.0,
            bottom_left: 4.0,
        };
        assert_eq!(equal.uniform(), Some(4.0));
        let uneven = CornerRadius::PerCorner {
            top_left: 4.0,
            top_right: 0.0,
            bottom_right: 4.0,
            bottom_left: 0.0,
        };
        assert_eq!(uneven.uniform(), None);
    }

    #[test]
    fn test_walk_visible_prunes_hidden_subtree() {
        let mut hidden = SceneNode::new(NodeKind::Frame, "hidden");
        hidden.visible = false;
        hidden.children.push(SceneNode::new(NodeKind::Text, "inside"));
        let mut root = SceneNode::new(NodeKind::Frame, "root");
        root.children.push(hidden);
        root.children.push(SceneNode::new(NodeKind::Text, "shown"));

        let mut names = Vec::new();
        root.walk_visible(&mut |n| names.push(n.name.clone()));
        assert_eq!(names, vec!["root", "shown"]);
    }

    #[test]
    fn test_paint_visibility() {
        let paint = Paint::Solid(SolidPaint {
            color: Color::rgb(0.0, 0.0, 0.0),
            opacity: 1.0,
            visible: false,
        });
        assert!(!paint.is_visible());
        assert!(!Paint::Unsupported.is_visible());
    }
}
