//! Semantic element classification.
//!
//! Maps a node to an element category and an HTML tag from its kind, its
//! layer name and a few size heuristics. The first matching rule wins.

use crate::style::is_bold;
use regex::Regex;
use std::sync::LazyLock;
use stylelift_scene::{NodeKind, SceneNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementCategory {
    Container,
    Button,
    Input,
    Image,
    Icon,
    VectorGraphic,
    Text,
    Link,
    List,
    Form,
    Unknown,
}

impl ElementCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            ElementCategory::Container => "Container",
            ElementCategory::Button => "Button",
            ElementCategory::Input => "Input",
            ElementCategory::Image => "Image",
            ElementCategory::Icon => "Icon",
            ElementCategory::VectorGraphic => "VectorGraphic",
            ElementCategory::Text => "Text",
            ElementCategory::Link => "Link",
            ElementCategory::List => "List",
            ElementCategory::Form => "Form",
            ElementCategory::Unknown => "Unknown",
        }
    }

    /// Rendered as an SVG fragment or reference.
    pub fn is_vector(self) -> bool {
        matches!(self, ElementCategory::Icon | ElementCategory::VectorGraphic)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub category: ElementCategory,
    pub tag: &'static str,
}

impl Classification {
    const fn new(category: ElementCategory, tag: &'static str) -> Self {
        Self { category, tag }
    }
}

/// Layer names that name a landmark exactly, after normalization.
static EXACT_LANDMARKS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"^header$", "header"),
        (r"^footer$", "footer"),
        (r"^(nav|navigation|navbar)$", "nav"),
        (r"^(aside|sidebar)$", "aside"),
        (r"^article$", "article"),
        (r"^section$", "section"),
        (r"^(main|main-content)$", "main"),
    ]
    .into_iter()
    .map(|(pattern, tag)| (Regex::new(pattern).unwrap(), tag))
    .collect()
});

/// Landmarks recognized anywhere in a layer name.
static SUBSTRING_LANDMARKS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"header", "header"),
        (r"footer", "footer"),
        (r"(?:^|[^a-z])nav", "nav"),
        (r"sidebar", "aside"),
        (r"article", "article"),
        (r"section", "section"),
    ]
    .into_iter()
    .map(|(pattern, tag)| (Regex::new(pattern).unwrap(), tag))
    .collect()
});

/// Radius above which a box reads as a card or a pill.
const ROUNDED_RADIUS: f64 = 8.0;
/// Largest box a rounded container may be to read as a button.
const BUTTON_MAX_WIDTH: f64 = 200.0;
const BUTTON_MAX_HEIGHT: f64 = 80.0;

const HEADING_MIN_SIZE: f64 = 20.0;
const H1_MIN_SIZE: f64 = 32.0;
const H2_MIN_SIZE: f64 = 24.0;
const SHORT_TEXT_CHARS: usize = 30;

/// Lowercase, with spaces and underscores as hyphens.
fn normalize(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

pub fn classify(node: &SceneNode) -> Classification {
    use ElementCategory::*;

    let name = node.name.to_lowercase();

    if node.kind.is_vector_like() {
        let category = if name.contains("icon") { Icon } else { VectorGraphic };
        return Classification::new(category, "svg");
    }

    if node.is_text() {
        return classify_text(node, &name);
    }

    if !node.kind.is_container_like() {
        return Classification::new(Unknown, "div");
    }

    if name.contains("icon") && node.kind != NodeKind::Rectangle {
        return Classification::new(Icon, "svg");
    }
    if name.contains("button") {
        return Classification::new(Button, "button");
    }
    if name.contains("input") {
        return Classification::new(Input, "input");
    }
    if name.contains("image") {
        return Classification::new(Image, "img");
    }

    let normalized = normalize(&node.name);
    if let Some((_, tag)) = EXACT_LANDMARKS.iter().find(|(re, _)| re.is_match(&normalized)) {
        return Classification::new(Container, *tag);
    }
    if let Some((_, tag)) = SUBSTRING_LANDMARKS.iter().find(|(re, _)| re.is_match(&name)) {
        return Classification::new(Container, *tag);
    }

    if name.contains("list")
        && node
            .visible_children()
            .any(|c| c.name.to_lowercase().contains("item"))
    {
        return Classification::new(List, "ul");
    }
    if name.contains("form") || name.contains("contact") {
        return Classification::new(Form, "form");
    }

    let radius = node.corner_radius.value().and_then(|r| r.uniform());
    if radius.is_some_and(|r| r > ROUNDED_RADIUS) {
        let small = node
            .geometry
            .is_some_and(|g| g.width < BUTTON_MAX_WIDTH && g.height < BUTTON_MAX_HEIGHT);
        return if small {
            Classification::new(Button, "button")
        } else {
            Classification::new(Container, "article")
        };
    }

    Classification::new(Container, "div")
}

fn classify_text(node: &SceneNode, name: &str) -> Classification {
    use ElementCategory::*;

    let category = if name.contains("link") { Link } else { Text };
    if name.contains("label") {
        return Classification::new(category, "label");
    }
    if name.contains("legend") {
        return Classification::new(category, "legend");
    }
    if name.contains("link") {
        return Classification::new(category, "a");
    }

    let Some(text) = &node.text else {
        return Classification::new(category, "p");
    };
    let size = text.font_size.get();

    if name.contains("heading") || name.contains("title") {
        if let Some(size) = size.filter(|s| *s >= HEADING_MIN_SIZE) {
            let tag = if size >= H1_MIN_SIZE {
                "h1"
            } else if size >= H2_MIN_SIZE {
                "h2"
            } else {
                "h3"
            };
            return Classification::new(category, tag);
        }
    }

    if text.characters.chars().count() < SHORT_TEXT_CHARS && !is_bold(text) {
        return Classification::new(category, "span");
    }
    Classification::new(category, "p")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use stylelift_scene::Loader;

    fn classify_json(value: serde_json::Value) -> Classification {
        classify(&Loader::load_value(value).unwrap())
    }

    fn tag(value: serde_json::Value) -> &'static str {
        classify_json(value).tag
    }

    // =========================================================================
    // Vectors
    // =========================================================================

    #[test]
    fn test_vector_kinds() {
        assert_eq!(
            classify_json(json!({"type": "VECTOR", "name": "Arrow Icon"})),
            Classification::new(ElementCategory::Icon, "svg")
        );
        assert_eq!(
            classify_json(json!({"type": "STAR", "name": "Rating"})),
            Classification::new(ElementCategory::VectorGraphic, "svg")
        );
    }

    #[test]
    fn test_icon_frame() {
        assert_eq!(
            classify_json(json!({"type": "INSTANCE", "name": "icon/close"})).category,
            ElementCategory::Icon
        );
    }

    // =========================================================================
    // Containers
    // =========================================================================

    #[test]
    fn test_keyword_containers() {
        assert_eq!(tag(json!({"type": "FRAME", "name": "Primary Button"})), "button");
        assert_eq!(tag(json!({"type": "FRAME", "name": "Email Input"})), "input");
        assert_eq!(tag(json!({"type": "RECTANGLE", "name": "Hero Image"})), "img");
    }

    #[test]
    fn test_landmarks() {
        assert_eq!(tag(json!({"type": "FRAME", "name": "Header"})), "header");
        assert_eq!(tag(json!({"type": "FRAME", "name": "Main Content"})), "main");
        assert_eq!(tag(json!({"type": "FRAME", "name": "Navbar"})), "nav");
        assert_eq!(tag(json!({"type": "FRAME", "name": "Sidebar"})), "aside");
        assert_eq!(tag(json!({"type": "FRAME", "name": "Page Footer"})), "footer");
        assert_eq!(tag(json!({"type": "FRAME", "name": "Top nav links"})), "nav");
        assert_eq!(tag(json!({"type": "FRAME", "name": "Pricing Section"})), "section");
    }

    #[test]
    fn test_nav_needs_word_start() {
        assert_eq!(tag(json!({"type": "FRAME", "name": "Canvas"})), "div");
    }

    #[test]
    fn test_list_with_items() {
        let value = json!({"type": "FRAME", "name": "Feature List", "children": [
            {"type": "FRAME", "name": "Item 1"}, {"type": "FRAME", "name": "Item 2"}
        ]});
        assert_eq!(
            classify_json(value),
            Classification::new(ElementCategory::List, "ul")
        );
        assert_eq!(tag(json!({"type": "FRAME", "name": "Feature List"})), "div");
    }

    #[test]
    fn test_form() {
        assert_eq!(tag(json!({"type": "FRAME", "name": "Contact us"})), "form");
    }

    #[test]
    fn test_rounded_boxes() {
        assert_eq!(
            tag(json!({"type": "FRAME", "name": "Chip", "cornerRadius": 16, "width": 80, "height": 32})),
            "button"
        );
        assert_eq!(
            tag(json!({"type": "FRAME", "name": "Card", "cornerRadius": 12, "width": 320, "height": 200})),
            "article"
        );
        assert_eq!(
            tag(json!({"type": "FRAME", "name": "Card", "cornerRadius": 8, "width": 80, "height": 32})),
            "div"
        );
    }

    #[test]
    fn test_other_kinds_unknown() {
        assert_eq!(
            classify_json(json!({"type": "SLICE", "name": "x"})),
            Classification::new(ElementCategory::Unknown, "div")
        );
    }

    // =========================================================================
    // Text
    // =========================================================================

    #[test]
    fn test_heading_sizes() {
        let heading = |size: f64| {
            tag(json!({"type": "TEXT", "name": "Heading", "characters": "Welcome", "fontSize": size, "fontWeight": 700}))
        };
        assert_eq!(heading(32.0), "h1");
        assert_eq!(heading(24.0), "h2");
        assert_eq!(heading(20.0), "h3");
    }

    #[test]
    fn test_small_heading_is_span() {
        assert_eq!(
            classify_json(json!({"type": "TEXT", "name": "Heading", "characters": "Welcome",
                                 "fontSize": 18, "fontWeight": 400})),
            Classification::new(ElementCategory::Text, "span")
        );
    }

    #[test]
    fn test_text_keywords() {
        assert_eq!(tag(json!({"type": "TEXT", "name": "Field Label", "characters": "Email"})), "label");
        assert_eq!(
            classify_json(json!({"type": "TEXT", "name": "Footer Link", "characters": "About"})),
            Classification::new(ElementCategory::Link, "a")
        );
    }

    #[test]
    fn test_long_or_bold_text_is_paragraph() {
        let long = "This sentence is comfortably longer than thirty characters.";
        assert_eq!(tag(json!({"type": "TEXT", "name": "Body", "characters": long, "fontSize": 14})), "p");
        assert_eq!(
            tag(json!({"type": "TEXT", "name": "Body", "characters": "Short",
                       "fontName": {"family": "Inter", "style": "Semi Bold"}})),
            "p"
        );
    }

    #[test]
    fn test_classification_ignores_position() {
        let child = json!({"type": "FRAME", "name": "Submit Button"});
        let nested = Loader::load_value(json!({"type": "FRAME", "name": "Wrap", "children": [
            {"type": "FRAME", "name": "Deep", "children": [child.clone()]}
        ]}))
        .unwrap();
        assert_eq!(classify(&nested.children[0].children[0]).tag, tag(child));
    }
}
