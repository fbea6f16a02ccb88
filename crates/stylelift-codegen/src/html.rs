//! HTML code generator.
//!
//! The markup pass walks a scene tree once. For every visible node it picks
//! a tag, derives class names, runs the style converters and merges the
//! declarations into the run's stylesheet under the node's primary class.
//! The resulting `MarkupNode` tree renders to indented HTML or to JSON.

use crate::classify::{classify, ElementCategory};
use crate::config::{AttributeCasing, LayoutPreference, PluginConfig, SvgExportMode};
use crate::css::{Declarations, Stylesheet};
use crate::layout::{apply_child_layout, apply_layout, LayoutModel};
use crate::naming::Namer;
use crate::plugin::Conversion;
use crate::style::{
    apply_corner_radius, apply_effects, apply_fills, apply_size, apply_strokes, apply_typography,
    format_length,
};
use crate::vector::{placeholder_svg, VectorExports};
use crate::{escape_html, CodegenError, MAX_DEPTH};
use indexmap::IndexMap;
use serde_json::{json, Map, Value};
use stylelift_scene::node::Paint;
use stylelift_scene::{SceneIndex, SceneNode};

/// One element of the generated markup.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkupNode {
    pub element_category: ElementCategory,
    pub name: String,
    pub tag_name: String,
    pub css_class_names: Vec<String>,
    pub attributes: IndexMap<String, String>,
    pub styles: Declarations,
    /// Raw characters of a text node; escaped when rendered.
    pub text_content: Option<String>,
    pub embedded_vector_markup: Option<String>,
    pub children: Vec<MarkupNode>,
}

impl MarkupNode {
    /// JSON view of the tree. Style property names follow `casing`; empty
    /// fields are left out.
    pub fn to_json(&self, casing: AttributeCasing) -> Value {
        let mut obj = Map::new();
        obj.insert("type".into(), json!(self.element_category.as_str()));
        obj.insert("name".into(), json!(self.name));
        obj.insert("tag".into(), json!(self.tag_name));
        obj.insert("classNames".into(), json!(self.css_class_names));
        if !self.styles.is_empty() {
            let styles: Map<String, Value> = self
                .styles
                .iter()
                .map(|(property, value)| (casing.apply(property), json!(value)))
                .collect();
            obj.insert("styles".into(), Value::Object(styles));
        }
        if !self.attributes.is_empty() {
            obj.insert("attributes".into(), json!(self.attributes));
        }
        if let Some(content) = &self.text_content {
            obj.insert("content".into(), json!(content));
        }
        if let Some(svg) = &self.embedded_vector_markup {
            obj.insert("svg".into(), json!(svg));
        }
        if !self.children.is_empty() {
            let children = self.children.iter().map(|c| c.to_json(casing)).collect();
            obj.insert("children".into(), Value::Array(children));
        }
        Value::Object(obj)
    }
}

/// Layout facts a child needs from its parent.
#[derive(Debug, Clone, Copy)]
struct ParentContext {
    layout: Option<LayoutModel>,
}

/// Single-use markup pass over one tree.
pub struct MarkupProcessor<'a> {
    config: &'a PluginConfig,
    namer: Namer<'a>,
    exports: &'a VectorExports,
    stylesheet: Stylesheet,
}

impl<'a> MarkupProcessor<'a> {
    pub fn new(
        config: &'a PluginConfig,
        index: &'a SceneIndex<'a>,
        exports: &'a VectorExports,
    ) -> Self {
        Self {
            config,
            namer: Namer::new(config.class_naming_strategy, index),
            exports,
            stylesheet: Stylesheet::new(),
        }
    }

    /// Build the markup tree and its stylesheet. An invisible root yields
    /// no markup.
    pub fn process(mut self, root: &SceneNode) -> Result<Conversion, CodegenError> {
        let root = self.process_node(root, None, 0)?;
        Ok(Conversion {
            root,
            stylesheet: self.stylesheet,
        })
    }

    fn process_node(
        &mut self,
        node: &SceneNode,
        parent: Option<ParentContext>,
        depth: usize,
    ) -> Result<Option<MarkupNode>, CodegenError> {
        if !node.visible {
            return Ok(None);
        }
        if depth > MAX_DEPTH {
            return Err(CodegenError::TooDeep(MAX_DEPTH));
        }

        let classification = classify(node);
        let classes = self.namer.class_names(node);
        let unit = self.config.css_units;

        let mut markup = MarkupNode {
            element_category: classification.category,
            name: node.name.clone(),
            tag_name: classification.tag.to_string(),
            css_class_names: classes.all(),
            attributes: IndexMap::new(),
            styles: Declarations::new(),
            text_content: None,
            embedded_vector_markup: None,
            children: Vec::new(),
        };
        if let Some(id) = &node.id {
            markup.attributes.insert("data-node-id".into(), id.clone());
        }

        let mut styles = Declarations::new();

        if classification.category.is_vector() {
            self.vector_node(node, &classes.primary, &mut markup, &mut styles);
            self.apply_position(node, parent, &mut styles);
            self.merge(&classes.primary, &styles);
            markup.styles = styles;
            return Ok(Some(markup));
        }

        apply_size(node, unit, &mut styles);
        apply_fills(node, &mut styles);
        apply_strokes(node, unit, &mut styles);
        apply_effects(node, unit, &mut styles);
        apply_corner_radius(node, unit, &mut styles);
        apply_typography(node, unit, &mut styles);
        let layout = apply_layout(node, self.config.layout_preference, unit, &mut styles);
        self.apply_position(node, parent, &mut styles);
        if self.is_positioning_context(node) {
            styles.insert("position".into(), "relative".into());
        }

        self.element_attributes(node, classification.tag, &classes.primary, &mut markup);
        if let Some(text) = &node.text {
            markup.text_content = Some(text.characters.clone());
        }

        self.merge(&classes.primary, &styles);
        markup.styles = styles;

        if !is_void_element(classification.tag) {
            let context = ParentContext { layout };
            for child in &node.children {
                if let Some(child_markup) = self.process_node(child, Some(context), depth + 1)? {
                    markup.children.push(child_markup);
                }
            }
        }

        Ok(Some(markup))
    }

    fn vector_node(
        &self,
        node: &SceneNode,
        class: &str,
        markup: &mut MarkupNode,
        styles: &mut Declarations,
    ) {
        let unit = self.config.css_units;
        match self.config.svg_export_mode {
            SvgExportMode::External => {
                markup.tag_name = "img".into();
                markup
                    .attributes
                    .insert("src".into(), format!("assets/{class}.svg"));
                markup.attributes.insert("alt".into(), node.name.clone());
                apply_size(node, unit, styles);
            }
            SvgExportMode::Inline => match self.exports.get(&node.key) {
                Some(Ok(svg)) => {
                    markup.embedded_vector_markup = Some(svg.clone());
                    apply_size(node, unit, styles);
                }
                _ => {
                    log::debug!("placeholder for vector '{}'", node.name);
                    markup.embedded_vector_markup = Some(placeholder_svg(node));
                    apply_size(node, unit, styles);
                    apply_fills(node, styles);
                    apply_strokes(node, unit, styles);
                    apply_effects(node, unit, styles);
                    apply_corner_radius(node, unit, styles);
                }
            },
        }
    }

    /// Absolute placement for children of boxes without auto-layout, and
    /// flex item properties for children of flex containers.
    fn apply_position(
        &self,
        node: &SceneNode,
        parent: Option<ParentContext>,
        styles: &mut Declarations,
    ) {
        let Some(parent) = parent else {
            return;
        };
        match parent.layout {
            Some(LayoutModel::Flex) => apply_child_layout(node, styles),
            Some(LayoutModel::Grid) => {}
            None if self.config.layout_preference == LayoutPreference::AllowAbsolute => {
                if let Some(geometry) = node.geometry {
                    let unit = self.config.css_units;
                    styles.insert("position".into(), "absolute".into());
                    styles.insert("left".into(), format_length(geometry.x, unit));
                    styles.insert("top".into(), format_length(geometry.y, unit));
                }
            }
            None => {}
        }
    }

    /// A box without auto-layout whose children get placed absolutely.
    fn is_positioning_context(&self, node: &SceneNode) -> bool {
        self.config.layout_preference == LayoutPreference::AllowAbsolute
            && node.auto_layout.is_none()
            && node.visible_children().any(|c| c.geometry.is_some())
    }

    fn element_attributes(
        &self,
        node: &SceneNode,
        tag: &str,
        class: &str,
        markup: &mut MarkupNode,
    ) {
        let attrs = &mut markup.attributes;
        match tag {
            "button" => {
                attrs.insert("type".into(), "button".into());
            }
            "input" => {
                attrs.insert("type".into(), "text".into());
                if let Some(placeholder) = node.first_text() {
                    attrs.insert("placeholder".into(), placeholder.to_string());
                }
            }
            "img" => {
                let file = node
                    .fill_list()
                    .iter()
                    .find_map(|p| match p {
                        Paint::Image(image) if image.visible => image.image_hash.clone(),
                        _ => None,
                    })
                    .unwrap_or_else(|| class.to_string());
                attrs.insert("src".into(), format!("assets/{file}.png"));
                attrs.insert("alt".into(), node.name.clone());
            }
            "a" => {
                attrs.insert("href".into(), "#".into());
            }
            _ => {}
        }
    }

    fn merge(&mut self, class: &str, styles: &Declarations) {
        if !styles.is_empty() {
            self.stylesheet.merge(&format!(".{class}"), styles);
        }
    }
}

// =========================================================================
// Rendering
// =========================================================================

/// Render a markup tree as indented HTML.
pub fn render(node: &MarkupNode) -> String {
    let mut html = String::new();
    render_element(node, &mut html, 0);
    html
}

fn render_element(node: &MarkupNode, out: &mut String, depth: usize) {
    let indent = "  ".repeat(depth);
    let attributes = render_attributes(node);

    // Exported vectors carry their own <svg> root
    if let Some(svg) = &node.embedded_vector_markup {
        let svg = inject_attributes(svg.trim(), &attributes);
        for line in svg.lines() {
            out.push_str(&indent);
            out.push_str(line);
            out.push('\n');
        }
        return;
    }

    out.push_str(&indent);
    out.push('<');
    out.push_str(&node.tag_name);
    out.push_str(&attributes);
    out.push('>');

    if is_void_element(&node.tag_name) {
        out.push('\n');
        return;
    }

    if !node.children.is_empty() {
        out.push('\n');
        for child in &node.children {
            render_element(child, out, depth + 1);
        }
        out.push_str(&indent);
    } else if let Some(text) = &node.text_content {
        out.push_str(&escape_html(text));
    }

    out.push_str(&format!("</{}>", node.tag_name));
    out.push('\n');
}

fn render_attributes(node: &MarkupNode) -> String {
    let mut out = String::new();
    if !node.css_class_names.is_empty() {
        out.push_str(&format!(" class=\"{}\"", escape_html(&node.css_class_names.join(" "))));
    }
    for (name, value) in &node.attributes {
        out.push_str(&format!(" {name}=\"{}\"", escape_html(value)));
    }
    out
}

/// Add attributes to the root tag of an SVG fragment. An XML prolog,
/// doctype or comment ahead of the root is dropped.
fn inject_attributes(svg: &str, attributes: &str) -> String {
    match svg.find("<svg") {
        Some(start) => format!("<svg{attributes}{}", &svg[start + "<svg".len()..]),
        None => svg.to_string(),
    }
}

/// Check if an HTML tag is a void element (self-closing, no children).
fn is_void_element(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "source"
            | "track"
            | "wbr"
    )
}
