//! Layout extraction: one record per visible auto-layout container.

use crate::config::PluginConfig;
use crate::json_number;
use crate::layout::flex_declarations;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use stylelift_scene::node::LayoutDirection;
use stylelift_scene::SceneNode;

/// Viewport widths the layout is expected to hold up at.
pub const BREAKPOINTS: [u32; 4] = [375, 768, 1024, 1440];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutRecord {
    pub name: String,
    pub direction: &'static str,
    pub gap: Value,
    pub css_properties: IndexMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutInfo {
    pub breakpoints: Vec<u32>,
    pub layouts: Vec<LayoutRecord>,
}

pub fn extract_layout(root: &SceneNode, config: &PluginConfig) -> LayoutInfo {
    let mut layouts = Vec::new();
    root.walk_visible(&mut |node| {
        let Some(layout) = &node.auto_layout else {
            return;
        };
        let direction = match layout.direction {
            LayoutDirection::Horizontal => "row",
            LayoutDirection::Vertical => "column",
        };
        let css_properties = flex_declarations(layout, config.css_units)
            .into_iter()
            .map(|(property, value)| (config.attribute_casing.apply(&property), value))
            .collect();
        layouts.push(LayoutRecord {
            name: node.name.clone(),
            direction,
            gap: json_number(layout.item_spacing),
            css_properties,
        });
    });

    LayoutInfo {
        breakpoints: BREAKPOINTS.to_vec(),
        layouts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AttributeCasing;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use stylelift_scene::Loader;

    fn extract(value: Value, config: &PluginConfig) -> Value {
        let root = Loader::load_value(value).unwrap();
        serde_json::to_value(extract_layout(&root, config)).unwrap()
    }

    #[test]
    fn test_horizontal_record() {
        let info = extract(
            json!({"type": "FRAME", "name": "Row", "layoutMode": "HORIZONTAL", "itemSpacing": 16}),
            &PluginConfig::default(),
        );
        assert_eq!(
            info,
            json!({
                "breakpoints": [375, 768, 1024, 1440],
                "layouts": [{
                    "name": "Row",
                    "direction": "row",
                    "gap": 16,
                    "cssProperties": {"display": "flex", "flex-direction": "row", "gap": "16px"}
                }]
            })
        );
    }

    #[test]
    fn test_camel_case_properties() {
        let config = PluginConfig {
            attribute_casing: AttributeCasing::CamelCase,
            ..PluginConfig::default()
        };
        let info = extract(
            json!({"type": "FRAME", "name": "Stack", "layoutMode": "VERTICAL",
                   "primaryAxisAlignItems": "CENTER"}),
            &config,
        );
        assert_eq!(
            info["layouts"][0]["cssProperties"],
            json!({"display": "flex", "flexDirection": "column", "justifyContent": "center"})
        );
        assert_eq!(info["layouts"][0]["gap"], json!(0));
    }

    #[test]
    fn test_only_visible_auto_layout_nodes() {
        let info = extract(
            json!({"type": "FRAME", "name": "Root", "children": [
                {"type": "FRAME", "name": "Hidden", "visible": false, "layoutMode": "HORIZONTAL"},
                {"type": "GROUP", "name": "Loose"},
                {"type": "FRAME", "name": "List", "layoutMode": "VERTICAL", "itemSpacing": 4.5}
            ]}),
            &PluginConfig::default(),
        );
        let layouts = info["layouts"].as_array().unwrap();
        assert_eq!(layouts.len(), 1);
        assert_eq!(layouts[0]["name"], json!("List"));
        assert_eq!(layouts[0]["gap"], json!(4.5));
    }
}
