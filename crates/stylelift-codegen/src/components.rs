//! Component and variant extraction.

use crate::naming::split_variant_name;
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use stylelift_scene::{NodeKind, SceneIndex, SceneNode};

/// One variant axis of a component set, e.g. `state: [default, hover]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariantAxis {
    pub name: String,
    pub options: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentRecord {
    pub name: String,
    pub properties: Vec<VariantAxis>,
}

/// Component records of the visible tree, in document order.
pub fn extract_components(root: &SceneNode) -> Vec<ComponentRecord> {
    let index = SceneIndex::new(root);
    let mut records: IndexMap<String, ComponentRecord> = IndexMap::new();

    root.walk_visible(&mut |node| match node.kind {
        NodeKind::ComponentSet => {
            records
                .entry(node.name.clone())
                .or_insert_with(|| ComponentRecord {
                    name: node.name.clone(),
                    properties: variant_axes(node),
                });
        }
        NodeKind::Component => {
            let in_set = index
                .parent(node)
                .is_some_and(|p| p.kind == NodeKind::ComponentSet);
            if !in_set {
                records
                    .entry(node.name.clone())
                    .or_insert_with(|| ComponentRecord {
                        name: node.name.clone(),
                        properties: Vec::new(),
                    });
            }
        }
        _ => {}
    });

    records.into_values().collect()
}

/// Axes collected from the `axis=value` names of a set's variants. Options
/// keep first-seen order.
fn variant_axes(set: &SceneNode) -> Vec<VariantAxis> {
    let mut axes: IndexMap<String, IndexSet<String>> = IndexMap::new();
    for variant in set.visible_children() {
        let (_, pairs) = split_variant_name(&variant.name);
        for (axis, value) in pairs {
            axes.entry(axis).or_default().insert(value);
        }
    }
    axes.into_iter()
        .map(|(name, options)| VariantAxis {
            name,
            options: options.into_iter().collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use stylelift_scene::Loader;

    fn extract(value: serde_json::Value) -> Vec<ComponentRecord> {
        extract_components(&Loader::load_value(value).unwrap())
    }

    #[test]
    fn test_component_set_axes() {
        let records = extract(json!({"type": "COMPONENT_SET", "name": "Btn", "children": [
            {"type": "COMPONENT", "name": "Btn, state=default"},
            {"type": "COMPONENT", "name": "Btn, state=hover"}
        ]}));
        assert_eq!(
            serde_json::to_value(&records).unwrap(),
            json!([{"name": "Btn", "properties": [{"name": "state", "options": ["default", "hover"]}]}])
        );
    }

    #[test]
    fn test_multiple_axes_and_plain_children() {
        let records = extract(json!({"type": "COMPONENT_SET", "name": "Chip", "children": [
            {"type": "COMPONENT", "name": "size=sm, tone=neutral"},
            {"type": "COMPONENT", "name": "Loose"},
            {"type": "COMPONENT", "name": "size=lg, tone=neutral"},
            {"type": "COMPONENT", "name": "size=sm, tone=accent"}
        ]}));
        assert_eq!(
            records,
            vec![ComponentRecord {
                name: "Chip".into(),
                properties: vec![
                    VariantAxis {
                        name: "size".into(),
                        options: vec!["sm".into(), "lg".into()],
                    },
                    VariantAxis {
                        name: "tone".into(),
                        options: vec!["neutral".into(), "accent".into()],
                    },
                ],
            }]
        );
    }

    #[test]
    fn test_standalone_components_deduplicated() {
        let records = extract(json!({"type": "FRAME", "name": "Library", "children": [
            {"type": "COMPONENT", "name": "Avatar"},
            {"type": "COMPONENT", "name": "Badge"},
            {"type": "COMPONENT", "name": "Avatar"},
            {"type": "INSTANCE", "name": "Avatar copy"},
            {"type": "COMPONENT", "name": "Hidden", "visible": false}
        ]}));
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Avatar", "Badge"]);
        assert!(records.iter().all(|r| r.properties.is_empty()));
    }
}
