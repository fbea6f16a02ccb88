//! CSS code generator.
//!
//! Holds the selector table the markup pass fills, and renders it as a
//! stylesheet. Values that several selectors share on color, font, radius
//! and shadow properties are promoted to custom properties in `:root`.

use indexmap::{IndexMap, IndexSet};

/// Ordered property → value map for one selector.
pub type Declarations = IndexMap<String, String>;

/// Custom properties every stylesheet declares.
const BASELINE_VARIABLES: &[(&str, &str)] = &[
    ("--color-text", "#333"),
    ("--color-bg", "#fff"),
    (
        "--font-family-base",
        "-apple-system, BlinkMacSystemFont, \"Segoe UI\", Roboto, sans-serif",
    ),
];

/// Selector → declarations, in first-insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stylesheet {
    rules: IndexMap<String, Declarations>,
}

impl Stylesheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add declarations under a selector. An existing rule is extended;
    /// a property set twice keeps the last value.
    pub fn merge(&mut self, selector: &str, declarations: &Declarations) {
        let rule = self.rules.entry(selector.to_string()).or_default();
        for (property, value) in declarations {
            rule.insert(property.clone(), value.clone());
        }
    }

    pub fn get(&self, selector: &str) -> Option<&Declarations> {
        self.rules.get(selector)
    }

    pub fn selectors(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Render the stylesheet, promoting shared values to variables.
    pub fn build(&self) -> String {
        let variables = self.collect_variables();

        let mut css = String::from(":root {\n");
        for (name, value) in BASELINE_VARIABLES {
            css.push_str(&format!("  {name}: {value};\n"));
        }
        for ((_, value), name) in &variables {
            css.push_str(&format!("  {name}: {value};\n"));
        }
        css.push_str("}\n");

        for (selector, declarations) in &self.rules {
            if declarations.is_empty() {
                continue;
            }
            css.push('\n');
            css.push_str(selector);
            css.push_str(" {\n");
            for (property, value) in declarations {
                let rendered = variable_group(property)
                    .and_then(|group| variables.get(&(group, value.clone())))
                    .map(|name| format!("var({name})"))
                    .unwrap_or_else(|| value.clone());
                css.push_str(&format!("  {property}: {rendered};\n"));
            }
            css.push_str("}\n");
        }

        css
    }

    /// (group, value) → variable name, for values used by two or more
    /// selectors. Numbering follows first use.
    fn collect_variables(&self) -> IndexMap<(String, String), String> {
        let mut usage: IndexMap<(String, String), IndexSet<&str>> = IndexMap::new();
        for (selector, declarations) in &self.rules {
            for (property, value) in declarations {
                if let Some(group) = variable_group(property) {
                    usage
                        .entry((group, value.clone()))
                        .or_default()
                        .insert(selector.as_str());
                }
            }
        }

        let mut counters: IndexMap<String, usize> = IndexMap::new();
        let mut variables = IndexMap::new();
        for (key, selectors) in usage {
            if selectors.len() < 2 {
                continue;
            }
            let counter = counters.entry(key.0.clone()).or_insert(0);
            *counter += 1;
            let name = format!("--{}-{}", key.0, counter);
            variables.insert(key, name);
        }
        variables
    }
}

/// Variable family for properties whose values get shared; `None` for
/// properties that are never promoted.
fn variable_group(property: &str) -> Option<String> {
    match property {
        "color" | "background-color" => Some("color".into()),
        "border-radius" => Some("radius".into()),
        p if p.starts_with("font-") => Some(p.to_string()),
        p if p.contains("shadow") => Some("shadow".into()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn decls(pairs: &[(&str, &str)]) -> Declarations {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_empty_stylesheet_has_baseline() {
        let css = Stylesheet::new().build();
        assert_eq!(
            css,
            ":root {\n  --color-text: #333;\n  --color-bg: #fff;\n  --font-family-base: -apple-system, BlinkMacSystemFont, \"Segoe UI\", Roboto, sans-serif;\n}\n"
        );
    }

    #[test]
    fn test_merge_extends_rule() {
        let mut sheet = Stylesheet::new();
        sheet.merge(".card", &decls(&[("width", "10px"), ("height", "5px")]));
        sheet.merge(".card", &decls(&[("width", "20px"), ("color", "#000000")]));
        assert_eq!(sheet.len(), 1);
        assert_eq!(
            sheet.get(".card").unwrap(),
            &decls(&[("width", "20px"), ("height", "5px"), ("color", "#000000")])
        );
    }

    #[test]
    fn test_single_use_stays_literal() {
        let mut sheet = Stylesheet::new();
        sheet.merge(".a", &decls(&[("color", "#ff0000")]));
        let css = sheet.build();
        assert!(css.contains(".a {\n  color: #ff0000;\n}\n"));
        assert!(!css.contains("--color-1"));
    }

    #[test]
    fn test_shared_value_promoted() {
        let mut sheet = Stylesheet::new();
        sheet.merge(".a", &decls(&[("color", "#ff0000"), ("width", "10px")]));
        sheet.merge(".b", &decls(&[("background-color", "#ff0000"), ("width", "10px")]));
        let css = sheet.build();
        assert!(css.contains("  --color-1: #ff0000;\n"));
        assert!(css.contains(".a {\n  color: var(--color-1);\n  width: 10px;\n}\n"));
        assert!(css.contains(".b {\n  background-color: var(--color-1);\n  width: 10px;\n}\n"));
    }

    #[test]
    fn test_groups_number_independently() {
        let mut sheet = Stylesheet::new();
        for sel in [".a", ".b"] {
            sheet.merge(
                sel,
                &decls(&[
                    ("font-size", "16px"),
                    ("border-radius", "8px"),
                    ("box-shadow", "0px 2px 4px 0px #000000"),
                ]),
            );
        }
        let css = sheet.build();
        assert!(css.contains("--font-size-1: 16px;"));
        assert!(css.contains("--radius-1: 8px;"));
        assert!(css.contains("--shadow-1: 0px 2px 4px 0px #000000;"));
        assert!(css.contains("box-shadow: var(--shadow-1);"));
    }

    #[test]
    fn test_same_selector_twice_is_one_use() {
        let mut sheet = Stylesheet::new();
        sheet.merge(".a", &decls(&[("color", "#111111")]));
        sheet.merge(".a", &decls(&[("background-color", "#111111")]));
        assert!(!sheet.build().contains("var("));
    }

    #[test]
    fn test_build_is_deterministic() {
        let mut sheet = Stylesheet::new();
        sheet.merge(".x", &decls(&[("color", "#222222"), ("font-weight", "700")]));
        sheet.merge(".y", &decls(&[("color", "#222222"), ("font-weight", "700")]));
        assert_eq!(sheet.build(), sheet.clone().build());
    }
}
