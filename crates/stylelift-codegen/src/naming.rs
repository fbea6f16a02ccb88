//! Class name generation.
//!
//! Three strategies: sanitized layer names, BEM blocks/elements/modifiers
//! derived from component boundaries, and identifiers derived from node ids.

use crate::config::NamingStrategy;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;
use stylelift_scene::{NodeKey, NodeKind, SceneIndex, SceneNode};

static PRICE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[$€£¥]?\s*\d+([.,]\d+)?\s*[$€£¥]").unwrap());
static PRICE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[$€£¥]\s*\d").unwrap());
static QUANTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*\d+([.,]\d+)?\s*(kg|g|mg|lb|lbs|oz|l|ml|cl|m|cm|mm|km|pcs|x)\b").unwrap()
});
static COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+\s+[A-Za-z]").unwrap());

/// Lowercase, runs of non-alphanumerics to one hyphen, trimmed.
pub fn sanitize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_hyphen = false;
    for ch in name.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            out.push(ch);
        } else {
            pending_hyphen = true;
        }
    }
    out
}

/// Class name for a layer name. Names starting with a digit get a
/// prefix guessed from what the number looks like.
pub fn layer_name(name: &str) -> String {
    let sanitized = sanitize(name);
    if sanitized.is_empty() {
        return "element".to_string();
    }
    if !sanitized.starts_with(|c: char| c.is_ascii_digit()) {
        return sanitized;
    }
    let prefix = if PRICE.is_match(name) || PRICE_PREFIX.is_match(name) {
        "price"
    } else if QUANTITY.is_match(name) {
        "quantity"
    } else if COUNT.is_match(name) {
        "count"
    } else {
        "item"
    };
    format!("{prefix}-{sanitized}")
}

/// `primary button` → `PrimaryButton`.
pub fn pascal_case(name: &str) -> String {
    sanitize(name)
        .split('-')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// Split a variant-style name (`Button, size=lg, state=hover`) into its
/// base and `axis=value` pairs.
pub fn split_variant_name(name: &str) -> (String, Vec<(String, String)>) {
    let mut base = Vec::new();
    let mut pairs = Vec::new();
    for token in name.split(',') {
        match token.split_once('=') {
            Some((axis, value)) => pairs.push((axis.trim().to_string(), value.trim().to_string())),
            None => base.push(token.trim()),
        }
    }
    let base = base
        .into_iter()
        .find(|t| !t.is_empty())
        .unwrap_or_default()
        .to_string();
    (base, pairs)
}

/// Classes for one element.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClassNames {
    pub primary: String,
    pub modifiers: Vec<String>,
}

impl ClassNames {
    fn single(primary: String) -> Self {
        Self {
            primary,
            modifiers: Vec::new(),
        }
    }

    /// All classes, primary first.
    pub fn all(&self) -> Vec<String> {
        std::iter::once(self.primary.clone())
            .chain(self.modifiers.iter().cloned())
            .collect()
    }
}

/// Per-run class name generator.
pub struct Namer<'a> {
    strategy: NamingStrategy,
    index: &'a SceneIndex<'a>,
    counter: usize,
    used: HashMap<String, NodeKey>,
}

impl<'a> Namer<'a> {
    pub fn new(strategy: NamingStrategy, index: &'a SceneIndex<'a>) -> Self {
        Self {
            strategy,
            index,
            counter: 0,
            used: HashMap::new(),
        }
    }

    pub fn class_names(&mut self, node: &SceneNode) -> ClassNames {
        match self.strategy {
            NamingStrategy::LayerBased => ClassNames::single(layer_name(&node.name)),
            NamingStrategy::Bem => self.bem(node),
            NamingStrategy::UniqueId => ClassNames::single(self.unique(node)),
        }
    }

    // =========================================================================
    // BEM
    // =========================================================================

    fn bem(&self, node: &SceneNode) -> ClassNames {
        if node.kind.is_component_like() {
            let block = self.block_name(node);
            let (_, pairs) = split_variant_name(&node.name);
            let modifiers = pairs
                .iter()
                .map(|(axis, value)| format!("{block}--{}-{}", sanitize(axis), sanitize(value)))
                .collect();
            return ClassNames {
                primary: block,
                modifiers,
            };
        }

        match self
            .index
            .ancestors(node)
            .into_iter()
            .find(|a| a.kind.is_component_like())
        {
            Some(block) => ClassNames::single(format!(
                "{}__{}",
                self.block_name(block),
                layer_name(&node.name)
            )),
            None => ClassNames::single(layer_name(&node.name)),
        }
    }

    /// Block name of a component boundary. A variant inside a component set
    /// belongs to the set's block.
    fn block_name(&self, node: &SceneNode) -> String {
        if node.kind == NodeKind::Component {
            if let Some(parent) = self.index.parent(node) {
                if parent.kind == NodeKind::ComponentSet {
                    return self.block_name(parent);
                }
            }
        }
        let (base, _) = split_variant_name(&node.name);
        if sanitize(&base).is_empty() {
            node.kind.kebab()
        } else {
            layer_name(&base)
        }
    }

    // =========================================================================
    // Unique id
    // =========================================================================

    fn unique(&mut self, node: &SceneNode) -> String {
        let kind = node.kind.kebab();
        let safe_id: Option<String> = node.id.as_ref().map(|id| {
            id.chars()
                .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
                .take(8)
                .collect()
        });
        let base = match safe_id.filter(|id| !id.is_empty()) {
            Some(id) => format!("{kind}-{id}"),
            None => {
                self.counter += 1;
                format!("{kind}-{}", self.counter)
            }
        };

        let mut candidate = base.clone();
        let mut suffix = 1;
        while let Some(owner) = self.used.get(&candidate) {
            if *owner == node.key {
                return candidate;
            }
            suffix += 1;
            candidate = format!("{base}-{suffix}");
        }
        self.used.insert(candidate.clone(), node.key);
        candidate
    }
}
