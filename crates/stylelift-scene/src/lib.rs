//! stylelift scene model
//!
//! Typed view of a design tool's scene graph: the node kinds, their optional
//! capability groups, and the tri-state attributes the host reports as
//! "mixed". The loader turns the host's JSON snapshot into this model.
//!
//! # Example
//!
//! ```
//! use stylelift_scene::{Loader, NodeKind};
//!
//! let root = Loader::load(r#"{"type": "FRAME", "name": "Card"}"#).unwrap();
//! assert_eq!(root.kind, NodeKind::Frame);
//! ```

pub mod attr;
pub mod document;
pub mod node;

pub use attr::Attr;
pub use document::{Loader, SceneIndex};
pub use node::{NodeKey, NodeKind, SceneNode};

/// Document load error with position information.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Load error at line {line}, column {column}: {message}")]
pub struct LoadError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        Self {
            message: err.to_string(),
            line: err.line(),
            column: err.column(),
        }
    }
}
