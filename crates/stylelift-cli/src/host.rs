//! File-backed host capabilities for the command line.

use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use stylelift_codegen::config::StoreError;
use stylelift_codegen::naming::layer_name;
use stylelift_codegen::{ExportError, SettingsStore, VectorExporter};
use stylelift_scene::SceneNode;

/// Settings kept in a JSON object file, one string entry per key.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<Map<String, Value>, StoreError> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let source = std::fs::read_to_string(&self.path).map_err(|e| store_error(&self.path, e))?;
        serde_json::from_str(&source).map_err(|e| store_error(&self.path, e))
    }
}

fn store_error(path: &Path, err: impl std::fmt::Display) -> StoreError {
    StoreError {
        message: format!("{}: {err}", path.display()),
    }
}

impl SettingsStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.read_entries()?;
        Ok(entries.get(key).and_then(Value::as_str).map(str::to_string))
    }

    fn save(&mut self, key: &str, blob: &str) -> Result<(), StoreError> {
        let mut entries = self.read_entries()?;
        entries.insert(key.to_string(), Value::String(blob.to_string()));
        let source =
            serde_json::to_string_pretty(&entries).map_err(|e| store_error(&self.path, e))?;
        std::fs::write(&self.path, source + "\n").map_err(|e| store_error(&self.path, e))
    }
}

/// Vector exports read from `<dir>/<layer-name>.svg`.
pub struct FileExporter {
    dir: PathBuf,
}

impl FileExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl VectorExporter for FileExporter {
    async fn export_svg(&self, node: &SceneNode) -> Result<String, ExportError> {
        let path = self.dir.join(format!("{}.svg", layer_name(&node.name)));
        log::debug!("reading vector export {}", path.display());
        std::fs::read_to_string(&path)
            .map(|svg| svg.trim_end().to_string())
            .map_err(|e| ExportError::Failed(format!("{}: {e}", path.display())))
    }
}
