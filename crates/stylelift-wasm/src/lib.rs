//! WASM bindings for stylelift.
//!
//! The host passes scene snapshots as JSON strings and supplies its
//! capabilities as plain JS functions: a key-value settings store and an
//! optional vector exporter that resolves to SVG text. Generation returns a
//! Promise, since vector exports are awaited on the host.

use js_sys::{Function, Promise};
use serde::Serialize;
use stylelift_codegen::config::StoreError;
use stylelift_codegen::plugin::{json_reply, PluginMessage};
use stylelift_codegen::{ExportError, Plugin, SettingsStore, VectorExporter};
use stylelift_scene::{Loader, SceneNode};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{future_to_promise, JsFuture};

#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(debug_assertions)]
    console_error_panic_hook::set_once();
}

// =========================================================================
// Host capabilities
// =========================================================================

/// Settings store over `load(key) -> string | null` and `save(key, blob)`.
pub struct JsSettingsStore {
    load: Function,
    save: Function,
}

impl SettingsStore for JsSettingsStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = self
            .load
            .call1(&JsValue::NULL, &JsValue::from_str(key))
            .map_err(store_error)?;
        Ok(value.as_string())
    }

    fn save(&mut self, key: &str, blob: &str) -> Result<(), StoreError> {
        self.save
            .call2(&JsValue::NULL, &JsValue::from_str(key), &JsValue::from_str(blob))
            .map(|_| ())
            .map_err(store_error)
    }
}

/// Vector exporter over `exportSvg(id, name) -> Promise<string>`.
#[derive(Clone)]
pub struct JsVectorExporter {
    export: Option<Function>,
}

impl VectorExporter for JsVectorExporter {
    async fn export_svg(&self, node: &SceneNode) -> Result<String, ExportError> {
        let Some(export) = &self.export else {
            return Err(ExportError::Unavailable);
        };
        let id = node
            .id
            .as_deref()
            .map(JsValue::from_str)
            .unwrap_or(JsValue::NULL);
        let pending = export
            .call2(&JsValue::NULL, &id, &JsValue::from_str(&node.name))
            .map_err(export_error)?;
        let svg = JsFuture::from(Promise::resolve(&pending))
            .await
            .map_err(export_error)?;
        svg.as_string()
            .ok_or_else(|| ExportError::Failed("exporter did not resolve to a string".into()))
    }
}

fn describe(err: &JsValue) -> String {
    err.as_string()
        .or_else(|| {
            err.dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{err:?}"))
}

fn store_error(err: JsValue) -> StoreError {
    StoreError {
        message: describe(&err),
    }
}

fn export_error(err: JsValue) -> ExportError {
    ExportError::Failed(describe(&err))
}

// =========================================================================
// Plugin host
// =========================================================================

/// The plugin as seen from JavaScript.
#[wasm_bindgen]
pub struct PluginHost {
    plugin: Plugin<JsSettingsStore>,
    exporter: JsVectorExporter,
}

#[wasm_bindgen]
impl PluginHost {
    /// Load the persisted configuration through `load`. Pass no exporter
    /// to render every vector as a placeholder.
    #[wasm_bindgen(constructor)]
    pub fn new(load: Function, save: Function, export_svg: Option<Function>) -> PluginHost {
        PluginHost {
            plugin: Plugin::load(JsSettingsStore { load, save }),
            exporter: JsVectorExporter { export: export_svg },
        }
    }

    /// Current configuration as a camelCase object.
    pub fn config(&self) -> Result<JsValue, JsError> {
        to_js(self.plugin.config())
    }

    /// Set one option by name and persist.
    #[wasm_bindgen(js_name = setOption)]
    pub fn set_option(&mut self, key: &str, value: JsValue) -> Result<(), JsError> {
        let value: serde_json::Value = serde_wasm_bindgen::from_value(value)
            .map_err(|e| JsError::new(&format!("Invalid value: {e}")))?;
        self.plugin
            .set_option(key, value)
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Generate one format for a root node.
    ///
    /// Resolves to `{ title, language, code }`. Processing failures resolve
    /// to a result carrying the error text; only a malformed document
    /// throws.
    pub fn generate(&self, document: &str, format: &str) -> Result<Promise, JsError> {
        let root = Loader::load(document).map_err(|e| JsError::new(&e.to_string()))?;
        let converter = self.plugin.converter();
        let exporter = self.exporter.clone();
        let format = format.to_string();

        Ok(future_to_promise(async move {
            let result = converter.generate(&root, &format, &exporter).await;
            to_js(&result).map_err(JsValue::from)
        }))
    }

    /// Answer a settings UI message.
    ///
    /// `selection` is the JSON array of selected nodes; only `generate-json`
    /// reads it.
    #[wasm_bindgen(js_name = handleMessage)]
    pub fn handle_message(&mut self, message: JsValue, selection: &str) -> Result<Promise, JsError> {
        let message: PluginMessage = serde_wasm_bindgen::from_value(message)
            .map_err(|e| JsError::new(&format!("Invalid message: {e}")))?;

        match message {
            PluginMessage::GetConfig => resolved(&self.plugin.config_reply()),
            PluginMessage::UpdateConfig { config } => {
                self.plugin.update_config(config);
                resolved(&self.plugin.config_reply())
            }
            PluginMessage::GenerateJson => {
                let selection =
                    Loader::load_selection(selection).map_err(|e| JsError::new(&e.to_string()))?;
                let converter = self.plugin.converter();
                let exporter = self.exporter.clone();

                Ok(future_to_promise(async move {
                    let reply = json_reply(converter.generate_json(&selection, &exporter).await);
                    to_js(&reply).map_err(JsValue::from)
                }))
            }
        }
    }
}

/// Get the converter version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Plain JS objects, never `Map`s, so the UI can read fields directly.
fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsError> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
}

fn resolved<T: Serialize>(value: &T) -> Result<Promise, JsError> {
    Ok(Promise::resolve(&to_js(value)?))
}
