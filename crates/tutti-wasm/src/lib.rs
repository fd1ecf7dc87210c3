//! WebAssembly bindings for the Tutti seating engine.
//!
//! This crate provides the JavaScript API used by the seating editor.
//!
//! ## Example
//!
//! ```js
//! import { SeatingEngine } from 'tutti-engine';
//!
//! const engine = new SeatingEngine();
//!
//! engine.loadProject(JSON.stringify(snapshot));
//! engine.setOptions({ seatSize: 40, downstageTop: true });
//!
//! const seats = engine.layout();
//! const { width, height } = engine.dimensions();
//!
//! const svg = engine.exportSvg();
//! const png = engine.exportImage('png');
//! ```

use wasm_bindgen::prelude::*;
use tutti_core::options::LayoutOptions;
use tutti_export::ExportOptions;

mod engine;
mod types;

pub use engine::Engine;
pub use types::*;

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(debug_assertions)]
    console_error_panic_hook::set_once();
}

/// The seating engine interface for JavaScript.
#[wasm_bindgen]
pub struct SeatingEngine {
    engine: Engine,
}

#[wasm_bindgen]
impl SeatingEngine {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            engine: Engine::new(),
        }
    }

    /// Get the version of the engine.
    #[wasm_bindgen(js_name = version)]
    pub fn version() -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }

    /// Load a project snapshot from a JSON string.
    #[wasm_bindgen(js_name = loadProject)]
    pub fn load_project(&mut self, json: &str) -> Result<(), JsError> {
        self.engine
            .load_project(json)
            .map_err(|e| JsError::new(&format!("Invalid project: {}", e)))
    }

    /// Replace the layout options of the loaded project.
    #[wasm_bindgen(js_name = setOptions)]
    pub fn set_options(&mut self, options: JsValue) -> Result<(), JsError> {
        let options: LayoutOptions = serde_wasm_bindgen::from_value(options)
            .map_err(|e| JsError::new(&format!("Invalid layout options: {}", e)))?;

        self.engine
            .set_options(options)
            .map_err(|e| JsError::new(&format!("Invalid layout options: {}", e)))
    }

    /// Compute seat positions for the loaded project.
    #[wasm_bindgen]
    pub fn layout(&mut self) -> Result<JsValue, JsError> {
        let seats = self
            .engine
            .layout()
            .map_err(|e| JsError::new(&format!("Layout error: {}", e)))?;

        serde_wasm_bindgen::to_value(&seats)
            .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
    }

    /// Layout size in pixels, as `{ width, height }`.
    #[wasm_bindgen]
    pub fn dimensions(&mut self) -> Result<JsValue, JsError> {
        let dimensions = self
            .engine
            .dimensions()
            .map_err(|e| JsError::new(&format!("Layout error: {}", e)))?;

        serde_wasm_bindgen::to_value(&dimensions)
            .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
    }

    /// Members without a seat, with their stored positions.
    #[wasm_bindgen(js_name = freeMembers)]
    pub fn free_members(&self) -> Result<JsValue, JsError> {
        let members = self
            .engine
            .free_members()
            .map_err(|e| JsError::new(&format!("{}", e)))?;

        serde_wasm_bindgen::to_value(&members)
            .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
    }

    /// Orphaned sections, contested seats and members past section capacity.
    #[wasm_bindgen]
    pub fn diagnostics(&self) -> Result<JsValue, JsError> {
        let diagnostics = self
            .engine
            .diagnostics()
            .map_err(|e| JsError::new(&format!("{}", e)))?;

        serde_wasm_bindgen::to_value(&diagnostics)
            .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
    }

    /// Export the layout to SVG.
    #[wasm_bindgen(js_name = exportSvg)]
    pub fn export_svg(&mut self) -> Result<String, JsError> {
        self.engine
            .export_svg()
            .map_err(|e| JsError::new(&format!("SVG export error: {}", e)))
    }

    /// Export the layout as `png`, `jpeg` or `pdf` bytes.
    #[wasm_bindgen(js_name = exportImage)]
    pub fn export_image(&mut self, format: &str, quality: Option<u8>) -> Result<Vec<u8>, JsError> {
        self.engine
            .export_image(format, quality)
            .map_err(|e| JsError::new(&format!("Export error: {}", e)))
    }

    /// Export with full options (`{ width, height, format, quality, background }`).
    #[wasm_bindgen(js_name = exportWithOptions)]
    pub fn export_with_options(&mut self, options: JsValue) -> Result<Vec<u8>, JsError> {
        let options: ExportOptions = serde_wasm_bindgen::from_value(options)
            .map_err(|e| JsError::new(&format!("Invalid export options: {}", e)))?;

        self.engine
            .export(&options)
            .map_err(|e| JsError::new(&format!("Export error: {}", e)))
    }
}

impl Default for SeatingEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Get the engine version.
#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
