//! Tileframe WASM - WebAssembly bindings for Tileframe
//!
//! This crate provides WASM bindings to expose the tileframe-core editor
//! engine to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `editor` - Editor session handle (loading, pan/zoom, frames, render, export)
//! - `gradient` - Background gradient builder
//! - `types` - WASM-compatible wrapper types for exports and load tickets
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsEditor, frameCatalog } from '@tileframe/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const editor = new JsEditor();
//! editor.loadImage(bytes, 'image/png', 'screenshot.png');
//! console.log(frameCatalog());
//! ```

use tileframe_core::config::EditorConfig;
use tileframe_core::decode::validate_upload;
use tileframe_core::frame::FrameCatalog;
use wasm_bindgen::prelude::*;

mod editor;
mod gradient;
mod types;

// Re-export public types
pub use editor::JsEditor;
pub use gradient::JsGradient;
pub use types::{JsExportedImage, JsLoadTicket};

use types::to_js_error;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::debug_1(&format!("tileframe-wasm {} loaded", version()).into());
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// The reference frame catalog as an array of
/// `{ id, name, width, height, description }`
#[wasm_bindgen(js_name = frameCatalog)]
pub fn frame_catalog() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&FrameCatalog::default()).map_err(to_js_error)
}

/// Check an upload against the default type and size limits before reading
/// it. Rejects with a user-facing message.
#[wasm_bindgen(js_name = validateUpload)]
pub fn validate_upload_js(mime: &str, byte_length: f64) -> Result<(), JsValue> {
    let size = if byte_length.is_finite() && byte_length > 0.0 {
        byte_length as u64
    } else {
        0
    };
    validate_upload(mime, size, &EditorConfig::default()).map_err(to_js_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }

    #[test]
    fn test_validate_upload_accepts_defaults() {
        assert!(validate_upload_js("image/png", 1024.0).is_ok());
        assert!(validate_upload_js("image/webp", (10 * 1024 * 1024) as f64).is_ok());
    }
}
