//! WASM-compatible wrapper types.
//!
//! JavaScript-friendly types that wrap the core Tileframe values and handle
//! the conversion between Rust and JavaScript data representations.

use tileframe_core::export::ExportedImage;
use tileframe_core::session::LoadTicket;
use wasm_bindgen::prelude::*;

/// An encoded export ready for download.
///
/// # Memory Management
///
/// The encoded bytes live in WASM memory. `bytes()` copies them into a
/// `Uint8Array`; call `free()` afterwards to release large exports early.
#[wasm_bindgen]
pub struct JsExportedImage {
    inner: ExportedImage,
}

#[wasm_bindgen]
impl JsExportedImage {
    /// Encoded file contents. Returns a copy.
    pub fn bytes(&self) -> Vec<u8> {
        self.inner.bytes.clone()
    }

    #[wasm_bindgen(getter, js_name = byteLength)]
    pub fn byte_length(&self) -> usize {
        self.inner.bytes.len()
    }

    /// MIME type for the download `Blob`
    #[wasm_bindgen(getter, js_name = mimeType)]
    pub fn mime_type(&self) -> String {
        self.inner.mime_type.to_string()
    }

    #[wasm_bindgen(getter, js_name = suggestedFilename)]
    pub fn suggested_filename(&self) -> String {
        self.inner.suggested_filename.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }
}

impl From<ExportedImage> for JsExportedImage {
    fn from(inner: ExportedImage) -> Self {
        Self { inner }
    }
}

/// Handle for an in-flight image load, returned by `JsEditor.beginLoad()`.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsLoadTicket {
    inner: LoadTicket,
}

impl JsLoadTicket {
    pub(crate) fn into_inner(self) -> LoadTicket {
        self.inner
    }
}

impl From<LoadTicket> for JsLoadTicket {
    fn from(inner: LoadTicket) -> Self {
        Self { inner }
    }
}

/// Convert any displayable error into a JavaScript string error.
pub(crate) fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}
