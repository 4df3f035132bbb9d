//! Editor session WASM bindings.
//!
//! `JsEditor` owns one editor session plus the viewport surface it renders
//! into. The host forwards pointer and wheel events, calls `render()` on
//! every animation frame and hands the returned pixels to a canvas
//! `ImageData`.
//!
//! # Example
//!
//! ```typescript
//! import init, { JsEditor, JsGradient } from '@tileframe/wasm';
//!
//! await init();
//! const editor = new JsEditor();
//! editor.loadImage(new Uint8Array(await file.arrayBuffer()), file.type, file.name);
//! editor.toggleFrame('small-tile');
//!
//! const pixels = editor.render();
//! ctx.putImageData(new ImageData(pixels, editor.viewportWidth, editor.viewportHeight), 0, 0);
//!
//! const out = editor.exportWithGradient('promo', new JsGradient());
//! download(new Blob([out.bytes()], { type: out.mimeType }), out.suggestedFilename);
//! ```

use tileframe_core::config::EditorConfig;
use tileframe_core::decode::decode_image;
use tileframe_core::export::ExportOptions;
use tileframe_core::geometry::{Point, Size};
use tileframe_core::session::{EditorAction, EditorSession};
use tileframe_core::surface::Surface;
use tileframe_core::transform::TransformUpdate;
use wasm_bindgen::prelude::*;

use crate::gradient::JsGradient;
use crate::types::{to_js_error, JsExportedImage, JsLoadTicket};

/// Editor session handle for JavaScript
#[wasm_bindgen]
pub struct JsEditor {
    session: EditorSession,
    surface: Option<Surface>,
}

#[wasm_bindgen]
impl JsEditor {
    /// Editor with the default configuration (800x600 viewport, reference
    /// frame catalog)
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::from_session(EditorSession::default())
    }

    /// Editor from a configuration object; omitted fields take defaults
    #[wasm_bindgen(js_name = fromConfig)]
    pub fn from_config(config: JsValue) -> Result<JsEditor, JsValue> {
        let config: EditorConfig = if config.is_undefined() || config.is_null() {
            EditorConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(to_js_error)?
        };
        let session = EditorSession::new(config).map_err(to_js_error)?;
        Ok(Self::from_session(session))
    }

    /// Editor from a JSON configuration string
    #[wasm_bindgen(js_name = fromConfigJson)]
    pub fn from_config_json(json: &str) -> Result<JsEditor, JsValue> {
        let config = EditorConfig::from_json(json).map_err(to_js_error)?;
        let session = EditorSession::new(config).map_err(to_js_error)?;
        Ok(Self::from_session(session))
    }

    // ------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------

    /// Validate, decode and install an uploaded file
    #[wasm_bindgen(js_name = loadImage)]
    pub fn load_image(&mut self, bytes: &[u8], mime: &str, name: &str) -> Result<(), JsValue> {
        self.session
            .load_image(bytes, mime, name)
            .map_err(to_js_error)
    }

    /// Start a load whose bytes arrive later, e.g. after an async file read
    #[wasm_bindgen(js_name = beginLoad)]
    pub fn begin_load(&mut self) -> JsLoadTicket {
        self.session.begin_load().into()
    }

    /// Decode and install the bytes for `ticket`.
    ///
    /// Returns `false` when a newer load has started since; the bytes are
    /// dropped without decoding.
    #[wasm_bindgen(js_name = finishLoad)]
    pub fn finish_load(
        &mut self,
        ticket: JsLoadTicket,
        bytes: &[u8],
        name: &str,
    ) -> Result<bool, JsValue> {
        let ticket = ticket.into_inner();
        if !self.session.is_current_load(ticket) {
            return Ok(false);
        }
        self.session
            .finish_load(ticket, decode_image(bytes, name))
            .map_err(to_js_error)
    }

    #[wasm_bindgen(getter, js_name = hasImage)]
    pub fn has_image(&self) -> bool {
        self.session.image().is_some()
    }

    #[wasm_bindgen(getter, js_name = isLoading)]
    pub fn is_loading(&self) -> bool {
        self.session.is_loading()
    }

    #[wasm_bindgen(getter, js_name = imageWidth)]
    pub fn image_width(&self) -> u32 {
        self.session.image().map_or(0, |img| img.width)
    }

    #[wasm_bindgen(getter, js_name = imageHeight)]
    pub fn image_height(&self) -> u32 {
        self.session.image().map_or(0, |img| img.height)
    }

    #[wasm_bindgen(getter, js_name = imageName)]
    pub fn image_name(&self) -> Option<String> {
        self.session.image().map(|img| img.name.clone())
    }

    /// Message of the last failed operation
    #[wasm_bindgen(getter, js_name = lastError)]
    pub fn last_error(&self) -> Option<String> {
        self.session.last_error().map(str::to_string)
    }

    // ------------------------------------------------------------------
    // Viewport and gestures
    // ------------------------------------------------------------------

    #[wasm_bindgen(getter, js_name = viewportWidth)]
    pub fn viewport_width(&self) -> u32 {
        self.viewport_pixels().0
    }

    #[wasm_bindgen(getter, js_name = viewportHeight)]
    pub fn viewport_height(&self) -> u32 {
        self.viewport_pixels().1
    }

    #[wasm_bindgen(js_name = setViewportSize)]
    pub fn set_viewport_size(&mut self, width: f64, height: f64) -> Result<(), JsValue> {
        self.session
            .set_viewport_size(Size::new(width, height))
            .map_err(to_js_error)?;
        self.surface = None;
        Ok(())
    }

    pub fn pan(&mut self, delta_x: f64, delta_y: f64) {
        self.session.pan(delta_x, delta_y);
    }

    pub fn zoom(&mut self, factor: f64) {
        self.session.zoom(factor);
    }

    /// Apply a wheel event at the cursor position (viewport pixels)
    pub fn wheel(&mut self, delta_y: f64, cursor_x: f64, cursor_y: f64) {
        self.session.wheel(delta_y, Point::new(cursor_x, cursor_y));
    }

    #[wasm_bindgen(js_name = zoomIn)]
    pub fn zoom_in(&mut self) {
        self.session.zoom_in();
    }

    #[wasm_bindgen(js_name = zoomOut)]
    pub fn zoom_out(&mut self) {
        self.session.zoom_out();
    }

    #[wasm_bindgen(js_name = zoomToFit)]
    pub fn zoom_to_fit(&mut self) {
        self.session.zoom_to_fit();
    }

    #[wasm_bindgen(js_name = resetTransform)]
    pub fn reset_transform(&mut self) {
        self.session.reset_transform();
    }

    #[wasm_bindgen(getter)]
    pub fn scale(&self) -> f64 {
        self.session.transform().scale
    }

    #[wasm_bindgen(setter)]
    pub fn set_scale(&mut self, value: f64) {
        self.session.set_scale(value);
    }

    /// Zoom level as shown next to the zoom buttons, e.g. `120`
    #[wasm_bindgen(getter, js_name = scalePercent)]
    pub fn scale_percent(&self) -> u32 {
        self.session.controller().scale_percent()
    }

    #[wasm_bindgen(getter, js_name = offsetX)]
    pub fn offset_x(&self) -> f64 {
        self.session.transform().offset_x
    }

    #[wasm_bindgen(getter, js_name = offsetY)]
    pub fn offset_y(&self) -> f64 {
        self.session.transform().offset_y
    }

    /// Current transform as `{ scale, offsetX, offsetY }`
    pub fn transform(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.session.transform()).map_err(to_js_error)
    }

    /// Merge a partial `{ scale?, offsetX?, offsetY? }` into the transform
    #[wasm_bindgen(js_name = setTransform)]
    pub fn set_transform(&mut self, update: JsValue) -> Result<(), JsValue> {
        let update: TransformUpdate = serde_wasm_bindgen::from_value(update).map_err(to_js_error)?;
        self.session.dispatch(EditorAction::SetTransform(update));
        Ok(())
    }

    // ------------------------------------------------------------------
    // Frames
    // ------------------------------------------------------------------

    /// The frame catalog as an array of `{ id, name, width, height, description }`
    pub fn frames(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.session.catalog()).map_err(to_js_error)
    }

    /// Select or deselect a frame; returns the selected id afterwards
    #[wasm_bindgen(js_name = toggleFrame)]
    pub fn toggle_frame(&mut self, id: &str) -> Result<Option<String>, JsValue> {
        let selected = self.session.toggle_frame(id).map_err(to_js_error)?;
        Ok(selected.map(|f| f.id.clone()))
    }

    #[wasm_bindgen(js_name = selectFrame)]
    pub fn select_frame(&mut self, id: &str) -> Result<(), JsValue> {
        self.session.select_frame(id).map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = clearFrame)]
    pub fn clear_frame(&mut self) {
        self.session.clear_frame();
    }

    #[wasm_bindgen(getter, js_name = selectedFrameId)]
    pub fn selected_frame_id(&self) -> Option<String> {
        self.session.selected_frame().map(|f| f.id.clone())
    }

    // ------------------------------------------------------------------
    // Rendering and export
    // ------------------------------------------------------------------

    /// Redraw the viewport and return its RGBA pixels.
    ///
    /// The surface is reused between calls; the returned array is a copy.
    pub fn render(&mut self) -> Result<Vec<u8>, JsValue> {
        let surface = match self.surface.take() {
            Some(surface) if surface.width() == self.viewport_width()
                && surface.height() == self.viewport_height() =>
            {
                surface
            }
            _ => self.session.viewport_surface().map_err(to_js_error)?,
        };
        let surface = self.surface.insert(surface);
        self.session.render_viewport(surface);
        Ok(surface.to_rgba_bytes())
    }

    /// Export with options `{ format, quality, filename, backgroundGradient?,
    /// backgroundColor? }`
    pub fn export(&mut self, options: JsValue) -> Result<JsExportedImage, JsValue> {
        let options: ExportOptions = serde_wasm_bindgen::from_value(options).map_err(to_js_error)?;
        self.export_options(&options)
    }

    /// Export as `<basename>.png` at full quality over the given gradient
    #[wasm_bindgen(js_name = exportWithGradient)]
    pub fn export_with_gradient(
        &mut self,
        basename: &str,
        gradient: Option<&JsGradient>,
    ) -> Result<JsExportedImage, JsValue> {
        let options = ExportOptions::for_basename(basename, gradient.map(|g| g.spec().clone()));
        self.export_options(&options)
    }

    // ------------------------------------------------------------------
    // Reset
    // ------------------------------------------------------------------

    /// Drop the image and start over
    pub fn reset(&mut self) {
        self.session.reset();
    }

    /// Keep the image, clear the frame and re-center at 100%
    #[wasm_bindgen(js_name = resetToOriginal)]
    pub fn reset_to_original(&mut self) {
        self.session.reset_to_original();
    }
}

impl Default for JsEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl JsEditor {
    fn from_session(session: EditorSession) -> Self {
        Self {
            session,
            surface: None,
        }
    }

    fn viewport_pixels(&self) -> (u32, u32) {
        self.session.viewport_pixels()
    }

    fn export_options(&mut self, options: &ExportOptions) -> Result<JsExportedImage, JsValue> {
        self.session
            .export(options)
            .map(JsExportedImage::from)
            .map_err(to_js_error)
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_from_config_object() {
        let config = js_sys::Object::new();
        let viewport = js_sys::Object::new();
        js_sys::Reflect::set(&viewport, &"width".into(), &JsValue::from_f64(640.0)).unwrap();
        js_sys::Reflect::set(&viewport, &"height".into(), &JsValue::from_f64(480.0)).unwrap();
        js_sys::Reflect::set(&config, &"viewport".into(), &viewport).unwrap();

        let editor = JsEditor::from_config(config.into()).unwrap();
        assert_eq!((editor.viewport_width(), editor.viewport_height()), (640, 480));
    }

    #[wasm_bindgen_test]
    fn test_from_config_undefined_uses_defaults() {
        let editor = JsEditor::from_config(JsValue::UNDEFINED).unwrap();
        assert_eq!(editor.viewport_width(), 800);
    }

    #[wasm_bindgen_test]
    fn test_unsupported_upload_rejected() {
        let mut editor = JsEditor::new();
        let err = editor.load_image(&[0u8; 16], "image/gif", "a.gif").unwrap_err();
        assert!(err.as_string().unwrap().starts_with("Unsupported file type"));
        assert!(editor.last_error().is_some());
    }

    #[wasm_bindgen_test]
    fn test_unknown_frame_errors() {
        let mut editor = JsEditor::new();
        assert!(editor.toggle_frame("nope").is_err());
    }

    #[wasm_bindgen_test]
    fn test_export_without_image_errors() {
        let mut editor = JsEditor::new();
        let err = editor.export_with_gradient("x", None).err().unwrap();
        assert_eq!(err.as_string().unwrap(), "Export failed: No image loaded");
    }

    #[wasm_bindgen_test]
    fn test_set_transform_partial() {
        let mut editor = JsEditor::new();
        let update = js_sys::Object::new();
        js_sys::Reflect::set(&update, &"offsetX".into(), &JsValue::from_f64(25.0)).unwrap();
        editor.set_transform(update.into()).unwrap();
        assert_eq!(editor.offset_x(), 25.0);
        assert_eq!(editor.scale(), 1.0);
    }

    #[wasm_bindgen_test]
    fn test_frames_lists_catalog() {
        let editor = JsEditor::new();
        let frames = js_sys::Array::from(&editor.frames().unwrap());
        assert_eq!(frames.length(), 4);
    }

    #[wasm_bindgen_test]
    fn test_export_with_options_object() {
        let mut editor = JsEditor::new();
        editor
            .load_image(&super::tests::png_bytes(40, 30), "image/png", "a.png")
            .unwrap();
        let options = js_sys::Object::new();
        js_sys::Reflect::set(&options, &"format".into(), &"jpeg".into()).unwrap();
        js_sys::Reflect::set(&options, &"filename".into(), &"a.jpg".into()).unwrap();

        let exported = editor.export(options.into()).unwrap();
        assert_eq!(exported.mime_type(), "image/jpeg");
        assert_eq!(exported.suggested_filename(), "a.jpg");
    }
}
