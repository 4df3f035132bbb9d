//! Editor session: the single owner of editor state.
//!
//! All state changes go through [`EditorSession::dispatch`] or one of the
//! convenience methods built on it. The session is single-threaded and
//! run-to-completion; hosts that decode off the main thread use load tickets
//! so a slow decode can never overwrite a newer image.

use std::sync::Arc;

use crate::config::EditorConfig;
use crate::decode::{decode_image, validate_upload, DecodeError, SourceImage};
use crate::error::{ConfigurationError, EditorError, ExportError};
use crate::export::{export_frame, export_viewport, ExportOptions, ExportedImage};
use crate::frame::{FrameCatalog, FrameSelection, FrameSize};
use crate::geometry::{CanvasTransform, Point, Size};
use crate::surface::{Surface, SurfaceError};
use crate::transform::{TransformController, TransformUpdate};
use crate::viewport;

/// State transitions understood by [`EditorSession::dispatch`].
#[derive(Debug, Clone, PartialEq)]
pub enum EditorAction {
    /// Replace the image; resets the transform to identity and clears the error
    SetImage(Arc<SourceImage>),
    SetViewportSize(Size),
    /// Merge a partial transform; the scale is clamped
    SetTransform(TransformUpdate),
    SetSelectedFrame(Option<FrameSize>),
    SetError(Option<String>),
    /// Back to the initial state, keeping the viewport size
    Reset,
}

/// Identifies one image load. Only the most recent ticket may install its
/// result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadTicket(u64);

#[derive(Debug, Clone)]
pub struct EditorSession {
    config: EditorConfig,
    image: Option<Arc<SourceImage>>,
    viewport: Size,
    controller: TransformController,
    selection: FrameSelection,
    last_error: Option<String>,
    latest_ticket: u64,
    pending: Option<LoadTicket>,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::from_valid_config(EditorConfig::default())
    }
}

impl EditorSession {
    /// Create a session from a configuration, validating it first.
    pub fn new(config: EditorConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: EditorConfig) -> Self {
        Self {
            viewport: config.viewport,
            controller: TransformController::with_cursor_anchored_zoom(
                config.anchor_zoom_to_cursor,
            ),
            config,
            image: None,
            selection: FrameSelection::new(),
            last_error: None,
            latest_ticket: 0,
            pending: None,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn catalog(&self) -> &FrameCatalog {
        &self.config.frames
    }

    pub fn image(&self) -> Option<&Arc<SourceImage>> {
        self.image.as_ref()
    }

    pub fn viewport_size(&self) -> Size {
        self.viewport
    }

    pub fn transform(&self) -> CanvasTransform {
        self.controller.transform()
    }

    pub fn controller(&self) -> &TransformController {
        &self.controller
    }

    pub fn selected_frame(&self) -> Option<&FrameSize> {
        self.selection.get()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// True while a load ticket is outstanding.
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    // ------------------------------------------------------------------
    // Reducer
    // ------------------------------------------------------------------

    pub fn dispatch(&mut self, action: EditorAction) {
        match action {
            EditorAction::SetImage(image) => {
                tracing::debug!(
                    name = %image.name,
                    width = image.width,
                    height = image.height,
                    "image replaced"
                );
                self.image = Some(image);
                self.last_error = None;
                self.controller.reset_to_identity();
            }
            EditorAction::SetViewportSize(size) => {
                self.viewport = size;
            }
            EditorAction::SetTransform(update) => {
                self.controller.apply(update);
            }
            EditorAction::SetSelectedFrame(frame) => {
                self.selection.set(frame);
            }
            EditorAction::SetError(error) => {
                self.last_error = error;
            }
            EditorAction::Reset => {
                tracing::debug!("session reset");
                self.image = None;
                self.controller.reset_to_identity();
                self.selection.clear();
                self.last_error = None;
                // In-flight loads belong to the discarded state
                self.latest_ticket += 1;
                self.pending = None;
            }
        }
    }

    // ------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------

    /// Start a load. Any earlier outstanding ticket is superseded.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.latest_ticket += 1;
        let ticket = LoadTicket(self.latest_ticket);
        self.pending = Some(ticket);
        ticket
    }

    /// True if `ticket` is the outstanding load.
    pub fn is_current_load(&self, ticket: LoadTicket) -> bool {
        self.pending == Some(ticket)
    }

    /// Install the result of a load started with `ticket`.
    ///
    /// Returns `Ok(true)` when the image was installed and `Ok(false)` when
    /// the ticket was superseded and the result dropped. A decode failure for
    /// the current ticket is recorded as the session error; the previous image
    /// stays in place.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<SourceImage, DecodeError>,
    ) -> Result<bool, EditorError> {
        if !self.is_current_load(ticket) {
            tracing::warn!(ticket = ticket.0, latest = self.latest_ticket, "dropping superseded load");
            return Ok(false);
        }
        self.pending = None;

        match result {
            Ok(image) => {
                self.dispatch(EditorAction::SetImage(Arc::new(image)));
                self.controller.reset(self.viewport);
                Ok(true)
            }
            Err(e) => Err(self.fail(e.into())),
        }
    }

    /// Validate, decode and install an uploaded file in one step.
    pub fn load_image(&mut self, bytes: &[u8], mime: &str, name: &str) -> Result<(), EditorError> {
        if let Err(e) = validate_upload(mime, bytes.len() as u64, &self.config) {
            return Err(self.fail(e.into()));
        }
        let ticket = self.begin_load();
        self.finish_load(ticket, decode_image(bytes, name))?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Viewport and gestures
    // ------------------------------------------------------------------

    /// Resize the viewport. The size must be non-empty and within the surface
    /// limit.
    pub fn set_viewport_size(&mut self, size: Size) -> Result<(), ConfigurationError> {
        let candidate = EditorConfig {
            viewport: size,
            ..self.config.clone()
        };
        candidate.validate()?;
        self.config.viewport = size;
        self.dispatch(EditorAction::SetViewportSize(size));
        Ok(())
    }

    pub fn pan(&mut self, delta_x: f64, delta_y: f64) {
        self.controller.pan(delta_x, delta_y);
    }

    pub fn zoom(&mut self, factor: f64) {
        self.controller.zoom(factor);
    }

    pub fn wheel(&mut self, delta_y: f64, cursor: Point) {
        self.controller.wheel(delta_y, cursor);
    }

    pub fn set_scale(&mut self, scale: f64) {
        self.controller.set_scale(scale);
    }

    pub fn zoom_in(&mut self) {
        self.controller.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.controller.zoom_out();
    }

    /// Fit the current image in the viewport. No-op without an image.
    pub fn zoom_to_fit(&mut self) {
        if let Some(image) = &self.image {
            self.controller.zoom_to_fit(image.original_size(), self.viewport);
        }
    }

    /// Scale 1, image centered in the viewport.
    pub fn reset_transform(&mut self) {
        tracing::debug!("transform reset");
        self.controller.reset(self.viewport);
    }

    // ------------------------------------------------------------------
    // Frames
    // ------------------------------------------------------------------

    /// Select the frame with `id`, or deselect it if already selected.
    pub fn toggle_frame(&mut self, id: &str) -> Result<Option<&FrameSize>, ConfigurationError> {
        let frame = self.lookup_frame(id)?.clone();
        let selected = self.selection.toggle(&frame);
        tracing::debug!(frame = id, selected = selected.is_some(), "frame toggled");
        Ok(selected)
    }

    pub fn select_frame(&mut self, id: &str) -> Result<(), ConfigurationError> {
        let frame = self.lookup_frame(id)?.clone();
        self.dispatch(EditorAction::SetSelectedFrame(Some(frame)));
        Ok(())
    }

    pub fn clear_frame(&mut self) {
        self.dispatch(EditorAction::SetSelectedFrame(None));
    }

    fn lookup_frame(&self, id: &str) -> Result<&FrameSize, ConfigurationError> {
        self.config
            .frames
            .get(id)
            .ok_or_else(|| ConfigurationError::UnknownFrame(id.to_string()))
    }

    // ------------------------------------------------------------------
    // Rendering and export
    // ------------------------------------------------------------------

    /// Viewport size in whole pixels.
    pub fn viewport_pixels(&self) -> (u32, u32) {
        crate::config::viewport_pixels(self.viewport)
    }

    /// A transparent surface matching the viewport, within the surface limit.
    pub fn viewport_surface(&self) -> Result<Surface, SurfaceError> {
        let (width, height) = self.viewport_pixels();
        Surface::with_limit(width, height, self.config.max_surface_pixels)
    }

    /// Redraw the viewport from the current state.
    pub fn render_viewport(&self, surface: &mut Surface) {
        viewport::render_viewport(
            surface,
            self.image.as_deref(),
            &self.controller.transform(),
            self.selection.get(),
        );
    }

    /// Export the selected frame, or capture the viewport when no frame is
    /// selected.
    ///
    /// On failure the error is recorded as the session error and returned;
    /// image, transform and selection are left as they were.
    pub fn export(&mut self, options: &ExportOptions) -> Result<ExportedImage, EditorError> {
        let options = ExportOptions {
            max_surface_pixels: self.config.max_surface_pixels,
            ..options.clone()
        };
        match self.try_export(&options) {
            Ok(exported) => Ok(exported),
            Err(e) => Err(self.fail(e.into())),
        }
    }

    fn try_export(&self, options: &ExportOptions) -> Result<ExportedImage, ExportError> {
        let image = self.image.as_deref().ok_or(ExportError::NoImage)?;
        match self.selection.get() {
            Some(frame) => export_frame(image, frame, options),
            None => {
                let mut surface = self.viewport_surface()?;
                self.render_viewport(&mut surface);
                export_viewport(&surface, options)
            }
        }
    }

    // ------------------------------------------------------------------
    // Reset
    // ------------------------------------------------------------------

    /// Drop the image and return to the initial state. The viewport size is
    /// kept.
    pub fn reset(&mut self) {
        self.dispatch(EditorAction::Reset);
    }

    /// Keep the image but clear the frame and re-center it at scale 1.
    pub fn reset_to_original(&mut self) {
        self.selection.clear();
        self.last_error = None;
        self.reset_transform();
    }

    fn fail(&mut self, error: EditorError) -> EditorError {
        tracing::warn!(error = %error, "editor operation failed");
        self.last_error = Some(error.to_string());
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::ExportFormat;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn source(width: u32, height: u32) -> SourceImage {
        SourceImage::from_rgba_image(
            "test.png",
            RgbaImage::from_pixel(width, height, Rgba([10, 200, 30, 255])),
        )
    }

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([10, 200, 30, 255]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    fn loaded(width: u32, height: u32) -> EditorSession {
        let mut session = EditorSession::default();
        let ticket = session.begin_load();
        assert!(session.finish_load(ticket, Ok(source(width, height))).unwrap());
        session
    }

    #[test]
    fn test_initial_state() {
        let session = EditorSession::default();
        assert!(session.image().is_none());
        assert_eq!(session.viewport_size(), Size::new(800.0, 600.0));
        assert_eq!(session.transform(), CanvasTransform::identity());
        assert!(session.selected_frame().is_none());
        assert!(session.last_error().is_none());
        assert!(!session.is_loading());
        assert_eq!(session.catalog().len(), 4);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = EditorConfig {
            viewport: Size::new(0.0, 600.0),
            ..EditorConfig::default()
        };
        assert!(matches!(
            EditorSession::new(config),
            Err(ConfigurationError::InvalidViewport { .. })
        ));
    }

    #[test]
    fn test_set_image_resets_transform_and_error() {
        let mut session = EditorSession::default();
        session.pan(40.0, 40.0);
        session.dispatch(EditorAction::SetError(Some("boom".to_string())));

        session.dispatch(EditorAction::SetImage(Arc::new(source(10, 10))));
        assert_eq!(session.transform(), CanvasTransform::identity());
        assert!(session.last_error().is_none());
    }

    #[test]
    fn test_set_transform_merges_and_clamps() {
        let mut session = EditorSession::default();
        session.dispatch(EditorAction::SetTransform(TransformUpdate {
            offset_x: Some(12.0),
            ..TransformUpdate::default()
        }));
        session.dispatch(EditorAction::SetTransform(TransformUpdate {
            scale: Some(50.0),
            ..TransformUpdate::default()
        }));
        assert_eq!(session.transform(), CanvasTransform::new(5.0, 12.0, 0.0));
    }

    #[test]
    fn test_finish_load_centers_image() {
        let session = loaded(100, 50);
        assert_eq!(session.transform(), CanvasTransform::new(1.0, 400.0, 300.0));
        assert!(!session.is_loading());
    }

    #[test]
    fn test_superseded_load_is_dropped() {
        let mut session = EditorSession::default();
        let first = session.begin_load();
        let second = session.begin_load();

        assert!(session.finish_load(second, Ok(source(20, 20))).unwrap());
        assert!(!session.finish_load(first, Ok(source(99, 99))).unwrap());

        let image = session.image().unwrap();
        assert_eq!((image.width, image.height), (20, 20));
    }

    #[test]
    fn test_stale_ticket_after_newer_finished_is_dropped() {
        let mut session = loaded(20, 20);
        let ticket = session.begin_load();
        assert!(session.finish_load(ticket, Ok(source(30, 30))).unwrap());
        // Same ticket again is no longer pending
        assert!(!session.finish_load(ticket, Ok(source(40, 40))).unwrap());
        assert_eq!(session.image().unwrap().width, 30);
    }

    #[test]
    fn test_failed_load_keeps_previous_image() {
        let mut session = loaded(20, 20);
        session.pan(5.0, 5.0);
        let before = session.transform();

        let ticket = session.begin_load();
        let err = session
            .finish_load(ticket, Err(DecodeError::InvalidFormat))
            .unwrap_err();
        assert!(matches!(err, EditorError::Decode(DecodeError::InvalidFormat)));
        assert_eq!(session.image().unwrap().width, 20);
        assert_eq!(session.transform(), before);
        assert_eq!(session.last_error(), Some("Invalid or unsupported image format"));
    }

    #[test]
    fn test_load_image_end_to_end() {
        let mut session = EditorSession::default();
        session.load_image(&png_bytes(64, 32), "image/png", "shot.png").unwrap();

        let image = session.image().unwrap();
        assert_eq!(image.name, "shot.png");
        assert_eq!(image.original_size(), Size::new(64.0, 32.0));
        assert_eq!(session.transform(), CanvasTransform::new(1.0, 400.0, 300.0));
    }

    #[test]
    fn test_load_image_rejects_unsupported_type() {
        let mut session = EditorSession::default();
        let err = session.load_image(&png_bytes(4, 4), "image/gif", "a.gif").unwrap_err();
        assert!(matches!(err, EditorError::Validation(_)));
        assert!(session.image().is_none());
        assert!(session.last_error().unwrap().starts_with("Unsupported file type"));
        assert!(!session.is_loading());
    }

    #[test]
    fn test_load_image_rejects_oversized_file() {
        let config = EditorConfig {
            max_file_size: 10,
            ..EditorConfig::default()
        };
        let mut session = EditorSession::new(config).unwrap();
        let err = session.load_image(&png_bytes(4, 4), "image/png", "a.png").unwrap_err();
        assert!(matches!(err, EditorError::Validation(_)));
    }

    #[test]
    fn test_load_image_corrupt_bytes() {
        let mut session = EditorSession::default();
        let err = session.load_image(&[1, 2, 3, 4], "image/png", "a.png").unwrap_err();
        assert!(matches!(err, EditorError::Decode(_)));
        assert!(session.image().is_none());
    }

    #[test]
    fn test_toggle_frame_does_not_touch_transform() {
        let mut session = loaded(100, 100);
        session.pan(13.0, -7.0);
        session.set_scale(2.5);
        let before = session.transform();

        assert_eq!(session.toggle_frame("small-tile").unwrap().unwrap().id, "small-tile");
        assert!(session.toggle_frame("small-tile").unwrap().is_none());
        assert_eq!(session.transform(), before);
    }

    #[test]
    fn test_toggle_switches_between_frames() {
        let mut session = EditorSession::default();
        session.toggle_frame("small-tile").unwrap();
        let selected = session.toggle_frame("large-tile").unwrap();
        assert_eq!(selected.unwrap().id, "large-tile");
    }

    #[test]
    fn test_unknown_frame() {
        let mut session = EditorSession::default();
        assert_eq!(
            session.select_frame("nope"),
            Err(ConfigurationError::UnknownFrame("nope".to_string()))
        );
        assert!(session.toggle_frame("nope").is_err());
        assert!(session.selected_frame().is_none());
    }

    #[test]
    fn test_zoom_to_fit_without_image_is_noop() {
        let mut session = EditorSession::default();
        session.zoom_to_fit();
        assert_eq!(session.transform(), CanvasTransform::identity());
    }

    #[test]
    fn test_zoom_to_fit_with_image() {
        let mut session = loaded(2000, 1000);
        session.zoom_to_fit();
        assert!((session.transform().scale - 0.32).abs() < 1e-12);
    }

    #[test]
    fn test_gestures_pass_through() {
        let mut session = loaded(10, 10);
        session.zoom_in();
        assert!((session.transform().scale - 1.2).abs() < 1e-12);
        session.zoom_out();
        assert!((session.transform().scale - 0.96).abs() < 1e-12);
        session.wheel(100.0, Point::new(0.0, 0.0));
        assert!((session.transform().scale - 0.864).abs() < 1e-12);
        session.zoom(100.0);
        assert_eq!(session.transform().scale, 5.0);
    }

    #[test]
    fn test_set_viewport_size() {
        let mut session = EditorSession::default();
        session.set_viewport_size(Size::new(1024.0, 768.0)).unwrap();
        assert_eq!(session.viewport_size(), Size::new(1024.0, 768.0));
        assert!(session.set_viewport_size(Size::new(-1.0, 10.0)).is_err());
        assert_eq!(session.viewport_size(), Size::new(1024.0, 768.0));
    }

    #[test]
    fn test_export_without_image() {
        let mut session = EditorSession::default();
        let err = session.export(&ExportOptions::default()).unwrap_err();
        assert!(matches!(err, EditorError::Export(ExportError::NoImage)));
        assert_eq!(session.last_error(), Some("Export failed: No image loaded"));
    }

    #[test]
    fn test_export_frame_ignores_pan_and_zoom() {
        let mut session = loaded(300, 200);
        session.pan(-500.0, 250.0);
        session.set_scale(4.0);

        for frame in FrameCatalog::default().iter() {
            session.select_frame(&frame.id).unwrap();
            let exported = session.export(&ExportOptions::default()).unwrap();
            assert_eq!((exported.width, exported.height), (frame.width, frame.height));
        }
    }

    #[test]
    fn test_export_viewport_fallback() {
        let mut session = loaded(300, 200);
        let options = ExportOptions {
            format: ExportFormat::Jpeg,
            ..ExportOptions::for_basename("view", None)
        };
        let exported = session.export(&options).unwrap();
        assert_eq!((exported.width, exported.height), (800, 600));
        assert_eq!(exported.mime_type, "image/jpeg");
    }

    #[test]
    fn test_export_error_leaves_state_intact() {
        let mut session = loaded(300, 200);
        session.select_frame("small-tile").unwrap();
        session.pan(3.0, 4.0);
        let before = session.transform();

        let mut spec = crate::gradient::GradientSpec::default();
        spec.stops.truncate(1);
        let err = session
            .export(&ExportOptions::for_basename("x", Some(spec)))
            .unwrap_err();

        assert!(matches!(err, EditorError::Export(ExportError::Configuration(_))));
        assert!(session.last_error().unwrap().starts_with("Export failed:"));
        assert_eq!(session.transform(), before);
        assert_eq!(session.selected_frame().unwrap().id, "small-tile");
        assert!(session.image().is_some());
    }

    #[test]
    fn test_export_uses_configured_surface_limit() {
        let config = EditorConfig {
            max_surface_pixels: 800 * 600,
            ..EditorConfig::default()
        };
        let mut session = EditorSession::new(config).unwrap();
        let ticket = session.begin_load();
        session.finish_load(ticket, Ok(source(10, 10))).unwrap();
        session.select_frame("large-tile").unwrap();

        let err = session.export(&ExportOptions::default()).unwrap_err();
        assert!(matches!(err, EditorError::Export(ExportError::Surface(_))));
    }

    #[test]
    fn test_render_viewport_draws_image() {
        let session = loaded(100, 100);
        let mut surface = session.viewport_surface().unwrap();
        session.render_viewport(&mut surface);
        assert_eq!(surface.pixel(400, 300), Some([10, 200, 30, 255]));
        assert_eq!(surface.pixel(10, 10), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_reset_keeps_viewport_size() {
        let mut session = EditorSession::default();
        session.set_viewport_size(Size::new(640.0, 480.0)).unwrap();
        let ticket = session.begin_load();
        session.finish_load(ticket, Ok(source(10, 10))).unwrap();
        session.select_frame("small-tile").unwrap();

        session.reset();
        assert!(session.image().is_none());
        assert!(session.selected_frame().is_none());
        assert_eq!(session.transform(), CanvasTransform::identity());
        assert_eq!(session.viewport_size(), Size::new(640.0, 480.0));
    }

    #[test]
    fn test_reset_supersedes_pending_load() {
        let mut session = EditorSession::default();
        let ticket = session.begin_load();
        session.reset();
        assert!(!session.finish_load(ticket, Ok(source(10, 10))).unwrap());
        assert!(session.image().is_none());
    }

    #[test]
    fn test_reset_to_original() {
        let mut session = loaded(50, 50);
        session.select_frame("large-tile").unwrap();
        session.pan(100.0, 100.0);
        session.set_scale(3.0);

        session.reset_to_original();
        assert!(session.image().is_some());
        assert!(session.selected_frame().is_none());
        assert_eq!(session.transform(), CanvasTransform::new(1.0, 400.0, 300.0));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
