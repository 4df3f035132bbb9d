//! Editor configuration.
//!
//! Every field has a default, so hosts only need to pass what they change:
//!
//! ```json
//! { "viewport": { "width": 1024, "height": 768 }, "anchorZoomToCursor": true }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::frame::FrameCatalog;
use crate::geometry::Size;
use crate::surface::DEFAULT_MAX_SURFACE_PIXELS;

/// Default upload size limit: 10 MiB.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// MIME types accepted by default.
pub const DEFAULT_ACCEPTED_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    /// Viewport size in pixels
    pub viewport: Size,
    /// Largest accepted upload in bytes
    pub max_file_size: u64,
    /// Accepted upload MIME types
    pub accepted_types: Vec<String>,
    /// Target frame sizes offered to the user
    pub frames: FrameCatalog,
    /// Wheel zoom keeps the point under the cursor fixed instead of zooming
    /// around the image center
    pub anchor_zoom_to_cursor: bool,
    /// Largest surface (viewport or export) the editor will allocate
    pub max_surface_pixels: u64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            viewport: Size::new(800.0, 600.0),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            accepted_types: DEFAULT_ACCEPTED_TYPES.iter().map(|t| t.to_string()).collect(),
            frames: FrameCatalog::default(),
            anchor_zoom_to_cursor: false,
            max_surface_pixels: DEFAULT_MAX_SURFACE_PIXELS,
        }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        let config: EditorConfig =
            serde_json::from_str(json).map_err(|e| ConfigurationError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the viewport is drawable within `max_surface_pixels`.
    ///
    /// Frame entries need no check here: a `FrameCatalog` cannot hold a
    /// zero-sized frame.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let invalid = || ConfigurationError::InvalidViewport {
            width: self.viewport.width,
            height: self.viewport.height,
        };
        if self.viewport.is_empty() {
            return Err(invalid());
        }
        let (width, height) = viewport_pixels(self.viewport);
        if width as u64 * height as u64 > self.max_surface_pixels {
            return Err(invalid());
        }
        Ok(())
    }

    /// Viewport size in whole pixels.
    pub fn viewport_pixels(&self) -> (u32, u32) {
        viewport_pixels(self.viewport)
    }

    /// True if uploads of this MIME type are accepted (case-insensitive).
    pub fn accepts(&self, mime: &str) -> bool {
        self.accepted_types
            .iter()
            .any(|t| t.eq_ignore_ascii_case(mime.trim()))
    }
}

/// Round a viewport size to whole pixels, at least 1x1.
pub(crate) fn viewport_pixels(size: Size) -> (u32, u32) {
    let px = |v: f64| {
        if v.is_finite() {
            v.round().clamp(1.0, u32::MAX as f64) as u32
        } else {
            1
        }
    };
    (px(size.width), px(size.height))
}
