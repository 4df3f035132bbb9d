//! Export pipeline.
//!
//! Two paths:
//! - **Frame export**: a fresh surface at the frame's exact pixel size,
//!   background painted first, the image fitted and centered on top. Uses
//!   only the image, the frame and the options, never the live pan/zoom.
//! - **Viewport export**: captures the current viewport surface as-is, used
//!   when no frame is selected.
//!
//! # Examples
//!
//! ```ignore
//! use tileframe_core::export::{export_frame, ExportOptions};
//!
//! let options = ExportOptions::for_basename("promo", Some(GradientSpec::default()));
//! let exported = export_frame(&image, &frame, &options)?;
//! std::fs::write(&exported.suggested_filename, &exported.bytes)?;
//! ```

mod compositor;
mod encode;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::gradient::GradientSpec;
use crate::surface::DEFAULT_MAX_SURFACE_PIXELS;

pub use compositor::{
    background_paint, compose_frame, export_frame, export_viewport, FitPlacement,
};
pub use encode::{encode_rgba, EncodeError};

/// File name base used when the user leaves the name empty.
pub const DEFAULT_BASENAME: &str = "edited-image";

/// Output raster format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Png,
    Jpeg,
    Webp,
}

impl ExportFormat {
    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Jpeg => "image/jpeg",
            ExportFormat::Webp => "image/webp",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpg",
            ExportFormat::Webp => "webp",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExportFormat::Png => "PNG",
            ExportFormat::Jpeg => "JPEG",
            ExportFormat::Webp => "WebP",
        })
    }
}

/// What to export and how.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportOptions {
    pub format: ExportFormat,
    /// 0 to 100; only JPEG uses it
    pub quality: u8,
    /// Suggested download file name, passed through unchanged
    pub filename: String,
    /// Frame background gradient
    #[serde(rename = "backgroundGradient")]
    pub gradient: Option<GradientSpec>,
    /// Solid frame background, used when no gradient is set
    pub background_color: Option<String>,
    /// Largest export surface to allocate
    #[serde(skip, default = "default_max_surface_pixels")]
    pub max_surface_pixels: u64,
}

fn default_max_surface_pixels() -> u64 {
    DEFAULT_MAX_SURFACE_PIXELS
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self::for_basename("", None)
    }
}

impl ExportOptions {
    /// PNG at full quality named `<basename>.png`.
    ///
    /// The name is trimmed; an empty name becomes `edited-image`.
    pub fn for_basename(basename: &str, gradient: Option<GradientSpec>) -> Self {
        let base = match basename.trim() {
            "" => DEFAULT_BASENAME,
            trimmed => trimmed,
        };
        Self {
            format: ExportFormat::Png,
            quality: 100,
            filename: format!("{}.png", base),
            gradient,
            background_color: None,
            max_surface_pixels: DEFAULT_MAX_SURFACE_PIXELS,
        }
    }
}

/// An encoded export, ready to hand to the host for download.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedImage {
    #[serde(skip)]
    pub bytes: Vec<u8>,
    pub mime_type: &'static str,
    pub suggested_filename: String,
    pub width: u32,
    pub height: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_metadata() {
        assert_eq!(ExportFormat::Png.mime_type(), "image/png");
        assert_eq!(ExportFormat::Jpeg.mime_type(), "image/jpeg");
        assert_eq!(ExportFormat::Webp.mime_type(), "image/webp");
        assert_eq!(ExportFormat::Jpeg.extension(), "jpg");
        assert_eq!(ExportFormat::Webp.to_string(), "WebP");
    }

    #[test]
    fn test_for_basename_defaults() {
        let options = ExportOptions::for_basename("promo", None);
        assert_eq!(options.format, ExportFormat::Png);
        assert_eq!(options.quality, 100);
        assert_eq!(options.filename, "promo.png");
    }

    #[test]
    fn test_for_basename_empty_or_blank() {
        assert_eq!(ExportOptions::for_basename("", None).filename, "edited-image.png");
        assert_eq!(ExportOptions::for_basename("   ", None).filename, "edited-image.png");
        assert_eq!(ExportOptions::for_basename("  tile ", None).filename, "tile.png");
    }

    #[test]
    fn test_options_deserialize() {
        let options: ExportOptions = serde_json::from_str(
            r##"{"format":"jpeg","quality":80,"filename":"a.jpg","backgroundGradient":{"type":"radial","angle":0,"stops":[{"color":"#000","position":0},{"color":"#fff","position":100}]}}"##,
        )
        .unwrap();
        assert_eq!(options.format, ExportFormat::Jpeg);
        assert_eq!(options.quality, 80);
        assert!(options.gradient.is_some());
        assert_eq!(options.max_surface_pixels, DEFAULT_MAX_SURFACE_PIXELS);
    }

    #[test]
    fn test_options_reject_gradient_with_too_many_stops() {
        let stops = vec![r##"{"color":"#000","position":0}"##; 6].join(",");
        let json = format!(
            r#"{{"format":"png","backgroundGradient":{{"type":"linear","angle":90,"stops":[{}]}}}}"#,
            stops
        );
        let err = serde_json::from_str::<ExportOptions>(&json).unwrap_err();
        assert!(err.to_string().contains("at most 4"), "{}", err);
    }

    #[test]
    fn test_options_deserialize_empty_is_default() {
        let options: ExportOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, ExportOptions::default());
        assert_eq!(options.filename, "edited-image.png");
    }
}
