//! Error types for editor operations.
//!
//! Every failure is scoped to the operation that raised it: the session keeps
//! its current image and transform, and nothing is retried automatically.

use thiserror::Error;

use crate::color::ColorError;
use crate::decode::DecodeError;
use crate::export::EncodeError;
use crate::surface::SurfaceError;

/// Invalid gradient or frame configuration. Blocks export until fixed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    /// A gradient needs at least two stops to define a transition
    #[error("Gradient requires at least {min} color stops, got {actual}")]
    TooFewStops { min: usize, actual: usize },

    /// The editor supports at most four stops per gradient
    #[error("Gradient supports at most {max} color stops, got {actual}")]
    TooManyStops { max: usize, actual: usize },

    /// Stop index does not exist in the gradient
    #[error("Gradient stop index {index} out of range (gradient has {len} stops)")]
    StopIndexOutOfRange { index: usize, len: usize },

    /// A stop color could not be parsed
    #[error("Invalid gradient stop color: {0}")]
    InvalidColor(#[from] ColorError),

    /// A frame catalog entry has a zero dimension
    #[error("Invalid frame {id:?}: width ({width}) and height ({height}) must be non-zero")]
    InvalidFrame { id: String, width: u32, height: u32 },

    /// No frame with this id in the catalog
    #[error("Unknown frame: {0}")]
    UnknownFrame(String),

    /// Viewport dimensions must be positive
    #[error("Invalid viewport size: {width}x{height}")]
    InvalidViewport { width: f64, height: f64 },

    /// Configuration document could not be parsed
    #[error("Invalid configuration: {0}")]
    Parse(String),
}

/// Upload rejected before any decoding happens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Unsupported file type. Please use: {}", .accepted.join(", "))]
    UnsupportedType { mime: String, accepted: Vec<String> },

    #[error("File too large. Maximum size: {}MB", max_bytes_to_mb(.max))]
    FileTooLarge { size: u64, max: u64 },
}

fn max_bytes_to_mb(bytes: &u64) -> u64 {
    (*bytes as f64 / 1024.0 / 1024.0).round() as u64
}

/// Export could not produce an encoded image. No partial output is returned.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Export was requested before an image was loaded
    #[error("No image loaded")]
    NoImage,

    /// The gradient background is invalid
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// The output surface could not be allocated
    #[error("Failed to allocate export surface: {0}")]
    Surface(#[from] SurfaceError),

    /// The surface could not be encoded
    #[error("Failed to encode export: {0}")]
    Encode(#[from] EncodeError),
}

/// Any error surfaced by an editor session.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_type_message() {
        let err = ValidationError::UnsupportedType {
            mime: "image/gif".to_string(),
            accepted: vec!["image/jpeg".to_string(), "image/png".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Unsupported file type. Please use: image/jpeg, image/png"
        );
    }

    #[test]
    fn test_file_too_large_message() {
        let err = ValidationError::FileTooLarge {
            size: 20 * 1024 * 1024,
            max: 10 * 1024 * 1024,
        };
        assert_eq!(err.to_string(), "File too large. Maximum size: 10MB");
    }

    #[test]
    fn test_too_few_stops_message() {
        let err = ConfigurationError::TooFewStops { min: 2, actual: 1 };
        assert_eq!(
            err.to_string(),
            "Gradient requires at least 2 color stops, got 1"
        );
    }

    #[test]
    fn test_export_error_wraps_configuration() {
        let err: EditorError = ExportError::from(ConfigurationError::TooFewStops {
            min: 2,
            actual: 0,
        })
        .into();
        assert_eq!(
            err.to_string(),
            "Export failed: Gradient requires at least 2 color stops, got 0"
        );
    }
}
