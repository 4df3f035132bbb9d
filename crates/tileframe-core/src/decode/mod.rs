//! Image loading for Tileframe.
//!
//! This module provides functionality for:
//! - Validating uploads by MIME type and size before decoding
//! - Decoding JPEG, PNG and WebP into upright RGBA pixels (EXIF orientation applied)
//!
//! # Architecture
//!
//! Decoding is synchronous. Hosts that decode off the main thread pair it with
//! the session's load tickets so a slow decode never replaces a newer image.
//!
//! # Examples
//!
//! ```ignore
//! use tileframe_core::decode::{decode_image, validate_upload};
//! use tileframe_core::EditorConfig;
//!
//! let bytes = std::fs::read("photo.jpg")?;
//! validate_upload("image/jpeg", bytes.len() as u64, &EditorConfig::default())?;
//! let image = decode_image(&bytes, "photo.jpg")?;
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod raster;
mod types;
mod validate;

pub use raster::{decode_image, get_orientation};
pub use types::{DecodeError, Orientation, SourceImage};
pub use validate::validate_upload;
