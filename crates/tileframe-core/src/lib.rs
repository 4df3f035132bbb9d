//! Tileframe Core - Transform and compositing engine
//!
//! This crate provides the image editing core for Tileframe: the pan/zoom
//! view transform, the frame overlay, the viewport compositor, gradient
//! backgrounds and the export compositor that produces images at exact
//! target frame sizes.

pub mod color;
pub mod config;
pub mod decode;
pub mod error;
pub mod export;
pub mod frame;
pub mod geometry;
pub mod gradient;
pub mod overlay;
pub mod session;
pub mod surface;
pub mod transform;
pub mod viewport;

pub use color::{Color, ColorError};
pub use config::EditorConfig;
pub use decode::{decode_image, validate_upload, DecodeError, SourceImage};
pub use error::{ConfigurationError, EditorError, ExportError, ValidationError};
pub use export::{
    compose_frame, export_frame, export_viewport, ExportFormat, ExportOptions, ExportedImage,
    FitPlacement,
};
pub use frame::{FrameCatalog, FrameSelection, FrameSize};
pub use geometry::{CanvasTransform, Point, Rect, Size, MAX_SCALE, MIN_SCALE};
pub use gradient::{GradientKind, GradientPaint, GradientSpec, GradientStop};
pub use overlay::FrameOverlay;
pub use session::{EditorAction, EditorSession, LoadTicket};
pub use surface::{Paint, Surface, SurfaceError};
pub use transform::{TransformController, TransformUpdate};
pub use viewport::render_viewport;
