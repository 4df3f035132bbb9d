//! Gradient backgrounds for frame export.
//!
//! Two layers:
//!
//! - [`GradientSpec`]: the user-editable description (kind, angle, up to four
//!   stops). Serializable and immutable; edits return new values.
//! - [`GradientPaint`]: a spec resolved against a target pixel size, turned
//!   into a rasterizer shader when drawn.
//!
//! # Example
//!
//! ```ignore
//! use tileframe_core::gradient::{GradientPaint, GradientSpec};
//! use tileframe_core::geometry::Size;
//!
//! let spec = GradientSpec::default().with_angle(45.0).add_stop()?;
//! let paint = GradientPaint::build(&spec, Size::new(1400.0, 560.0))?;
//! ```

mod paint;
mod spec;

pub use paint::{ColorStop, GradientGeometry, GradientPaint};
pub use spec::{GradientKind, GradientSpec, GradientStop, MAX_STOPS, MIN_STOPS};
