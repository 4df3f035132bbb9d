//! Interactive view transform.
//!
//! The view transform is the user's pan/zoom state. It only affects what the
//! viewport shows: frame export recomputes its own placement and never reads
//! the live transform.
//!
//! # Coordinate System
//!
//! - The transform offset is the viewport position of the image center
//! - Scale is uniform and clamped to `[0.1, 5.0]`
//! - Zoom operates around the image center unless cursor anchoring is enabled

mod controller;

pub use controller::{
    TransformController, TransformUpdate, FIT_PADDING, WHEEL_ZOOM_IN, WHEEL_ZOOM_OUT,
    ZOOM_IN_STEP, ZOOM_OUT_STEP,
};
