//! Pan/zoom controller for the interactive viewport.
//!
//! All inputs are coerced rather than rejected: scales are clamped into
//! `[MIN_SCALE, MAX_SCALE]` and non-finite values are ignored.

use serde::{Deserialize, Serialize};

use crate::geometry::{clamp_scale, CanvasTransform, Point, Size, MAX_SCALE, MIN_SCALE};

/// Fraction of the viewport an image fills after zoom-to-fit.
pub const FIT_PADDING: f64 = 0.8;

/// Zoom factor of the zoom-in button.
pub const ZOOM_IN_STEP: f64 = 1.2;

/// Zoom factor of the zoom-out button.
pub const ZOOM_OUT_STEP: f64 = 0.8;

/// Wheel zoom factor when scrolling towards the user.
pub const WHEEL_ZOOM_OUT: f64 = 0.9;

/// Wheel zoom factor when scrolling away from the user.
pub const WHEEL_ZOOM_IN: f64 = 1.1;

/// Partial transform update; `None` fields keep their current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransformUpdate {
    pub scale: Option<f64>,
    pub offset_x: Option<f64>,
    pub offset_y: Option<f64>,
}

/// Owns the current [`CanvasTransform`] and applies gestures to it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformController {
    transform: CanvasTransform,
    anchor_zoom_to_cursor: bool,
}

impl TransformController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Controller whose wheel zoom keeps the point under the cursor fixed.
    pub fn with_cursor_anchored_zoom(anchor: bool) -> Self {
        Self {
            anchor_zoom_to_cursor: anchor,
            ..Self::default()
        }
    }

    pub fn transform(&self) -> CanvasTransform {
        self.transform
    }

    pub fn scale(&self) -> f64 {
        self.transform.scale
    }

    /// Zoom level as a whole percentage, as shown next to the zoom buttons.
    pub fn scale_percent(&self) -> u32 {
        (self.transform.scale * 100.0).round() as u32
    }

    pub fn can_zoom_in(&self) -> bool {
        self.transform.scale < MAX_SCALE
    }

    pub fn can_zoom_out(&self) -> bool {
        self.transform.scale > MIN_SCALE
    }

    /// Replace the whole transform; the scale is clamped.
    pub fn set(&mut self, transform: CanvasTransform) {
        self.apply(TransformUpdate {
            scale: Some(transform.scale),
            offset_x: Some(transform.offset_x),
            offset_y: Some(transform.offset_y),
        });
    }

    /// Merge a partial update into the current transform.
    pub fn apply(&mut self, update: TransformUpdate) {
        if let Some(scale) = update.scale {
            self.set_scale(scale);
        }
        if let Some(x) = update.offset_x.filter(|v| v.is_finite()) {
            self.transform.offset_x = x;
        }
        if let Some(y) = update.offset_y.filter(|v| v.is_finite()) {
            self.transform.offset_y = y;
        }
    }

    /// Translate the image by a drag delta. Offsets are never clamped, so the
    /// image may be panned fully out of view.
    pub fn pan(&mut self, delta_x: f64, delta_y: f64) {
        if !(delta_x.is_finite() && delta_y.is_finite()) {
            return;
        }
        self.transform.offset_x += delta_x;
        self.transform.offset_y += delta_y;
    }

    /// Multiply the scale by `factor`, keeping the offsets. The image zooms
    /// around its own center rather than the cursor.
    pub fn zoom(&mut self, factor: f64) {
        if factor.is_finite() {
            self.set_scale(self.transform.scale * factor);
        }
    }

    /// Multiply the scale by `factor`, keeping `anchor` (a viewport point)
    /// over the same image pixel.
    pub fn zoom_at(&mut self, factor: f64, anchor: Point) {
        if !(factor.is_finite() && anchor.x.is_finite() && anchor.y.is_finite()) {
            return;
        }
        let old = self.transform.scale;
        let new = clamp_scale(old * factor);
        let ratio = new / old;
        self.transform.offset_x = anchor.x - (anchor.x - self.transform.offset_x) * ratio;
        self.transform.offset_y = anchor.y - (anchor.y - self.transform.offset_y) * ratio;
        self.transform.scale = new;
    }

    /// Apply a mouse wheel step. Positive `delta_y` zooms out.
    pub fn wheel(&mut self, delta_y: f64, cursor: Point) {
        let factor = if delta_y > 0.0 {
            WHEEL_ZOOM_OUT
        } else {
            WHEEL_ZOOM_IN
        };
        if self.anchor_zoom_to_cursor {
            self.zoom_at(factor, cursor);
        } else {
            self.zoom(factor);
        }
    }

    pub fn zoom_in(&mut self) {
        self.zoom(ZOOM_IN_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.zoom(ZOOM_OUT_STEP);
    }

    /// Set an absolute scale, clamped to `[MIN_SCALE, MAX_SCALE]`.
    pub fn set_scale(&mut self, scale: f64) {
        if scale.is_nan() {
            return;
        }
        self.transform.scale = clamp_scale(scale);
    }

    /// Back to 100% without moving the image.
    pub fn reset_zoom(&mut self) {
        self.transform.scale = 1.0;
    }

    /// Fit the whole image inside the viewport with 20% padding and center it.
    ///
    /// The resulting scale is still clamped, so very large images may overflow
    /// the viewport at `MIN_SCALE`. Empty sizes leave the transform untouched.
    pub fn zoom_to_fit(&mut self, image: Size, viewport: Size) {
        if image.is_empty() || viewport.is_empty() {
            return;
        }
        let scale_x = viewport.width / image.width;
        let scale_y = viewport.height / image.height;
        let center = viewport.center();
        self.transform = CanvasTransform {
            scale: clamp_scale(scale_x.min(scale_y) * FIT_PADDING),
            offset_x: center.x,
            offset_y: center.y,
        };
    }

    /// Scale 1 with the image centered on the viewport.
    pub fn reset(&mut self, viewport: Size) {
        let center = viewport.center();
        self.transform = CanvasTransform {
            scale: 1.0,
            offset_x: center.x,
            offset_y: center.y,
        };
    }

    /// Back to the identity transform used right after an image load.
    pub fn reset_to_identity(&mut self) {
        self.transform = CanvasTransform::identity();
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
