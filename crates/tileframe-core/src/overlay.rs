//! Frame preview overlay for the viewport.
//!
//! The overlay shows where the selected frame sits on screen: a dimmed mask
//! over everything outside the frame and a dashed outline around it. It is a
//! preview aid only. Export recomputes its own placement and never reads the
//! overlay geometry or the view transform.

use crate::color::Color;
use crate::frame::FrameSize;
use crate::geometry::{Rect, Size};
use crate::surface::Surface;

/// Fraction of the viewport an oversized frame shrinks to.
pub const OVERSIZE_PADDING: f64 = 0.9;

/// Mask color outside the frame: black at 30% opacity.
pub const MASK_COLOR: Color = Color::rgba(0.0, 0.0, 0.0, 0.3);

/// Outline color, `#3b82f6`.
pub const BORDER_COLOR: Color = Color::rgba(59.0 / 255.0, 130.0 / 255.0, 246.0 / 255.0, 1.0);

pub const BORDER_WIDTH: f64 = 2.0;

/// Outline dash pattern as `(on, off)` lengths in pixels.
pub const BORDER_DASH: (f64, f64) = (5.0, 5.0);

/// Overlay geometry for one frame in one viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameOverlay {
    /// Frame rectangle as displayed, centered in the viewport
    pub frame_rect: Rect,
    /// Preview scale: 1.0 unless the frame is larger than the viewport
    pub scale: f64,
    /// Top, bottom, left and right mask bands
    pub mask: [Rect; 4],
}

impl FrameOverlay {
    /// Place `frame` in a viewport of the given size.
    ///
    /// Frames that fit are shown 1:1. Frames wider or taller than the
    /// viewport shrink uniformly to 90% of the limiting dimension.
    pub fn compute(frame: &FrameSize, viewport: Size) -> Self {
        let frame_size = frame.size();
        let scale = if frame_size.width > viewport.width || frame_size.height > viewport.height {
            (viewport.width / frame_size.width).min(viewport.height / frame_size.height)
                * OVERSIZE_PADDING
        } else {
            1.0
        };

        let display = frame_size.scaled(scale);
        let x = (viewport.width - display.width) / 2.0;
        let y = (viewport.height - display.height) / 2.0;
        let frame_rect = Rect::new(x, y, display.width, display.height);

        let bottom = frame_rect.bottom();
        let right = frame_rect.right();
        let mask = [
            Rect::new(0.0, 0.0, viewport.width, y),
            Rect::new(0.0, bottom, viewport.width, viewport.height - bottom),
            Rect::new(0.0, y, x, display.height),
            Rect::new(right, y, viewport.width - right, display.height),
        ];

        Self {
            frame_rect,
            scale,
            mask,
        }
    }

    /// Preview scale applied to the frame.
    pub fn display_scale(&self) -> f64 {
        self.scale
    }

    /// Paint the mask bands, then the dashed outline on top.
    pub fn render(&self, surface: &mut Surface) {
        for band in &self.mask {
            surface.fill_rect(*band, MASK_COLOR);
        }
        surface.stroke_dashed_rect(self.frame_rect, BORDER_COLOR, BORDER_WIDTH, BORDER_DASH);
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: the displayed frame always fits and is centered.
        #[test]
        fn prop_frame_fits_and_is_centered(
            fw in 1u32..4000,
            fh in 1u32..4000,
            vw in 100u32..2000,
            vh in 100u32..2000,
        ) {
            let viewport = Size::from((vw, vh));
            let overlay = FrameOverlay::compute(&FrameSize::new("f", "F", fw, fh, ""), viewport);
            let r = overlay.frame_rect;

            prop_assert!(r.width <= viewport.width + 1e-9);
            prop_assert!(r.height <= viewport.height + 1e-9);
            prop_assert!((r.center().x - viewport.width / 2.0).abs() < 1e-6);
            prop_assert!((r.center().y - viewport.height / 2.0).abs() < 1e-6);

            // Aspect ratio preserved
            let ratio = fw as f64 / fh as f64;
            prop_assert!((r.width / r.height - ratio).abs() < 1e-6 * ratio.max(1.0));
        }
    }
}
