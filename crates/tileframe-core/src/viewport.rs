//! Viewport compositor: redraws the on-screen preview from scratch.

use crate::decode::SourceImage;
use crate::frame::FrameSize;
use crate::geometry::CanvasTransform;
use crate::overlay::FrameOverlay;
use crate::surface::Surface;

/// Redraw the viewport.
///
/// Clears the surface, draws the image at its native size centered on the
/// transform origin (translate, then scale), and draws the frame overlay on
/// top when a frame is selected. Holds no state: the same inputs always
/// produce the same pixels.
///
/// Without an image (none loaded, or still decoding) the surface is only
/// cleared. The overlay is not drawn either, since there is nothing to align.
pub fn render_viewport(
    surface: &mut Surface,
    image: Option<&SourceImage>,
    transform: &CanvasTransform,
    frame: Option<&FrameSize>,
) {
    surface.clear();

    let Some(image) = image else {
        return;
    };

    surface.draw_image(image, transform.image_rect(image.original_size()));

    if let Some(frame) = frame {
        FrameOverlay::compute(frame, surface.size()).render(surface);
    }
}
