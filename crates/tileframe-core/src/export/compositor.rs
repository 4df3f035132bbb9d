//! Frame compositing: background, then the image fitted inside the frame.

use super::{encode_rgba, ExportOptions, ExportedImage};
use crate::color::Color;
use crate::decode::SourceImage;
use crate::error::{ConfigurationError, ExportError};
use crate::frame::FrameSize;
use crate::geometry::{Point, Rect, Size};
use crate::gradient::{GradientPaint, GradientSpec};
use crate::surface::{Paint, Surface, DEFAULT_MAX_SURFACE_PIXELS};

/// Where the image lands inside the frame: the largest uniform scale that
/// fits entirely, centered. May upscale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitPlacement {
    pub scale: f64,
    /// Drawn image size in frame pixels
    pub size: Size,
    /// Top-left corner of the drawn image
    pub offset: Point,
}

impl FitPlacement {
    pub fn compute(image: Size, frame: Size) -> Self {
        let scale = (frame.width / image.width).min(frame.height / image.height);
        let size = image.scaled(scale);
        let offset = Point::new(
            (frame.width - size.width) / 2.0,
            (frame.height - size.height) / 2.0,
        );
        Self {
            scale,
            size,
            offset,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.offset, self.size)
    }
}

/// Resolve the frame background: the gradient if set, else the solid color,
/// else opaque white.
pub fn background_paint(
    gradient: Option<&GradientSpec>,
    color: Option<&str>,
    frame: Size,
) -> Result<Paint, ConfigurationError> {
    if let Some(spec) = gradient {
        return Ok(Paint::Gradient(GradientPaint::build(spec, frame)?));
    }
    match color {
        Some(hex) => Ok(Paint::Solid(Color::from_hex(hex)?)),
        None => Ok(Paint::Solid(Color::WHITE)),
    }
}

/// Compose `image` onto a `frame`-sized surface over `gradient` (white when
/// `None`). A pure function of its inputs.
pub fn compose_frame(
    image: &SourceImage,
    frame: &FrameSize,
    gradient: Option<&GradientSpec>,
) -> Result<Surface, ExportError> {
    let background = background_paint(gradient, None, frame.size())?;
    compose(image, frame, &background, DEFAULT_MAX_SURFACE_PIXELS)
}

fn compose(
    image: &SourceImage,
    frame: &FrameSize,
    background: &Paint,
    max_pixels: u64,
) -> Result<Surface, ExportError> {
    let mut surface = Surface::with_limit(frame.width, frame.height, max_pixels)?;
    surface.fill(background);

    let placement = FitPlacement::compute(image.original_size(), frame.size());
    tracing::debug!(
        frame = %frame.id,
        scale = placement.scale,
        x = placement.offset.x,
        y = placement.offset.y,
        "composing frame"
    );
    surface.draw_image(image, placement.rect());
    Ok(surface)
}

/// Render and encode `image` at the exact size of `frame`.
pub fn export_frame(
    image: &SourceImage,
    frame: &FrameSize,
    options: &ExportOptions,
) -> Result<ExportedImage, ExportError> {
    let background = background_paint(
        options.gradient.as_ref(),
        options.background_color.as_deref(),
        frame.size(),
    )?;
    let surface = compose(image, frame, &background, options.max_surface_pixels)?;
    let exported = encode_surface(&surface, options)?;
    tracing::info!(
        frame = %frame.id,
        format = %options.format,
        bytes = exported.bytes.len(),
        "exported frame"
    );
    Ok(exported)
}

/// Encode the current viewport surface as-is.
pub fn export_viewport(
    surface: &Surface,
    options: &ExportOptions,
) -> Result<ExportedImage, ExportError> {
    let exported = encode_surface(surface, options)?;
    tracing::info!(
        width = exported.width,
        height = exported.height,
        format = %options.format,
        bytes = exported.bytes.len(),
        "exported viewport"
    );
    Ok(exported)
}

fn encode_surface(surface: &Surface, options: &ExportOptions) -> Result<ExportedImage, ExportError> {
    let bytes = encode_rgba(
        &surface.to_rgba_bytes(),
        surface.width(),
        surface.height(),
        options.format,
        options.quality,
    )?;
    Ok(ExportedImage {
        bytes,
        mime_type: options.format.mime_type(),
        suggested_filename: options.filename.clone(),
        width: surface.width(),
        height: surface.height(),
    })
}


// ============================================================================
// Property-Based Tests
// ============================================================================
