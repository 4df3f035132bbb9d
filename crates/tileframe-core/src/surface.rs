//! Drawing surface backed by a `tiny_skia` pixmap.
//!
//! The surface exposes the handful of 2D primitives the editor needs:
//! filling with a solid color or gradient, antialiased rectangles, dashed
//! rectangle outlines and scaled image drawing. Everything composites with
//! source-over. Pixels are stored premultiplied and read back with straight
//! alpha.
//!
//! # Image drawing
//!
//! [`Surface::draw_image`] crops the source to the part that lands on the
//! surface and draws it with a scale/translate transform and bilinear
//! filtering. When the image is drawn smaller than its native size it is
//! first reduced with `image::imageops::resize`, so large downscales average
//! every source pixel instead of skipping most of them.

use image::imageops::FilterType;
use image::RgbaImage;
use thiserror::Error;
use tiny_skia::{
    ColorU8, FilterQuality, PathBuilder, Pixmap, PixmapPaint, PremultipliedColorU8, Shader,
    Stroke, StrokeDash, Transform,
};

use crate::color::Color;
use crate::decode::SourceImage;
use crate::geometry::{Point, Rect, Size};
use crate::gradient::GradientPaint;

/// Default cap on surface area: 64 megapixels.
pub const DEFAULT_MAX_SURFACE_PIXELS: u64 = 64 * 1024 * 1024;

/// Dash or gap lengths below this many pixels draw a solid outline.
pub const MIN_DASH_LENGTH: f64 = 0.5;

/// Errors produced when allocating a surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    /// Width or height is zero, or too large to address.
    #[error("Invalid surface dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// The pixel buffer would exceed the configured limit.
    #[error("Surface {width}x{height} exceeds the limit of {max_pixels} pixels")]
    TooLarge {
        width: u32,
        height: u32,
        max_pixels: u64,
    },
}

/// What to fill a surface with.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    Gradient(GradientPaint),
}

impl Paint {
    /// Antialiased rasterizer paint for this fill.
    fn to_skia(&self) -> tiny_skia::Paint<'static> {
        let shader = match self {
            Paint::Solid(color) => Shader::SolidColor(color.to_skia()),
            Paint::Gradient(gradient) => gradient.shader(),
        };
        tiny_skia::Paint {
            shader,
            anti_alias: true,
            ..tiny_skia::Paint::default()
        }
    }
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Paint::Solid(color)
    }
}

impl From<GradientPaint> for Paint {
    fn from(gradient: GradientPaint) -> Self {
        Paint::Gradient(gradient)
    }
}

/// Fixed-size RGBA pixel buffer, initially fully transparent.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    pixmap: Pixmap,
}

impl Surface {
    /// Allocate a transparent surface, capped at [`DEFAULT_MAX_SURFACE_PIXELS`].
    pub fn new(width: u32, height: u32) -> Result<Self, SurfaceError> {
        Self::with_limit(width, height, DEFAULT_MAX_SURFACE_PIXELS)
    }

    /// Allocate a transparent surface of at most `max_pixels` pixels.
    pub fn with_limit(width: u32, height: u32, max_pixels: u64) -> Result<Self, SurfaceError> {
        if width == 0 || height == 0 {
            return Err(SurfaceError::InvalidDimensions { width, height });
        }
        if (width as u64) * (height as u64) > max_pixels {
            return Err(SurfaceError::TooLarge {
                width,
                height,
                max_pixels,
            });
        }
        let pixmap =
            Pixmap::new(width, height).ok_or(SurfaceError::InvalidDimensions { width, height })?;
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn size(&self) -> Size {
        Size::from((self.width(), self.height()))
    }

    fn bounds(&self) -> Rect {
        Rect::from_origin_size(Point::default(), self.size())
    }

    /// Straight-alpha pixel at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.pixmap.pixel(x, y).map(straight)
    }

    /// Straight-alpha RGBA bytes in row-major order.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixmap.pixels().iter().flat_map(|&px| straight(px)).collect()
    }

    /// Reset every pixel to transparent black.
    pub fn clear(&mut self) {
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
    }

    /// Composite `paint` over the whole surface.
    pub fn fill(&mut self, paint: &Paint) {
        self.fill_area(self.bounds(), paint);
    }

    /// Composite a solid rectangle. Pixels partially covered by the
    /// rectangle are blended in proportion to the covered area.
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.fill_area(rect, &Paint::Solid(color));
    }

    fn fill_area(&mut self, rect: Rect, paint: &Paint) {
        let Some(rect) = rect.to_skia() else {
            return;
        };
        self.pixmap
            .fill_rect(rect, &paint.to_skia(), Transform::identity(), None);
    }

    /// Stroke the outline of `rect` with a dash pattern.
    ///
    /// The stroke is centered on the rectangle edge. Dashes run clockwise
    /// from the top-left corner, `dash` being the `(on, off)` lengths in
    /// pixels. Lengths that are not finite or shorter than
    /// [`MIN_DASH_LENGTH`] draw a solid outline.
    pub fn stroke_dashed_rect(&mut self, rect: Rect, color: Color, line_width: f64, dash: (f64, f64)) {
        if !line_width.is_finite() || line_width <= 0.0 {
            return;
        }
        let Some(bounds) = rect.to_skia() else {
            return;
        };
        let path = PathBuilder::from_rect(bounds);
        let stroke = Stroke {
            width: line_width as f32,
            dash: dash_pattern(dash),
            ..Stroke::default()
        };
        self.pixmap.stroke_path(
            &path,
            &Paint::Solid(color).to_skia(),
            &stroke,
            Transform::identity(),
            None,
        );
    }

    /// Draw `image` scaled into `dest`, clipped to the surface.
    pub fn draw_image(&mut self, image: &SourceImage, dest: Rect) {
        if dest.is_empty() || image.is_empty() {
            return;
        }
        let Some(visible) = dest.intersection(&self.bounds()) else {
            return;
        };
        let Some(view) = image.view() else {
            return;
        };
        let Some(((x, y, w, h), window_dest)) =
            source_window((image.width, image.height), dest, visible)
        else {
            return;
        };

        let window = RgbaImage::from_fn(w, h, |px, py| *view.get_pixel(x + px, y + py));
        let window = reduce_for_drawing(window, window_dest.size());
        let Some(source) = premultiplied_pixmap(&window) else {
            return;
        };

        let transform = Transform::from_row(
            (window_dest.width / source.width() as f64) as f32,
            0.0,
            0.0,
            (window_dest.height / source.height() as f64) as f32,
            window_dest.x as f32,
            window_dest.y as f32,
        );
        let paint = PixmapPaint {
            quality: FilterQuality::Bilinear,
            ..PixmapPaint::default()
        };
        self.pixmap
            .draw_pixmap(0, 0, source.as_ref(), &paint, transform, None);
    }
}

#[inline]
fn straight(px: PremultipliedColorU8) -> [u8; 4] {
    let c = px.demultiply();
    [c.red(), c.green(), c.blue(), c.alpha()]
}

fn dash_pattern((on, off): (f64, f64)) -> Option<StrokeDash> {
    let usable = |len: f64| len.is_finite() && len >= MIN_DASH_LENGTH;
    if !(usable(on) && usable(off)) {
        return None;
    }
    StrokeDash::new(vec![on as f32, off as f32], 0.0)
}

/// Source pixels `(x, y, width, height)` that land inside `visible` when the
/// whole source is drawn into `dest`, padded by one pixel for filtering, and
/// the rectangle that window occupies on the surface.
fn source_window(
    (width, height): (u32, u32),
    dest: Rect,
    visible: Rect,
) -> Option<((u32, u32, u32, u32), Rect)> {
    let sx = width as f64 / dest.width;
    let sy = height as f64 / dest.height;
    let x0 = ((visible.x - dest.x) * sx - 1.0).floor().clamp(0.0, width as f64) as u32;
    let y0 = ((visible.y - dest.y) * sy - 1.0).floor().clamp(0.0, height as f64) as u32;
    let x1 = ((visible.right() - dest.x) * sx + 1.0).ceil().clamp(0.0, width as f64) as u32;
    let y1 = ((visible.bottom() - dest.y) * sy + 1.0).ceil().clamp(0.0, height as f64) as u32;
    if x1 <= x0 || y1 <= y0 {
        return None;
    }

    let window_dest = Rect::new(
        dest.x + x0 as f64 / sx,
        dest.y + y0 as f64 / sy,
        (x1 - x0) as f64 / sx,
        (y1 - y0) as f64 / sy,
    );
    Some(((x0, y0, x1 - x0, y1 - y0), window_dest))
}

/// Shrink an image that will be drawn smaller than its native size.
fn reduce_for_drawing(source: RgbaImage, dest: Size) -> RgbaImage {
    let (w, h) = source.dimensions();
    let target_w = (dest.width.round() as u32).clamp(1, w);
    let target_h = (dest.height.round() as u32).clamp(1, h);
    if target_w == w && target_h == h {
        return source;
    }
    tracing::trace!(from_w = w, from_h = h, target_w, target_h, "pre-reducing image");
    image::imageops::resize(&source, target_w, target_h, FilterType::Triangle)
}

/// Copy straight-alpha RGBA into a premultiplied pixmap.
fn premultiplied_pixmap(image: &RgbaImage) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(image.width(), image.height())?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(image.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Some(pixmap)
}
