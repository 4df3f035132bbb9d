//! Plain geometric value types shared by the editor.
//!
//! # Coordinate System
//!
//! - Viewport and frame coordinates are in pixels, origin at the top-left
//! - Image-local coordinates are centered on the image's own middle, so the
//!   image spans `-w/2..w/2` horizontally and `-h/2..h/2` vertically

use serde::{Deserialize, Serialize};

/// Smallest allowed view scale (10%).
pub const MIN_SCALE: f64 = 0.1;

/// Largest allowed view scale (500%).
pub const MAX_SCALE: f64 = 5.0;

/// Clamp a scale value into `[MIN_SCALE, MAX_SCALE]`.
#[inline]
pub fn clamp_scale(scale: f64) -> f64 {
    scale.clamp(MIN_SCALE, MAX_SCALE)
}

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True if either dimension is zero, negative or not finite.
    pub fn is_empty(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }

    /// Multiply both dimensions by `factor`.
    pub fn scaled(&self, factor: f64) -> Size {
        Size::new(self.width * factor, self.height * factor)
    }

    /// Center point of a rectangle of this size anchored at the origin.
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

impl From<(u32, u32)> for Size {
    fn from((width, height): (u32, u32)) -> Self {
        Size::new(width as f64, height as f64)
    }
}

/// A point in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<Point> for tiny_skia::Point {
    fn from(p: Point) -> Self {
        tiny_skia::Point::from_xy(p.x as f32, p.y as f32)
    }
}

/// Axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle of `size` with its top-left corner at `origin`.
    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// True if the rectangle covers no area.
    pub fn is_empty(&self) -> bool {
        self.size().is_empty()
    }

    /// True if the two rectangles share some area.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// True if `point` lies inside the rectangle (right/bottom edges exclusive).
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Shared area of the two rectangles, if any.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        if !self.intersects(other) {
            return None;
        }
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        Some(Rect::new(
            x,
            y,
            self.right().min(other.right()) - x,
            self.bottom().min(other.bottom()) - y,
        ))
    }

    /// Single-precision rectangle for the rasterizer. `None` when the
    /// rectangle is empty or not finite.
    pub fn to_skia(&self) -> Option<tiny_skia::Rect> {
        if self.is_empty() {
            return None;
        }
        tiny_skia::Rect::from_xywh(self.x as f32, self.y as f32, self.width as f32, self.height as f32)
    }
}

/// Pan/zoom state mapping image-centered local space to viewport pixels.
///
/// A local point `(lx, ly)` maps to `(offset_x + scale * lx, offset_y + scale * ly)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasTransform {
    /// Uniform zoom factor, always within `[MIN_SCALE, MAX_SCALE]`
    pub scale: f64,
    /// Viewport X coordinate of the image center
    pub offset_x: f64,
    /// Viewport Y coordinate of the image center
    pub offset_y: f64,
}

impl Default for CanvasTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl CanvasTransform {
    /// Scale 1 with the image centered on the viewport origin.
    pub fn identity() -> Self {
        Self {
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }

    pub fn new(scale: f64, offset_x: f64, offset_y: f64) -> Self {
        Self {
            scale: clamp_scale(scale),
            offset_x,
            offset_y,
        }
    }

    /// Map an image-local point into viewport space.
    pub fn map_point(&self, local: Point) -> Point {
        Point::new(
            self.offset_x + self.scale * local.x,
            self.offset_y + self.scale * local.y,
        )
    }

    /// Map a viewport point back into image-local space.
    pub fn unmap_point(&self, viewport: Point) -> Point {
        Point::new(
            (viewport.x - self.offset_x) / self.scale,
            (viewport.y - self.offset_y) / self.scale,
        )
    }

    /// Viewport rectangle covered by an image of `image_size` under this transform.
    pub fn image_rect(&self, image_size: Size) -> Rect {
        let displayed = image_size.scaled(self.scale);
        Rect::new(
            self.offset_x - displayed.width / 2.0,
            self.offset_y - displayed.height / 2.0,
            displayed.width,
            displayed.height,
        )
    }
}
