//! Resolve a gradient spec into a paint for a concrete pixel size.
//!
//! ## Geometry
//!
//! - **Linear**: the axis passes through the target center at `angle`. Its
//!   half-length is half the target diagonal, so the gradient reaches every
//!   corner whatever the angle.
//! - **Radial**: centered on the target, radius is half the shorter side.
//!
//! Shading is delegated to `tiny_skia` gradient shaders with pad spread, so
//! outside the `[0, 1]` range the end colors extend like a canvas gradient.

use tiny_skia::{LinearGradient, RadialGradient, Shader, SpreadMode, Transform};

use super::spec::{check_stop_count, GradientKind, GradientSpec};
use crate::color::Color;
use crate::error::ConfigurationError;
use crate::geometry::{Point, Size};

/// A stop resolved to a parsed color and a fractional offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    /// Offset along the gradient, 0.0 to 1.0
    pub offset: f64,
    pub color: Color,
}

/// Gradient geometry in target pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GradientGeometry {
    Linear { start: Point, end: Point },
    Radial { center: Point, radius: f64 },
}

/// A gradient resolved against a target size, ready to shade.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientPaint {
    pub geometry: GradientGeometry,
    /// Sorted by ascending offset
    pub stops: Vec<ColorStop>,
}

impl GradientPaint {
    /// Build the paint for a `target` of the given pixel size.
    ///
    /// # Errors
    ///
    /// - `ConfigurationError::TooFewStops` if `spec` has fewer than 2 stops
    /// - `ConfigurationError::TooManyStops` if `spec` has more than 4 stops
    /// - `ConfigurationError::InvalidColor` if a stop color does not parse
    pub fn build(spec: &GradientSpec, target: Size) -> Result<Self, ConfigurationError> {
        check_stop_count(spec.stops.len())?;

        let stops = spec
            .sorted_stops()
            .iter()
            .map(|stop| {
                Ok(ColorStop {
                    offset: (stop.position / 100.0).clamp(0.0, 1.0),
                    color: Color::from_hex(&stop.color)?,
                })
            })
            .collect::<Result<Vec<_>, ConfigurationError>>()?;

        let center = target.center();
        let geometry = match spec.kind {
            GradientKind::Linear => {
                let theta = spec.angle.to_radians();
                let half = (target.width * target.width + target.height * target.height).sqrt() / 2.0;
                let (dx, dy) = (theta.cos() * half, theta.sin() * half);
                GradientGeometry::Linear {
                    start: Point::new(center.x - dx, center.y - dy),
                    end: Point::new(center.x + dx, center.y + dy),
                }
            }
            GradientKind::Radial => GradientGeometry::Radial {
                center,
                radius: target.width.min(target.height) / 2.0,
            },
        };

        Ok(Self { geometry, stops })
    }

    /// Rasterizer shader for this gradient.
    ///
    /// Degenerate geometry (a zero-length axis or zero radius) shades every
    /// pixel with the last stop color.
    pub fn shader(&self) -> Shader<'static> {
        let stops: Vec<_> = self
            .stops
            .iter()
            .map(|stop| tiny_skia::GradientStop::new(stop.offset as f32, stop.color.to_skia()))
            .collect();

        let shader = match self.geometry {
            GradientGeometry::Linear { start, end } => LinearGradient::new(
                start.into(),
                end.into(),
                stops,
                SpreadMode::Pad,
                Transform::identity(),
            ),
            GradientGeometry::Radial { center, radius } => RadialGradient::new(
                center.into(),
                center.into(),
                radius as f32,
                stops,
                SpreadMode::Pad,
                Transform::identity(),
            ),
        };

        shader.unwrap_or_else(|| {
            let last = self.stops.last().map_or(Color::TRANSPARENT, |stop| stop.color);
            Shader::SolidColor(last.to_skia())
        })
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
