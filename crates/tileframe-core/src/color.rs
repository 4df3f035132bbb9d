//! RGBA colors and CSS hex parsing.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while parsing a color string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// The string is not a `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa` hex color.
    #[error("Invalid hex color: {0:?}")]
    InvalidHex(String),
}

/// RGBA color with straight (non-premultiplied) f32 channels in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba8([r, g, b, 255])
    }

    pub fn from_rgba8(px: [u8; 4]) -> Self {
        Self::rgba(
            px[0] as f32 / 255.0,
            px[1] as f32 / 255.0,
            px[2] as f32 / 255.0,
            px[3] as f32 / 255.0,
        )
    }

    /// Parse a CSS hex color. The leading `#` is optional and digits are
    /// case-insensitive. Short forms expand each digit (`#abc` == `#aabbcc`).
    pub fn from_hex(input: &str) -> Result<Self, ColorError> {
        let invalid = || ColorError::InvalidHex(input.to_string());
        let hex = input.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let digit = |i: usize| u8::from_str_radix(&hex[i..=i], 16).map_err(|_| invalid());
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());

        let rgba = match hex.len() {
            3 | 4 => {
                let mut px = [255u8; 4];
                for (i, channel) in px.iter_mut().enumerate().take(hex.len()) {
                    *channel = digit(i)? * 17;
                }
                px
            }
            6 | 8 => {
                let mut px = [255u8; 4];
                for (i, channel) in px.iter_mut().enumerate().take(hex.len() / 2) {
                    *channel = byte(i * 2)?;
                }
                px
            }
            _ => return Err(invalid()),
        };

        Ok(Self::from_rgba8(rgba))
    }

    /// Convert to 8-bit RGBA, rounding each channel.
    pub fn to_rgba8(&self) -> [u8; 4] {
        [
            channel_to_u8(self.r),
            channel_to_u8(self.g),
            channel_to_u8(self.b),
            channel_to_u8(self.a),
        ]
    }

    /// Lowercase `#rrggbb` (or `#rrggbbaa` when not fully opaque).
    pub fn to_hex(&self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            format!("#{:02x}{:02x}{:02x}", r, g, b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", r, g, b, a)
        }
    }

    /// Same color with a different alpha.
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Single-precision color for the rasterizer, channels clamped to `[0, 1]`.
    pub fn to_skia(&self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
            self.a.clamp(0.0, 1.0),
        )
        .unwrap_or(tiny_skia::Color::TRANSPARENT)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl std::str::FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::from_hex(s)
    }
}

#[inline]
fn channel_to_u8(v: f32) -> u8 {
    (v * 255.0).clamp(0.0, 255.0).round() as u8
}
