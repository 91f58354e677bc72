// src/color.rs

//! Packed 32-bit colors as stored in the pixel buffer.

use serde::{Deserialize, Serialize};

/// A color packed as `0xAARRGGBB`.
///
/// The plotter never looks inside a color; it writes the packed value verbatim
/// into the pixel buffer. The channel helpers exist for callers that build or
/// inspect colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Color = Color(0xFF00_0000);
    pub const WHITE: Color = Color(0xFFFF_FFFF);
    pub const RED: Color = Color(0xFFFF_0000);
    pub const GREEN: Color = Color(0xFF00_FF00);
    pub const BLUE: Color = Color(0xFF00_00FF);
    pub const TRANSPARENT: Color = Color(0);

    /// Default color used for drawing.
    pub const DEFAULT_FRONT: Color = Color::WHITE;
    /// Default color used to clear the buffer.
    pub const DEFAULT_CLEAR: Color = Color::BLACK;

    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Color(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// Opaque color from RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::from_argb(0xFF, r, g, b)
    }

    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    /// Perceived brightness in `0..=255`, ignoring alpha.
    pub fn luma(self) -> u8 {
        let luma = 0.299 * self.red() as f32
            + 0.587 * self.green() as f32
            + 0.114 * self.blue() as f32;
        luma.round().clamp(0.0, 255.0) as u8
    }
}

impl From<u32> for Color {
    fn from(packed: u32) -> Self {
        Color(packed)
    }
}

impl From<Color> for u32 {
    fn from(color: Color) -> Self {
        color.0
    }
}
