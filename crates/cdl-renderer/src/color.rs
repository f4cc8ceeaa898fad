//! A module providing Color type definition

use serde::{Deserialize, Serialize};

/// An RGBA color with floating point channels in the `[0.0, 1.0]` range.
#[derive(Clone, Debug, PartialEq, Copy, Serialize, Deserialize)]
pub struct Color {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
    /// Alpha channel
    pub a: f32,
}

impl Color {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    pub const RED: Self = Self::new(1.0, 0.0, 0.0, 1.0);
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0, 1.0);
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0, 1.0);
    pub const YELLOW: Self = Self::new(1.0, 1.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<(f32, f32, f32)> for Color {
    fn from(val: (f32, f32, f32)) -> Self {
        Self {
            r: val.0,
            g: val.1,
            b: val.2,
            a: 1.0,
        }
    }
}

impl From<(f32, f32, f32, f32)> for Color {
    fn from(val: (f32, f32, f32, f32)) -> Self {
        Self {
            r: val.0,
            g: val.1,
            b: val.2,
            a: val.3,
        }
    }
}

impl From<[f32; 3]> for Color {
    fn from(val: [f32; 3]) -> Self {
        Self {
            r: val[0],
            g: val[1],
            b: val[2],
            a: 1.0,
        }
    }
}

impl From<Color> for [f32; 4] {
    fn from(val: Color) -> Self {
        [val.r, val.g, val.b, val.a]
    }
}

#[cfg(test)]
mod tests {
    use super::Color;

    #[test]
    fn conversions_fill_alpha() {
        assert_eq!(Color::from([1.0, 0.0, 0.0]), Color::RED);
        assert_eq!(Color::from((0.0, 1.0, 0.0)), Color::GREEN);
        assert_eq!(<[f32; 4]>::from(Color::YELLOW), [1.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn default_is_white() {
        assert_eq!(Color::default(), Color::WHITE);
    }
}
