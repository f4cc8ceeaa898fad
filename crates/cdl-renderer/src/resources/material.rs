use crate::Color;

/// Flat-color unlit material used by debug visuals.
#[derive(Clone, Debug, PartialEq)]
pub struct BasicMaterial {
    pub color: Color,
}

impl BasicMaterial {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl Default for BasicMaterial {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
        }
    }
}
