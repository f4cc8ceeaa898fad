use std::ops::{Add, Mul, Neg, Sub};

/// An angle stored in radians, constructible from either unit.
///
/// Authored data carries angles in degrees while the trigonometry below wants
/// radians; this type keeps the conversion in one place.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Angle(f32);

impl Angle {
    pub fn from_radians(radians: f32) -> Self {
        Self(radians)
    }

    pub fn from_degrees(degrees: f32) -> Self {
        Self(degrees / 180.0 * std::f32::consts::PI)
    }

    pub fn radians(self) -> f32 {
        self.0
    }

    pub fn degrees(self) -> f32 {
        self.0 / std::f32::consts::PI * 180.0
    }

    pub fn sin(self) -> f32 {
        self.0.sin()
    }

    pub fn cos(self) -> f32 {
        self.0.cos()
    }
}

impl Add for Angle {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Angle {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Mul<f32> for Angle {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self(self.0 * rhs)
    }
}

impl Neg for Angle {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}
