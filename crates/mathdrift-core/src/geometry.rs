//! Planar value types in pixel units.

use std::ops::{Add, Mul};

/// A 2D point or vector.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

/// The rectangular region particles are confined to.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Shrink both axes by `footprint`, saturating at zero.
    ///
    /// The result is the largest coordinate a glyph may occupy while its
    /// rendered extent stays inside the original bounds.
    pub fn inset(self, footprint: f32) -> Self {
        Self {
            width: (self.width - footprint).max(0.0),
            height: (self.height - footprint).max(0.0),
        }
    }

    /// Whether either axis has no extent.
    pub fn is_empty(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}
