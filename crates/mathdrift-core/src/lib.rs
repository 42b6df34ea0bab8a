//! Core types shared by the mathdrift crates.

mod geometry;
mod glyphs;
mod theme;

pub use geometry::{Bounds, Vec2};
pub use glyphs::{GlyphSet, MATH_GLYPHS};
pub use theme::{AnimationSpeed, ColorTheme};
