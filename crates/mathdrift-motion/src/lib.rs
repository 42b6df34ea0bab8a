//! Motion engine for floating decorative glyphs.
//!
//! A [`ParticleField`] holds a fixed number of glyphs drifting in straight
//! lines and reflecting off the edges of a rectangular viewport. The engine
//! knows nothing about rendering or timing: a host seeds a field with
//! [`create_field`], calls [`step`] on whatever cadence it likes, and draws
//! the `(glyph, position)` pairs it gets back.

mod field;
mod random;

pub use field::{MotionConfig, Particle, ParticleField, create_field, step};
pub use random::{DefaultSource, RandomSource, RngSource, SequenceSource};
