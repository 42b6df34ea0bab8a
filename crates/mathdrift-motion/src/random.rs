//! Random sources used to seed a particle field.

use rand::{Rng, SeedableRng, rngs::StdRng};

/// Largest `f32` strictly below 1.0.
const MAX_UNIT: f32 = 1.0 - f32::EPSILON / 2.0;

/// A source of uniform samples in `[0, 1)`.
///
/// Any `FnMut() -> f32` closure is a source, so callers can inject a
/// scripted sequence without a wrapper type.
pub trait RandomSource {
    fn next_unit(&mut self) -> f32;
}

impl<F: FnMut() -> f32> RandomSource for F {
    fn next_unit(&mut self) -> f32 {
        self()
    }
}

/// Draw one sample, forcing it into `[0, 1)`.
///
/// NaN maps to 0.
pub(crate) fn sample<R: RandomSource + ?Sized>(source: &mut R) -> f32 {
    let u = source.next_unit();
    if u.is_nan() { 0.0 } else { u.clamp(0.0, MAX_UNIT) }
}

/// Adapter from any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

/// The generator used when the host does not inject one.
pub type DefaultSource = RngSource<StdRng>;

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    /// A reproducible source: equal seeds give equal fields.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f32 {
        self.rng.r#gen::<f32>()
    }
}

/// Replays a fixed list of samples, wrapping around at the end.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<f32>,
    next: usize,
}

impl SequenceSource {
    /// An empty list replays `0.0` forever.
    pub fn new(values: impl Into<Vec<f32>>) -> Self {
        Self {
            values: values.into(),
            next: 0,
        }
    }
}

impl RandomSource for SequenceSource {
    fn next_unit(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let u = self.values[self.next];
        self.next = (self.next + 1) % self.values.len();
        u
    }
}
