//! Particle field creation and the per-tick motion step.

use std::ops::Range;

use mathdrift_core::{Bounds, GlyphSet, Vec2};

use crate::random::{RandomSource, sample};

/// Tunables fixed for a field's lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionConfig {
    /// Per-particle speed, in pixels per tick, is drawn from this range.
    pub speed_range: Range<f32>,
    /// Margin reserved on the far edge of each axis for the glyph's extent.
    pub footprint: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            speed_range: 0.2..0.5,
            footprint: 50.0,
        }
    }
}

/// One floating glyph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    glyph: char,
    position: Vec2,
    direction: Vec2,
    speed: f32,
}

impl Particle {
    pub fn new(glyph: char, position: Vec2, direction: Vec2, speed: f32) -> Self {
        Self {
            glyph,
            position,
            direction,
            speed,
        }
    }

    pub fn glyph(&self) -> char {
        self.glyph
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Unit-scale heading; components lie in `[-1, 1]`.
    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Move one tick and reflect off the `limits` box.
    fn advanced(&self, limits: Bounds) -> Self {
        let candidate = self.position + self.direction * self.speed;
        let (x, dx) = reflect(candidate.x, self.direction.x, limits.width);
        let (y, dy) = reflect(candidate.y, self.direction.y, limits.height);
        Self {
            position: Vec2::new(x, y),
            direction: Vec2::new(dx, dy),
            ..*self
        }
    }
}

/// Reflect one axis: touching either wall flips the heading and clamps.
fn reflect(value: f32, direction: f32, limit: f32) -> (f32, f32) {
    if value <= 0.0 || value >= limit {
        (value.clamp(0.0, limit), -direction)
    } else {
        (value, direction)
    }
}

/// A snapshot of every particle plus the limits they were confined to.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleField {
    particles: Vec<Particle>,
    footprint: f32,
    limits: Bounds,
}

impl ParticleField {
    /// Wrap existing particles, e.g. to force exact starting states.
    ///
    /// Positions are taken as given; they are confined from the first
    /// [`step`](Self::step) on.
    pub fn from_particles(particles: Vec<Particle>, bounds: Bounds, footprint: f32) -> Self {
        let footprint = footprint.max(0.0);
        Self {
            particles,
            footprint,
            limits: bounds.inset(footprint),
        }
    }

    /// Advance every particle by one tick against the current `bounds`.
    ///
    /// `self` is left untouched; the next snapshot is returned.
    pub fn step(&self, bounds: Bounds) -> Self {
        let limits = bounds.inset(self.footprint);
        Self {
            particles: self.particles.iter().map(|p| p.advanced(limits)).collect(),
            footprint: self.footprint,
            limits,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// `(glyph, position)` pairs in render order.
    pub fn iter(&self) -> impl Iterator<Item = (char, Vec2)> + '_ {
        self.particles.iter().map(|p| (p.glyph, p.position))
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn footprint(&self) -> f32 {
        self.footprint
    }

    /// Largest coordinate on each axis as of the last step (or creation).
    pub fn limits(&self) -> Bounds {
        self.limits
    }
}

/// Seed a field with `count` particles scattered over `bounds`.
///
/// Draw order per particle is x, y, glyph, speed, heading x, heading y,
/// so a scripted source maps onto particles predictably.
pub fn create_field<R: RandomSource + ?Sized>(
    count: usize,
    bounds: Bounds,
    glyphs: &GlyphSet,
    config: &MotionConfig,
    rng: &mut R,
) -> ParticleField {
    let (start, end) = (config.speed_range.start, config.speed_range.end);
    let particles = (0..count)
        .map(|_| {
            let x = below(sample(rng) * bounds.width.max(0.0), bounds.width);
            let y = below(sample(rng) * bounds.height.max(0.0), bounds.height);
            let glyph = glyphs.pick(sample(rng));
            let speed = below(start + sample(rng) * (end - start), end).max(start);
            let dx = sample(rng) * 2.0 - 1.0;
            let dy = sample(rng) * 2.0 - 1.0;
            Particle::new(glyph, Vec2::new(x, y), Vec2::new(dx, dy), speed)
        })
        .collect::<Vec<_>>();

    tracing::debug!(
        count,
        width = bounds.width,
        height = bounds.height,
        footprint = config.footprint,
        "created particle field"
    );

    ParticleField::from_particles(particles, bounds, config.footprint)
}

/// Keep a scaled sample inside a half-open range ending at `end`.
///
/// `u * end` can round up to `end` in `f32` when `u` is just below 1.
fn below(value: f32, end: f32) -> f32 {
    if value >= end && end > 0.0 {
        end.next_down()
    } else {
        value
    }
}

/// Free-function form of [`ParticleField::step`].
pub fn step(field: &ParticleField, bounds: Bounds) -> ParticleField {
    field.step(bounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{RngSource, SequenceSource};

    const EPS: f32 = 1e-4;

    fn seeded_field(count: usize, bounds: Bounds, seed: u64) -> ParticleField {
        create_field(
            count,
            bounds,
            &GlyphSet::math(),
            &MotionConfig::default(),
            &mut RngSource::seeded(seed),
        )
    }

    fn assert_contained(field: &ParticleField, bounds: Bounds) {
        let limits = bounds.inset(field.footprint());
        for p in field.particles() {
            let pos = p.position();
            assert!(
                (0.0..=limits.width).contains(&pos.x),
                "x {} outside [0, {}]",
                pos.x,
                limits.width
            );
            assert!(
                (0.0..=limits.height).contains(&pos.y),
                "y {} outside [0, {}]",
                pos.y,
                limits.height
            );
        }
    }

    #[test]
    fn test_create_field_draws_in_range() {
        let bounds = Bounds::new(1920.0, 1080.0);
        let field = seeded_field(200, bounds, 7);
        assert_eq!(field.len(), 200);
        for p in field.particles() {
            assert!((0.0..bounds.width).contains(&p.position().x));
            assert!((0.0..bounds.height).contains(&p.position().y));
            assert!((0.2..0.5).contains(&p.speed()));
            assert!((-1.0..1.0).contains(&p.direction().x));
            assert!((-1.0..1.0).contains(&p.direction().y));
            assert!(GlyphSet::math().as_slice().contains(&p.glyph()));
        }
    }

    #[test]
    fn test_create_field_draw_order() {
        let mut source = SequenceSource::new(vec![0.5, 0.25, 0.0, 0.5, 1.0 - 1e-6, 0.0]);
        let field = create_field(
            1,
            Bounds::new(100.0, 40.0),
            &GlyphSet::math(),
            &MotionConfig::default(),
            &mut source,
        );
        let p = field.particles()[0];
        assert_eq!(p.position(), Vec2::new(50.0, 10.0));
        assert_eq!(p.glyph(), 'π');
        assert!((p.speed() - 0.35).abs() < EPS);
        assert!((p.direction().x - 1.0).abs() < EPS);
        assert_eq!(p.direction().y, -1.0);
    }

    #[test]
    fn test_largest_sample_stays_below_range_end() {
        let config = MotionConfig::default();
        let bounds = Bounds::new(1920.0, 1080.0);
        let mut source = || 1.0 - f32::EPSILON / 2.0;
        let field = create_field(4, bounds, &GlyphSet::math(), &config, &mut source);
        for p in field.particles() {
            assert!(p.speed() < config.speed_range.end, "speed {}", p.speed());
            assert!(p.speed() >= config.speed_range.start);
            assert!(p.position().x < bounds.width, "x {}", p.position().x);
            assert!(p.position().y < bounds.height, "y {}", p.position().y);
            assert!(p.direction().x < 1.0 && p.direction().y < 1.0);
            assert_eq!(p.glyph(), '∫');
        }
    }

    #[test]
    fn test_boundary_containment() {
        let mut resize = RngSource::seeded(99);
        for (seed, count) in [(1, 0), (2, 1), (3, 15), (4, 120)] {
            let mut bounds = Bounds::new(800.0, 600.0);
            let mut field = seeded_field(count, bounds, seed);
            for tick in 0..5_000 {
                // Resize now and then, including down to nothing
                if tick % 500 == 499 {
                    bounds = Bounds::new(
                        resize.next_unit() * 1000.0,
                        resize.next_unit() * 1000.0,
                    );
                }
                field = field.step(bounds);
                assert_contained(&field, bounds);
            }
        }
    }

    #[test]
    fn test_reflection_at_far_edge() {
        let bounds = Bounds::new(200.0, 200.0);
        let field = ParticleField::from_particles(
            vec![Particle::new('π', Vec2::new(150.0, 75.0), Vec2::new(1.0, 0.0), 0.3)],
            bounds,
            50.0,
        );
        let next = field.step(bounds);
        let p = next.particles()[0];
        assert_eq!(p.position(), Vec2::new(150.0, 75.0));
        assert_eq!(p.direction().x, -1.0);
        assert_eq!(p.direction().y, 0.0);
    }

    #[test]
    fn test_reflection_at_origin_edge() {
        let bounds = Bounds::new(200.0, 200.0);
        let field = ParticleField::from_particles(
            vec![Particle::new('∫', Vec2::new(0.1, 60.0), Vec2::new(-1.0, 0.5), 0.3)],
            bounds,
            50.0,
        );
        let p = field.step(bounds).particles()[0];
        assert_eq!(p.position().x, 0.0);
        assert_eq!(p.direction().x, 1.0);
        assert!((p.position().y - 60.15).abs() < EPS);
        assert_eq!(p.direction().y, 0.5);
    }

    #[test]
    fn test_free_move_without_footprint() {
        let bounds = Bounds::new(100.0, 100.0);
        let field = ParticleField::from_particles(
            vec![Particle::new('π', Vec2::new(90.0, 50.0), Vec2::new(1.0, 0.0), 0.3)],
            bounds,
            0.0,
        );
        let p = step(&field, bounds).particles()[0];
        assert!((p.position().x - 90.3).abs() < EPS);
        assert_eq!(p.position().y, 50.0);
        assert_eq!(p.direction(), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_step_is_pure() {
        let bounds = Bounds::new(640.0, 480.0);
        let field = seeded_field(10, bounds, 3);
        let before = field.clone();
        let a = field.step(bounds);
        let b = field.step(bounds);
        assert_eq!(field, before);
        assert_eq!(a, b);
    }

    #[test]
    fn test_determinism_given_seed() {
        let bounds = Bounds::new(1280.0, 720.0);
        let mut a = seeded_field(15, bounds, 2024);
        let mut b = seeded_field(15, bounds, 2024);
        for _ in 0..1_000 {
            a = a.step(bounds);
            b = b.step(bounds);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_speed_glyph_and_count_invariant() {
        let bounds = Bounds::new(300.0, 200.0);
        let start = seeded_field(25, bounds, 11);
        let mut field = start.clone();
        for _ in 0..2_000 {
            field = field.step(bounds);
            assert_eq!(field.len(), start.len());
        }
        for (before, after) in start.particles().iter().zip(field.particles()) {
            assert_eq!(before.speed(), after.speed());
            assert_eq!(before.glyph(), after.glyph());
            assert_eq!(before.direction().x.abs(), after.direction().x.abs());
            assert_eq!(before.direction().y.abs(), after.direction().y.abs());
        }
    }

    #[test]
    fn test_empty_field() {
        let bounds = Bounds::new(100.0, 100.0);
        let field = seeded_field(0, bounds, 5);
        assert!(field.is_empty());
        assert!(field.step(bounds).is_empty());
    }

    #[test]
    fn test_zero_bounds_pin_to_origin() {
        let bounds = Bounds::new(500.0, 500.0);
        let mut field = seeded_field(8, bounds, 6);
        for _ in 0..3 {
            field = field.step(Bounds::new(0.0, 0.0));
            for (_, pos) in field.iter() {
                assert_eq!(pos, Vec2::ZERO);
            }
        }
        assert_eq!(field.limits(), Bounds::new(0.0, 0.0));
    }
}
