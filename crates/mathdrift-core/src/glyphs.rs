//! Glyph sets for floating symbols.

/// The club's symbols, in the order they are drawn from.
pub const MATH_GLYPHS: &[char] = &['π', '∞', '√', 'Σ', '∫'];

/// A non-empty set of glyphs a particle may be drawn as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphSet {
    glyphs: Vec<char>,
}

impl GlyphSet {
    /// Build a glyph set, or `None` if `glyphs` yields nothing.
    pub fn new(glyphs: impl IntoIterator<Item = char>) -> Option<Self> {
        let glyphs: Vec<char> = glyphs.into_iter().collect();
        if glyphs.is_empty() {
            None
        } else {
            Some(Self { glyphs })
        }
    }

    /// The default set of math symbols.
    pub fn math() -> Self {
        Self {
            glyphs: MATH_GLYPHS.to_vec(),
        }
    }

    /// Build a glyph set from the non-whitespace characters of `s`.
    pub fn parse(s: &str) -> Option<Self> {
        Self::new(s.chars().filter(|c| !c.is_whitespace()))
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn as_slice(&self) -> &[char] {
        &self.glyphs
    }

    /// Pick the glyph for a unit-interval sample `u` in `[0, 1)`.
    pub fn pick(&self, u: f32) -> char {
        let idx = (u * self.glyphs.len() as f32) as usize;
        self.glyphs[idx.min(self.glyphs.len() - 1)]
    }
}

impl Default for GlyphSet {
    fn default() -> Self {
        Self::math()
    }
}
