//! Display settings the host can cycle through at runtime.

use std::time::Duration;

use ratatui::style::Color;
use serde::Deserialize;

/// Color theme for the banner and the floating symbols.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTheme {
    #[default]
    White,
    Cyan,
    Green,
    Magenta,
    Yellow,
    Red,
    Blue,
}

impl ColorTheme {
    /// Cycle to the next color theme.
    pub fn next(self) -> Self {
        match self {
            ColorTheme::White => ColorTheme::Cyan,
            ColorTheme::Cyan => ColorTheme::Green,
            ColorTheme::Green => ColorTheme::Magenta,
            ColorTheme::Magenta => ColorTheme::Yellow,
            ColorTheme::Yellow => ColorTheme::Red,
            ColorTheme::Red => ColorTheme::Blue,
            ColorTheme::Blue => ColorTheme::White,
        }
    }

    /// Full-strength color, used for the banner text.
    pub fn color(self) -> Color {
        let (r, g, b) = self.rgb();
        Color::Rgb(r, g, b)
    }

    /// The theme color blended toward black, as if drawn at `opacity`
    /// over a black background.
    pub fn tint(self, opacity: f32) -> Color {
        let opacity = opacity.clamp(0.0, 1.0);
        let (r, g, b) = self.rgb();
        let scale = |c: u8| (c as f32 * opacity).round() as u8;
        Color::Rgb(scale(r), scale(g), scale(b))
    }

    fn rgb(self) -> (u8, u8, u8) {
        match self {
            ColorTheme::White => (255, 255, 255),
            ColorTheme::Cyan => (0, 255, 255),
            ColorTheme::Green => (0, 255, 0),
            ColorTheme::Magenta => (255, 0, 255),
            ColorTheme::Yellow => (255, 255, 0),
            ColorTheme::Red => (255, 0, 0),
            ColorTheme::Blue => (65, 105, 225),
        }
    }
}

/// Tick cadence presets for the motion loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationSpeed {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl AnimationSpeed {
    /// Cycle to the next speed preset.
    pub fn next(self) -> Self {
        match self {
            AnimationSpeed::Slow => AnimationSpeed::Normal,
            AnimationSpeed::Normal => AnimationSpeed::Fast,
            AnimationSpeed::Fast => AnimationSpeed::Slow,
        }
    }

    /// Interval between motion ticks.
    pub fn tick_interval(self) -> Duration {
        match self {
            AnimationSpeed::Slow => Duration::from_millis(33),
            AnimationSpeed::Normal => Duration::from_millis(16),
            AnimationSpeed::Fast => Duration::from_millis(8),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AnimationSpeed::Slow => "slow",
            AnimationSpeed::Normal => "normal",
            AnimationSpeed::Fast => "fast",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_cycle_returns_home() {
        let mut theme = ColorTheme::default();
        for _ in 0..7 {
            theme = theme.next();
        }
        assert_eq!(theme, ColorTheme::White);
    }

    #[test]
    fn test_tint() {
        assert_eq!(ColorTheme::White.tint(0.3), Color::Rgb(77, 77, 77));
        assert_eq!(ColorTheme::Red.tint(0.0), Color::Rgb(0, 0, 0));
        assert_eq!(ColorTheme::Cyan.tint(2.0), ColorTheme::Cyan.color());
    }

    #[test]
    fn test_default_speed_is_sixty_hz() {
        assert_eq!(
            AnimationSpeed::default().tick_interval(),
            Duration::from_millis(16)
        );
        assert_eq!(AnimationSpeed::Fast.next(), AnimationSpeed::Slow);
    }
}
