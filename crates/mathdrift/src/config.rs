//! Configuration loaded from a TOML file and the command line.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use color_eyre::eyre::{Result, WrapErr, bail, eyre};
use directories::ProjectDirs;
use mathdrift_core::{AnimationSpeed, ColorTheme, GlyphSet};
use mathdrift_motion::MotionConfig;
use serde::Deserialize;

use crate::cli::Cli;
use crate::render::CellSize;

/// Config file name inside the platform config directory.
const CONFIG_FILE: &str = "config.toml";

/// Upper limit on floating symbols.
pub const MAX_COUNT: usize = 10_000;

/// Raw file contents; every key is optional.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    count: usize,
    glyphs: String,
    speed_min: f32,
    speed_max: f32,
    footprint: f32,
    cell_width_px: u16,
    cell_height_px: u16,
    tick_ms: Option<u64>,
    speed: AnimationSpeed,
    color_theme: ColorTheme,
    opacity: f32,
    title: String,
    tagline: String,
    seed: Option<u64>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        let config = Config::default();
        Self {
            count: config.count,
            glyphs: config.glyphs.as_slice().iter().collect(),
            speed_min: config.motion.speed_range.start,
            speed_max: config.motion.speed_range.end,
            footprint: config.motion.footprint,
            cell_width_px: config.cell.width_px,
            cell_height_px: config.cell.height_px,
            tick_ms: None,
            speed: config.speed,
            color_theme: config.color_theme,
            opacity: config.opacity,
            title: config.title,
            tagline: config.tagline,
            seed: None,
        }
    }
}

/// Validated application settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub count: usize,
    pub glyphs: GlyphSet,
    pub motion: MotionConfig,
    pub cell: CellSize,
    /// Explicit tick interval; overrides the `speed` preset until the
    /// user cycles speeds.
    pub tick_interval: Option<Duration>,
    pub speed: AnimationSpeed,
    pub color_theme: ColorTheme,
    /// Symbol brightness relative to the theme color.
    pub opacity: f32,
    pub title: String,
    pub tagline: String,
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            count: 15,
            glyphs: GlyphSet::math(),
            motion: MotionConfig::default(),
            cell: CellSize::new(8, 16),
            tick_interval: None,
            speed: AnimationSpeed::default(),
            color_theme: ColorTheme::default(),
            opacity: 0.3,
            title: "Math Club @ ULM".to_string(),
            tagline: "Where numbers meet creativity.".to_string(),
            seed: None,
        }
    }
}

impl Config {
    /// Load settings for this run.
    ///
    /// An explicit `--config` path must exist; the platform default path is
    /// optional and falls back to built-in defaults. CLI flags win over the
    /// file.
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => match default_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => {
                    tracing::info!("no config file found, using defaults");
                    Self::default()
                }
            },
        };
        config.apply_cli(cli)?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read config file {}", path.display()))?;
        let config = Self::from_toml(&contents)
            .wrap_err_with(|| format!("invalid config file {}", path.display()))?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(contents)?;
        file.validate()
    }

    fn apply_cli(&mut self, cli: &Cli) -> Result<()> {
        if let Some(count) = cli.count {
            check_count(count).wrap_err("invalid --count")?;
            self.count = count;
        }
        if let Some(seed) = cli.seed {
            self.seed = Some(seed);
        }
        Ok(())
    }

    /// Interval the ticker starts with.
    pub fn initial_tick_interval(&self) -> Duration {
        self.tick_interval
            .unwrap_or_else(|| self.speed.tick_interval())
            .max(Duration::from_millis(1))
    }
}

impl ConfigFile {
    fn validate(self) -> Result<Config> {
        check_count(self.count)?;
        let glyphs = GlyphSet::parse(&self.glyphs)
            .ok_or_else(|| eyre!("`glyphs` must contain at least one symbol"))?;
        let speed_ok = self.speed_min > 0.0
            && self.speed_max > self.speed_min
            && self.speed_max.is_finite();
        if !speed_ok {
            bail!(
                "speed range must satisfy 0 < speed_min < speed_max, got {}..{}",
                self.speed_min,
                self.speed_max
            );
        }
        if !self.footprint.is_finite() || self.footprint < 0.0 {
            bail!("`footprint` must be non-negative, got {}", self.footprint);
        }
        if self.cell_width_px == 0 || self.cell_height_px == 0 {
            bail!("cell size must be non-zero");
        }
        if self.tick_ms == Some(0) {
            bail!("`tick_ms` must be at least 1");
        }

        Ok(Config {
            count: self.count,
            glyphs,
            motion: MotionConfig {
                speed_range: self.speed_min..self.speed_max,
                footprint: self.footprint,
            },
            cell: CellSize::new(self.cell_width_px, self.cell_height_px),
            tick_interval: self.tick_ms.map(Duration::from_millis),
            speed: self.speed,
            color_theme: self.color_theme,
            opacity: self.opacity.clamp(0.0, 1.0),
            title: self.title,
            tagline: self.tagline,
            seed: self.seed,
        })
    }
}

fn check_count(count: usize) -> Result<()> {
    if count > MAX_COUNT {
        bail!("`count` must be at most {MAX_COUNT}, got {count}");
    }
    Ok(())
}

/// Platform config file location, if a home directory can be found.
pub fn default_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("edu", "ulm-mathclub", "mathdrift")
}
