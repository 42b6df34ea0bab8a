//! The terminal host: owns the current particle field and drives it.

use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use mathdrift_core::{AnimationSpeed, Bounds, ColorTheme};
use mathdrift_motion::{DefaultSource, ParticleField, RngSource, create_field};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Alignment, Constraint, Layout, Size},
    style::{Style, Stylize},
    text::Line,
    widgets::Paragraph,
};

use crate::config::Config;
use crate::render::render_symbols;
use crate::ticker::Ticker;

/// How long to wait for input while the animation is paused.
const PAUSED_POLL: Duration = Duration::from_millis(250);

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    config: Config,
    /// The latest committed field; replaced wholesale on every tick.
    field: ParticleField,
    rng: DefaultSource,
    ticker: Ticker,
    /// Viewport in virtual pixels, updated on resize.
    bounds: Bounds,
    speed: AnimationSpeed,
    /// Interval from `tick_ms`, shown instead of the preset until `s`.
    custom_interval: Option<Duration>,
    color_theme: ColorTheme,
}

impl App {
    /// Construct a new instance of [`App`]. The field stays empty until
    /// [`App::mount`] measures the terminal.
    pub fn new(config: Config) -> Self {
        let rng = match config.seed {
            Some(seed) => RngSource::seeded(seed),
            None => RngSource::from_entropy(),
        };
        let ticker = Ticker::new(config.initial_tick_interval(), Instant::now());
        Self {
            running: false,
            field: ParticleField::from_particles(
                Vec::new(),
                Bounds::default(),
                config.motion.footprint,
            ),
            rng,
            ticker,
            bounds: Bounds::default(),
            speed: config.speed,
            custom_interval: config.tick_interval,
            color_theme: config.color_theme,
            config,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.mount(terminal.size()?);
        self.running = true;
        while self.running {
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
            self.tick(Instant::now());
        }
        tracing::info!("shutting down");
        Ok(())
    }

    /// Measure the viewport and seed the field.
    pub fn mount(&mut self, size: Size) {
        self.bounds = self.config.cell.bounds_for(size);
        self.seed_field();
        self.ticker.resume(Instant::now());
    }

    fn seed_field(&mut self) {
        self.field = create_field(
            self.config.count,
            self.bounds,
            &self.config.glyphs,
            &self.config.motion,
            &mut self.rng,
        );
        tracing::info!(
            count = self.field.len(),
            width = self.bounds.width,
            height = self.bounds.height,
            "seeded symbol field"
        );
    }

    /// Advance the field if a tick is due.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.ticker.poll(now) {
            return false;
        }
        self.field = self.field.step(self.bounds);
        true
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let color = self.color_theme.color();

        render_symbols(
            frame,
            area,
            self.field(),
            self.config.cell,
            self.color_theme.tint(self.config.opacity),
        );

        let chunks = Layout::vertical([
            Constraint::Fill(1),   // Top padding
            Constraint::Length(1), // Title
            Constraint::Length(1), // Spacing
            Constraint::Length(1), // Tagline
            Constraint::Fill(1),   // Bottom padding
            Constraint::Length(1), // Help text
        ])
        .split(area);

        let title = Paragraph::new(self.config.title.as_str())
            .style(Style::new().fg(color).bold())
            .alignment(Alignment::Center);
        frame.render_widget(title, chunks[1]);

        let tagline = Paragraph::new(self.config.tagline.as_str())
            .style(Style::new().fg(color))
            .alignment(Alignment::Center);
        frame.render_widget(tagline, chunks[3]);

        let pause_label = if self.ticker.is_paused() {
            " resume  "
        } else {
            " pause  "
        };
        let help = Line::from(vec![
            "q".bold().fg(color),
            " quit  ".dark_gray(),
            "space".bold().fg(color),
            pause_label.dark_gray(),
            "s".bold().fg(color),
            format!(" speed ({})  ", self.speed_label()).dark_gray(),
            "c".bold().fg(color),
            " color  ".dark_gray(),
            "r".bold().fg(color),
            " reseed".dark_gray(),
        ])
        .centered();
        frame.render_widget(help, chunks[5]);
    }

    fn speed_label(&self) -> String {
        match self.custom_interval {
            Some(interval) => format!("{}ms", interval.as_millis()),
            None => self.speed.label().to_string(),
        }
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits at most until the next tick is due.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        let timeout = self.ticker.timeout(Instant::now()).unwrap_or(PAUSED_POLL);
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Resize(width, height) => self.on_resize(Size::new(width, height)),
                _ => {}
            }
        }
        Ok(())
    }

    /// The next tick confines particles to the new size.
    fn on_resize(&mut self, size: Size) {
        self.bounds = self.config.cell.bounds_for(size);
        tracing::debug!(
            width = self.bounds.width,
            height = self.bounds.height,
            "viewport resized"
        );
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char(' ')) => self.toggle_pause(),
            (_, KeyCode::Char('s')) => self.cycle_speed(),
            (_, KeyCode::Char('c')) => self.cycle_color_theme(),
            (_, KeyCode::Char('r')) => self.seed_field(),
            _ => {}
        }
    }

    fn toggle_pause(&mut self) {
        if self.ticker.is_paused() {
            self.ticker.resume(Instant::now());
            tracing::info!("animation resumed");
        } else {
            self.ticker.pause();
            tracing::info!("animation paused");
        }
    }

    fn cycle_speed(&mut self) {
        self.speed = self.speed.next();
        self.custom_interval = None;
        self.ticker.set_interval(self.speed.tick_interval(), Instant::now());
        tracing::debug!(
            speed = self.speed.label(),
            interval_ms = self.ticker.interval().as_millis() as u64,
            "animation speed changed"
        );
    }

    /// Cycle through available color themes.
    fn cycle_color_theme(&mut self) {
        self.color_theme = self.color_theme.next();
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
