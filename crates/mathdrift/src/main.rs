mod app;
mod cli;
mod config;
mod logging;
mod render;
mod ticker;

use clap::Parser;

use crate::app::App;
use crate::cli::Cli;
use crate::config::Config;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let _log_guard = logging::init(cli.log_level.as_deref())?;
    let config = Config::load(&cli)?;
    tracing::info!(count = config.count, seed = ?config.seed, "starting mathdrift");

    let terminal = ratatui::init();
    let result = App::new(config).run(terminal);
    ratatui::restore();
    result
}
