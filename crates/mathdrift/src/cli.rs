//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

/// Floating math symbols behind the math club banner.
#[derive(Debug, Default, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Config file to load instead of the platform default.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Number of floating symbols (at most 10000).
    #[arg(short = 'n', long)]
    pub count: Option<usize>,

    /// Seed for reproducible symbol placement.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log filter directive, e.g. `debug` or `mathdrift=trace`.
    #[arg(long, value_name = "FILTER")]
    pub log_level: Option<String>,
}
