//! Log file setup.
//!
//! The terminal belongs to the UI, so events go to a file in the platform
//! data directory instead of stderr.

use std::fs;
use std::path::PathBuf;

use color_eyre::eyre::{Result, WrapErr, eyre};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;

use crate::config::project_dirs;

/// Environment variable holding a log filter directive.
pub const LOG_ENV: &str = "MATHDRIFT_LOG";

const LOG_FILE: &str = "mathdrift.log";

/// Install the global subscriber.
///
/// `directive` (from `--log-level`) wins over `MATHDRIFT_LOG`; with
/// neither, `info` is used. Keep the returned guard alive until exit so
/// buffered events are flushed.
pub fn init(directive: Option<&str>) -> Result<WorkerGuard> {
    let env_value = std::env::var(LOG_ENV).ok();
    let (filter, env_error) = resolve_filter(directive, env_value.as_deref())?;

    let dir = log_dir();
    fs::create_dir_all(&dir)
        .wrap_err_with(|| format!("failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(&dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| eyre!("failed to install log subscriber: {e}"))?;

    tracing::info!(path = %dir.join(LOG_FILE).display(), "logging started");
    if let (Some(value), Some(error)) = (env_value, env_error) {
        tracing::warn!(%value, %error, "ignoring invalid {LOG_ENV}, using `info`");
    }
    Ok(guard)
}

/// Pick the filter from `--log-level`, then `MATHDRIFT_LOG`, then `info`.
///
/// A bad `--log-level` is an error. A bad environment value falls back to
/// `info` and its parse error is handed back so it can be logged.
fn resolve_filter(
    directive: Option<&str>,
    env_value: Option<&str>,
) -> Result<(EnvFilter, Option<ParseError>)> {
    if let Some(directive) = directive {
        let filter = EnvFilter::try_new(directive)
            .wrap_err_with(|| format!("invalid log filter `{directive}`"))?;
        return Ok((filter, None));
    }
    match env_value.map(EnvFilter::try_new) {
        Some(Ok(filter)) => Ok((filter, None)),
        Some(Err(error)) => Ok((EnvFilter::new("info"), Some(error))),
        None => Ok((EnvFilter::new("info"), None)),
    }
}

fn log_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_local_dir().to_path_buf())
        .unwrap_or_else(std::env::temp_dir)
}
