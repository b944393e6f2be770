//! File-based logging setup.
//!
//! The TUI owns the terminal, so diagnostics go to a rolling file under
//! `${FLASHIFY_HOME}/logs/`. The filter is taken from the `FLASHIFY_LOG` env
//! var (standard `tracing` filter syntax), defaulting to `info`.

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::paths;

/// Environment variable controlling the log filter.
pub const LOG_ENV: &str = "FLASHIFY_LOG";

/// Installs the global subscriber writing to the log directory.
///
/// Returns the appender guard; hold it for the life of the process or
/// buffered log lines are lost. Calling twice is harmless (the second
/// install is ignored).
pub fn init() -> Result<WorkerGuard> {
    let dir = paths::logs_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::daily(dir, "flashify.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init();

    Ok(guard)
}
