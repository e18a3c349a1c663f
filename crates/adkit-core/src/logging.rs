//! Logging init: non-blocking file appender under the XDG state dir, with a
//! stderr variant for the server. `RUST_LOG` overrides the default filter.

use anyhow::{Context, Result};
use std::fs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,adkit=debug"))
}

/// Initializes file logging under the XDG state directory.
///
/// Returns the appender guard; hold it for the process lifetime or trailing
/// log lines are lost.
pub fn init_logging() -> Result<WorkerGuard> {
    let xdg_dirs =
        xdg::BaseDirectories::with_prefix("adkit").context("resolve XDG base directories")?;
    let log_dir = xdg_dirs.get_state_home();
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("create log directory {}", log_dir.display()))?;

    let appender = tracing_appender::rolling::never(&log_dir, "adkit.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(writer)
        .with_ansi(false)
        .init();
    tracing::debug!("logging to {}", log_dir.join("adkit.log").display());
    Ok(guard)
}

/// Stderr logging, for the server and as a fallback when the state
/// directory is not writable.
pub fn init_logging_stderr() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
