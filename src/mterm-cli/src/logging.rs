//! File logging and panic reporting.
//!
//! The TUI owns stdout, so logs go to a file.

use std::fs::OpenOptions;
use std::panic;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::cli::LogLevel;

/// Guard that ensures the log file is flushed when dropped.
pub struct LogGuard {
    _guard: tracing_appender::non_blocking::WorkerGuard,
}

/// Default log file: `<data_local_dir>/MTerminal/mterm.log`.
pub fn default_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(mterm::window_state::STATE_FOLDER)
        .join("mterm.log")
}

/// Sets up logging to `path`. `RUST_LOG` takes precedence over `level`.
pub fn setup_file_logging(path: &Path, level: LogLevel) -> Result<LogGuard> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log folder: {}", parent.display()))?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,mterm={0},mterm_cli={0}",
            level.as_filter_str()
        ))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();

    Ok(LogGuard { _guard: guard })
}

/// Routes panic reports to the log while the TUI owns the screen.
///
/// Panics inside commands are caught and shown in the terminal output.
pub fn install_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            String::new()
        };
        let location = panic_info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_default();

        tracing::error!(%location, "panic: {}", message);
    }));
}
