//! Command-line arguments.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use mterm::TerminalConfig;

/// Log verbosity level written to the log file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    /// Only show errors
    Error,
    /// Show warnings and errors
    Warn,
    /// Show informational messages, warnings, and errors (default)
    #[default]
    Info,
    /// Show debug messages and above
    Debug,
    /// Show all messages including trace-level details
    Trace,
}

impl LogLevel {
    /// Convert to tracing filter string.
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// MTerm - developer terminal demo.
#[derive(Debug, Parser)]
#[command(name = "mterm", version, about)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, short = 'c', value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Window title; also names the saved window state
    #[arg(long, short = 't')]
    pub title: Option<String>,

    /// Folder for window state files
    #[arg(long, value_name = "DIR")]
    pub state_dir: Option<PathBuf>,

    /// Do not load or save window state
    #[arg(long)]
    pub no_state: bool,

    /// Log level for the log file
    #[arg(long, value_enum, env = "MTERM_LOG", default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log file path (defaults to the local data folder)
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Builds the terminal configuration from the file and flag overrides.
    pub fn terminal_config(&self) -> Result<TerminalConfig> {
        let mut config = match &self.config {
            Some(path) => TerminalConfig::load(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?,
            None => TerminalConfig::default(),
        };

        if let Some(title) = &self.title {
            config.title = title.clone();
        }
        if let Some(dir) = &self.state_dir {
            config.state_dir = Some(dir.clone());
        }
        Ok(config)
    }
}
