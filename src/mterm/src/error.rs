//! Error types for the terminal core.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = TerminalError> = std::result::Result<T, E>;

/// Errors produced by the terminal core.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// A command name or alias is already taken (names are case-insensitive).
    #[error("Command '{0}' is already added. Commands are case insensitive.")]
    DuplicateCommand(String),

    /// A command name or alias is empty or contains whitespace.
    #[error("Invalid command name: '{0}'")]
    InvalidCommandName(String),

    /// History traversal was requested on an empty history.
    #[error("History is empty")]
    EmptyHistory,

    /// A buffer was configured with an unusable capacity.
    #[error("Capacity must be greater than zero, got {0}")]
    InvalidCapacity(usize),

    /// A pending read was dropped before the host delivered input.
    #[error("Read was cancelled before input arrived")]
    ReadCancelled,

    /// A command action failed and opted into propagating the error.
    #[error("'{input}' has failed: {source}")]
    Command {
        input: String,
        #[source]
        source: anyhow::Error,
    },

    /// Window state file could not be read or written.
    #[error("Window state I/O error for '{path}': {source}")]
    WindowStateIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Window state file contained invalid JSON.
    #[error("Window state JSON error: {0}")]
    WindowStateJson(#[from] serde_json::Error),

    /// No local data directory is available on this platform.
    #[error("Cannot resolve the window state folder")]
    NoStateDir,

    /// Configuration file could not be read.
    #[error("Failed to read config '{path}': {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file contained invalid TOML.
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}
