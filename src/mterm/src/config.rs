//! Terminal configuration.
//!
//! ```toml
//! title = "Dev Console"
//! buffer_capacity = 500
//! history_capacity = 50
//! cycle_history = false
//!
//! [style]
//! foreground = "#A9A9A9"
//! background = "#1E1E1E"
//! font_family = "Cascadia Mono"
//! font_size = 16.0
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{Result, TerminalError};
use crate::input::CommandLine;
use crate::output::OutputBuffer;

/// Terminal configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    /// Window title; also names the window state file.
    pub title: String,
    /// Maximum number of retained output lines.
    pub buffer_capacity: usize,
    /// Maximum number of remembered input lines.
    pub history_capacity: usize,
    /// Whether history navigation wraps around.
    pub cycle_history: bool,
    /// Overrides the folder holding window state files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_dir: Option<PathBuf>,
    pub style: TerminalStyle,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            title: "MTerminal".to_string(),
            buffer_capacity: OutputBuffer::DEFAULT_CAPACITY,
            history_capacity: CommandLine::DEFAULT_HISTORY_CAPACITY,
            cycle_history: true,
            state_dir: None,
            style: TerminalStyle::default(),
        }
    }
}

/// Visual defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalStyle {
    /// Color of text written without an explicit color.
    pub foreground: Color,
    pub background: Color,
    pub font_family: String,
    pub font_size: f64,
}

impl Default for TerminalStyle {
    fn default() -> Self {
        Self {
            foreground: Color::DARK_GRAY,
            background: Color::BACKGROUND,
            font_family: "Consolas".to_string(),
            font_size: 14.0,
        }
    }
}

impl TerminalConfig {
    /// Parse from TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| TerminalError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_state_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.state_dir = Some(dir.into());
        self
    }
}
