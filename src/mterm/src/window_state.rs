//! Window state persistence
//!
//! The window geometry and font size are kept in a small JSON file per
//! terminal title, under the local data directory:
//! - Linux: `~/.local/share/MTerminal/<title>.json`
//! - macOS: `~/Library/Application Support/MTerminal/<title>.json`
//! - Windows: `%LOCALAPPDATA%\MTerminal\<title>.json`
//!
//! Setting `MTERM_HOME` replaces the local data directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TerminalError};

/// Folder created under the data directory.
pub const STATE_FOLDER: &str = "MTerminal";

/// Environment variable overriding the data directory.
pub const HOME_ENV_VAR: &str = "MTERM_HOME";

pub const MIN_FONT_SIZE: f64 = 12.0;
pub const MAX_FONT_SIZE: f64 = 64.0;
pub const FONT_SIZE_STEP: f64 = 2.0;

/// Window display mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindowMode {
    #[default]
    Normal,
    Minimized,
    Maximized,
}

/// Persisted window geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WindowStateRecord {
    pub width: f64,
    pub height: f64,
    pub left: f64,
    pub top: f64,
    pub font_size: f64,
    pub window_state: WindowMode,
}

impl Default for WindowStateRecord {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 450.0,
            left: 100.0,
            top: 100.0,
            font_size: 14.0,
            window_state: WindowMode::Normal,
        }
    }
}

impl WindowStateRecord {
    /// Grows the font by one step unless already at the maximum.
    pub fn increase_font_size(&mut self) {
        if self.font_size < MAX_FONT_SIZE {
            self.font_size += FONT_SIZE_STEP;
        }
    }

    /// Shrinks the font by one step unless already at the minimum.
    pub fn decrease_font_size(&mut self) {
        if self.font_size > MIN_FONT_SIZE {
            self.font_size -= FONT_SIZE_STEP;
        }
    }
}

/// Reads and writes window state files.
#[derive(Debug, Clone)]
pub struct WindowStateStore {
    dir: PathBuf,
}

impl WindowStateStore {
    /// Store rooted at `<data_local_dir>/MTerminal`, or `$MTERM_HOME/MTerminal`.
    pub fn new() -> Result<Self> {
        let home = std::env::var_os(HOME_ENV_VAR)
            .filter(|home| !home.is_empty())
            .map(PathBuf::from);
        Self::from_home(home)
    }

    /// Store rooted at `<home>/MTerminal`, falling back to the local data directory.
    pub fn from_home(home: Option<PathBuf>) -> Result<Self> {
        let base = match home {
            Some(home) => home,
            None => dirs::data_local_dir().ok_or(TerminalError::NoStateDir)?,
        };
        Ok(Self::with_dir(base.join(STATE_FOLDER)))
    }

    /// Store using an explicit directory.
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the state file for a terminal title. The file always lands
    /// directly inside [`Self::dir`].
    pub fn path_for(&self, title: &str) -> PathBuf {
        self.dir.join(format!("{}.json", file_stem(title)))
    }

    /// Creates the store directory if missing.
    pub fn ensure_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.dir).map_err(|source| TerminalError::WindowStateIo {
            path: self.dir.clone(),
            source,
        })
    }

    /// Loads the saved state. A missing file is `Ok(None)`.
    pub fn load(&self, title: &str) -> Result<Option<WindowStateRecord>> {
        let path = self.path_for(title);
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path)
            .map_err(|source| TerminalError::WindowStateIo { path, source })?;
        let record = serde_json::from_str(&content)?;
        Ok(Some(record))
    }

    /// Writes the state as indented JSON.
    pub fn save(&self, title: &str, record: &WindowStateRecord) -> Result<()> {
        self.ensure_dir()?;

        let path = self.path_for(title);
        let content = serde_json::to_string_pretty(record)?;
        std::fs::write(&path, content)
            .map_err(|source| TerminalError::WindowStateIo { path: path.clone(), source })?;

        tracing::debug!("Saved window state: {}", path.display());
        Ok(())
    }
}

/// Turns a title into a single file name component.
fn file_stem(title: &str) -> String {
    let stem: String = title
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let stem = stem.trim().trim_end_matches('.');

    if stem.is_empty() || stem.chars().all(|c| c == '.') {
        STATE_FOLDER.to_string()
    } else {
        stem.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let store = WindowStateStore::with_dir(temp.path().join("MTerminal"));

        let record = WindowStateRecord {
            width: 1024.0,
            height: 600.0,
            left: 10.0,
            top: 20.0,
            font_size: 18.0,
            window_state: WindowMode::Maximized,
        };
        store.save("Dev Console", &record).unwrap();

        assert!(temp.path().join("MTerminal/Dev Console.json").exists());
        assert_eq!(store.load("Dev Console").unwrap(), Some(record));
    }

    #[test]
    fn test_title_cannot_leave_store_dir() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("MTerminal");
        let store = WindowStateStore::with_dir(&dir);

        store
            .save("../escaped", &WindowStateRecord::default())
            .unwrap();
        assert!(!temp.path().join("escaped.json").exists());
        assert!(dir.join(".._escaped.json").exists());

        for title in ["a/b\\c", "..", "  ", "x:y?"] {
            assert_eq!(store.path_for(title).parent(), Some(dir.as_path()));
        }
        assert_eq!(store.path_for(".."), dir.join("MTerminal.json"));
        assert_eq!(store.path_for("a/b\\c"), dir.join("a_b_c.json"));
    }

    #[test]
    fn test_load_missing_is_none() {
        let temp = TempDir::new().unwrap();
        let store = WindowStateStore::with_dir(temp.path());
        assert_eq!(store.load("absent").unwrap(), None);
    }

    #[test]
    fn test_load_corrupt_is_error() {
        let temp = TempDir::new().unwrap();
        let store = WindowStateStore::with_dir(temp.path());
        std::fs::write(store.path_for("broken"), "{ not json").unwrap();
        assert!(matches!(
            store.load("broken"),
            Err(TerminalError::WindowStateJson(_))
        ));
    }

    #[test]
    fn test_json_field_names() {
        let json = serde_json::to_value(WindowStateRecord::default()).unwrap();
        assert_eq!(json["Width"], 800.0);
        assert_eq!(json["FontSize"], 14.0);
        assert_eq!(json["WindowState"], "Normal");
    }

    #[test]
    fn test_font_size_bounds() {
        let mut record = WindowStateRecord {
            font_size: 62.0,
            ..Default::default()
        };
        record.increase_font_size();
        assert_eq!(record.font_size, 64.0);
        record.increase_font_size();
        assert_eq!(record.font_size, 64.0);

        record.font_size = 14.0;
        record.decrease_font_size();
        assert_eq!(record.font_size, 12.0);
        record.decrease_font_size();
        assert_eq!(record.font_size, 12.0);
    }

    #[test]
    fn test_home_override() {
        let temp = TempDir::new().unwrap();
        let store = WindowStateStore::from_home(Some(temp.path().to_path_buf())).unwrap();
        assert_eq!(store.dir(), temp.path().join(STATE_FOLDER));
        assert_eq!(
            store.path_for("Dev"),
            temp.path().join("MTerminal").join("Dev.json")
        );
    }
}
