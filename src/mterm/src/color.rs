//! RGBA colors for terminal output.
//!
//! Colors are stored as 8-bit channels. Named constants cover the palette the
//! terminal uses for its own messages (echoed input, errors, help text).
//!
//! ```
//! use mterm::Color;
//!
//! let red = Color::from_hex("#CD5C5C").unwrap();
//! assert_eq!(red, Color::INDIAN_RED);
//!
//! let faded = Color::BLACK.with_opacity(0.5);
//! assert_eq!(faded.a, 0x7f);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when parsing a color string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    /// Input string was empty.
    #[error("empty input")]
    EmptyInput,

    /// Hex string had an invalid length.
    #[error("invalid hex length: {0} (expected 3, 6, or 8)")]
    InvalidLength(usize),

    /// Invalid hexadecimal character.
    #[error("invalid hex character")]
    InvalidHexChar,
}

/// An RGBA color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Alpha (0 = transparent, 255 = opaque).
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const GRAY: Color = Color::rgb(128, 128, 128);
    pub const LIGHT_GRAY: Color = Color::rgb(211, 211, 211);
    pub const DARK_GRAY: Color = Color::rgb(169, 169, 169);
    pub const INDIAN_RED: Color = Color::rgb(205, 92, 92);
    pub const DARK_RED: Color = Color::rgb(139, 0, 0);
    pub const LIGHT_GREEN: Color = Color::rgb(144, 238, 144);
    pub const AQUA: Color = Color::rgb(0, 255, 255);
    /// Header color for failed commands.
    pub const ERROR_RED: Color = Color::rgb(245, 65, 65);
    /// Default terminal background.
    pub const BACKGROUND: Color = Color::rgb(30, 30, 30);

    /// Creates an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Creates a color with an explicit alpha channel.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Returns the same color with alpha set to `multiplier` of full opacity.
    ///
    /// The multiplier is clamped to `0.0..=1.0`; the resulting alpha is
    /// truncated, so `0.5` gives `0x7f`.
    pub fn with_opacity(self, multiplier: f64) -> Self {
        let clamped = multiplier.clamp(0.0, 1.0);
        Self {
            a: (255.0 * clamped) as u8,
            ..self
        }
    }

    /// Parses `#RGB`, `#RRGGBB` or `#RRGGBBAA` (the `#` is optional).
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let hex = hex.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);

        if hex.is_empty() {
            return Err(ColorParseError::EmptyInput);
        }
        if !hex.is_ascii() {
            return Err(ColorParseError::InvalidHexChar);
        }

        let expanded: String = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect(),
            6 | 8 => hex.to_string(),
            len => return Err(ColorParseError::InvalidLength(len)),
        };

        let component = |s: &str| -> Result<u8, ColorParseError> {
            u8::from_str_radix(s, 16).map_err(|_| ColorParseError::InvalidHexChar)
        };

        let r = component(&expanded[0..2])?;
        let g = component(&expanded[2..4])?;
        let b = component(&expanded[4..6])?;
        let a = if expanded.len() == 8 {
            component(&expanded[6..8])?
        } else {
            255
        };

        Ok(Self::rgba(r, g, b, a))
    }

    /// Formats as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::DARK_GRAY
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl From<Color> for crossterm::style::Color {
    fn from(color: Color) -> Self {
        crossterm::style::Color::Rgb {
            r: color.r,
            g: color.g,
            b: color.b,
        }
    }
}
