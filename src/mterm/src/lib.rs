//! # MTerm
//!
//! Embeddable developer terminal: a host application registers named
//! commands, the user types them into a command line with autocomplete and
//! history, and commands write colored text back to the output.
//!
//! ## Quick Start
//!
//! ```
//! use mterm::{Color, Terminal, TerminalCommand, TerminalConfig};
//!
//! let mut terminal = Terminal::new(TerminalConfig::default())?;
//! terminal.register(
//!     TerminalCommand::new("greet", |t, args| {
//!         let name = args.first().map(String::as_str).unwrap_or("world");
//!         t.write_line_colored(&format!("Hello, {}!", name), Color::LIGHT_GREEN);
//!         Ok(())
//!     })
//!     .with_alias("hi")
//!     .with_description("Says hello."),
//! )?;
//!
//! terminal.submit("HI there")?;
//! assert!(terminal.text().ends_with("Hello, there!\n"));
//! # Ok::<(), mterm::TerminalError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      Host event loop                     │
//! │        key events │                    ▲ render          │
//! │  ┌────────────────▼────────────────────┴───────────────┐ │
//! │  │                     Terminal                        │ │
//! │  │  handle_key() / submit() / read_*() / write_*()     │ │
//! │  └──────┬──────────────┬──────────────┬────────────────┘ │
//! │  ┌──────▼──────┐ ┌─────▼───────┐ ┌────▼─────────────┐    │
//! │  │ CommandLine │ │  Registry   │ │  OutputBuffer    │    │
//! │  │ + History   │ │  + Parser   │ │  (colored lines) │    │
//! │  │ + Completion│ │             │ │                  │    │
//! │  └─────────────┘ └─────────────┘ └──────────────────┘    │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything runs on the host's UI thread. Reads return futures that
//! complete when the host feeds the matching key event.

// Command system
pub mod commands;

// Core state
pub mod history;
pub mod input;
pub mod output;
mod read;
pub mod terminal;

// Settings and persistence
pub mod color;
pub mod config;
pub mod window_state;

pub mod error;

pub use color::{Color, ColorParseError};
pub use commands::{CommandRegistry, ParsedCommand, TerminalCommand};
pub use config::{TerminalConfig, TerminalStyle};
pub use error::{Result, TerminalError};
pub use history::History;
pub use input::CommandLine;
pub use output::{Line, OutputBuffer, Segment};
pub use terminal::{Terminal, TerminalWriter, VERSION};
pub use window_state::{WindowMode, WindowStateRecord, WindowStateStore};
