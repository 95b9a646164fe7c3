//! Command system.
//!
//! - [`CommandRegistry`]: case-insensitive names and aliases, unique across the registry
//! - [`CommandParser`]: splits an input line into name and quote-aware arguments
//! - [`CompletionEngine`]: ordered-prefix autocomplete over command names
//!
//! # Example
//!
//! ```
//! use mterm::commands::{CommandParser, CommandRegistry, CompletionEngine};
//!
//! let registry = CommandRegistry::default();
//!
//! let cmd = CommandParser::parse("HELP clear").unwrap();
//! let def = registry.find(&cmd.name).unwrap();
//! assert_eq!(def.name(), "help");
//!
//! let engine = CompletionEngine::new(&registry);
//! assert_eq!(engine.match_ordered("cl"), Some("clear"));
//! ```

mod builtin;
pub mod completion;
pub mod parser;
pub mod registry;
pub mod types;

pub use builtin::register_builtin_commands;
pub use completion::CompletionEngine;
pub use parser::CommandParser;
pub use registry::CommandRegistry;
pub use types::{CommandAction, ParsedCommand, TerminalCommand};
