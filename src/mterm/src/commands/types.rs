//! Command system types.
//!
//! This module defines the command descriptor registered by the host
//! application and the parsed form of an input line.

use std::fmt;
use std::rc::Rc;

use crate::terminal::Terminal;

// ============================================================
// COMMAND ACTION
// ============================================================

/// Callback invoked when a command is entered.
///
/// Receives the terminal that dispatched it and the parsed arguments.
pub type CommandAction = Rc<dyn Fn(&mut Terminal, &[String]) -> anyhow::Result<()>>;

// ============================================================
// TERMINAL COMMAND
// ============================================================

/// A named, invokable action registered by the host application.
#[derive(Clone)]
pub struct TerminalCommand {
    name: String,
    aliases: Vec<String>,
    description: String,
    details: String,
    action: CommandAction,
    propagate_errors: bool,
}

impl TerminalCommand {
    /// Creates a command with the given name and action.
    pub fn new<F>(name: impl Into<String>, action: F) -> Self
    where
        F: Fn(&mut Terminal, &[String]) -> anyhow::Result<()> + 'static,
    {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            description: String::new(),
            details: String::new(),
            action: Rc::new(action),
            propagate_errors: false,
        }
    }

    /// Creates a command that does nothing when invoked.
    pub fn noop(name: impl Into<String>) -> Self {
        Self::new(name, |_, _| Ok(()))
    }

    /// Adds an alias.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Adds several aliases.
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    /// Sets the one-line description shown in the help listing.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the detailed description shown by `help <command>`.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = details.into();
        self
    }

    /// When set, a failing action is reported and then returned to the caller
    /// of [`Terminal::submit`] instead of being swallowed.
    pub fn propagate_errors(mut self, propagate: bool) -> Self {
        self.propagate_errors = propagate;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn details(&self) -> &str {
        &self.details
    }

    pub fn propagates_errors(&self) -> bool {
        self.propagate_errors
    }

    /// Returns the action so it can be invoked without borrowing the registry.
    pub fn action(&self) -> CommandAction {
        Rc::clone(&self.action)
    }

    /// Returns all names for this command (primary + aliases).
    pub fn all_names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }

    /// Returns true if the given name matches this command or one of its aliases.
    pub fn matches(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.all_names().any(|n| n.to_lowercase() == name)
    }

    /// Returns true if both values share the same action instance.
    pub fn same_action(&self, other: &TerminalCommand) -> bool {
        Rc::ptr_eq(&self.action, &other.action)
    }
}

impl fmt::Debug for TerminalCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TerminalCommand")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("description", &self.description)
            .field("propagate_errors", &self.propagate_errors)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for TerminalCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        for alias in &self.aliases {
            write!(f, " / {}", alias)?;
        }
        Ok(())
    }
}

// ============================================================
// PARSED COMMAND
// ============================================================

/// A parsed input line: command name and arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    /// The command name as typed.
    pub name: String,
    /// The command arguments.
    pub args: Vec<String>,
    /// The trimmed input line.
    pub raw: String,
}

impl ParsedCommand {
    /// Creates a new parsed command.
    pub fn new(name: String, args: Vec<String>, raw: String) -> Self {
        Self { name, args, raw }
    }

    /// Returns true if the command has any arguments.
    pub fn has_args(&self) -> bool {
        !self.args.is_empty()
    }

    /// Returns the first argument, if any.
    pub fn first_arg(&self) -> Option<&str> {
        self.args.first().map(|s| s.as_str())
    }

    /// Returns the argument at the given index.
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(|s| s.as_str())
    }
}

impl fmt::Display for ParsedCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        for arg in &self.args {
            if arg.contains(' ') {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

// ============================================================
// TESTS
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_display_with_aliases() {
        let cmd = TerminalCommand::noop("clear").with_aliases(["cls", "c"]);
        assert_eq!(cmd.to_string(), "clear / cls / c");
        assert_eq!(TerminalCommand::noop("help").to_string(), "help");
    }

    #[test]
    fn test_command_matches() {
        let cmd = TerminalCommand::noop("help").with_alias("h");
        assert!(cmd.matches("help"));
        assert!(cmd.matches("HELP"));
        assert!(cmd.matches("H"));
        assert!(!cmd.matches("foo"));
    }

    #[test]
    fn test_command_all_names() {
        let cmd = TerminalCommand::noop("quit").with_aliases(["q", "exit"]);
        let names: Vec<_> = cmd.all_names().collect();
        assert_eq!(names, vec!["quit", "q", "exit"]);
    }

    #[test]
    fn test_command_builder_fields() {
        let cmd = TerminalCommand::noop("crash")
            .with_description("Crashes")
            .with_details("Really")
            .propagate_errors(true);
        assert_eq!(cmd.description(), "Crashes");
        assert_eq!(cmd.details(), "Really");
        assert!(cmd.propagates_errors());
    }

    #[test]
    fn test_same_action() {
        let a = TerminalCommand::noop("a");
        let b = a.clone().with_alias("b");
        let c = TerminalCommand::noop("a");
        assert!(a.same_action(&b));
        assert!(!a.same_action(&c));
    }

    #[test]
    fn test_parsed_command() {
        let cmd = ParsedCommand::new(
            "help".to_string(),
            vec!["topic".to_string()],
            "help topic".to_string(),
        );
        assert!(cmd.has_args());
        assert_eq!(cmd.first_arg(), Some("topic"));
        assert_eq!(cmd.arg(1), None);
    }

    #[test]
    fn test_parsed_command_display() {
        let cmd = ParsedCommand::new(
            "search".to_string(),
            vec!["hello world".to_string(), "x".to_string()],
            String::new(),
        );
        assert_eq!(cmd.to_string(), "search \"hello world\" x");
    }
}
