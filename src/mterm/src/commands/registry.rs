//! Command registry.
//!
//! Stores the registered commands in registration order and resolves names
//! and aliases case-insensitively. Every name and alias is unique across the
//! whole registry; collisions are rejected at registration time.

use std::collections::HashMap;

use tracing::debug;

use super::builtin::register_builtin_commands;
use super::types::TerminalCommand;
use crate::error::{Result, TerminalError};

/// Registry storing all available terminal commands.
#[derive(Debug)]
pub struct CommandRegistry {
    /// Commands in registration order.
    commands: Vec<TerminalCommand>,
    /// Map from lowercased name or alias to lowercased primary name.
    lookup: HashMap<String, String>,
}

impl CommandRegistry {
    /// Creates a new empty command registry.
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            lookup: HashMap::new(),
        }
    }

    /// Registers a command.
    ///
    /// Fails if the name or any alias is blank, contains whitespace, or
    /// collides (case-insensitively) with an already registered name or alias.
    pub fn add(&mut self, command: TerminalCommand) -> Result<()> {
        let mut keys: Vec<String> = Vec::new();
        for name in command.all_names() {
            if name.is_empty() || name.contains(char::is_whitespace) {
                return Err(TerminalError::InvalidCommandName(name.to_string()));
            }
            let key = name.to_lowercase();
            if self.lookup.contains_key(&key) || keys.contains(&key) {
                return Err(TerminalError::DuplicateCommand(name.to_string()));
            }
            keys.push(key);
        }

        let primary = command.name().to_lowercase();
        for key in keys {
            self.lookup.insert(key, primary.clone());
        }

        debug!(command = command.name(), aliases = ?command.aliases(), "Registered command");
        self.commands.push(command);
        Ok(())
    }

    /// Gets a command by name or alias.
    ///
    /// The lookup is case-insensitive.
    pub fn find(&self, name: &str) -> Option<&TerminalCommand> {
        let primary = self.lookup.get(&name.to_lowercase())?;
        self.commands
            .iter()
            .find(|cmd| cmd.name().to_lowercase() == *primary)
    }

    /// Removes a command by name or alias, along with all of its aliases.
    pub fn remove(&mut self, name: &str) -> Option<TerminalCommand> {
        let primary = self.lookup.get(&name.to_lowercase())?.clone();
        let index = self
            .commands
            .iter()
            .position(|cmd| cmd.name().to_lowercase() == primary)?;

        let command = self.commands.remove(index);
        self.lookup.retain(|_, target| *target != primary);

        debug!(command = command.name(), "Removed command");
        Some(command)
    }

    /// Removes the given command if it is the one registered under its name.
    pub fn remove_command(&mut self, command: &TerminalCommand) -> bool {
        let registered = self
            .find(command.name())
            .is_some_and(|existing| existing.same_action(command));

        registered && self.remove(command.name()).is_some()
    }

    /// Checks if a command exists by name or alias.
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Returns all commands in registration order.
    pub fn commands(&self) -> &[TerminalCommand] {
        &self.commands
    }

    /// Returns all primary command names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.commands.iter().map(TerminalCommand::name).collect()
    }

    /// Returns all names including aliases, in registration order.
    pub fn all_names(&self) -> Vec<&str> {
        self.commands
            .iter()
            .flat_map(TerminalCommand::all_names)
            .collect()
    }

    /// Returns the number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns true if no commands are registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Default for CommandRegistry {
    /// Creates a registry with the built-in `help` and `clear` commands.
    fn default() -> Self {
        let mut registry = Self::new();
        register_builtin_commands(&mut registry);
        registry
    }
}
