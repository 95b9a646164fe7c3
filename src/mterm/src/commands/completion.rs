//! Ordered-prefix autocomplete over command names.
//!
//! Names are sorted once, lexicographically. Matching is a case-sensitive
//! prefix test over that sorted view, so the suggestion for a prefix is the
//! alphabetically first name that starts with it. Stepping with
//! [`CompletionEngine::next_ordered`] / [`CompletionEngine::previous_ordered`]
//! does not wrap; callers fall back to [`CompletionEngine::first`] /
//! [`CompletionEngine::last`].

use super::registry::CommandRegistry;

// ============================================================
// COMPLETION ENGINE
// ============================================================

/// Autocomplete matcher over a sorted set of command names.
#[derive(Debug, Clone)]
pub struct CompletionEngine<'a> {
    names: Vec<&'a str>,
}

impl<'a> CompletionEngine<'a> {
    /// Creates an engine over every name and alias in the registry.
    pub fn new(registry: &'a CommandRegistry) -> Self {
        Self::from_names(registry.all_names())
    }

    /// Creates an engine over an arbitrary set of names.
    pub fn from_names<I>(names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut names: Vec<&'a str> = names.into_iter().collect();
        names.sort_unstable();
        names.dedup();
        Self { names }
    }

    /// Returns the first name, in order, that starts with `prefix`.
    ///
    /// Blank input has no suggestion.
    pub fn match_ordered(&self, prefix: &str) -> Option<&'a str> {
        if prefix.trim().is_empty() {
            return None;
        }
        self.names
            .iter()
            .copied()
            .find(|name| name.starts_with(prefix))
    }

    /// Returns every name that starts with the trimmed `prefix`, in order.
    pub fn match_all(&self, prefix: &str) -> Vec<&'a str> {
        let prefix = prefix.trim();
        if prefix.is_empty() {
            return Vec::new();
        }
        self.names
            .iter()
            .copied()
            .filter(|name| name.starts_with(prefix))
            .collect()
    }

    /// Returns the first name ordered after `current`.
    pub fn next_ordered(&self, current: &str) -> Option<&'a str> {
        if current.trim().is_empty() {
            return None;
        }
        self.names.iter().copied().find(|name| *name > current)
    }

    /// Returns the last name ordered before `current`.
    pub fn previous_ordered(&self, current: &str) -> Option<&'a str> {
        if current.trim().is_empty() {
            return None;
        }
        self.names.iter().rev().copied().find(|name| *name < current)
    }

    /// The alphabetically first name.
    pub fn first(&self) -> Option<&'a str> {
        self.names.first().copied()
    }

    /// The alphabetically last name.
    pub fn last(&self) -> Option<&'a str> {
        self.names.last().copied()
    }

    /// All names in order.
    pub fn names(&self) -> &[&'a str] {
        &self.names
    }
}

// ============================================================
// TESTS
// ============================================================
