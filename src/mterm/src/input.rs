//! Editable command line with autocomplete suggestion and history.

use crate::commands::CompletionEngine;
use crate::error::Result;
use crate::history::History;

/// The input line below the output.
///
/// The cursor is a byte offset into `text`, always on a char boundary.
#[derive(Debug, Clone)]
pub struct CommandLine {
    text: String,
    cursor_pos: usize,
    suggestion: Option<String>,
    history: History<String>,
    reading: bool,
}

impl CommandLine {
    /// Default number of remembered entries.
    pub const DEFAULT_HISTORY_CAPACITY: usize = 20;

    pub fn new(history_capacity: usize, cycle_history: bool) -> Result<Self> {
        Ok(Self {
            text: String::new(),
            cursor_pos: 0,
            suggestion: None,
            history: History::new(history_capacity)?.with_cyclic(cycle_history),
            reading: false,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position as a byte offset.
    pub fn cursor_pos(&self) -> usize {
        self.cursor_pos
    }

    /// Current autocomplete suggestion, if any.
    pub fn suggestion(&self) -> Option<&str> {
        self.suggestion.as_deref()
    }

    pub fn history(&self) -> &History<String> {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut History<String> {
        &mut self.history
    }

    /// True while a read is waiting for input from this line.
    pub fn is_reading(&self) -> bool {
        self.reading
    }

    /// Enters or leaves read mode. Suggestions are not shown while reading.
    pub fn set_reading(&mut self, reading: bool, engine: &CompletionEngine<'_>) {
        self.reading = reading;
        self.refresh_suggestion(engine);
    }

    /// Replaces the text and moves the cursor to the end.
    pub fn set_text(&mut self, text: impl Into<String>, engine: &CompletionEngine<'_>) {
        self.text = text.into();
        self.cursor_pos = self.text.len();
        self.refresh_suggestion(engine);
    }

    /// Inserts a character at the cursor position.
    pub fn insert_char(&mut self, c: char, engine: &CompletionEngine<'_>) {
        self.text.insert(self.cursor_pos, c);
        self.cursor_pos += c.len_utf8();
        self.refresh_suggestion(engine);
    }

    /// Inserts text at the cursor position and moves the cursor past it.
    pub fn insert_str(&mut self, text: &str, engine: &CompletionEngine<'_>) {
        self.text.insert_str(self.cursor_pos, text);
        self.cursor_pos += text.len();
        self.refresh_suggestion(engine);
    }

    /// Deletes the character before the cursor.
    pub fn backspace(&mut self, engine: &CompletionEngine<'_>) {
        if self.cursor_pos > 0 {
            let prev_pos = self.prev_boundary();
            self.text.remove(prev_pos);
            self.cursor_pos = prev_pos;
            self.refresh_suggestion(engine);
        }
    }

    /// Deletes the character at the cursor.
    pub fn delete(&mut self, engine: &CompletionEngine<'_>) {
        if self.cursor_pos < self.text.len() {
            self.text.remove(self.cursor_pos);
            self.refresh_suggestion(engine);
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor_pos = self.prev_boundary();
    }

    pub fn cursor_right(&mut self) {
        if self.cursor_pos < self.text.len() {
            self.cursor_pos = self.text[self.cursor_pos..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_pos + i)
                .unwrap_or(self.text.len());
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor_pos = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor_pos = self.text.len();
    }

    /// Clears the text.
    pub fn clear(&mut self, engine: &CompletionEngine<'_>) {
        self.set_text(String::new(), engine);
    }

    /// Accepts the suggestion, or steps to the next command name when the
    /// text already is the suggestion (or is blank). Wraps to the first name.
    pub fn autocomplete(&mut self, engine: &CompletionEngine<'_>) {
        let at_suggestion = self
            .suggestion
            .as_deref()
            .is_some_and(|s| s.to_lowercase() == self.text.to_lowercase());

        if at_suggestion || self.text.trim().is_empty() {
            let next = engine.next_ordered(&self.text).or_else(|| engine.first());
            if let Some(next) = next {
                self.set_text(next, engine);
            }
        } else if let Some(suggestion) = self.suggestion.clone() {
            self.set_text(suggestion, engine);
        }
    }

    /// Steps to the previous command name, wrapping to the last one.
    pub fn autocomplete_backwards(&mut self, engine: &CompletionEngine<'_>) {
        let previous = engine
            .previous_ordered(&self.text)
            .or_else(|| engine.last());
        if let Some(previous) = previous {
            self.set_text(previous, engine);
        }
    }

    /// Replaces the text with the previous history entry.
    pub fn history_up(&mut self, engine: &CompletionEngine<'_>) {
        if let Ok(entry) = self.history.previous() {
            let entry = entry.clone();
            self.set_text(entry, engine);
        }
    }

    /// Replaces the text with the next history entry.
    pub fn history_down(&mut self, engine: &CompletionEngine<'_>) {
        if let Ok(entry) = self.history.next() {
            let entry = entry.clone();
            self.set_text(entry, engine);
        }
    }

    /// Takes the text out of the line, leaving it empty.
    pub fn take(&mut self, engine: &CompletionEngine<'_>) -> String {
        let text = std::mem::take(&mut self.text);
        self.cursor_pos = 0;
        self.refresh_suggestion(engine);
        text
    }

    /// Recomputes the suggestion, e.g. after the command set changed.
    pub(crate) fn refresh_suggestion(&mut self, engine: &CompletionEngine<'_>) {
        self.suggestion = if self.reading {
            None
        } else {
            engine.match_ordered(&self.text).map(str::to_string)
        };
    }

    fn prev_boundary(&self) -> usize {
        self.text[..self.cursor_pos]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }
}
