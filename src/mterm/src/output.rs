//! Scrollback buffer of colored text.
//!
//! The buffer is a list of lines, each made of colored segments. The last
//! line is the one currently being written to; an empty last line means the
//! next write starts on a new line. The line capacity excludes that trailing
//! open line.

use std::collections::VecDeque;

use crate::color::Color;
use crate::error::{Result, TerminalError};

/// A run of text with one color. `None` renders with the default foreground.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub color: Option<Color>,
}

/// One line of output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    segments: Vec<Segment>,
}

impl Line {
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.iter().all(|s| s.text.is_empty())
    }

    /// Plain text of the line.
    pub fn text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    fn push(&mut self, text: &str, color: Option<Color>) {
        if text.is_empty() {
            return;
        }
        match self.segments.last_mut() {
            Some(last) if last.color == color => last.text.push_str(text),
            _ => self.segments.push(Segment {
                text: text.to_string(),
                color,
            }),
        }
    }
}

/// Bounded scrollback buffer.
#[derive(Debug, Clone)]
pub struct OutputBuffer {
    lines: VecDeque<Line>,
    capacity: usize,
}

impl OutputBuffer {
    /// Default number of retained lines.
    pub const DEFAULT_CAPACITY: usize = 300;

    /// Creates an empty buffer retaining at most `capacity` lines.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(TerminalError::InvalidCapacity(capacity));
        }
        Ok(Self {
            lines: VecDeque::new(),
            capacity,
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Changes the capacity, dropping the oldest lines if needed.
    pub fn set_capacity(&mut self, capacity: usize) -> Result<()> {
        if capacity == 0 {
            return Err(TerminalError::InvalidCapacity(capacity));
        }
        self.capacity = capacity;
        self.trim();
        Ok(())
    }

    /// Appends text; `\n` starts a new line.
    pub fn write(&mut self, text: &str, color: Option<Color>) {
        if text.is_empty() {
            return;
        }
        let text = text.replace("\r\n", "\n");
        let mut parts = text.split('\n');

        if let Some(first) = parts.next() {
            self.current_line().push(first, color);
        }
        for part in parts {
            let mut line = Line::default();
            line.push(part, color);
            self.lines.push_back(line);
        }

        self.trim();
    }

    /// Removes everything.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Removes the last written line. A trailing line break ends that line,
    /// so `"a\n\n"` loses its blank second line and becomes `"a\n"`.
    pub fn clear_last_line(&mut self) {
        if self.lines.back().is_some_and(Line::is_empty) {
            self.lines.pop_back();
        }
        self.lines.pop_back();
        if !self.lines.is_empty() {
            self.lines.push_back(Line::default());
        }
    }

    /// True when the next write starts on a fresh line.
    pub fn is_new_line(&self) -> bool {
        self.lines.back().is_none_or(Line::is_empty)
    }

    /// Plain text of the whole buffer, lines joined by `\n`.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(Line::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// All lines, including a trailing empty line after a newline.
    pub fn lines(&self) -> impl DoubleEndedIterator<Item = &Line> + ExactSizeIterator {
        self.lines.iter()
    }

    /// Number of completed or partial lines with content.
    pub fn line_count(&self) -> usize {
        let open = usize::from(self.lines.back().is_some_and(Line::is_empty));
        self.lines.len() - open
    }

    fn current_line(&mut self) -> &mut Line {
        if self.lines.is_empty() {
            self.lines.push_back(Line::default());
        }
        // Non-empty by construction above.
        let last = self.lines.len() - 1;
        &mut self.lines[last]
    }

    fn trim(&mut self) {
        while self.line_count() > self.capacity {
            self.lines.pop_front();
        }
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self {
            lines: VecDeque::new(),
            capacity: Self::DEFAULT_CAPACITY,
        }
    }
}
