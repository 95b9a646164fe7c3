//! Bounded input history with a traversal cursor.
//!
//! [`History`] keeps the last `capacity` entries. Appending resets the cursor
//! to the past-the-end position, from which [`History::previous`] yields the
//! newest entry and [`History::next`] yields the oldest. Moving beyond either
//! end wraps around in cyclic mode and sticks to the boundary otherwise.

use std::collections::VecDeque;

use crate::error::{Result, TerminalError};

/// Fixed-capacity list of previously entered items.
#[derive(Debug, Clone)]
pub struct History<T> {
    items: VecDeque<T>,
    capacity: usize,
    /// `None` is the past-the-end position.
    cursor: Option<usize>,
    cyclic: bool,
}

impl<T> History<T> {
    /// Creates an empty history holding at most `capacity` items.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(TerminalError::InvalidCapacity(capacity));
        }
        Ok(Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
            cursor: None,
            cyclic: true,
        })
    }

    /// Sets whether traversal wraps around at both ends.
    pub fn with_cyclic(mut self, cyclic: bool) -> Self {
        self.cyclic = cyclic;
        self
    }

    pub fn set_cyclic(&mut self, cyclic: bool) {
        self.cyclic = cyclic;
    }

    pub fn is_cyclic(&self) -> bool {
        self.cyclic
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Current traversal position, `None` when past the end.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Appends an item, evicting the oldest one when full.
    pub fn append(&mut self, item: T) {
        if self.items.len() >= self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(item);
        self.cursor = None;
    }

    /// Moves the cursor one step back and returns the item there.
    pub fn previous(&mut self) -> Result<&T> {
        let last = self.last_index()?;
        let index = match self.cursor {
            None => last,
            Some(0) if self.cyclic => last,
            Some(0) => 0,
            Some(i) => i - 1,
        };
        self.cursor = Some(index);
        Ok(&self.items[index])
    }

    /// Moves the cursor one step forward and returns the item there.
    pub fn next(&mut self) -> Result<&T> {
        let last = self.last_index()?;
        let index = match self.cursor {
            None => 0,
            Some(i) if i >= last && self.cyclic => 0,
            Some(i) if i >= last => last,
            Some(i) => i + 1,
        };
        self.cursor = Some(index);
        Ok(&self.items[index])
    }

    /// Returns the item at `index` (0 is the oldest).
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Iterates from the oldest to the newest item.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    /// Removes every item and resets the cursor.
    pub fn clear(&mut self) {
        self.items.clear();
        self.cursor = None;
    }

    fn last_index(&self) -> Result<usize> {
        self.items.len().checked_sub(1).ok_or(TerminalError::EmptyHistory)
    }
}
