//! Pending input reads.
//!
//! Each read kind has at most one waiter. The waiter holds the receiving half
//! of a oneshot channel; the terminal keeps the sender and completes it from
//! the next matching input event. Dropping a sender (replacement, cancel, or
//! dropping the terminal) resolves the waiter with [`TerminalError::ReadCancelled`].

use std::future::Future;

use crossterm::event::{KeyCode, KeyEvent};
use tokio::sync::oneshot;

use crate::error::{Result, TerminalError};

#[derive(Debug, Default)]
pub(crate) struct PendingReads {
    char_tx: Option<oneshot::Sender<char>>,
    line_tx: Option<oneshot::Sender<String>>,
    key_tx: Option<oneshot::Sender<KeyEvent>>,
}

impl PendingReads {
    pub fn request_char(&mut self) -> impl Future<Output = Result<char>> + 'static + use<> {
        let (tx, rx) = oneshot::channel();
        self.char_tx = Some(tx);
        receive(rx)
    }

    pub fn request_line(&mut self) -> impl Future<Output = Result<String>> + 'static + use<> {
        let (tx, rx) = oneshot::channel();
        self.line_tx = Some(tx);
        receive(rx)
    }

    pub fn request_key(&mut self) -> impl Future<Output = Result<KeyEvent>> + 'static + use<> {
        let (tx, rx) = oneshot::channel();
        self.key_tx = Some(tx);
        receive(rx)
    }

    /// True if a character or line read is waiting on the command line.
    pub fn is_reading_input(&mut self) -> bool {
        self.has_char() || self.has_line()
    }

    pub fn has_char(&mut self) -> bool {
        prune(&mut self.char_tx)
    }

    pub fn has_line(&mut self) -> bool {
        prune(&mut self.line_tx)
    }

    pub fn has_key(&mut self) -> bool {
        prune(&mut self.key_tx)
    }

    /// Completes a pending character read. Returns false if none was waiting.
    pub fn resolve_char(&mut self, c: char) -> bool {
        self.char_tx.take().is_some_and(|tx| tx.send(c).is_ok())
    }

    /// Completes a pending line read. Returns false if none was waiting.
    pub fn resolve_line(&mut self, line: String) -> bool {
        self.line_tx.take().is_some_and(|tx| tx.send(line).is_ok())
    }

    /// Completes a pending key read. Bare modifier keys never resolve it.
    pub fn resolve_key(&mut self, key: KeyEvent) -> bool {
        if is_modifier_only(&key) {
            return false;
        }
        self.key_tx.take().is_some_and(|tx| tx.send(key).is_ok())
    }

    /// Drops every waiter.
    pub fn cancel_all(&mut self) {
        self.char_tx = None;
        self.line_tx = None;
        self.key_tx = None;
    }
}

fn receive<T>(rx: oneshot::Receiver<T>) -> impl Future<Output = Result<T>> + 'static
where
    T: 'static,
{
    async move { rx.await.map_err(|_| TerminalError::ReadCancelled) }
}

/// Forgets a sender whose receiver is gone. Returns whether one is still live.
fn prune<T>(tx: &mut Option<oneshot::Sender<T>>) -> bool {
    if tx.as_ref().is_some_and(oneshot::Sender::is_closed) {
        *tx = None;
    }
    tx.is_some()
}

fn is_modifier_only(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Modifier(_))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyModifiers, ModifierKeyCode};

    #[tokio::test]
    async fn test_line_read_resolves() {
        let mut reads = PendingReads::default();
        let pending = reads.request_line();
        assert!(reads.has_line());
        assert!(reads.resolve_line("hello".to_string()));
        assert_eq!(pending.await.unwrap(), "hello");
        assert!(!reads.has_line());
    }

    #[tokio::test]
    async fn test_second_request_cancels_first() {
        let mut reads = PendingReads::default();
        let first = reads.request_char();
        let second = reads.request_char();
        reads.resolve_char('y');
        assert!(matches!(first.await, Err(TerminalError::ReadCancelled)));
        assert_eq!(second.await.unwrap(), 'y');
    }

    #[tokio::test]
    async fn test_modifier_keys_ignored() {
        let mut reads = PendingReads::default();
        let pending = reads.request_key();

        let shift = KeyEvent::new(
            KeyCode::Modifier(ModifierKeyCode::LeftShift),
            KeyModifiers::SHIFT,
        );
        assert!(!reads.resolve_key(shift));

        let key = KeyEvent::new(KeyCode::Char('k'), KeyModifiers::CONTROL);
        assert!(reads.resolve_key(key));
        assert_eq!(pending.await.unwrap(), key);
    }

    #[tokio::test]
    async fn test_cancel_all() {
        let mut reads = PendingReads::default();
        let pending = reads.request_line();
        reads.cancel_all();
        assert!(matches!(pending.await, Err(TerminalError::ReadCancelled)));
        assert!(!reads.is_reading_input());
    }

    #[test]
    fn test_dropped_waiter_is_pruned() {
        let mut reads = PendingReads::default();
        drop(reads.request_char());
        assert!(!reads.has_char());
        assert!(!reads.resolve_char('x'));
    }
}
