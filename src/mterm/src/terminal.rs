//! The terminal context.
//!
//! [`Terminal`] owns the command registry, the output buffer, the command
//! line and any pending reads. The host creates one, feeds it key events from
//! its event loop and renders its state. Commands receive `&mut Terminal`.

use std::any::Any;
use std::fmt;
use std::future::Future;
use std::io;
use std::panic::{self, AssertUnwindSafe};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{debug, warn};

use crate::color::Color;
use crate::commands::{CommandParser, CommandRegistry, CompletionEngine, TerminalCommand};
use crate::config::{TerminalConfig, TerminalStyle};
use crate::error::{Result, TerminalError};
use crate::input::CommandLine;
use crate::output::OutputBuffer;
use crate::read::PendingReads;
use crate::window_state::{WindowStateRecord, WindowStateStore};

/// Crate version shown by `help`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================
// TERMINAL
// ============================================================

/// Host-owned terminal: commands, output, input line and reads.
pub struct Terminal {
    config: TerminalConfig,
    registry: CommandRegistry,
    output: OutputBuffer,
    command_line: CommandLine,
    reads: PendingReads,
    window: WindowStateRecord,
    state_store: Option<WindowStateStore>,
}

impl Terminal {
    /// Creates a terminal with the builtin commands registered.
    pub fn new(config: TerminalConfig) -> Result<Self> {
        let output = OutputBuffer::new(config.buffer_capacity)?;
        let command_line = CommandLine::new(config.history_capacity, config.cycle_history)?;

        let state_store = match &config.state_dir {
            Some(dir) => Some(WindowStateStore::with_dir(dir)),
            None => match WindowStateStore::new() {
                Ok(store) => Some(store),
                Err(err) => {
                    warn!(error = %err, "Window state will not be persisted");
                    None
                }
            },
        };

        let window = WindowStateRecord {
            font_size: config.style.font_size,
            ..WindowStateRecord::default()
        };

        Ok(Self {
            config,
            registry: CommandRegistry::default(),
            output,
            command_line,
            reads: PendingReads::default(),
            window,
            state_store,
        })
    }

    pub fn config(&self) -> &TerminalConfig {
        &self.config
    }

    pub fn title(&self) -> &str {
        &self.config.title
    }

    pub fn style(&self) -> &TerminalStyle {
        &self.config.style
    }

    // ------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------

    /// Registers a command. Names and aliases must be unique, ignoring case.
    pub fn register(&mut self, command: TerminalCommand) -> Result<()> {
        self.registry.add(command)?;
        self.refresh_input();
        Ok(())
    }

    /// Removes a command by name or alias.
    pub fn unregister(&mut self, name: &str) -> Option<TerminalCommand> {
        let removed = self.registry.remove(name);
        self.refresh_input();
        removed
    }

    /// Removes exactly this command instance, if registered.
    pub fn unregister_command(&mut self, command: &TerminalCommand) -> bool {
        let removed = self.registry.remove_command(command);
        self.refresh_input();
        removed
    }

    pub fn commands(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Parses and runs an input line as if it were entered.
    ///
    /// Blank input is ignored. Non-blank input is recorded in history and
    /// echoed. Unknown commands and failing actions are reported in the
    /// output; an error is returned only for commands that propagate errors.
    pub fn submit(&mut self, input: &str) -> Result<()> {
        if input.trim().is_empty() {
            return Ok(());
        }

        self.command_line.history_mut().append(input.to_string());

        let echo = if self.is_new_line() {
            input.to_string()
        } else {
            format!("\n{}", input)
        };
        self.write_line_colored(&echo, Color::GRAY);

        let Some(parsed) = CommandParser::parse(input) else {
            return Ok(());
        };

        let Some(command) = self.registry.find(&parsed.name).cloned() else {
            debug!(input, "Unrecognized command");
            self.write_line_colored(
                &format!("Command '{}' is unrecognized.", input),
                Color::INDIAN_RED,
            );
            return Ok(());
        };

        self.execute(&command, input, &parsed.args)
    }

    fn execute(&mut self, command: &TerminalCommand, input: &str, args: &[String]) -> Result<()> {
        debug!(command = command.name(), ?args, "Executing command");

        let action = command.action();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| action(self, args)));

        match outcome {
            Ok(Ok(())) => Ok(()),
            Ok(Err(err)) => {
                warn!(command = command.name(), error = %err, "Command failed");
                self.print_failure(input, &format!("{:?}", err));
                if command.propagates_errors() {
                    return Err(TerminalError::Command {
                        input: input.to_string(),
                        source: err,
                    });
                }
                Ok(())
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                warn!(command = command.name(), panic = %message, "Command panicked");
                self.print_failure(input, &format!("panicked at: {}", message));
                if command.propagates_errors() {
                    panic::resume_unwind(payload);
                }
                Ok(())
            }
        }
    }

    fn print_failure(&mut self, input: &str, details: &str) {
        if !self.is_new_line() {
            self.new_line();
        }
        self.write_line_colored(&format!("'{}' has thrown an exception:", input), Color::ERROR_RED);
        self.write_line_colored(details, Color::INDIAN_RED);
    }

    // ------------------------------------------------------------
    // Output
    // ------------------------------------------------------------

    /// Writes text in the default foreground color.
    pub fn write(&mut self, text: &str) {
        self.output.write(text, None);
    }

    pub fn write_colored(&mut self, text: &str, color: Color) {
        self.output.write(text, Some(color));
    }

    pub fn write_line(&mut self, text: &str) {
        self.output.write(text, None);
        self.output.write("\n", None);
    }

    pub fn write_line_colored(&mut self, text: &str, color: Color) {
        self.output.write(text, Some(color));
        self.output.write("\n", None);
    }

    pub fn new_line(&mut self) {
        self.output.write("\n", None);
    }

    /// Clears the screen.
    pub fn clear(&mut self) {
        self.output.clear();
    }

    /// Removes the last line with content.
    pub fn clear_last_line(&mut self) {
        self.output.clear_last_line();
    }

    /// Currently displayed text.
    pub fn text(&self) -> String {
        self.output.text()
    }

    /// True when the output is empty or ends with a newline.
    pub fn is_new_line(&self) -> bool {
        self.output.is_new_line()
    }

    pub fn output(&self) -> &OutputBuffer {
        &self.output
    }

    pub fn set_buffer_capacity(&mut self, capacity: usize) -> Result<()> {
        self.output.set_capacity(capacity)?;
        self.config.buffer_capacity = capacity;
        Ok(())
    }

    /// Adapter for `write!` that writes in the default color.
    pub fn writer(&mut self) -> TerminalWriter<'_> {
        TerminalWriter {
            terminal: self,
            color: None,
            pending: Vec::new(),
        }
    }

    /// Adapter for `write!` that writes in `color`.
    pub fn writer_colored(&mut self, color: Color) -> TerminalWriter<'_> {
        TerminalWriter {
            terminal: self,
            color: Some(color),
            pending: Vec::new(),
        }
    }

    // ------------------------------------------------------------
    // Input
    // ------------------------------------------------------------

    pub fn command_line(&self) -> &CommandLine {
        &self.command_line
    }

    /// Replaces the command line text.
    pub fn set_input(&mut self, text: &str) {
        self.edit(|line, engine| line.set_text(text, engine));
    }

    /// Inserts pasted text at the cursor. Line breaks become spaces.
    pub fn paste(&mut self, text: &str) {
        let text = text.replace("\r\n", " ").replace(['\r', '\n'], " ");
        self.edit(|line, engine| line.insert_str(&text, engine));
    }

    /// Handles a key event from the host.
    ///
    /// Errors are those returned by [`Terminal::submit`].
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.kind == KeyEventKind::Release {
            return Ok(());
        }
        self.sync_reading();

        if self.reads.has_key() && self.reads.resolve_key(key) {
            self.sync_reading();
            return Ok(());
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);
        let reading = self.command_line.is_reading();

        match key.code {
            KeyCode::Enter => return self.on_enter(),
            KeyCode::Char('+' | '=') if ctrl => self.increase_font_size(),
            KeyCode::Char('-') if ctrl => self.decrease_font_size(),
            KeyCode::Char(_) if ctrl || key.modifiers.contains(KeyModifiers::ALT) => {}
            KeyCode::Char(c) => self.on_char(c),
            KeyCode::Tab | KeyCode::BackTab if reading => {}
            KeyCode::Tab if shift => self.edit(CommandLine::autocomplete_backwards),
            KeyCode::BackTab => self.edit(CommandLine::autocomplete_backwards),
            KeyCode::Tab => self.edit(CommandLine::autocomplete),
            KeyCode::Up => self.edit(CommandLine::history_up),
            KeyCode::Down => self.edit(CommandLine::history_down),
            KeyCode::Backspace => self.edit(CommandLine::backspace),
            KeyCode::Delete => self.edit(CommandLine::delete),
            KeyCode::Left => self.command_line.cursor_left(),
            KeyCode::Right => self.command_line.cursor_right(),
            KeyCode::Home => self.command_line.cursor_home(),
            KeyCode::End => self.command_line.cursor_end(),
            KeyCode::Esc => self.edit(CommandLine::clear),
            _ => {}
        }
        Ok(())
    }

    fn on_enter(&mut self) -> Result<()> {
        if self.reads.has_line() {
            let line = self.take_input();
            self.reads.resolve_line(line);
            self.sync_reading();
            return Ok(());
        }
        if self.reads.resolve_char('\n') {
            self.sync_reading();
            return Ok(());
        }

        let input = self.take_input();
        self.submit(&input)
    }

    fn on_char(&mut self, c: char) {
        if self.reads.resolve_char(c) {
            self.sync_reading();
            return;
        }
        self.edit(|line, engine| line.insert_char(c, engine));
    }

    fn take_input(&mut self) -> String {
        let engine = CompletionEngine::new(&self.registry);
        self.command_line.take(&engine)
    }

    fn edit(&mut self, f: impl FnOnce(&mut CommandLine, &CompletionEngine<'_>)) {
        let engine = CompletionEngine::new(&self.registry);
        f(&mut self.command_line, &engine);
    }

    fn refresh_input(&mut self) {
        self.edit(CommandLine::refresh_suggestion);
    }

    fn sync_reading(&mut self) {
        let reading = self.reads.is_reading_input();
        if reading != self.command_line.is_reading() {
            self.edit(|line, engine| line.set_reading(reading, engine));
        }
    }

    // ------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------

    /// Waits for the next typed character. The character is not inserted.
    ///
    /// A later `read_char` replaces this one, which then resolves to
    /// [`TerminalError::ReadCancelled`]. So does dropping the terminal.
    pub fn read_char(&mut self) -> impl Future<Output = Result<char>> + 'static + use<> {
        let pending = self.reads.request_char();
        self.sync_reading();
        pending
    }

    /// Waits for the next line submitted with Enter. The line is not dispatched.
    pub fn read_line(&mut self) -> impl Future<Output = Result<String>> + 'static + use<> {
        let pending = self.reads.request_line();
        self.sync_reading();
        pending
    }

    /// Waits for the next key press that is not a bare modifier.
    pub fn read_key(&mut self) -> impl Future<Output = Result<KeyEvent>> + 'static + use<> {
        self.reads.request_key()
    }

    /// Cancels every pending read.
    pub fn cancel_reads(&mut self) {
        self.reads.cancel_all();
        self.sync_reading();
    }

    // ------------------------------------------------------------
    // Window state
    // ------------------------------------------------------------

    pub fn window_state(&self) -> &WindowStateRecord {
        &self.window
    }

    /// Updates the tracked geometry, e.g. after a resize.
    pub fn set_window_state(&mut self, record: WindowStateRecord) {
        self.window = record;
    }

    pub fn increase_font_size(&mut self) {
        self.window.increase_font_size();
    }

    pub fn decrease_font_size(&mut self) {
        self.window.decrease_font_size();
    }

    pub fn state_store(&self) -> Option<&WindowStateStore> {
        self.state_store.as_ref()
    }

    /// Replaces the store; `None` disables persistence.
    pub fn set_state_store(&mut self, store: Option<WindowStateStore>) {
        self.state_store = store;
    }

    /// Restores the saved window state. Failures are written to the output.
    ///
    /// Returns true if a saved state was applied.
    pub fn load_window_state(&mut self) -> bool {
        let Some(store) = &self.state_store else {
            return false;
        };

        match store.load(&self.config.title) {
            Ok(Some(record)) => {
                debug!(title = %self.config.title, "Restored window state");
                self.window = record;
                true
            }
            Ok(None) => false,
            Err(err) => {
                warn!(error = %err, "Failed to restore window state");
                self.write_line_colored(
                    &format!("\nCannot restore terminal window settings: '{}'", err),
                    Color::DARK_RED,
                );
                false
            }
        }
    }

    /// Saves the window state. Failures are written to the output.
    pub fn save_window_state(&mut self) -> bool {
        let Some(store) = &self.state_store else {
            return false;
        };

        match store.save(&self.config.title, &self.window) {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, "Failed to save window state");
                self.write_line_colored(
                    &format!("\nCannot save terminal window settings: '{}'", err),
                    Color::DARK_RED,
                );
                false
            }
        }
    }
}

impl fmt::Debug for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Terminal")
            .field("title", &self.config.title)
            .field("commands", &self.registry.len())
            .field("lines", &self.output.line_count())
            .field("input", &self.command_line.text())
            .finish()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Box<dyn Any>".to_string()
    }
}

// ============================================================
// WRITER
// ============================================================

/// Routes `write!` output into a [`Terminal`].
///
/// Byte writes may split a UTF-8 sequence; the incomplete tail is held until
/// the next write and flushed lossily on [`io::Write::flush`] or drop.
pub struct TerminalWriter<'a> {
    terminal: &'a mut Terminal,
    color: Option<Color>,
    pending: Vec<u8>,
}

impl TerminalWriter<'_> {
    fn write_pending(&mut self) {
        loop {
            match std::str::from_utf8(&self.pending) {
                Ok(text) => {
                    self.terminal.output.write(text, self.color);
                    self.pending.clear();
                    return;
                }
                Err(err) => {
                    let valid = err.valid_up_to();
                    if valid > 0 {
                        let text = String::from_utf8_lossy(&self.pending[..valid]).into_owned();
                        self.terminal.output.write(&text, self.color);
                    }
                    match err.error_len() {
                        Some(len) => {
                            self.terminal.output.write("\u{FFFD}", self.color);
                            self.pending.drain(..valid + len);
                        }
                        None => {
                            self.pending.drain(..valid);
                            return;
                        }
                    }
                }
            }
        }
    }

    fn flush_pending(&mut self) {
        if !self.pending.is_empty() {
            let text = String::from_utf8_lossy(&self.pending).into_owned();
            self.terminal.output.write(&text, self.color);
            self.pending.clear();
        }
    }
}

impl fmt::Write for TerminalWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.flush_pending();
        self.terminal.output.write(s, self.color);
        Ok(())
    }
}

impl io::Write for TerminalWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(buf);
        self.write_pending();
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flush_pending();
        Ok(())
    }
}

impl Drop for TerminalWriter<'_> {
    fn drop(&mut self) {
        self.flush_pending();
    }
}

// ============================================================
// TESTS
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window_state::WindowMode;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tempfile::TempDir;

    fn terminal() -> Terminal {
        Terminal::new(TerminalConfig::default()).unwrap()
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(terminal: &mut Terminal, text: &str) {
        for c in text.chars() {
            terminal.handle_key(press(KeyCode::Char(c))).unwrap();
        }
    }

    fn last_color(terminal: &Terminal, needle: &str) -> Option<Color> {
        terminal
            .output()
            .lines()
            .flat_map(|line| line.segments())
            .find(|segment| segment.text.contains(needle))
            .and_then(|segment| segment.color)
    }

    #[test]
    fn test_submit_passes_args() {
        let mut terminal = terminal();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        terminal
            .register(TerminalCommand::new("echo", move |t, args| {
                sink.borrow_mut().extend_from_slice(args);
                t.write_line(&args.join(" "));
                Ok(())
            }))
            .unwrap();

        terminal.submit("ECHO \"a b\" c").unwrap();

        assert_eq!(*seen.borrow(), vec!["a b".to_string(), "c".to_string()]);
        assert_eq!(terminal.text(), "ECHO \"a b\" c\na b c\n");
        assert_eq!(last_color(&terminal, "ECHO"), Some(Color::GRAY));
    }

    #[test]
    fn test_submit_blank_is_ignored() {
        let mut terminal = terminal();
        terminal.submit("   ").unwrap();
        assert_eq!(terminal.text(), "");
        assert!(terminal.command_line().history().is_empty());
    }

    #[test]
    fn test_echo_starts_on_new_line() {
        let mut terminal = terminal();
        terminal.write("partial");
        terminal.submit("cls").unwrap();
        assert_eq!(terminal.text(), "");

        terminal.write("partial");
        terminal.submit("nope").unwrap();
        assert!(terminal.text().starts_with("partial\nnope\n"));
    }

    #[test]
    fn test_unknown_command() {
        let mut terminal = terminal();
        terminal.submit("frobnicate now").unwrap();
        assert!(
            terminal
                .text()
                .contains("Command 'frobnicate now' is unrecognized.")
        );
        assert_eq!(
            last_color(&terminal, "is unrecognized"),
            Some(Color::INDIAN_RED)
        );
        assert_eq!(terminal.command_line().history().len(), 1);
    }

    #[test]
    fn test_failing_command_is_reported() {
        let mut terminal = terminal();
        terminal
            .register(TerminalCommand::new("fail", |_, _| {
                anyhow::bail!("disk on fire")
            }))
            .unwrap();

        terminal.submit("fail now").unwrap();

        let text = terminal.text();
        assert!(text.contains("'fail now' has thrown an exception:"));
        assert!(text.contains("disk on fire"));
        assert_eq!(last_color(&terminal, "has thrown"), Some(Color::ERROR_RED));
    }

    #[test]
    fn test_failing_command_propagates() {
        let mut terminal = terminal();
        terminal
            .register(
                TerminalCommand::new("fail", |_, _| anyhow::bail!("disk on fire"))
                    .propagate_errors(true),
            )
            .unwrap();

        let err = terminal.submit("fail").unwrap_err();
        assert!(matches!(&err, TerminalError::Command { input, .. } if input == "fail"));
        assert!(terminal.text().contains("disk on fire"));
    }

    #[test]
    fn test_panicking_command_is_caught() {
        let mut terminal = terminal();
        terminal
            .register(TerminalCommand::new("crash", |_, _| panic!("kaboom")))
            .unwrap();

        terminal.submit("crash").unwrap();
        assert!(terminal.text().contains("kaboom"));
    }

    #[test]
    #[should_panic(expected = "kaboom")]
    fn test_panicking_command_propagates() {
        let mut terminal = terminal();
        terminal
            .register(TerminalCommand::new("crash", |_, _| panic!("kaboom")).propagate_errors(true))
            .unwrap();
        let _ = terminal.submit("crash");
    }

    #[test]
    fn test_enter_submits_and_records_history() {
        let mut terminal = terminal();
        terminal.write_line("before");
        type_text(&mut terminal, "cls");
        terminal.handle_key(press(KeyCode::Enter)).unwrap();

        assert_eq!(terminal.text(), "");
        assert_eq!(terminal.command_line().text(), "");

        terminal.handle_key(press(KeyCode::Up)).unwrap();
        assert_eq!(terminal.command_line().text(), "cls");
    }

    #[test]
    fn test_tab_autocompletes() {
        let mut terminal = terminal();
        type_text(&mut terminal, "he");
        assert_eq!(terminal.command_line().suggestion(), Some("help"));

        terminal.handle_key(press(KeyCode::Tab)).unwrap();
        assert_eq!(terminal.command_line().text(), "help");

        terminal.handle_key(press(KeyCode::BackTab)).unwrap();
        assert_eq!(terminal.command_line().text(), "cls");
    }

    #[test]
    fn test_register_refreshes_suggestion() {
        let mut terminal = terminal();
        type_text(&mut terminal, "dep");
        assert_eq!(terminal.command_line().suggestion(), None);

        terminal.register(TerminalCommand::noop("deploy")).unwrap();
        assert_eq!(terminal.command_line().suggestion(), Some("deploy"));

        assert!(terminal.unregister("DEPLOY").is_some());
        assert_eq!(terminal.command_line().suggestion(), None);
    }

    #[test]
    fn test_release_events_ignored() {
        let mut terminal = terminal();
        let mut key = press(KeyCode::Char('x'));
        key.kind = KeyEventKind::Release;
        terminal.handle_key(key).unwrap();
        assert_eq!(terminal.command_line().text(), "");
    }

    #[test]
    fn test_ctrl_plus_changes_font_size() {
        let mut terminal = terminal();
        let before = terminal.window_state().font_size;
        terminal
            .handle_key(KeyEvent::new(KeyCode::Char('+'), KeyModifiers::CONTROL))
            .unwrap();
        assert_eq!(terminal.window_state().font_size, before + 2.0);
        assert_eq!(terminal.command_line().text(), "");
    }

    #[tokio::test]
    async fn test_read_line_does_not_dispatch() {
        let mut terminal = terminal();
        let pending = terminal.read_line();
        assert!(terminal.command_line().is_reading());

        type_text(&mut terminal, "cls");
        assert_eq!(terminal.command_line().suggestion(), None);
        terminal.write_line("kept");
        terminal.handle_key(press(KeyCode::Enter)).unwrap();

        assert_eq!(pending.await.unwrap(), "cls");
        assert_eq!(terminal.text(), "kept\n");
        assert!(terminal.command_line().history().is_empty());
        assert!(!terminal.command_line().is_reading());
    }

    #[tokio::test]
    async fn test_read_char_consumes_char() {
        let mut terminal = terminal();
        let pending = terminal.read_char();
        terminal.handle_key(press(KeyCode::Char('y'))).unwrap();

        assert_eq!(pending.await.unwrap(), 'y');
        assert_eq!(terminal.command_line().text(), "");
    }

    #[tokio::test]
    async fn test_read_key_skips_modifiers() {
        let mut terminal = terminal();
        let pending = terminal.read_key();

        terminal
            .handle_key(KeyEvent::new(
                KeyCode::Modifier(crossterm::event::ModifierKeyCode::LeftControl),
                KeyModifiers::CONTROL,
            ))
            .unwrap();
        let key = KeyEvent::new(KeyCode::F(5), KeyModifiers::NONE);
        terminal.handle_key(key).unwrap();

        assert_eq!(pending.await.unwrap(), key);
    }

    #[tokio::test]
    async fn test_read_futures_outlive_terminal_borrow() {
        let mut terminal = terminal();
        let line = tokio::spawn(terminal.read_line());
        let key = tokio::spawn(terminal.read_key());

        terminal.handle_key(press(KeyCode::F(2))).unwrap();
        type_text(&mut terminal, "ok");
        terminal.handle_key(press(KeyCode::Enter)).unwrap();

        assert_eq!(key.await.unwrap().unwrap().code, KeyCode::F(2));
        assert_eq!(line.await.unwrap().unwrap(), "ok");
    }

    #[tokio::test]
    async fn test_dropping_terminal_cancels_reads() {
        let mut terminal = terminal();
        let pending = terminal.read_line();
        drop(terminal);
        assert!(matches!(pending.await, Err(TerminalError::ReadCancelled)));
    }

    #[test]
    fn test_writer() {
        let mut terminal = terminal();
        {
            use std::fmt::Write as _;
            write!(terminal.writer(), "{}+{}", 1, 2).unwrap();
            writeln!(terminal.writer_colored(Color::AQUA), " = 3").unwrap();
        }
        {
            use std::io::Write as _;
            terminal.writer().write_all(b"bytes").unwrap();
        }

        assert_eq!(terminal.text(), "1+2 = 3\nbytes");
        assert_eq!(last_color(&terminal, "= 3"), Some(Color::AQUA));
    }

    #[test]
    fn test_writer_joins_split_utf8() {
        use std::io::Write as _;
        let mut terminal = terminal();
        let bytes = "é€".as_bytes();
        {
            let mut writer = terminal.writer();
            writer.write_all(&bytes[..1]).unwrap();
            writer.write_all(&bytes[1..3]).unwrap();
            writer.write_all(&bytes[3..]).unwrap();
        }
        assert_eq!(terminal.text(), "é€");
    }

    #[test]
    fn test_writer_replaces_invalid_bytes() {
        use std::io::Write as _;
        let mut terminal = terminal();
        {
            let mut writer = terminal.writer();
            writer.write_all(b"a\xFFb").unwrap();
            // Truncated sequence is emitted when the writer goes away.
            writer.write_all(&"é".as_bytes()[..1]).unwrap();
        }
        assert_eq!(terminal.text(), "a\u{FFFD}b\u{FFFD}");
    }

    #[test]
    fn test_window_state_round_trip() {
        let temp = TempDir::new().unwrap();
        let config = TerminalConfig::default()
            .with_title("Round Trip")
            .with_state_dir(temp.path());

        let mut terminal = Terminal::new(config.clone()).unwrap();
        assert!(!terminal.load_window_state());
        terminal.set_window_state(WindowStateRecord {
            width: 1000.0,
            window_state: WindowMode::Maximized,
            ..WindowStateRecord::default()
        });
        terminal.increase_font_size();
        assert!(terminal.save_window_state());

        let mut restored = Terminal::new(config).unwrap();
        assert!(restored.load_window_state());
        assert_eq!(restored.window_state(), terminal.window_state());
    }

    #[test]
    fn test_corrupt_window_state_is_reported() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("MTerminal.json"), "garbage").unwrap();

        let mut terminal =
            Terminal::new(TerminalConfig::default().with_state_dir(temp.path())).unwrap();
        assert!(!terminal.load_window_state());
        assert!(
            terminal
                .text()
                .contains("Cannot restore terminal window settings")
        );
        assert_eq!(
            last_color(&terminal, "Cannot restore"),
            Some(Color::DARK_RED)
        );
    }
}
