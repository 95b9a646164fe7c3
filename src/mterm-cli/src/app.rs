//! Event loop hosting the terminal.

use std::cell::{Cell, RefCell};
use std::io::{Stdout, stdout};
use std::rc::Rc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, Event, EventStream, KeyCode, KeyEvent,
    KeyEventKind, KeyModifiers,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode,
};
use futures::StreamExt;
use mterm::{Color, Terminal, TerminalConfig};
use ratatui::backend::CrosstermBackend;
use tracing::{debug, error, info};

use crate::commands::register_demo_commands;
use crate::ui;

/// Redraw interval; lets output written by background tasks show up.
const TICK: Duration = Duration::from_millis(50);

/// Raw mode plus alternate screen, restored on drop.
struct Tui {
    terminal: ratatui::Terminal<CrosstermBackend<Stdout>>,
}

impl Tui {
    fn enter(title: &str) -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            EnableBracketedPaste,
            SetTitle(title)
        )?;

        let mut terminal = ratatui::Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.clear()?;
        Ok(Self { terminal })
    }

    fn draw(&mut self, terminal: &Terminal) -> Result<()> {
        self.terminal.draw(|frame| ui::render(frame, terminal))?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            DisableBracketedPaste,
            LeaveAlternateScreen
        );
        let _ = self.terminal.show_cursor();
    }
}

/// Runs the demo until `exit` or Ctrl+C. Must run inside a `LocalSet`.
pub async fn run(config: TerminalConfig, persist_state: bool) -> Result<()> {
    let mut terminal = Terminal::new(config)?;
    if !persist_state {
        terminal.set_state_store(None);
    }
    terminal.load_window_state();

    terminal.write_line_colored("Writing to a Terminal", Color::AQUA);
    terminal.write_line_colored("Writing to a Terminal", Color::INDIAN_RED);
    terminal.write_line("Type 'help' for the list of commands. Ctrl+C quits.");

    let title = terminal.title().to_string();
    let terminal = Rc::new(RefCell::new(terminal));
    let quit = Rc::new(Cell::new(false));
    register_demo_commands(&terminal, &quit)?;

    info!(title = %title, "Starting terminal");
    let mut tui = Tui::enter(&title)?;
    if let Ok(size) = tui.terminal.size() {
        on_resize(&terminal, size.width, size.height);
    }

    let mut events = EventStream::new();
    let mut tick = tokio::time::interval(TICK);

    while !quit.get() {
        tui.draw(&terminal.borrow())?;

        tokio::select! {
            maybe_event = events.next() => match maybe_event {
                Some(Ok(event)) => handle_event(&terminal, &quit, event),
                Some(Err(err)) => {
                    error!(error = %err, "Failed to read terminal event");
                    return Err(err.into());
                }
                None => break,
            },
            _ = tick.tick() => {}
        }
    }

    drop(tui);
    info!("Shutting down");

    let mut terminal = terminal.borrow_mut();
    terminal.cancel_reads();
    terminal.save_window_state();
    Ok(())
}

fn handle_event(terminal: &Rc<RefCell<Terminal>>, quit: &Cell<bool>, event: Event) {
    match event {
        Event::Key(key) if is_quit_key(&key) => quit.set(true),
        Event::Key(key) => {
            // Commands run inside this borrow and must not borrow the Rc again.
            if let Err(err) = terminal.borrow_mut().handle_key(key) {
                error!(error = %err, "Command failed");
            }
        }
        Event::Paste(text) => terminal.borrow_mut().paste(&text),
        Event::Resize(width, height) => on_resize(terminal, width, height),
        other => debug!(event = ?other, "Ignored event"),
    }
}

fn is_quit_key(key: &KeyEvent) -> bool {
    key.kind == KeyEventKind::Press
        && key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
}

/// Tracks the screen size in columns and rows.
fn on_resize(terminal: &Rc<RefCell<Terminal>>, width: u16, height: u16) {
    let mut t = terminal.borrow_mut();
    let mut state = *t.window_state();
    state.width = f64::from(width);
    state.height = f64::from(height);
    t.set_window_state(state);
}
