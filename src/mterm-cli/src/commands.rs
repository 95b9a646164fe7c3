//! Demo commands registered by the host.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use mterm::{Color, Terminal, TerminalCommand};

/// Registers `crash`, `exit`, `ask`, `key` and `color`.
///
/// `quit` is raised by `exit`; the event loop stops on the next iteration.
pub fn register_demo_commands(
    terminal: &Rc<RefCell<Terminal>>,
    quit: &Rc<Cell<bool>>,
) -> mterm::Result<()> {
    let mut t = terminal.borrow_mut();

    t.register(
        TerminalCommand::new("crash", |_, args| {
            anyhow::bail!("{}", args.join(" "))
        })
        .with_description("[message] | Tries to crash the app"),
    )?;

    let quit = Rc::clone(quit);
    t.register(
        TerminalCommand::new("exit", move |_, _| {
            quit.set(true);
            Ok(())
        })
        .with_alias("quit")
        .with_description("Shuts down the app"),
    )?;

    let weak = Rc::downgrade(terminal);
    t.register(
        TerminalCommand::new("ask", move |t, args| {
            ask(t, args, weak.clone());
            Ok(())
        })
        .with_description("[question] | Asks a question and waits for the answer")
        .with_details("The answer is read from the command line without running it as a command."),
    )?;

    let weak = Rc::downgrade(terminal);
    t.register(
        TerminalCommand::new("key", move |t, _| {
            read_key(t, weak.clone());
            Ok(())
        })
        .with_description("Shows the next key press"),
    )?;

    t.register(
        TerminalCommand::new("color", |t, args| {
            let Some(hex) = args.first() else {
                anyhow::bail!("usage: color <#RRGGBB> [text]");
            };
            let color: Color = hex.parse()?;
            let text = if args.len() > 1 {
                args[1..].join(" ")
            } else {
                color.to_hex()
            };
            t.write_line_colored(&text, color);
            Ok(())
        })
        .with_alias("colour")
        .with_description("<#RRGGBB> [text] | Writes text in a color"),
    )?;

    Ok(())
}

fn ask(t: &mut Terminal, args: &[String], terminal: Weak<RefCell<Terminal>>) {
    let question = if args.is_empty() {
        "What is your name?".to_string()
    } else {
        args.join(" ")
    };
    t.write_line_colored(&question, Color::AQUA);

    let answer = t.read_line();
    tokio::task::spawn_local(async move {
        let answer = match answer.await {
            Ok(answer) => answer,
            Err(err) => {
                tracing::debug!(error = %err, "Question was not answered");
                return;
            }
        };
        if let Some(terminal) = terminal.upgrade() {
            let mut t = terminal.borrow_mut();
            t.write_line_colored(&format!("> {}", answer), Color::GRAY);
            t.write_line_colored(&format!("Hello, {}!", answer.trim()), Color::LIGHT_GREEN);
        }
    });
}

fn read_key(t: &mut Terminal, terminal: Weak<RefCell<Terminal>>) {
    t.write_line_colored("Press any key...", Color::AQUA);

    let key = t.read_key();
    tokio::task::spawn_local(async move {
        let Ok(key) = key.await else {
            return;
        };
        if let Some(terminal) = terminal.upgrade() {
            terminal
                .borrow_mut()
                .write_line(&format!("{:?} + {:?}", key.code, key.modifiers));
        }
    });
}
