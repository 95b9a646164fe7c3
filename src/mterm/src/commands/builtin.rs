//! Builtin command registration.
//!
//! Every terminal starts with `help` and `clear` (alias `cls`).

use tracing::warn;

use super::registry::CommandRegistry;
use super::types::TerminalCommand;
use crate::color::Color;
use crate::terminal::{Terminal, VERSION};

const HELP_DETAILS: &str = "Shows short info if no arguments were entered.\n\
    Specify a command name to see detailed info about it.\n\
    With a '-full' argument detailed info about all commands will be shown.";

/// Registers the builtin commands in the registry.
pub fn register_builtin_commands(registry: &mut CommandRegistry) {
    let builtins = [
        TerminalCommand::new("help", print_help)
            .with_description("Shows information about Terminal and available commands.")
            .with_details(HELP_DETAILS),
        TerminalCommand::new("clear", |terminal, _| {
            terminal.clear();
            Ok(())
        })
        .with_alias("cls")
        .with_description("Clears the Terminal screen."),
    ];

    for command in builtins {
        let name = command.name().to_string();
        if let Err(err) = registry.add(command) {
            warn!(command = %name, error = %err, "Builtin command not registered");
        }
    }
}

/// Prints general help, or detailed info for commands matching the first argument.
fn print_help(terminal: &mut Terminal, args: &[String]) -> anyhow::Result<()> {
    let commands = terminal.commands().commands().to_vec();

    if !terminal.is_new_line() {
        terminal.new_line();
    }

    let Some(query) = args.first() else {
        print_general_help(terminal, &commands);
        return Ok(());
    };

    if args.iter().any(|a| a == "-full") {
        print_full_info(terminal, &commands);
        return Ok(());
    }

    let by_name: Vec<_> = commands
        .iter()
        .filter(|c| c.name().starts_with(query.as_str()))
        .cloned()
        .collect();
    if !by_name.is_empty() {
        print_full_info(terminal, &by_name);
        return Ok(());
    }

    let by_alias: Vec<_> = commands
        .iter()
        .filter(|c| c.aliases().iter().any(|a| a.starts_with(query.as_str())))
        .cloned()
        .collect();
    if !by_alias.is_empty() {
        print_full_info(terminal, &by_alias);
        return Ok(());
    }

    terminal.write_line("No matching commands found.");
    Ok(())
}

fn print_general_help(terminal: &mut Terminal, commands: &[TerminalCommand]) {
    terminal.write_line_colored(&format!("MTerminal - {}\n", VERSION), Color::LIGHT_GRAY);

    if commands.is_empty() {
        terminal.write_line("No commands have been added.");
        return;
    }

    let longest = commands
        .iter()
        .map(|c| c.name().len() + 2 + c.aliases().join(" / ").len())
        .max()
        .unwrap_or(0);
    let column = longest.max(8) + 3;

    terminal.write_line(&format!(
        "{:<column$}|  <Description - [] is optional parameter>",
        "<Command>"
    ));
    terminal.write_line(&format!("{}\n", "_".repeat(40)));

    for cmd in commands {
        terminal.write_colored(&format!("{:<column$}", cmd.to_string()), Color::LIGHT_GRAY);
        terminal.write_line(&format!("|  {}", cmd.description()));
    }

    terminal.write_line(&"_".repeat(40));
}

fn print_full_info(terminal: &mut Terminal, commands: &[TerminalCommand]) {
    for cmd in commands {
        print_command_detailed(terminal, cmd);

        if commands.len() > 1 {
            terminal.write_line(&format!("{}\n", "_".repeat(30)));
        }
    }
}

fn print_command_detailed(terminal: &mut Terminal, cmd: &TerminalCommand) {
    terminal.write_colored(&format!("{}: ", cmd), Color::LIGHT_GREEN);

    let description = cmd.description().trim();
    let details = cmd.details().trim();

    if description.is_empty() && details.is_empty() {
        terminal.write_line_colored("\n<No description>", Color::DARK_GRAY);
        return;
    }

    if description.is_empty() {
        terminal.new_line();
    } else {
        terminal.write_line_colored(description, Color::DARK_GRAY);
    }

    if !details.is_empty() {
        terminal.write_line_colored("  Details:", Color::LIGHT_GRAY);
        terminal.write_line_colored(&format!("  {}", details), Color::DARK_GRAY);
    }
}
