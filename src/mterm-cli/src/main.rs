//! MTerm demo host.
//!
//! Runs an [`mterm::Terminal`] full-screen with a few demo commands:
//! - `app` - event loop and screen setup
//! - `ui` - rendering
//! - `commands` - demo commands
//! - `cli` / `logging` - arguments and file logging

use anyhow::Result;
use clap::Parser;

mod app;
mod cli;
mod commands;
mod logging;
mod ui;

use cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_path = cli
        .log_file
        .clone()
        .unwrap_or_else(logging::default_log_path);
    let _log_guard = logging::setup_file_logging(&log_path, cli.log_level)?;

    let config = cli.terminal_config()?;

    logging::install_panic_hook();
    let local = tokio::task::LocalSet::new();
    let result = local.run_until(app::run(config, !cli.no_state)).await;
    // Back to the default hook once the screen is restored.
    drop(std::panic::take_hook());

    if let Err(err) = &result {
        tracing::error!(error = ?err, "Terminal exited with an error");
    }
    result
}
