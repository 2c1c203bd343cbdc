//! Bootstrapper CLI entry point.

use std::process::ExitCode;

use bootstrapper::cli::{Cli, CommandDispatcher};
use bootstrapper::process::is_ci;
use bootstrapper::ui::{create_ui, Verbosity};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
///
/// Logs go to stderr; stdout is reserved for user-facing output.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("bootstrapper=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bootstrapper=info"))
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("Bootstrapper starting with args: {:?}", cli);

    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);

    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    let mut ui = create_ui(!is_ci(), verbosity);

    let project_root = match cli.project_root() {
        Ok(root) => root,
        Err(e) => {
            ui.error(&format!("{:#}", e));
            return ExitCode::from(1);
        }
    };

    let dispatcher = CommandDispatcher::new(project_root, cli.manifest.clone());

    match dispatcher.dispatch(cli.command.as_ref(), ui.as_mut()) {
        Ok(outcome) => outcome.into(),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::from(1)
        }
    }
}
