//! Routing from parsed arguments to command implementations.

use std::path::PathBuf;
use std::process::ExitCode;

use crate::cli::args::Commands;
use crate::error::Result;
use crate::ui::UserInterface;

use super::completions::CompletionsCommand;
use super::run::RunCommand;
use super::status::StatusCommand;

/// A CLI subcommand.
pub trait Command {
    /// Run the command. `Err` is reserved for failures the command could
    /// not report through `ui` itself.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandOutcome>;
}

/// How a command ended. Maps to exit status 0 or 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Success,
    Failure,
}

impl CommandOutcome {
    /// `Success` when `ok`, else `Failure`.
    pub fn from_ok(ok: bool) -> Self {
        if ok {
            Self::Success
        } else {
            Self::Failure
        }
    }

    pub fn exit_code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Failure => 1,
        }
    }
}

impl From<CommandOutcome> for ExitCode {
    fn from(outcome: CommandOutcome) -> Self {
        ExitCode::from(outcome.exit_code())
    }
}

/// Holds the global options every command shares.
pub struct CommandDispatcher {
    project_root: PathBuf,
    manifest: Option<PathBuf>,
}

impl CommandDispatcher {
    pub fn new(project_root: PathBuf, manifest: Option<PathBuf>) -> Self {
        Self {
            project_root,
            manifest,
        }
    }

    /// Execute `command`; no subcommand means `run`.
    pub fn dispatch(
        &self,
        command: Option<&Commands>,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandOutcome> {
        let manifest = self.manifest.as_deref();
        match command {
            None | Some(Commands::Run) => RunCommand::new(&self.project_root, manifest).execute(ui),
            Some(Commands::Status(args)) => {
                StatusCommand::new(&self.project_root, manifest, args.clone()).execute(ui)
            }
            Some(Commands::Completions(args)) => CompletionsCommand::new(args.clone()).execute(ui),
        }
    }
}
