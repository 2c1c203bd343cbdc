//! Run command implementation.
//!
//! The `bootstrapper run` command (also the default) drives the full
//! bootstrap sequence.

use std::path::{Path, PathBuf};

use crate::bootstrap::{default_context, Bootstrapper};
use crate::error::Result;
use crate::manifest;
use crate::ui::{hints, UserInterface};

use super::dispatcher::{Command, CommandOutcome};

/// The run command implementation.
pub struct RunCommand {
    project_root: PathBuf,
    manifest: Option<PathBuf>,
}

impl RunCommand {
    /// Create a new run command.
    pub fn new(project_root: &Path, manifest: Option<&Path>) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            manifest: manifest.map(Path::to_path_buf),
        }
    }
}

impl Command for RunCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandOutcome> {
        let loaded = match manifest::load(&self.project_root, self.manifest.as_deref()) {
            Ok(loaded) => loaded,
            Err(e) => {
                ui.error(&e.to_string());
                ui.show_hint(hints::after_manifest_error());
                return Ok(CommandOutcome::Failure);
            }
        };
        tracing::debug!("Loaded manifest from {}", loaded.origin.label());

        let ctx = default_context();
        let bootstrapper = Bootstrapper::new(&loaded, &self.project_root, &ctx)?;

        match bootstrapper.run(ui) {
            Ok(()) => Ok(CommandOutcome::Success),
            Err(e) => {
                tracing::debug!("Run failed: {:?}", e);
                ui.error(&e.to_string());
                if let Some(hint) = hints::after_failed_run(&e, &loaded.manifest) {
                    ui.show_hint(&hint);
                }
                Ok(CommandOutcome::Failure)
            }
        }
    }
}
