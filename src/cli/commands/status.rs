//! Status command implementation.
//!
//! The `bootstrapper status` command reports what a run would have to
//! install or create, without changing anything.

use std::path::{Path, PathBuf};

use crate::bootstrap::{default_context, BootstrapStatus, Bootstrapper};
use crate::cli::args::StatusArgs;
use crate::error::{BootstrapError, Result};
use crate::manifest;
use crate::ui::{hints, UserInterface};

use super::dispatcher::{Command, CommandOutcome};

/// The status command implementation.
pub struct StatusCommand {
    project_root: PathBuf,
    manifest: Option<PathBuf>,
    args: StatusArgs,
}

impl StatusCommand {
    /// Create a new status command.
    pub fn new(project_root: &Path, manifest: Option<&Path>, args: StatusArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            manifest: manifest.map(Path::to_path_buf),
            args,
        }
    }
}

impl Command for StatusCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandOutcome> {
        let loaded = match manifest::load(&self.project_root, self.manifest.as_deref()) {
            Ok(loaded) => loaded,
            Err(e) => {
                ui.error(&e.to_string());
                ui.show_hint(hints::after_manifest_error());
                return Ok(CommandOutcome::Failure);
            }
        };

        let ctx = default_context();
        let status = Bootstrapper::new(&loaded, &self.project_root, &ctx)?.status();

        if self.args.json {
            let json = serde_json::to_string_pretty(&status)
                .map_err(|e| BootstrapError::Other(e.into()))?;
            println!("{}", json);
        } else {
            render(&status, ui);
        }

        Ok(CommandOutcome::from_ok(status.is_ready()))
    }
}

/// Print a human-readable status report.
pub fn render(status: &BootstrapStatus, ui: &mut dyn UserInterface) {
    ui.show_header(&format!("{} - Status", status.app_name));

    let runtime = &status.runtime;
    match (runtime.present, &runtime.version) {
        (true, Some(version)) => ui.success(&format!("{} {}", runtime.name, version)),
        (true, None) => ui.success(&format!("{} (version unknown)", runtime.name)),
        (false, _) if runtime.installable => ui.warning(&format!(
            "{} not found (will be installed from the pinned installer)",
            runtime.name
        )),
        (false, _) => ui.warning(&format!(
            "{} not found (`{}` is not on PATH)",
            runtime.name, runtime.command
        )),
    }

    for dep in &status.dependencies {
        if dep.present {
            ui.success(&dep.name);
        } else {
            ui.warning(&format!("{} not installed", dep.name));
        }
    }

    if status.payload.present {
        ui.success(&format!("{} present", status.payload.path.display()));
    } else {
        ui.warning(&format!(
            "{} not created yet",
            status.payload.path.display()
        ));
    }

    if status.is_ready() {
        ui.success("Ready to launch");
    } else {
        ui.show_hint(hints::status_not_ready());
    }
}
