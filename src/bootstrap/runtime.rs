//! Runtime detection and installation.

use super::{Bootstrapper, StageOutcome};
use crate::error::{BootstrapError, Result};
use crate::fetch::verify_sha256;
use crate::manifest::InstallerConfig;
use crate::process::{CommandResult, Invocation};
use crate::ui::UserInterface;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static VERSION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.\d+(?:\.\d+)?").expect("VERSION_REGEX must compile"));

/// Extract a dotted version number from a version query's output.
pub fn parse_version(result: &CommandResult) -> Option<String> {
    VERSION_REGEX
        .find(&result.stdout)
        .or_else(|| VERSION_REGEX.find(&result.stderr))
        .map(|m| m.as_str().to_string())
}

impl Bootstrapper<'_> {
    fn version_query(&self) -> Invocation {
        let runtime = &self.manifest().runtime;
        Invocation::new(&runtime.command)
            .args(&runtime.version_args)
            .current_dir(&self.work_dir)
            .captured()
    }

    /// Run the version query, returning its output when it exits 0.
    pub(super) fn query_runtime(&self) -> Option<CommandResult> {
        match (self.ctx.run_command)(&self.version_query()) {
            Ok(result) if result.success => {
                tracing::debug!(
                    "{} reports: {}",
                    self.manifest().runtime.command,
                    result.stdout.trim()
                );
                Some(result)
            }
            Ok(result) => {
                tracing::debug!(
                    "{} version query exited with {:?}",
                    self.manifest().runtime.command,
                    result.exit_code
                );
                None
            }
            Err(e) => {
                tracing::debug!("{}", e);
                None
            }
        }
    }

    /// Whether the runtime answers its version query with status 0.
    pub fn check_runtime_present(&self) -> bool {
        self.query_runtime().is_some()
    }

    /// The runtime's reported version, if it is present and recognizable.
    pub fn runtime_version(&self) -> Option<String> {
        self.query_runtime().as_ref().and_then(parse_version)
    }

    /// Make sure the runtime is present, installing it if a pinned
    /// installer is configured.
    ///
    /// The outcome depends only on the presence re-check after the install
    /// attempt. Download, verification and installer failures are logged and
    /// folded into the `RuntimeUnavailable` reason.
    pub fn ensure_runtime_installed(&self, ui: &mut dyn UserInterface) -> Result<StageOutcome> {
        let runtime = &self.manifest().runtime;

        if self.check_runtime_present() {
            ui.success(&format!(
                "{} is already installed, skipping installation",
                runtime.name
            ));
            return Ok(StageOutcome::AlreadySatisfied);
        }

        let Some(installer) = &runtime.installer else {
            return Err(BootstrapError::RuntimeUnavailable {
                runtime: runtime.name.clone(),
                reason: format!(
                    "'{}' was not found and no installer is configured",
                    runtime.command
                ),
            });
        };

        ui.warning(&format!("{} not found, installing", runtime.name));
        let failure = self.install_runtime(installer, ui);

        if self.check_runtime_present() {
            ui.success(&format!("{} installed", runtime.name));
            return Ok(StageOutcome::Applied);
        }

        Err(BootstrapError::RuntimeUnavailable {
            runtime: runtime.name.clone(),
            reason: failure.unwrap_or_else(|| {
                format!("'{}' is still not found after installing", runtime.command)
            }),
        })
    }

    /// Download, verify, run and delete the installer artifact.
    ///
    /// Returns the first failure encountered, if any.
    fn install_runtime(
        &self,
        installer: &InstallerConfig,
        ui: &mut dyn UserInterface,
    ) -> Option<String> {
        let name = &self.manifest().runtime.name;
        let artifact = self.work_dir.join(installer.artifact_name());

        let mut spinner = ui.start_spinner(&format!("Downloading {} installer", name));
        let downloaded = (self.ctx.download)(&installer.url, &artifact);
        match &downloaded {
            Ok(()) => spinner.finish_success(&format!("Downloaded {}", installer.artifact_name())),
            Err(e) => {
                tracing::warn!("{}", e);
                spinner.finish_error(&e.to_string());
            }
        }

        let failure = match verify_sha256(&artifact, &installer.sha256) {
            Ok(()) => self.run_installer(&artifact, installer, ui),
            Err(e) => {
                let reason = match downloaded {
                    Err(download_error) => download_error.to_string(),
                    Ok(()) => e.to_string(),
                };
                tracing::warn!("Not running installer: {}", reason);
                ui.error(&format!("Installer rejected: {}", e));
                Some(reason)
            }
        };

        remove_artifact(&artifact);
        failure
    }

    fn run_installer(
        &self,
        artifact: &Path,
        installer: &InstallerConfig,
        ui: &mut dyn UserInterface,
    ) -> Option<String> {
        if let Err(e) = make_executable(artifact) {
            tracing::warn!("Could not mark {} executable: {}", artifact.display(), e);
        }

        ui.message(&format!(
            "Running {} installer...",
            self.manifest().runtime.name
        ));
        let invocation = Invocation::new(artifact.to_string_lossy())
            .args(&installer.args)
            .current_dir(&self.work_dir);
        ui.detail(&invocation.to_string());

        match (self.ctx.run_command)(&invocation) {
            Ok(result) if result.success => None,
            Ok(result) => {
                let e = BootstrapError::CommandFailed {
                    command: invocation.to_string(),
                    code: result.exit_code,
                };
                tracing::warn!("{}", e);
                Some(e.to_string())
            }
            Err(e) => {
                tracing::warn!("{}", e);
                Some(e.to_string())
            }
        }
    }
}

fn remove_artifact(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => tracing::debug!("Removed {}", path.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!("Could not remove {}: {}", path.display(), e),
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
