//! The bootstrap sequence.
//!
//! A run is four gated stages, each of which must succeed before the next
//! starts:
//!
//! 1. runtime ([`Bootstrapper::ensure_runtime_installed`])
//! 2. dependencies ([`Bootstrapper::ensure_dependencies_installed`])
//! 3. payload script ([`Bootstrapper::ensure_payload_script_exists`])
//! 4. execution ([`Bootstrapper::run_payload_script`])
//!
//! Every external effect goes through a [`BootstrapContext`].

pub mod context;
pub mod dependencies;
pub mod payload;
pub mod runtime;
pub mod status;

#[cfg(test)]
pub(crate) mod fake;

pub use context::{default_context, BootstrapContext};
pub use status::{
    BootstrapStatus, DependencyStatus, PayloadStatus, RuntimeStatus, Stage, StageOutcome,
};

use crate::error::{BootstrapError, Result};
use crate::manifest::{LoadedManifest, Manifest};
use crate::ui::UserInterface;
use std::path::{Path, PathBuf};

/// Drives the bootstrap stages for one manifest in one working directory.
pub struct Bootstrapper<'a> {
    loaded: &'a LoadedManifest,
    work_dir: PathBuf,
    ctx: &'a BootstrapContext<'a>,
}

impl<'a> Bootstrapper<'a> {
    /// Create a bootstrapper rooted at `work_dir`.
    ///
    /// A relative `work_dir` is resolved against the current directory.
    pub fn new(
        loaded: &'a LoadedManifest,
        work_dir: &Path,
        ctx: &'a BootstrapContext<'a>,
    ) -> Result<Self> {
        let work_dir = std::path::absolute(work_dir)?;
        Ok(Self {
            loaded,
            work_dir,
            ctx,
        })
    }

    /// The manifest driving this run.
    pub fn manifest(&self) -> &Manifest {
        &self.loaded.manifest
    }

    /// Absolute working directory.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Run every stage in order, then launch the payload.
    ///
    /// Returns `Ok(())` only when the payload exits with status 0. A
    /// non-zero or missing exit status is `ExecutionFailed`.
    pub fn run(&self, ui: &mut dyn UserInterface) -> Result<()> {
        let app = &self.manifest().app_name;
        ui.show_header(&format!("{} Installer", app));

        traced(Stage::Runtime, self.ensure_runtime_installed(ui))?;
        traced(Stage::Dependencies, self.ensure_dependencies_installed(ui))?;

        ui.message(&format!("Setting up {}...", app));
        traced(Stage::Script, self.ensure_payload_script_exists(ui))?;

        ui.message(&format!("Starting {}...", app));
        ui.detail(&self.payload_invocation().to_string());
        match self.run_payload_script()? {
            Some(0) => {
                tracing::info!("{} exited successfully", app);
                Ok(())
            }
            code => Err(BootstrapError::ExecutionFailed { code }),
        }
    }

    /// Check every stage's precondition without changing anything.
    pub fn status(&self) -> BootstrapStatus {
        let manifest = self.manifest();
        let query = self.query_runtime();
        let present = query.is_some();
        let version = query.as_ref().and_then(runtime::parse_version);

        BootstrapStatus {
            app_name: manifest.app_name.clone(),
            runtime: RuntimeStatus {
                name: manifest.runtime.name.clone(),
                command: manifest.runtime.command.clone(),
                present,
                version,
                installable: manifest.runtime.installer.is_some(),
            },
            dependencies: manifest
                .packages
                .names
                .iter()
                .map(|name| DependencyStatus {
                    name: name.clone(),
                    present: self.check_dependency_present(name),
                })
                .collect(),
            payload: PayloadStatus {
                path: self.payload_path(),
                present: self.payload_path().exists(),
            },
        }
    }
}

fn traced(stage: Stage, result: Result<StageOutcome>) -> Result<StageOutcome> {
    match &result {
        Ok(outcome) => tracing::debug!("{} stage finished: {:?}", stage, outcome),
        Err(e) => tracing::debug!("{} stage failed: {}", stage, e),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::fake::{manifest_with_installer, manifest_without_installer, FakeSystem};
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    const ALL: &[&str] = &["python", "pandas", "tkcalendar", "matplotlib"];

    fn run_once(system: &FakeSystem, loaded: &LoadedManifest, dir: &Path) -> (Result<()>, MockUI) {
        let mut ui = MockUI::new();
        let result = system.with_context(|ctx| {
            let bootstrapper = Bootstrapper::new(loaded, dir, ctx).unwrap();
            bootstrapper.run(&mut ui)
        });
        (result, ui)
    }

    #[test]
    fn everything_present_is_idempotent() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("taskmanv1.py"), "print('hi')\n").unwrap();
        let system = FakeSystem::with_installed(ALL);
        let loaded = manifest_with_installer();

        let (first, ui) = run_once(&system, &loaded, temp.path());
        let (second, _) = run_once(&system, &loaded, temp.path());

        assert!(first.is_ok());
        assert!(second.is_ok());
        assert!(system.install_actions().is_empty());
        assert!(system.downloads.borrow().is_empty());
        assert_eq!(
            fs::read_to_string(temp.path().join("taskmanv1.py")).unwrap(),
            "print('hi')\n"
        );
        let payload_runs = system
            .commands()
            .iter()
            .filter(|c| c.ends_with("taskmanv1.py"))
            .count();
        assert_eq!(payload_runs, 2);
        assert_eq!(ui.headers(), &["Finance Tracker Installer".to_string()]);
        assert!(ui.has_message("Starting Finance Tracker..."));
    }

    #[test]
    fn all_absent_installs_everything_then_executes() {
        let temp = TempDir::new().unwrap();
        let system = FakeSystem::new();
        let loaded = manifest_with_installer();

        let (result, ui) = run_once(&system, &loaded, temp.path());

        assert!(result.is_ok(), "{:?}", result);
        assert_eq!(system.downloads.borrow().len(), 1);
        for name in ALL {
            assert!(system.is_installed(name), "{} not installed", name);
        }
        assert!(temp.path().join("taskmanv1.py").is_file());
        assert!(!temp.path().join(fake::ARTIFACT_NAME).exists());
        assert_eq!(
            system.commands().last().unwrap(),
            &format!("python {}", temp.path().join("taskmanv1.py").display())
        );
        assert!(ui.has_success("Python installed"));
        assert!(ui.has_detail("PrependPath=1"));
        assert!(ui.has_detail("pip install matplotlib"));
        assert!(ui.has_detail(&format!(
            "python {}",
            temp.path().join("taskmanv1.py").display()
        )));
    }

    #[test]
    fn partial_dependencies_installs_only_missing() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("taskmanv1.py"), "print('hi')\n").unwrap();
        let system = FakeSystem::with_installed(&["python", "tkcalendar"]);
        let loaded = manifest_with_installer();

        let (result, ui) = run_once(&system, &loaded, temp.path());

        assert!(result.is_ok());
        assert_eq!(
            system.install_actions(),
            vec!["pip install pandas", "pip install matplotlib"]
        );
        assert!(system.downloads.borrow().is_empty());
        assert!(ui.has_success("tkcalendar is already installed"));
        assert!(ui.has_success("taskmanv1.py already exists"));
    }

    #[test]
    fn missing_runtime_stops_before_dependencies() {
        let temp = TempDir::new().unwrap();
        let system = FakeSystem::new();
        let loaded = manifest_without_installer();

        let (result, _) = run_once(&system, &loaded, temp.path());

        assert!(matches!(
            result,
            Err(BootstrapError::RuntimeUnavailable { .. })
        ));
        assert!(system.commands().iter().all(|c| !c.starts_with("pip")));
        assert!(!temp.path().join("taskmanv1.py").exists());
    }

    #[test]
    fn write_failure_prevents_execution() {
        let temp = TempDir::new().unwrap();
        let system = FakeSystem::with_installed(ALL);
        let mut loaded = manifest_with_installer();
        loaded.manifest.payload.path = PathBuf::from("missing_dir/taskmanv1.py");

        let (result, _) = run_once(&system, &loaded, temp.path());

        assert!(matches!(result, Err(BootstrapError::WriteFailed { .. })));
        assert!(system
            .commands()
            .iter()
            .all(|c| !c.ends_with("taskmanv1.py")));
    }

    #[test]
    fn nonzero_payload_exit_is_execution_failed() {
        let temp = TempDir::new().unwrap();
        let system = FakeSystem::with_installed(ALL);
        system.payload_exit.set(Some(3));
        let loaded = manifest_with_installer();

        let (result, _) = run_once(&system, &loaded, temp.path());

        assert!(matches!(
            result,
            Err(BootstrapError::ExecutionFailed { code: Some(3) })
        ));
    }

    #[test]
    fn signal_terminated_payload_is_execution_failed() {
        let temp = TempDir::new().unwrap();
        let system = FakeSystem::with_installed(ALL);
        system.payload_exit.set(None);
        let loaded = manifest_with_installer();

        let (result, _) = run_once(&system, &loaded, temp.path());

        assert!(matches!(
            result,
            Err(BootstrapError::ExecutionFailed { code: None })
        ));
    }

    #[test]
    fn status_reports_without_side_effects() {
        let temp = TempDir::new().unwrap();
        let system = FakeSystem::with_installed(&["python", "pandas"]);
        let loaded = manifest_with_installer();

        let status = system.with_context(|ctx| {
            Bootstrapper::new(&loaded, temp.path(), ctx)
                .unwrap()
                .status()
        });

        assert!(status.runtime.present);
        assert_eq!(status.runtime.version.as_deref(), Some("3.9.7"));
        assert!(status.runtime.installable);
        assert_eq!(
            status.missing_dependencies(),
            vec!["tkcalendar", "matplotlib"]
        );
        assert!(!status.payload.present);
        assert!(!status.is_ready());
        assert!(system.install_actions().is_empty());
        assert!(!temp.path().join("taskmanv1.py").exists());
    }

    #[test]
    fn new_makes_work_dir_absolute() {
        let system = FakeSystem::new();
        let loaded = manifest_with_installer();
        system.with_context(|ctx| {
            let bootstrapper = Bootstrapper::new(&loaded, Path::new("."), ctx).unwrap();
            assert!(bootstrapper.work_dir().is_absolute());
        });
    }
}
