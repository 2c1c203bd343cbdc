//! Package presence checks and installation.

use super::{Bootstrapper, StageOutcome};
use crate::error::{BootstrapError, Result};
use crate::process::Invocation;
use crate::ui::UserInterface;

impl Bootstrapper<'_> {
    /// Whether the package manager reports `name` as installed.
    pub fn check_dependency_present(&self, name: &str) -> bool {
        let packages = &self.manifest().packages;
        let query = Invocation::new(&packages.manager)
            .args(&packages.check_args)
            .arg(name)
            .current_dir(&self.work_dir)
            .captured();
        self.ctx.check(&query)
    }

    /// Install every configured package that is not already present.
    ///
    /// All packages are attempted even after a failure. The stage succeeds
    /// only if every package is present afterwards.
    pub fn ensure_dependencies_installed(
        &self,
        ui: &mut dyn UserInterface,
    ) -> Result<StageOutcome> {
        let mut missing = Vec::new();
        let mut installed_any = false;

        for name in &self.manifest().packages.names {
            if self.check_dependency_present(name) {
                ui.success(&format!("{} is already installed, skipping", name));
                continue;
            }

            ui.message(&format!("Installing {}...", name));
            self.install_dependency(name, ui);

            if self.check_dependency_present(name) {
                ui.success(&format!("{} installed", name));
                installed_any = true;
            } else {
                ui.warning(&format!("Failed to install {}", name));
                missing.push(name.clone());
            }
        }

        if !missing.is_empty() {
            return Err(BootstrapError::DependencyUnavailable { missing });
        }

        Ok(if installed_any {
            StageOutcome::Applied
        } else {
            StageOutcome::AlreadySatisfied
        })
    }

    fn install_dependency(&self, name: &str, ui: &mut dyn UserInterface) {
        let packages = &self.manifest().packages;
        let install = Invocation::new(&packages.manager)
            .args(&packages.install_args)
            .arg(name)
            .current_dir(&self.work_dir);
        ui.detail(&install.to_string());

        match (self.ctx.run_command)(&install) {
            Ok(result) if result.success => {}
            Ok(result) => tracing::warn!("'{}' exited with {:?}", install, result.exit_code),
            Err(e) => tracing::warn!("{}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::fake::{manifest_with_installer, FakeSystem};
    use super::*;
    use crate::ui::MockUI;
    use tempfile::TempDir;

    fn ensure(system: &FakeSystem, ui: &mut MockUI) -> Result<StageOutcome> {
        let temp = TempDir::new().unwrap();
        let loaded = manifest_with_installer();
        system.with_context(|ctx| {
            Bootstrapper::new(&loaded, temp.path(), ctx)
                .unwrap()
                .ensure_dependencies_installed(ui)
        })
    }

    #[test]
    fn check_uses_manager_and_check_args() {
        let temp = TempDir::new().unwrap();
        let system = FakeSystem::with_installed(&["pandas"]);
        let loaded = manifest_with_installer();

        let (pandas, numpy) = system.with_context(|ctx| {
            let b = Bootstrapper::new(&loaded, temp.path(), ctx).unwrap();
            (
                b.check_dependency_present("pandas"),
                b.check_dependency_present("numpy"),
            )
        });

        assert!(pandas);
        assert!(!numpy);
        assert_eq!(system.commands(), vec!["pip show pandas", "pip show numpy"]);
        assert!(system.invocations.borrow().iter().all(|i| i.capture));
    }

    #[test]
    fn all_present_is_already_satisfied() {
        let system = FakeSystem::with_installed(&["pandas", "tkcalendar", "matplotlib"]);
        let mut ui = MockUI::new();

        let outcome = ensure(&system, &mut ui).unwrap();

        assert_eq!(outcome, StageOutcome::AlreadySatisfied);
        assert!(system.install_actions().is_empty());
        assert!(ui.has_success("matplotlib is already installed"));
    }

    #[test]
    fn installs_missing_in_order() {
        let system = FakeSystem::with_installed(&["tkcalendar"]);
        let mut ui = MockUI::new();

        let outcome = ensure(&system, &mut ui).unwrap();

        assert_eq!(outcome, StageOutcome::Applied);
        assert_eq!(
            system.install_actions(),
            vec!["pip install pandas", "pip install matplotlib"]
        );
        assert!(ui.has_message("Installing pandas..."));
        assert!(ui.has_success("pandas installed"));
    }

    #[test]
    fn install_output_is_not_captured() {
        let system = FakeSystem::new();
        let mut ui = MockUI::new();

        ensure(&system, &mut ui).unwrap();

        let invocations = system.invocations.borrow();
        let install = invocations
            .iter()
            .find(|i| i.args.first().map(String::as_str) == Some("install"))
            .unwrap();
        assert!(!install.capture);
    }

    #[test]
    fn failure_attempts_every_package_and_names_missing() {
        let system = FakeSystem::new();
        system
            .broken_packages
            .borrow_mut()
            .insert("tkcalendar".to_string());
        let mut ui = MockUI::new();

        let err = ensure(&system, &mut ui).unwrap_err();

        match err {
            BootstrapError::DependencyUnavailable { missing } => {
                assert_eq!(missing, vec!["tkcalendar"])
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(system.install_actions().len(), 3);
        assert!(system.is_installed("pandas"));
        assert!(system.is_installed("matplotlib"));
        assert!(ui.has_warning("Failed to install tkcalendar"));
    }

    #[test]
    fn succeeds_iff_all_present_afterwards() {
        for broken in [None, Some("pandas")] {
            let system = FakeSystem::new();
            if let Some(name) = broken {
                system.broken_packages.borrow_mut().insert(name.to_string());
            }
            let mut ui = MockUI::new();

            let result = ensure(&system, &mut ui);
            let all_present = ["pandas", "tkcalendar", "matplotlib"]
                .iter()
                .all(|n| system.is_installed(n));

            assert_eq!(result.is_ok(), all_present);
        }
    }
}
