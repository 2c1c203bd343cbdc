//! Payload script materialization and launch.

use super::{Bootstrapper, StageOutcome};
use crate::error::{BootstrapError, Result};
use crate::process::Invocation;
use crate::ui::UserInterface;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

impl Bootstrapper<'_> {
    /// Absolute path of the payload script.
    pub fn payload_path(&self) -> PathBuf {
        self.work_dir.join(&self.manifest().payload.path)
    }

    /// Write the payload script unless a file already exists at its path.
    ///
    /// An existing file is never opened for writing. Parent directories are
    /// not created.
    pub fn ensure_payload_script_exists(
        &self,
        ui: &mut dyn UserInterface,
    ) -> Result<StageOutcome> {
        let path = self.payload_path();
        let display = self.manifest().payload.path.display();

        if path.exists() {
            ui.success(&format!("{} already exists, skipping creation", display));
            return Ok(StageOutcome::AlreadySatisfied);
        }

        let content = self.loaded.payload_bytes(&self.work_dir)?;

        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                tracing::debug!("{} appeared before it could be created", path.display());
                ui.success(&format!("{} already exists, skipping creation", display));
                return Ok(StageOutcome::AlreadySatisfied);
            }
            Err(source) => return Err(BootstrapError::WriteFailed { path, source }),
        };

        if let Err(source) = file.write_all(&content).and_then(|()| file.flush()) {
            return Err(BootstrapError::WriteFailed { path, source });
        }

        tracing::debug!("Wrote {} bytes to {}", content.len(), path.display());
        ui.success(&format!("Created {}", display));
        Ok(StageOutcome::Applied)
    }

    /// `<runtime> <absolute payload path>`, run from the working directory.
    pub fn payload_invocation(&self) -> Invocation {
        Invocation::new(&self.manifest().runtime.command)
            .arg(self.payload_path().to_string_lossy())
            .current_dir(&self.work_dir)
    }

    /// Launch the payload with the runtime and wait for it to exit.
    ///
    /// Standard streams are inherited. Returns the exit code, or `None` when
    /// the script was terminated by a signal.
    pub fn run_payload_script(&self) -> Result<Option<i32>> {
        let result = (self.ctx.run_command)(&self.payload_invocation())?;
        tracing::debug!("Payload exited with {:?}", result.exit_code);
        Ok(result.exit_code)
    }
}
