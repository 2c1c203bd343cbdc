//! Stage outcome and status report types.
//!
//! Each stage produces a [`StageOutcome`] on success; failures are the
//! stage-specific variants of [`crate::error::BootstrapError`].
//! [`BootstrapStatus`] is the side-effect-free snapshot the `status`
//! command reports.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// One gated step of the bootstrap sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Runtime,
    Dependencies,
    Script,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Runtime => "runtime",
            Stage::Dependencies => "dependencies",
            Stage::Script => "script",
        };
        f.write_str(name)
    }
}

/// Successful result of a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageOutcome {
    /// Nothing needed doing.
    AlreadySatisfied,
    /// Something was installed or created.
    Applied,
}

/// Runtime presence snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct RuntimeStatus {
    /// Display name.
    pub name: String,
    /// Executable queried.
    pub command: String,
    /// Whether the version query succeeded.
    pub present: bool,
    /// Version reported by the runtime, if recognizable.
    pub version: Option<String>,
    /// Whether a pinned installer is configured.
    pub installable: bool,
}

/// Dependency presence snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct DependencyStatus {
    /// Package name.
    pub name: String,
    /// Whether the package query succeeded.
    pub present: bool,
}

/// Payload script presence snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct PayloadStatus {
    /// Absolute path of the script.
    pub path: PathBuf,
    /// Whether a file exists there.
    pub present: bool,
}

/// Snapshot of every stage's precondition.
#[derive(Debug, Clone, Serialize)]
pub struct BootstrapStatus {
    pub app_name: String,
    pub runtime: RuntimeStatus,
    pub dependencies: Vec<DependencyStatus>,
    pub payload: PayloadStatus,
}

impl BootstrapStatus {
    /// Whether a run would perform no installation or creation.
    pub fn is_ready(&self) -> bool {
        self.runtime.present
            && self.dependencies.iter().all(|d| d.present)
            && self.payload.present
    }

    /// Names of dependencies not currently present.
    pub fn missing_dependencies(&self) -> Vec<&str> {
        self.dependencies
            .iter()
            .filter(|d| !d.present)
            .map(|d| d.name.as_str())
            .collect()
    }
}
