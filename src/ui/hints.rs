//! Contextual hint generation.
//!
//! Suggests the logical next action after a failed run or an incomplete
//! status report.

use crate::error::BootstrapError;
use crate::manifest::Manifest;

/// Hint after the manifest could not be loaded.
pub fn after_manifest_error() -> &'static str {
    "Fix the manifest, then run `bootstrapper status` to check it."
}

/// Hint after `status` found something missing.
pub fn status_not_ready() -> &'static str {
    "Run `bootstrapper` to install what is missing."
}

/// Hint after a run failed with `err`.
pub fn after_failed_run(err: &BootstrapError, manifest: &Manifest) -> Option<String> {
    match err {
        BootstrapError::RuntimeUnavailable { runtime, .. } => {
            if manifest.runtime.installer.is_some() {
                Some(format!(
                    "Check runtime.installer.url and sha256, or install {} manually and re-run.",
                    runtime
                ))
            } else {
                Some(format!(
                    "Install {} and make sure `{}` is on PATH, or pin an installer under runtime.installer.",
                    runtime, manifest.runtime.command
                ))
            }
        }
        BootstrapError::DependencyUnavailable { missing } => Some(format!(
            "Try `{} {} {}` yourself to see why it fails.",
            manifest.packages.manager,
            manifest.packages.install_args.join(" "),
            missing.join(" ")
        )),
        BootstrapError::WriteFailed { .. } => {
            Some("Check that the directory exists and is writable.".to_string())
        }
        BootstrapError::ManifestNotFound { .. }
        | BootstrapError::ManifestParseError { .. }
        | BootstrapError::ManifestValidationError { .. } => {
            Some(after_manifest_error().to_string())
        }
        _ => None,
    }
}
