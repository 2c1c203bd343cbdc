//! Error types for bootstrap operations.
//!
//! This module defines [`BootstrapError`], the primary error type used
//! throughout the installer, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Each bootstrap stage fails with its own variant so diagnostics can name
//!   the stage that stopped the run
//! - Use `anyhow::Error` (via `BootstrapError::Other`) for unexpected errors
//! - Every variant is fatal for the run and maps to exit status 1

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for bootstrap operations.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Manifest file not found at the requested location.
    #[error("Manifest not found: {path}")]
    ManifestNotFound { path: PathBuf },

    /// Failed to parse the manifest.
    #[error("Failed to parse manifest at {path}: {message}")]
    ManifestParseError { path: PathBuf, message: String },

    /// Manifest structure or values are invalid.
    #[error("Invalid manifest: {message}")]
    ManifestValidationError { message: String },

    /// The runtime is missing and could not be installed.
    #[error("Runtime '{runtime}' is unavailable: {reason}")]
    RuntimeUnavailable { runtime: String, reason: String },

    /// One or more dependencies are missing after the install attempt.
    #[error("Dependencies unavailable: {}", .missing.join(", "))]
    DependencyUnavailable { missing: Vec<String> },

    /// The payload script could not be written.
    #[error("Failed to write payload script {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The payload script exited unsuccessfully.
    #[error("Payload script failed with exit code {}", exit_code_label(.code))]
    ExecutionFailed { code: Option<i32> },

    /// Downloaded artifact does not match its pinned digest.
    #[error("Checksum mismatch for {path}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    /// Installer artifact download failed.
    #[error("Download of {url} failed: {message}")]
    DownloadFailed { url: String, message: String },

    /// A process could not be spawned or waited on.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn exit_code_label(code: &Option<i32>) -> String {
    match code {
        Some(c) => c.to_string(),
        None => "none (terminated by signal)".to_string(),
    }
}

/// Result type alias for bootstrap operations.
pub type Result<T> = std::result::Result<T, BootstrapError>;
