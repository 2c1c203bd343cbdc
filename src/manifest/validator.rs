//! Manifest validation rules.
//!
//! This module validates a manifest before any stage runs:
//! - Runtime and package manager commands must be set
//! - Package names must be non-empty, whitespace-free and unique
//! - An installer must carry an http(s) URL and a SHA-256 pin
//! - The payload path must stay inside the working directory
//! - The payload must name exactly one content source

use crate::error::{BootstrapError, Result};
use crate::fetch::is_sha256_hex;
use crate::manifest::assets;
use crate::manifest::schema::{Manifest, PayloadSource};
use crate::process::is_bare_file_name;
use std::collections::HashSet;
use std::path::{Component, Path};

/// One violated rule.
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Validate a manifest and return all errors.
///
/// Collects every violation rather than stopping at the first one.
pub fn validate_manifest(manifest: &Manifest) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    errors.extend(validate_runtime(manifest));
    errors.extend(validate_packages(manifest));
    errors.extend(validate_payload(manifest));

    errors
}

fn validate_runtime(manifest: &Manifest) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let runtime = &manifest.runtime;

    if runtime.command.trim().is_empty() {
        errors.push(ValidationError::new("runtime.command must not be empty"));
    }

    if let Some(installer) = &runtime.installer {
        if !(installer.url.starts_with("https://") || installer.url.starts_with("http://")) {
            errors.push(ValidationError::new(format!(
                "runtime.installer.url '{}' must be an http(s) URL",
                installer.url
            )));
        }

        if !is_sha256_hex(installer.sha256.trim()) {
            errors.push(ValidationError::new(
                "runtime.installer.sha256 must be a 64-character hex SHA-256 digest",
            ));
        }

        let artifact = installer.artifact_name();
        if !is_bare_file_name(&artifact) {
            let origin = if installer.file_name.is_some() {
                "runtime.installer.file_name"
            } else {
                "the file name taken from runtime.installer.url"
            };
            errors.push(ValidationError::new(format!(
                "{} '{}' must be a plain file name",
                origin, artifact
            )));
        }
    }

    errors
}

fn validate_packages(manifest: &Manifest) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let packages = &manifest.packages;

    if !packages.names.is_empty() && packages.manager.trim().is_empty() {
        errors.push(ValidationError::new("packages.manager must not be empty"));
    }

    let mut seen = HashSet::new();
    for name in &packages.names {
        if name.trim().is_empty() {
            errors.push(ValidationError::new("packages.names must not contain empty names"));
        } else if name.contains(char::is_whitespace) {
            errors.push(ValidationError::new(format!(
                "Package name '{}' must not contain whitespace",
                name
            )));
        } else if !seen.insert(name.as_str()) {
            errors.push(ValidationError::new(format!(
                "Package '{}' is listed more than once",
                name
            )));
        }
    }

    errors
}

fn validate_payload(manifest: &Manifest) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let payload = &manifest.payload;

    if payload.path.as_os_str().is_empty() {
        errors.push(ValidationError::new("payload.path must not be empty"));
    } else if !stays_inside(&payload.path) {
        errors.push(ValidationError::new(format!(
            "payload.path '{}' must be relative to the working directory without '..'",
            payload.path.display()
        )));
    }

    match payload.source() {
        Some(PayloadSource::Asset(name)) => {
            if assets::payload_asset(&name).is_none() {
                errors.push(ValidationError::new(format!(
                    "payload.asset '{}' is not embedded (available: {})",
                    name,
                    assets::payload_asset_names().join(", ")
                )));
            }
        }
        Some(PayloadSource::File(_)) => {}
        None => errors.push(ValidationError::new(
            "payload must set exactly one of 'asset' or 'file'",
        )),
    }

    errors
}

fn stays_inside(path: &Path) -> bool {
    path.components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
        && path.components().any(|c| matches!(c, Component::Normal(_)))
}

/// Validate and return Result (for convenience).
///
/// # Errors
///
/// Returns `ManifestValidationError` if any validation rules fail.
pub fn validate(manifest: &Manifest) -> Result<()> {
    let errors = validate_manifest(manifest);

    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(BootstrapError::ManifestValidationError {
            message: messages.join("; "),
        })
    }
}
