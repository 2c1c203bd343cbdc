//! Manifest schema definitions.
//!
//! The manifest declares everything the bootstrap sequence needs: the
//! runtime and how to install it, the packages to ensure, and the payload
//! script to materialize and launch.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root manifest structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Name shown in the banner.
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// The runtime the payload runs on.
    pub runtime: RuntimeConfig,

    /// Packages the payload imports.
    #[serde(default)]
    pub packages: PackagesConfig,

    /// The payload script.
    pub payload: PayloadConfig,
}

fn default_app_name() -> String {
    "Application".to_string()
}

/// Runtime detection and installation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuntimeConfig {
    /// Display name (e.g., "Python").
    pub name: String,

    /// Executable resolved on PATH (e.g., "python").
    pub command: String,

    /// Arguments for the presence/version query.
    #[serde(default = "default_version_args")]
    pub version_args: Vec<String>,

    /// Where to fetch the runtime installer from, if it can be installed.
    #[serde(default)]
    pub installer: Option<InstallerConfig>,
}

fn default_version_args() -> Vec<String> {
    vec!["--version".to_string()]
}

/// A pinned runtime installer artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstallerConfig {
    /// HTTP(S) URL of the installer.
    pub url: String,

    /// Expected SHA-256 of the downloaded artifact (hex).
    pub sha256: String,

    /// Local file name for the downloaded artifact.
    #[serde(default)]
    pub file_name: Option<String>,

    /// Arguments for an unattended install.
    #[serde(default)]
    pub args: Vec<String>,
}

impl InstallerConfig {
    /// The file name the artifact is saved under.
    ///
    /// Falls back to the last path segment of the URL, then to
    /// `runtime_installer`.
    pub fn artifact_name(&self) -> String {
        if let Some(name) = &self.file_name {
            return name.clone();
        }

        let path = self
            .url
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim_end_matches('/');

        match path.rsplit_once('/') {
            Some((scheme_host, last)) if !last.is_empty() && !scheme_host.ends_with('/') => {
                last.to_string()
            }
            _ => "runtime_installer".to_string(),
        }
    }
}

/// Package manager commands and the package list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackagesConfig {
    /// Package manager executable (e.g., "pip").
    #[serde(default = "default_manager")]
    pub manager: String,

    /// Arguments preceding the package name for a presence query.
    #[serde(default = "default_check_args")]
    pub check_args: Vec<String>,

    /// Arguments preceding the package name for an install.
    #[serde(default = "default_install_args")]
    pub install_args: Vec<String>,

    /// Package names, checked and installed in order.
    #[serde(default)]
    pub names: Vec<String>,
}

impl Default for PackagesConfig {
    fn default() -> Self {
        Self {
            manager: default_manager(),
            check_args: default_check_args(),
            install_args: default_install_args(),
            names: Vec::new(),
        }
    }
}

fn default_manager() -> String {
    "pip".to_string()
}

fn default_check_args() -> Vec<String> {
    vec!["show".to_string()]
}

fn default_install_args() -> Vec<String> {
    vec!["install".to_string()]
}

/// Payload script location and content source.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PayloadConfig {
    /// Path of the script, relative to the working directory.
    pub path: PathBuf,

    /// Name of an embedded asset holding the script content.
    #[serde(default)]
    pub asset: Option<String>,

    /// File holding the script content, relative to the manifest.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

/// Where payload content comes from once validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadSource {
    /// Embedded asset by name.
    Asset(String),
    /// File on disk.
    File(PathBuf),
}

impl PayloadConfig {
    /// The configured content source, if exactly one is set.
    pub fn source(&self) -> Option<PayloadSource> {
        match (&self.asset, &self.file) {
            (Some(asset), None) => Some(PayloadSource::Asset(asset.clone())),
            (None, Some(file)) => Some(PayloadSource::File(file.clone())),
            _ => None,
        }
    }
}
