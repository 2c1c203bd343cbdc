//! Manifest discovery and loading.
//!
//! Resolution order (first match wins):
//! 1. An explicit path (`--manifest` or `BOOTSTRAPPER_MANIFEST`)
//! 2. Project manifest (`.bootstrapper/manifest.yml` in the working directory)
//! 3. The embedded default manifest

use crate::error::{BootstrapError, Result};
use crate::manifest::assets::{self, DEFAULT_MANIFEST_LABEL};
use crate::manifest::schema::{Manifest, PayloadSource};
use crate::manifest::validator::validate;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory holding the project manifest.
pub const PROJECT_MANIFEST_DIR: &str = ".bootstrapper";

/// File name of the project manifest.
pub const PROJECT_MANIFEST_FILE: &str = "manifest.yml";

/// Where a manifest was loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestOrigin {
    /// A file on disk.
    File(PathBuf),
    /// The manifest compiled into the binary.
    Embedded,
}

impl ManifestOrigin {
    /// Directory that relative `payload.file` entries resolve against.
    pub fn base_dir(&self, project_root: &Path) -> PathBuf {
        match self {
            ManifestOrigin::File(path) => path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| project_root.to_path_buf()),
            ManifestOrigin::Embedded => project_root.to_path_buf(),
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> String {
        match self {
            ManifestOrigin::File(path) => path.display().to_string(),
            ManifestOrigin::Embedded => DEFAULT_MANIFEST_LABEL.to_string(),
        }
    }
}

/// A validated manifest together with its origin.
#[derive(Debug, Clone)]
pub struct LoadedManifest {
    /// The parsed manifest.
    pub manifest: Manifest,
    /// Where it came from.
    pub origin: ManifestOrigin,
}

impl LoadedManifest {
    /// Read the payload content declared by the manifest.
    pub fn payload_bytes(&self, project_root: &Path) -> Result<Vec<u8>> {
        match self.manifest.payload.source() {
            Some(PayloadSource::Asset(name)) => assets::payload_asset(&name)
                .map(<[u8]>::to_vec)
                .ok_or_else(|| BootstrapError::ManifestValidationError {
                    message: format!("payload.asset '{}' is not an embedded asset", name),
                }),
            Some(PayloadSource::File(file)) => {
                let path = self.origin.base_dir(project_root).join(file);
                fs::read(&path).map_err(|e| {
                    if e.kind() == std::io::ErrorKind::NotFound {
                        BootstrapError::ManifestValidationError {
                            message: format!("payload.file {} does not exist", path.display()),
                        }
                    } else {
                        BootstrapError::Io(e)
                    }
                })
            }
            None => Err(BootstrapError::ManifestValidationError {
                message: "payload must set exactly one of 'asset' or 'file'".to_string(),
            }),
        }
    }
}

/// Find the manifest to use for a project.
pub fn discover(project_root: &Path, explicit: Option<&Path>) -> ManifestOrigin {
    if let Some(path) = explicit {
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            project_root.join(path)
        };
        return ManifestOrigin::File(path);
    }

    let project = project_root
        .join(PROJECT_MANIFEST_DIR)
        .join(PROJECT_MANIFEST_FILE);
    if project.is_file() {
        ManifestOrigin::File(project)
    } else {
        ManifestOrigin::Embedded
    }
}

/// Parse YAML content into a manifest.
pub fn parse_manifest(content: &str, source: &Path) -> Result<Manifest> {
    serde_yaml::from_str(content).map_err(|e| BootstrapError::ManifestParseError {
        path: source.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load a manifest file from disk.
///
/// # Errors
///
/// Returns `ManifestNotFound` if the file doesn't exist and
/// `ManifestParseError` if the YAML is invalid.
pub fn load_manifest_file(path: &Path) -> Result<Manifest> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            BootstrapError::ManifestNotFound {
                path: path.to_path_buf(),
            }
        } else {
            BootstrapError::Io(e)
        }
    })?;

    parse_manifest(&content, path)
}

/// Discover, parse and validate the manifest for a project.
pub fn load(project_root: &Path, explicit: Option<&Path>) -> Result<LoadedManifest> {
    let origin = discover(project_root, explicit);
    tracing::debug!("Using manifest {}", origin.label());

    let manifest = match &origin {
        ManifestOrigin::File(path) => load_manifest_file(path)?,
        ManifestOrigin::Embedded => {
            parse_manifest(assets::default_manifest()?, Path::new(DEFAULT_MANIFEST_LABEL))?
        }
    };

    validate(&manifest)?;

    Ok(LoadedManifest { manifest, origin })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const MINIMAL: &str = r#"
runtime: { name: Python, command: python }
packages: { names: [requests] }
payload: { path: app.py, file: payload/app.py }
"#;

    fn project_with_manifest(content: &str) -> TempDir {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(PROJECT_MANIFEST_DIR);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(PROJECT_MANIFEST_FILE), content).unwrap();
        temp
    }

    #[test]
    fn discover_prefers_explicit_path() {
        let temp = project_with_manifest(MINIMAL);
        let origin = discover(temp.path(), Some(Path::new("custom.yml")));
        assert_eq!(origin, ManifestOrigin::File(temp.path().join("custom.yml")));
    }

    #[test]
    fn discover_finds_project_manifest() {
        let temp = project_with_manifest(MINIMAL);
        let origin = discover(temp.path(), None);
        assert_eq!(
            origin,
            ManifestOrigin::File(
                temp.path()
                    .join(PROJECT_MANIFEST_DIR)
                    .join(PROJECT_MANIFEST_FILE)
            )
        );
    }

    #[test]
    fn discover_falls_back_to_embedded() {
        let temp = TempDir::new().unwrap();
        assert_eq!(discover(temp.path(), None), ManifestOrigin::Embedded);
    }

    #[test]
    fn load_embedded_default() {
        let temp = TempDir::new().unwrap();
        let loaded = load(temp.path(), None).unwrap();
        assert_eq!(loaded.origin, ManifestOrigin::Embedded);
        assert_eq!(loaded.manifest.runtime.command, "python");
        assert_eq!(
            loaded.manifest.packages.names,
            vec!["pandas", "tkcalendar", "matplotlib"]
        );
        assert!(!loaded.payload_bytes(temp.path()).unwrap().is_empty());
    }

    #[test]
    fn load_missing_explicit_file_is_not_found() {
        let temp = TempDir::new().unwrap();
        let err = load(temp.path(), Some(Path::new("nope.yml"))).unwrap_err();
        assert!(matches!(err, BootstrapError::ManifestNotFound { .. }));
    }

    #[test]
    fn load_invalid_yaml_is_parse_error() {
        let temp = project_with_manifest("runtime: [unclosed");
        let err = load(temp.path(), None).unwrap_err();
        assert!(matches!(err, BootstrapError::ManifestParseError { .. }));
    }

    #[test]
    fn payload_file_resolves_relative_to_manifest() {
        let temp = project_with_manifest(MINIMAL);
        let payload_dir = temp.path().join(PROJECT_MANIFEST_DIR).join("payload");
        fs::create_dir_all(&payload_dir).unwrap();
        fs::write(payload_dir.join("app.py"), "print('hi')\n").unwrap();

        let loaded = load(temp.path(), None).unwrap();
        assert_eq!(loaded.payload_bytes(temp.path()).unwrap(), b"print('hi')\n");
    }

    #[test]
    fn missing_payload_file_is_reported() {
        let temp = project_with_manifest(MINIMAL);
        let loaded = load(temp.path(), None).unwrap();
        let err = loaded.payload_bytes(temp.path()).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn origin_labels() {
        assert_eq!(ManifestOrigin::Embedded.label(), DEFAULT_MANIFEST_LABEL);
        assert_eq!(
            ManifestOrigin::File(PathBuf::from("/x/m.yml")).label(),
            "/x/m.yml"
        );
    }
}
