//! Bootstrap manifest loading, parsing, and validation.
//!
//! The manifest decouples policy (which runtime, which packages, which
//! payload) from the orchestration in [`crate::bootstrap`]:
//! - Schema definitions in [`schema`]
//! - Discovery and loading in [`loader`]
//! - Validation in [`validator`]
//! - Embedded defaults in [`assets`]
//!
//! # Example
//!
//! ```
//! use bootstrapper::manifest::{load, ManifestOrigin};
//! use tempfile::TempDir;
//!
//! // With no project manifest, the embedded default is used.
//! let temp = TempDir::new().unwrap();
//! let loaded = load(temp.path(), None).unwrap();
//! assert_eq!(loaded.origin, ManifestOrigin::Embedded);
//! assert!(!loaded.manifest.packages.names.is_empty());
//! ```

pub mod assets;
pub mod loader;
pub mod schema;
pub mod validator;

pub use loader::{
    discover, load, load_manifest_file, parse_manifest, LoadedManifest, ManifestOrigin,
    PROJECT_MANIFEST_DIR, PROJECT_MANIFEST_FILE,
};
pub use schema::{
    InstallerConfig, Manifest, PackagesConfig, PayloadConfig, PayloadSource, RuntimeConfig,
};
pub use validator::{validate, validate_manifest, ValidationError};
