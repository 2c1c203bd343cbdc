//! Embedded default manifest and payload assets.

use crate::error::{BootstrapError, Result};
use include_dir::{include_dir, Dir};

/// Embedded assets directory.
static ASSETS_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/assets");

/// Label used in diagnostics for the embedded manifest.
pub const DEFAULT_MANIFEST_LABEL: &str = "<embedded>/manifest.yml";

/// The embedded default manifest text.
pub fn default_manifest() -> Result<&'static str> {
    let file = ASSETS_DIR
        .get_file("manifest.yml")
        .ok_or_else(|| BootstrapError::ManifestNotFound {
            path: DEFAULT_MANIFEST_LABEL.into(),
        })?;

    file.contents_utf8()
        .ok_or_else(|| BootstrapError::ManifestParseError {
            path: DEFAULT_MANIFEST_LABEL.into(),
            message: "Invalid UTF-8".to_string(),
        })
}

/// Bytes of an embedded payload asset, by name.
pub fn payload_asset(name: &str) -> Option<&'static [u8]> {
    ASSETS_DIR
        .get_file(format!("payload/{}", name))
        .map(|f| f.contents())
}

/// Names of all embedded payload assets.
pub fn payload_asset_names() -> Vec<String> {
    ASSETS_DIR
        .get_dir("payload")
        .map(|dir| {
            dir.files()
                .filter_map(|f| f.path().file_name())
                .map(|n| n.to_string_lossy().to_string())
                .collect()
        })
        .unwrap_or_default()
}
