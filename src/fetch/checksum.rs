//! SHA-256 verification of downloaded artifacts.

use crate::error::{BootstrapError, Result};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Compute the lowercase hex SHA-256 digest of a file.
pub fn sha256_file(path: &Path) -> Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 64 * 1024];

    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Verify that a file matches the expected hex digest.
///
/// The comparison ignores case. A missing file is an `Io` error.
pub fn verify_sha256(path: &Path, expected: &str) -> Result<()> {
    let actual = sha256_file(path)?;

    if actual.eq_ignore_ascii_case(expected.trim()) {
        tracing::debug!("Checksum verified for {}", path.display());
        Ok(())
    } else {
        Err(BootstrapError::ChecksumMismatch {
            path: path.to_path_buf(),
            expected: expected.trim().to_lowercase(),
            actual,
        })
    }
}

/// Check that a string is a well-formed SHA-256 hex digest.
pub fn is_sha256_hex(value: &str) -> bool {
    value.len() == 64 && value.chars().all(|c| c.is_ascii_hexdigit())
}
