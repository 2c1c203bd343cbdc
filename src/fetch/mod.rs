//! Installer artifact download and integrity verification.
//!
//! Artifacts are fetched over HTTP(S) and must match a pinned SHA-256
//! digest before anything executes them.

pub mod checksum;
pub mod http;

pub use checksum::{is_sha256_hex, sha256_file, verify_sha256};
pub use http::HttpDownloader;
