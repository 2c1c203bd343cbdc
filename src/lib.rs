//! Bootstrapper - manifest-driven runtime, dependency and payload installer.
//!
//! Bootstrapper makes sure a runtime and the packages an application needs
//! are installed, writes the application script if it is missing, then
//! launches it. What to install comes from a YAML manifest; a default
//! manifest and payload are embedded in the binary.
//!
//! # Modules
//!
//! - [`bootstrap`] - The gated stage sequence and its side-effect context
//! - [`cli`] - Command-line interface and argument parsing
//! - [`error`] - Error types and result aliases
//! - [`fetch`] - Installer download and checksum verification
//! - [`manifest`] - Manifest discovery, parsing, and validation
//! - [`process`] - External program execution
//! - [`ui`] - Spinners, status lines, and hints
//!
//! # Example
//!
//! ```
//! use bootstrapper::manifest::parse_manifest;
//! use std::path::Path;
//!
//! let manifest = parse_manifest(
//!     "runtime: { name: Python, command: python }\npayload: { path: app.py, asset: taskmanv1.py }",
//!     Path::new("inline.yml"),
//! )
//! .unwrap();
//! assert_eq!(manifest.packages.manager, "pip");
//! ```
//!
//! For end-to-end runs against real processes, see the integration tests.

pub mod bootstrap;
pub mod cli;
pub mod error;
pub mod fetch;
pub mod manifest;
pub mod process;
pub mod ui;

pub use error::{BootstrapError, Result};
