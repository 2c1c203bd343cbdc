//! In-memory stand-in for the machine the bootstrapper runs against.

use super::BootstrapContext;
use crate::error::{BootstrapError, Result};
use crate::manifest::{parse_manifest, LoadedManifest, ManifestOrigin};
use crate::process::{CommandResult, Invocation};
use sha2::{Digest, Sha256};
use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const INSTALLER_BYTES: &[u8] = b"#!/bin/sh\necho installing\n";
pub const INSTALLER_URL: &str = "https://downloads.example.test/python-3.9.7-amd64.exe";
pub const ARTIFACT_NAME: &str = "python-3.9.7-amd64.exe";

/// Manifest with a pinned installer whose digest matches `INSTALLER_BYTES`.
pub fn manifest_with_installer() -> LoadedManifest {
    let digest = hex::encode(Sha256::digest(INSTALLER_BYTES));
    manifest(&format!(
        r#"
app_name: Finance Tracker
runtime:
  name: Python
  command: python
  installer:
    url: {INSTALLER_URL}
    sha256: {digest}
    args: ["/quiet", "PrependPath=1"]
packages:
  names: [pandas, tkcalendar, matplotlib]
payload:
  path: taskmanv1.py
  asset: taskmanv1.py
"#
    ))
}

/// Manifest with no installer configured.
pub fn manifest_without_installer() -> LoadedManifest {
    manifest(
        r#"
app_name: Finance Tracker
runtime: { name: Python, command: python }
packages:
  names: [pandas, tkcalendar, matplotlib]
payload:
  path: taskmanv1.py
  asset: taskmanv1.py
"#,
    )
}

fn manifest(yaml: &str) -> LoadedManifest {
    LoadedManifest {
        manifest: parse_manifest(yaml, Path::new("test.yml")).unwrap(),
        origin: ManifestOrigin::Embedded,
    }
}

/// Simulated runtime, package manager and network.
pub struct FakeSystem {
    /// Installed things: "python" for the runtime, package names otherwise.
    pub installed: RefCell<HashSet<String>>,
    /// Every invocation, in order.
    pub invocations: RefCell<Vec<Invocation>>,
    /// Every URL downloaded, in order.
    pub downloads: RefCell<Vec<String>>,
    /// Bytes served by the fake download.
    pub served: RefCell<Vec<u8>>,
    pub download_fails: Cell<bool>,
    pub installer_works: Cell<bool>,
    /// Packages `pip install` cannot install.
    pub broken_packages: RefCell<HashSet<String>>,
    /// Whether the artifact existed on disk when it was executed.
    pub artifact_existed_on_run: Cell<Option<bool>>,
    pub payload_exit: Cell<Option<i32>>,
}

impl FakeSystem {
    pub fn new() -> Self {
        Self {
            installed: RefCell::new(HashSet::new()),
            invocations: RefCell::new(Vec::new()),
            downloads: RefCell::new(Vec::new()),
            served: RefCell::new(INSTALLER_BYTES.to_vec()),
            download_fails: Cell::new(false),
            installer_works: Cell::new(true),
            broken_packages: RefCell::new(HashSet::new()),
            artifact_existed_on_run: Cell::new(None),
            payload_exit: Cell::new(Some(0)),
        }
    }

    /// A machine with the runtime and every given package installed.
    pub fn with_installed(names: &[&str]) -> Self {
        let system = Self::new();
        system
            .installed
            .borrow_mut()
            .extend(names.iter().map(|n| n.to_string()));
        system
    }

    pub fn is_installed(&self, name: &str) -> bool {
        self.installed.borrow().contains(name)
    }

    /// Invocations rendered as command lines.
    pub fn commands(&self) -> Vec<String> {
        self.invocations
            .borrow()
            .iter()
            .map(|i| i.to_string())
            .collect()
    }

    /// Command lines that installed something or ran an installer.
    pub fn install_actions(&self) -> Vec<String> {
        self.commands()
            .into_iter()
            .filter(|c| c.starts_with("pip install") || c.contains(ARTIFACT_NAME))
            .collect()
    }

    /// Run `f` with a context backed by this system.
    pub fn with_context<R>(&self, f: impl FnOnce(&BootstrapContext<'_>) -> R) -> R {
        let run = |inv: &Invocation| self.run(inv);
        let download = |url: &str, dest: &Path| self.download(url, dest);
        let ctx = BootstrapContext {
            run_command: &run,
            download: &download,
        };
        f(&ctx)
    }

    fn run(&self, inv: &Invocation) -> Result<CommandResult> {
        self.invocations.borrow_mut().push(inv.clone());
        let args: Vec<&str> = inv.args.iter().map(String::as_str).collect();

        let ok = match (inv.program.as_str(), args.as_slice()) {
            ("python", ["--version"]) => {
                if !self.is_installed("python") {
                    return Err(BootstrapError::CommandFailed {
                        command: inv.to_string(),
                        code: None,
                    });
                }
                return Ok(CommandResult::success(
                    "Python 3.9.7\n".to_string(),
                    String::new(),
                    Duration::ZERO,
                ));
            }
            ("python", [_script]) => {
                return Ok(match self.payload_exit.get() {
                    Some(0) => CommandResult::success(String::new(), String::new(), Duration::ZERO),
                    code => CommandResult::failure(code, String::new(), String::new(), Duration::ZERO),
                });
            }
            ("pip", ["show", name]) => self.is_installed(name),
            ("pip", ["install", name]) => {
                if self.broken_packages.borrow().contains(*name) {
                    false
                } else {
                    self.installed.borrow_mut().insert(name.to_string());
                    true
                }
            }
            (program, _) if program.ends_with(ARTIFACT_NAME) => {
                self.artifact_existed_on_run
                    .set(Some(Path::new(program).is_file()));
                if self.installer_works.get() {
                    self.installed.borrow_mut().insert("python".to_string());
                }
                self.installer_works.get()
            }
            _ => false,
        };

        Ok(if ok {
            CommandResult::success(String::new(), String::new(), Duration::ZERO)
        } else {
            CommandResult::failure(Some(1), String::new(), String::new(), Duration::ZERO)
        })
    }

    fn download(&self, url: &str, dest: &Path) -> Result<()> {
        self.downloads.borrow_mut().push(url.to_string());
        if self.download_fails.get() {
            return Err(BootstrapError::DownloadFailed {
                url: url.to_string(),
                message: "HTTP 503 Service Unavailable".to_string(),
            });
        }
        fs::write(dest, &*self.served.borrow())?;
        Ok(())
    }
}
