//! Side-effect boundary for the bootstrap stages.
//!
//! Every process spawn and network transfer the stages perform goes through
//! a [`BootstrapContext`], so tests can substitute recorded fakes.

use crate::error::{BootstrapError, Result};
use crate::fetch::HttpDownloader;
use crate::process::{self, CommandResult, Invocation};
use std::path::Path;

/// Mockable dependencies for the bootstrapper.
pub struct BootstrapContext<'a> {
    /// Run a program to completion. `Err` means it could not be spawned.
    pub run_command: &'a dyn Fn(&Invocation) -> Result<CommandResult>,
    /// Download a URL to a local file.
    pub download: &'a dyn Fn(&str, &Path) -> Result<()>,
}

impl BootstrapContext<'_> {
    /// Run an invocation and report only whether it exited 0.
    pub fn check(&self, invocation: &Invocation) -> bool {
        match (self.run_command)(invocation) {
            Ok(result) => result.success,
            Err(e) => {
                tracing::debug!("{}", e);
                false
            }
        }
    }
}

/// Build the default `BootstrapContext` for production use.
pub fn default_context() -> BootstrapContext<'static> {
    BootstrapContext {
        run_command: &process::execute,
        download: &|url, destination| {
            HttpDownloader::new()
                .and_then(|downloader| downloader.download(url, destination))
                .map(|_| ())
                .map_err(|e| BootstrapError::DownloadFailed {
                    url: url.to_string(),
                    message: format!("{:#}", e),
                })
        },
    }
}
