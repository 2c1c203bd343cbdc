//! HTTP installer download.
//!
//! Streams an installer artifact from a URL to a file on disk. Requests
//! carry no timeout: a stalled transfer blocks until the server gives up.

use anyhow::{bail, Context, Result};
use reqwest::blocking::{Client, Response};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Duration;

/// Downloads artifacts over HTTP/HTTPS.
pub struct HttpDownloader {
    client: Client,
}

impl HttpDownloader {
    /// Create a downloader with no request timeout.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("bootstrapper/", env!("CARGO_PKG_VERSION")))
            .timeout(None::<Duration>)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client })
    }

    /// Download `url` to `destination`, replacing any existing file.
    ///
    /// Returns the number of bytes written. A partially written file is
    /// removed when the transfer fails.
    pub fn download(&self, url: &str, destination: &Path) -> Result<u64> {
        tracing::debug!("Downloading {} to {}", url, destination.display());

        let mut response = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("Failed to fetch {}", url))?;

        if !response.status().is_success() {
            bail!("HTTP {} fetching {}", response.status(), url);
        }

        let written = match write_body(&mut response, destination) {
            Ok(n) => n,
            Err(e) => {
                let _ = std::fs::remove_file(destination);
                return Err(e.context(format!("Failed to read response from {}", url)));
            }
        };

        tracing::debug!("Downloaded {} bytes from {}", written, url);
        Ok(written)
    }
}

fn write_body(response: &mut Response, destination: &Path) -> Result<u64> {
    let file = File::create(destination)
        .with_context(|| format!("Failed to create {}", destination.display()))?;
    let mut writer = BufWriter::new(file);
    let written = response.copy_to(&mut writer)?;
    writer
        .flush()
        .with_context(|| format!("Failed to write {}", destination.display()))?;
    Ok(written)
}
