//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{BootstrapError, Result};

/// Bootstrapper - Installs a runtime, its packages and an application, then launches it.
#[derive(Debug, Parser)]
#[command(name = "bootstrapper")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to manifest file (overrides .bootstrapper/manifest.yml and the built-in default)
    #[arg(short, long, global = true, env = "BOOTSTRAPPER_MANIFEST")]
    pub manifest: Option<PathBuf>,

    /// Directory to install into and launch from (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Directory to install into: `--project`, else the current directory.
    pub fn project_root(&self) -> Result<PathBuf> {
        resolve_project_root(self.project.as_deref(), std::env::current_dir)
    }
}

fn resolve_project_root(
    project: Option<&Path>,
    current_dir: impl FnOnce() -> io::Result<PathBuf>,
) -> Result<PathBuf> {
    match project {
        Some(dir) => Ok(dir.to_path_buf()),
        None => current_dir().map_err(|e| {
            BootstrapError::Other(
                anyhow::Error::new(e).context("Cannot determine the current directory"),
            )
        }),
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Install what is missing and launch the application (default if no command specified)
    Run,

    /// Show what is installed without changing anything
    Status(StatusArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `status` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct StatusArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
