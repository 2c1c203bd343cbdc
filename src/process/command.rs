//! External process execution.
//!
//! Programs are spawned directly rather than through a shell, so package
//! names and paths are passed as discrete arguments and never re-parsed.
//! Every call blocks until the child exits; there is no timeout.

use crate::error::{BootstrapError, Result};
use std::fmt;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// A program invocation: executable, arguments and execution options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Executable name (resolved on PATH) or path.
    pub program: String,

    /// Arguments passed verbatim.
    pub args: Vec<String>,

    /// Working directory (None inherits the parent's).
    pub cwd: Option<PathBuf>,

    /// Capture stdout/stderr instead of inheriting them.
    pub capture: bool,
}

impl Invocation {
    /// Create an invocation that inherits stdio.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            capture: false,
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Run in the given directory.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Capture output instead of forwarding it to the terminal.
    pub fn captured(mut self) -> Self {
        self.capture = true;
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.contains(char::is_whitespace) {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Result of executing a program.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output (empty unless captured).
    pub stdout: String,

    /// Standard error (empty unless captured).
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether the program succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
        }
    }
}

/// Execute a program and wait for it to exit.
///
/// Returns `CommandFailed` only when the program cannot be spawned
/// (typically: not on PATH). A non-zero exit is a normal `CommandResult`.
pub fn execute(invocation: &Invocation) -> Result<CommandResult> {
    let start = Instant::now();

    let mut cmd = Command::new(&invocation.program);
    cmd.args(&invocation.args);

    if let Some(cwd) = &invocation.cwd {
        cmd.current_dir(cwd);
    }

    if invocation.capture {
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
    } else {
        cmd.stdin(Stdio::inherit());
        cmd.stdout(Stdio::inherit());
        cmd.stderr(Stdio::inherit());
    }

    tracing::debug!("Executing: {}", invocation);

    let output = cmd.output().map_err(|e| {
        tracing::debug!("Failed to spawn '{}': {}", invocation.program, e);
        BootstrapError::CommandFailed {
            command: invocation.to_string(),
            code: None,
        }
    })?;

    let duration = start.elapsed();

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    tracing::debug!(
        "'{}' exited with {:?} after {:?}",
        invocation,
        output.status.code(),
        duration
    );

    if output.status.success() {
        Ok(CommandResult::success(stdout, stderr, duration))
    } else {
        Ok(CommandResult::failure(
            output.status.code(),
            stdout,
            stderr,
            duration,
        ))
    }
}
