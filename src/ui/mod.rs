//! User-facing terminal output.
//!
//! Every diagnostic the installer prints, errors included, goes through
//! [`UserInterface`] and lands on standard output. [`ConsoleUI`] is the real
//! implementation; [`MockUI`] records calls for tests.
//!
//! # Example
//!
//! ```
//! use bootstrapper::ui::{create_ui, Verbosity};
//!
//! let mut ui = create_ui(false, Verbosity::Quiet);
//! ui.show_header("My App Installer");
//! ui.success("Setup complete!");
//! ```

pub mod hints;
pub mod mock;
pub mod spinner;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use spinner::ProgressSpinner;
pub use terminal::{create_ui, ConsoleUI};
pub use theme::BootstrapTheme;

/// How much the installer says while it works.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    /// Stage results, warnings and errors only.
    Quiet,
    /// Adds progress messages and hints.
    #[default]
    Normal,
    /// Adds every command line the installer runs.
    Verbose,
}

impl Verbosity {
    /// Pick the level from the `--quiet` and `--verbose` flags.
    ///
    /// `--quiet` wins when both are given.
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        match (quiet, verbose) {
            (true, _) => Self::Quiet,
            (false, true) => Self::Verbose,
            (false, false) => Self::Normal,
        }
    }
}

/// Output surface for the installer.
pub trait UserInterface {
    /// Progress message, hidden in quiet mode.
    fn message(&mut self, msg: &str);

    /// Command-level detail, shown only in verbose mode.
    fn detail(&mut self, msg: &str);

    fn success(&mut self, msg: &str);

    fn warning(&mut self, msg: &str);

    /// Always shown.
    fn error(&mut self, msg: &str);

    /// Follow-up suggestion after a failure, hidden in quiet mode.
    fn show_hint(&mut self, hint: &str);

    /// Start a spinner for a blocking operation.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;

    fn show_header(&mut self, title: &str);
}

/// A running spinner. Each finish method ends it with a result line.
pub trait SpinnerHandle {
    fn finish_success(&mut self, msg: &str);

    fn finish_error(&mut self, msg: &str);
}
