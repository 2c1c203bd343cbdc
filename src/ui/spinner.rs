//! Spinner for the installer download.

use console::Term;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::io::Write;
use std::time::Duration;

use super::theme::BootstrapTheme;
use super::SpinnerHandle;

/// Animated on a terminal, a plain start line and result line elsewhere.
pub struct ProgressSpinner {
    bar: Option<ProgressBar>,
    term: Term,
    theme: BootstrapTheme,
}

impl ProgressSpinner {
    /// Animated spinner drawn on stdout.
    pub fn animated(message: &str, theme: BootstrapTheme) -> Self {
        let bar = ProgressBar::with_draw_target(None, ProgressDrawTarget::stdout());
        if let Ok(style) = ProgressStyle::with_template("{spinner:.magenta} {msg}") {
            bar.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "));
        }
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));

        Self {
            bar: Some(bar),
            term: Term::stdout(),
            theme,
        }
    }

    /// Prints `message` once and the result line when finished.
    pub fn plain(message: &str, theme: BootstrapTheme) -> Self {
        let mut term = Term::stdout();
        writeln!(term, "{}", message).ok();
        Self {
            bar: None,
            term,
            theme,
        }
    }

    fn finish(&mut self, line: String) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
        writeln!(self.term, "{}", line).ok();
    }
}

impl SpinnerHandle for ProgressSpinner {
    fn finish_success(&mut self, msg: &str) {
        let line = self.theme.success(msg);
        self.finish(line);
    }

    fn finish_error(&mut self, msg: &str) {
        let line = self.theme.error(msg);
        self.finish(line);
    }
}

impl Drop for ProgressSpinner {
    fn drop(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}
