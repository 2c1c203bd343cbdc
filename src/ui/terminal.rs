//! Stdout-backed UI.

use console::Term;
use std::io::Write;

use super::{BootstrapTheme, ProgressSpinner, SpinnerHandle, UserInterface, Verbosity};

/// Writes diagnostics to stdout, filtered by [`Verbosity`].
pub struct ConsoleUI {
    term: Term,
    theme: BootstrapTheme,
    verbosity: Verbosity,
    animate: bool,
}

impl ConsoleUI {
    /// Colors and animation follow the terminal; `animate` can turn
    /// animation off regardless.
    pub fn new(verbosity: Verbosity, animate: bool) -> Self {
        let term = Term::stdout();
        let theme = BootstrapTheme::for_terminal(&term);
        let animate = animate && term.is_term();
        Self {
            term,
            theme,
            verbosity,
            animate,
        }
    }

    fn line(&mut self, at_least: Verbosity, text: String) {
        if self.verbosity >= at_least {
            writeln!(self.term, "{}", text).ok();
        }
    }
}

impl UserInterface for ConsoleUI {
    fn message(&mut self, msg: &str) {
        self.line(Verbosity::Normal, msg.to_string());
    }

    fn detail(&mut self, msg: &str) {
        let text = self.theme.detail(msg);
        self.line(Verbosity::Verbose, text);
    }

    fn success(&mut self, msg: &str) {
        let text = self.theme.success(msg);
        self.line(Verbosity::Quiet, text);
    }

    fn warning(&mut self, msg: &str) {
        let text = self.theme.warning(msg);
        self.line(Verbosity::Quiet, text);
    }

    fn error(&mut self, msg: &str) {
        let text = self.theme.error(msg);
        self.line(Verbosity::Quiet, text);
    }

    fn show_hint(&mut self, hint: &str) {
        let text = self.theme.hint(hint);
        self.line(Verbosity::Normal, text);
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        let theme = self.theme.clone();
        if self.animate {
            Box::new(ProgressSpinner::animated(message, theme))
        } else {
            Box::new(ProgressSpinner::plain(message, theme))
        }
    }

    fn show_header(&mut self, title: &str) {
        let text = self.theme.header(title);
        self.line(Verbosity::Quiet, text);
    }
}

/// UI for this process. Pass `interactive = false` in CI to get plain
/// lines even on a terminal.
pub fn create_ui(interactive: bool, verbosity: Verbosity) -> Box<dyn UserInterface> {
    Box::new(ConsoleUI::new(verbosity, interactive))
}
