//! Line styling.

use console::{Style, Term};

/// Styles and icons for each kind of output line.
#[derive(Debug, Clone)]
pub struct BootstrapTheme {
    success: Style,
    warning: Style,
    error: Style,
    header: Style,
    muted: Style,
}

impl BootstrapTheme {
    /// Colored theme if the terminal supports it and `NO_COLOR` is unset.
    pub fn for_terminal(term: &Term) -> Self {
        if std::env::var_os("NO_COLOR").is_none() && term.features().colors_supported() {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    pub fn colored() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            header: Style::new().magenta().bold(),
            muted: Style::new().dim(),
        }
    }

    pub fn plain() -> Self {
        let unstyled = Style::new();
        Self {
            success: unstyled.clone(),
            warning: unstyled.clone(),
            error: unstyled.clone(),
            header: unstyled.clone(),
            muted: unstyled,
        }
    }

    pub fn success(&self, msg: &str) -> String {
        self.success.apply_to(format!("✓ {msg}")).to_string()
    }

    pub fn warning(&self, msg: &str) -> String {
        self.warning.apply_to(format!("⚠ {msg}")).to_string()
    }

    pub fn error(&self, msg: &str) -> String {
        self.error.apply_to(format!("✗ {msg}")).to_string()
    }

    pub fn detail(&self, msg: &str) -> String {
        self.muted.apply_to(format!("  $ {msg}")).to_string()
    }

    pub fn hint(&self, hint: &str) -> String {
        self.muted.apply_to(format!("  hint: {hint}")).to_string()
    }

    /// Title underlined to its own width, followed by a blank line.
    pub fn header(&self, title: &str) -> String {
        let rule = "=".repeat(title.chars().count());
        format!(
            "{}\n{}\n",
            self.header.apply_to(title),
            self.muted.apply_to(rule)
        )
    }
}
