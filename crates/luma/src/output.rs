//! Terminal output.
//!
//! Status messages go to stderr; command results go to stdout so they can
//! be piped.

use console::{Style, Term};

/// Styled writer for CLI status lines and results.
pub(crate) struct Output {
    status: Term,
    results: Term,
    ok: Style,
    warn: Style,
    fail: Style,
    accent: Style,
    muted: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            status: Term::stderr(),
            results: Term::stdout(),
            ok: Style::new().green(),
            warn: Style::new().yellow(),
            fail: Style::new().red().bold(),
            accent: Style::new().cyan().bold(),
            muted: Style::new().dim(),
        }
    }

    fn status_line(&self, style: Option<&Style>, msg: &str) {
        let line = match style {
            Some(style) => style.apply_to(msg).to_string(),
            None => msg.to_owned(),
        };
        let _ = self.status.write_line(&line);
    }

    pub(crate) fn info(&self, msg: &str) {
        self.status_line(None, msg);
    }

    pub(crate) fn success(&self, msg: &str) {
        self.status_line(Some(&self.ok), msg);
    }

    pub(crate) fn warning(&self, msg: &str) {
        self.status_line(Some(&self.warn), msg);
    }

    pub(crate) fn error(&self, msg: &str) {
        self.status_line(Some(&self.fail), msg);
    }

    pub(crate) fn highlight(&self, msg: &str) {
        self.status_line(Some(&self.accent), msg);
    }

    /// Print one ranked search hit to stdout.
    pub(crate) fn hit(&self, score: f64, path: &str, title: &str, section: &str) {
        let mut line = format!("{score:>7.3}  {}  {title}", self.accent.apply_to(path));
        if !section.is_empty() {
            line.push(' ');
            line.push_str(&self.muted.apply_to(format!("({section})")).to_string());
        }
        let _ = self.results.write_line(&line);
    }

    /// Print a command result to stdout.
    pub(crate) fn result(&self, msg: &str) {
        let _ = self.results.write_line(msg);
    }
}
