//! Terminal diagnostics.
//!
//! Everything goes to stderr so HTML written to stdout stays clean.

use std::fmt::Display;

use console::{Style, Term};
use folio_renderer::{Disposition, NodeReport};

/// Severity of a diagnostic line; picks its color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Level {
    Plain,
    Done,
    Warn,
    Fail,
    Heading,
}

impl Level {
    fn paint(self, text: impl Display) -> String {
        match self.style() {
            Some(style) => style.apply_to(text).to_string(),
            None => text.to_string(),
        }
    }

    fn style(self) -> Option<Style> {
        match self {
            Self::Plain => None,
            Self::Done => Some(Style::new().green()),
            Self::Warn => Some(Style::new().yellow()),
            Self::Fail => Some(Style::new().red()),
            Self::Heading => Some(Style::new().cyan().bold()),
        }
    }

    fn for_disposition(disposition: Disposition) -> Self {
        match disposition {
            Disposition::Suppressed => Self::Warn,
            Disposition::Passthrough | Disposition::Rendered => Self::Plain,
        }
    }
}

/// Diagnostics printer for `folio` commands.
pub(crate) struct Output {
    term: Term,
    label: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            label: Style::new().dim(),
        }
    }

    fn line(&self, level: Level, msg: impl Display) {
        let _ = self.term.write_line(&level.paint(msg));
    }

    pub(crate) fn note(&self, msg: impl Display) {
        self.line(Level::Plain, msg);
    }

    pub(crate) fn done(&self, msg: impl Display) {
        self.line(Level::Done, msg);
    }

    pub(crate) fn warn(&self, msg: impl Display) {
        self.line(Level::Warn, msg);
    }

    pub(crate) fn fail(&self, msg: impl Display) {
        self.line(Level::Fail, msg);
    }

    pub(crate) fn heading(&self, msg: impl Display) {
        self.line(Level::Heading, msg);
    }

    /// Indented `label: value` pair with a dimmed label.
    pub(crate) fn field(&self, label: &str, value: impl Display) {
        self.field_at(Level::Plain, label, value);
    }

    /// Like [`Output::field`], with the value shown as a warning.
    pub(crate) fn flag(&self, label: &str, value: impl Display) {
        self.field_at(Level::Warn, label, value);
    }

    fn field_at(&self, level: Level, label: &str, value: impl Display) {
        let label = self.label.apply_to(format!("{label}:"));
        let _ = self.term.write_line(&format!("  {label} {}", level.paint(value)));
    }

    /// One entry of a render summary, colored by how the node was handled.
    pub(crate) fn report(&self, report: &NodeReport) {
        self.line(Level::for_disposition(report.disposition), report_line(report));
    }
}

fn report_line(report: &NodeReport) -> String {
    let key = report.key.as_deref().unwrap_or("-");
    format!("  - {} [{key}]", report.node_type)
}
