//! Transient user notices
//!
//! Every failed operation surfaces exactly one notice and leaves panel
//! state untouched, so notices are fire-and-forget lines rather than a
//! persistent log. Formatting is separated from printing so tests can
//! assert on the rendered text.

use colored::Colorize;

/// Severity of a transient notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Informational status line
    Info,
    /// Recoverable problem, the session continues
    Warning,
    /// A failed operation; prior state is untouched
    Error,
}

impl NoticeKind {
    fn tag(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// Render a notice line without color (used by tests and plain output)
pub fn format_notice(kind: NoticeKind, message: &str) -> String {
    format!("[{}] {}", kind.tag(), message)
}

fn colored_tag(kind: NoticeKind) -> String {
    match kind {
        NoticeKind::Info => format!("[{}]", "info".cyan()),
        NoticeKind::Warning => format!("[{}]", "warning".yellow()),
        NoticeKind::Error => format!("[{}]", "error".red().bold()),
    }
}

/// Print a one-shot notice to stderr
pub fn notify(kind: NoticeKind, message: &str) {
    eprintln!("{} {}", colored_tag(kind), message);
}

/// Print an informational notice
pub fn info(message: &str) {
    notify(NoticeKind::Info, message);
}

/// Print a warning notice
pub fn warn(message: &str) {
    notify(NoticeKind::Warning, message);
}

/// Print an error notice
pub fn error(message: &str) {
    notify(NoticeKind::Error, message);
}
