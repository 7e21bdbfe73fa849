//! Workspace terminal transcript
//!
//! Append-only log of terminal activity: command echoes, stdout and
//! stderr text, AI error explanations and fix suggestions, and final
//! exit-status lines. Entries for one command are appended together in
//! strict arrival order, which the workspace's command gate guarantees
//! can never interleave with another command's entries.

use crate::api::types::{InstallDepsResponse, RunFileResponse, TerminalResponse};
use chrono::{DateTime, Utc};

/// Kind of a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Echo of the command that was submitted
    Command,
    /// Standard output text
    Stdout,
    /// Standard error text
    Stderr,
    /// AI-generated explanation of an error
    Explanation,
    /// AI-generated fix suggestion
    Suggestion,
    /// Final status line for a command
    Status,
}

/// One transcript entry
#[derive(Debug, Clone)]
pub struct TerminalEntry {
    pub kind: EntryKind,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl TerminalEntry {
    fn new(kind: EntryKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Append-only terminal transcript for one workspace
#[derive(Debug, Clone, Default)]
pub struct TerminalLog {
    entries: Vec<TerminalEntry>,
}

impl TerminalLog {
    /// Create an empty transcript
    pub fn new() -> Self {
        Self::default()
    }

    /// All entries in arrival order
    pub fn entries(&self) -> &[TerminalEntry] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the transcript is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Wipe the transcript
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn push(&mut self, kind: EntryKind, text: impl Into<String>) {
        self.entries.push(TerminalEntry::new(kind, text));
    }

    /// Record a file run: echo, output, error chain, final status
    ///
    /// A failing run appends stderr (plus any AI explanation and fix
    /// suggestion) and a non-zero status line; no success entry is
    /// written in that case.
    pub fn record_run(&mut self, file_path: &str, response: &RunFileResponse) {
        self.push(EntryKind::Command, format!("run {}", file_path));
        if !response.output.is_empty() {
            self.push(EntryKind::Stdout, response.output.clone());
        }
        if let Some(error) = &response.error {
            self.push(EntryKind::Stderr, error.clone());
        }
        if let Some(explanation) = &response.error_explanation {
            self.push(EntryKind::Explanation, explanation.clone());
        }
        if let Some(fix) = &response.fix_suggestion {
            self.push(EntryKind::Suggestion, fix.clone());
        }
        self.push(
            EntryKind::Status,
            format!(
                "exit {} ({:.2}s)",
                response.exit_code, response.execution_time
            ),
        );
    }

    /// Record a dependency install
    pub fn record_install(&mut self, response: &InstallDepsResponse) {
        self.push(EntryKind::Command, "install dependencies");
        if let Some(output) = &response.output {
            if !output.is_empty() {
                self.push(EntryKind::Stdout, output.clone());
            }
        }
        if let Some(error) = &response.error {
            self.push(EntryKind::Stderr, error.clone());
        }
        let status = if response.success {
            "install ok"
        } else {
            "install failed"
        };
        self.push(EntryKind::Status, status);
    }

    /// Record an arbitrary terminal command
    pub fn record_command(&mut self, command: &str, response: &TerminalResponse) {
        self.push(EntryKind::Command, command);
        if !response.output.is_empty() {
            self.push(EntryKind::Stdout, response.output.clone());
        }
        if let Some(error) = &response.error {
            self.push(EntryKind::Stderr, error.clone());
        }
        let status = if response.error.is_some() {
            "command failed"
        } else {
            "command ok"
        };
        self.push(EntryKind::Status, status);
    }
}
