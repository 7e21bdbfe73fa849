//! Code analysis panel state
//!
//! Holds the source buffer and language selection, submits analysis
//! requests, and owns the resulting finding list. Two invariants are
//! enforced here:
//!
//! - A response replaces the finding list wholesale, and only if it
//!   belongs to the newest request. Starting a new analysis cancels the
//!   superseded one; a late response from a cancelled request is
//!   discarded rather than overwriting newer findings.
//! - Finding line numbers are only valid against the exact snapshot that
//!   was analyzed. The panel records a SHA-256 of that snapshot and
//!   refuses the teach-me drill-down once the buffer hash diverges.

use crate::agents::SkillLevel;
use crate::api::types::{AnalyzeCodeRequest, AnalyzeCodeResponse, Finding};
use crate::api::MentorBackend;
use crate::error::{MentorError, Result};

use sha2::{Digest, Sha256};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Languages the analysis endpoint accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Python,
    JavaScript,
    TypeScript,
    Rust,
    Go,
    Java,
    C,
    Cpp,
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.api_name())
    }
}

impl Language {
    /// Wire name sent in the `language` request field
    pub fn api_name(&self) -> &'static str {
        match self {
            Self::Python => "python",
            Self::JavaScript => "javascript",
            Self::TypeScript => "typescript",
            Self::Rust => "rust",
            Self::Go => "go",
            Self::Java => "java",
            Self::C => "c",
            Self::Cpp => "cpp",
        }
    }

    /// Parse a language from a string
    pub fn parse_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "python" | "py" => Ok(Self::Python),
            "javascript" | "js" => Ok(Self::JavaScript),
            "typescript" | "ts" => Ok(Self::TypeScript),
            "rust" | "rs" => Ok(Self::Rust),
            "go" => Ok(Self::Go),
            "java" => Ok(Self::Java),
            "c" => Ok(Self::C),
            "cpp" | "c++" | "cxx" => Ok(Self::Cpp),
            other => Err(MentorError::Validation(format!("Unknown language: {}", other)).into()),
        }
    }

    /// Infer a language from a file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "py" => Some(Self::Python),
            "js" | "jsx" | "mjs" => Some(Self::JavaScript),
            "ts" | "tsx" => Some(Self::TypeScript),
            "rs" => Some(Self::Rust),
            "go" => Some(Self::Go),
            "java" => Some(Self::Java),
            "c" | "h" => Some(Self::C),
            "cpp" | "cc" | "cxx" | "hpp" => Some(Self::Cpp),
            _ => None,
        }
    }
}

/// A granted analysis request: the newest one wins
///
/// Produced by [`AnalysisPanel::begin_analysis`]. The token is cancelled
/// when a newer analysis begins; the generation lets the panel discard a
/// completion that lost the race.
#[derive(Debug)]
pub struct AnalysisTicket {
    generation: u64,
    /// Cancelled when this request is superseded
    pub token: CancellationToken,
    /// The request body to submit
    pub request: AnalyzeCodeRequest,
}

/// By-value snapshot handed to the teaching overlay
///
/// Cloned out of the panel so later buffer edits cannot retroactively
/// corrupt an explanation in flight.
#[derive(Debug, Clone)]
pub struct TeachingInput {
    /// The exact source text that was analyzed
    pub source: String,
    /// The selected finding
    pub finding: Finding,
}

/// State for the code analysis panel
pub struct AnalysisPanel {
    backend: Arc<dyn MentorBackend>,
    skill: SkillLevel,
    source: String,
    language: Language,
    findings: Vec<Finding>,
    overall_quality: String,
    analyzed_hash: Option<[u8; 32]>,
    analyzed_source: String,
    generation: u64,
    inflight: Option<CancellationToken>,
}

impl AnalysisPanel {
    /// Create a panel with an empty buffer
    pub fn new(backend: Arc<dyn MentorBackend>, language: Language, skill: SkillLevel) -> Self {
        Self {
            backend,
            skill,
            source: String::new(),
            language,
            findings: Vec::new(),
            overall_quality: String::new(),
            analyzed_hash: None,
            analyzed_source: String::new(),
            generation: 0,
            inflight: None,
        }
    }

    /// Replace the source buffer
    ///
    /// Existing findings are kept but become stale once the new text's
    /// hash differs from the analyzed snapshot.
    pub fn set_source(&mut self, source: impl Into<String>) {
        self.source = source.into();
    }

    /// Current source buffer
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Change the language selection
    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// Selected language
    pub fn language(&self) -> Language {
        self.language
    }

    /// Current findings (empty until an analysis succeeds)
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// Quality verdict from the last analysis
    pub fn overall_quality(&self) -> &str {
        &self.overall_quality
    }

    /// Whether an analysis request may be started right now
    ///
    /// False while the buffer is empty; matching the panel's disabled
    /// Analyze action.
    pub fn can_analyze(&self) -> bool {
        !self.source.trim().is_empty()
    }

    /// Whether the findings no longer match the current buffer
    pub fn findings_stale(&self) -> bool {
        match self.analyzed_hash {
            Some(hash) => hash != hash_source(&self.source),
            None => false,
        }
    }

    /// Begin a new analysis, superseding any in-flight request
    ///
    /// Validates the buffer, cancels the previous request's token, and
    /// returns a ticket carrying the request body and a fresh token.
    ///
    /// # Errors
    ///
    /// Returns `MentorError::Validation` for an empty or whitespace-only
    /// buffer; no network request is issued in that case.
    pub fn begin_analysis(&mut self) -> Result<AnalysisTicket> {
        if !self.can_analyze() {
            return Err(
                MentorError::Validation("Nothing to analyze: source is empty".to_string()).into(),
            );
        }

        if let Some(previous) = self.inflight.take() {
            tracing::debug!("Superseding in-flight analysis");
            previous.cancel();
        }

        self.generation += 1;
        let token = CancellationToken::new();
        self.inflight = Some(token.clone());

        Ok(AnalysisTicket {
            generation: self.generation,
            token,
            request: AnalyzeCodeRequest {
                code: self.source.clone(),
                language: self.language.api_name().to_string(),
                skill_level: Some(self.skill.to_string()),
            },
        })
    }

    /// Apply an analysis response if its ticket is still the newest
    ///
    /// Returns true when the findings were replaced, false when the
    /// response was discarded as superseded. A discarded response leaves
    /// the panel untouched.
    pub fn complete_analysis(
        &mut self,
        ticket: &AnalysisTicket,
        response: AnalyzeCodeResponse,
    ) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                "Discarding superseded analysis response (generation {} != {})",
                ticket.generation,
                self.generation
            );
            return false;
        }
        self.inflight = None;
        self.findings = response.bugs;
        self.overall_quality = response.overall_quality;
        self.analyzed_source = ticket.request.code.clone();
        self.analyzed_hash = Some(hash_source(&ticket.request.code));
        true
    }

    /// Record a failed analysis; prior findings are left untouched
    pub fn fail_analysis(&mut self, ticket: &AnalysisTicket) {
        if ticket.generation == self.generation {
            self.inflight = None;
        }
    }

    /// Run a full analysis round trip against the backend
    ///
    /// Convenience wrapper over begin/complete for sequential callers.
    /// Cancellation still applies: if another analysis begins while this
    /// one awaits, the response is discarded and an error is returned.
    pub async fn analyze(&mut self) -> Result<usize> {
        let ticket = self.begin_analysis()?;
        let backend = Arc::clone(&self.backend);

        let response = tokio::select! {
            _ = ticket.token.cancelled() => {
                return Err(MentorError::InvalidState(
                    "Analysis superseded by a newer request".to_string(),
                )
                .into());
            }
            result = backend.analyze_code(&ticket.request) => {
                match result {
                    Ok(response) => response,
                    Err(e) => {
                        self.fail_analysis(&ticket);
                        return Err(e);
                    }
                }
            }
        };

        if !self.complete_analysis(&ticket, response) {
            return Err(MentorError::InvalidState(
                "Analysis superseded by a newer request".to_string(),
            )
            .into());
        }
        Ok(self.findings.len())
    }

    /// Snapshot a finding and its source for the teaching overlay
    ///
    /// # Errors
    ///
    /// Returns `MentorError::StaleFindings` when the buffer changed since
    /// the analysis, and `MentorError::Validation` for a bad index.
    pub fn teaching_input(&self, index: usize) -> Result<TeachingInput> {
        if self.findings_stale() {
            return Err(MentorError::StaleFindings(
                "source changed since the last analysis; re-run analyze".to_string(),
            )
            .into());
        }
        let finding = self.findings.get(index).ok_or_else(|| {
            MentorError::Validation(format!(
                "No finding #{} (have {})",
                index + 1,
                self.findings.len()
            ))
        })?;
        Ok(TeachingInput {
            source: self.analyzed_source.clone(),
            finding: finding.clone(),
        })
    }
}

fn hash_source(source: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(source.as_bytes());
    hasher.finalize().into()
}
