//! Teaching overlay for one finding
//!
//! Progressive-disclosure explanation flow scoped to a single finding and
//! the exact source snapshot it was reported against. Two independent
//! state machines:
//!
//! - Explanation: `LoadingSummary -> SummaryReady <-> LoadingDeeper ->
//!   DeeperReady`. Opening the overlay auto-fetches the summary; "show
//!   more" fetches the deeper explanation and an auxiliary diagram
//!   concurrently, and either one failing leaves the other's result
//!   intact.
//! - Self-check: `Closed <-> Open -> Evaluated`, re-openable after a
//!   verdict.
//!
//! Closing the overlay discards all fetched state; reopening starts from
//! scratch. Nothing is cached across opens.

use crate::agents::MentorStyle;
use crate::analysis::TeachingInput;
use crate::api::types::{
    BugRef, DeeperExplanationRequest, DeeperExplanationResponse, EvaluateAnswerRequest,
    EvaluateAnswerResponse, TeachingRequest, TeachingResponse, VisualDiagramRequest,
    VisualDiagramResponse,
};
use crate::api::MentorBackend;
use crate::error::{MentorError, Result};

use std::sync::Arc;

/// Explanation track state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExplanationState {
    /// Entry state; the summary fetch is pending
    LoadingSummary,
    /// Summary displayed; deeper content available on demand
    SummaryReady,
    /// Deeper explanation and diagram fetches are pending
    LoadingDeeper,
    /// Deeper explanation displayed
    DeeperReady,
}

/// Self-check track state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelfCheckState {
    /// Answer box not shown
    Closed,
    /// Free-text answer box is open
    Open,
    /// A verdict has been displayed
    Evaluated,
}

/// Teaching overlay state for one finding
///
/// Dropping the overlay discards everything fetched; a reopened overlay
/// re-runs the summary fetch.
pub struct TeachingOverlay {
    backend: Arc<dyn MentorBackend>,
    style: MentorStyle,
    input: TeachingInput,
    explanation: ExplanationState,
    self_check: SelfCheckState,
    summary: Option<TeachingResponse>,
    deeper: Option<DeeperExplanationResponse>,
    diagram: Option<VisualDiagramResponse>,
    verdict: Option<EvaluateAnswerResponse>,
}

impl TeachingOverlay {
    /// Construct in `LoadingSummary` without fetching yet
    pub fn new(backend: Arc<dyn MentorBackend>, style: MentorStyle, input: TeachingInput) -> Self {
        Self {
            backend,
            style,
            input,
            explanation: ExplanationState::LoadingSummary,
            self_check: SelfCheckState::Closed,
            summary: None,
            deeper: None,
            diagram: None,
            verdict: None,
        }
    }

    /// Open the overlay: construct it and auto-fetch the summary
    ///
    /// This is the only auto-triggered network call in the client. A
    /// failed summary fetch means the overlay never opens.
    pub async fn open(
        backend: Arc<dyn MentorBackend>,
        style: MentorStyle,
        input: TeachingInput,
    ) -> Result<Self> {
        let mut overlay = Self::new(backend, style, input);
        overlay.load_summary().await?;
        Ok(overlay)
    }

    /// Fetch the summary explanation, entering `SummaryReady`
    pub async fn load_summary(&mut self) -> Result<()> {
        if self.explanation != ExplanationState::LoadingSummary {
            return Err(MentorError::InvalidState(
                "summary already loaded".to_string(),
            )
            .into());
        }
        let request = TeachingRequest {
            code: self.input.source.clone(),
            bug: BugRef::from(&self.input.finding),
            mentor_style: self.style.to_string(),
        };
        let summary = self.backend.generate_teaching(&request).await?;
        self.summary = Some(summary);
        self.explanation = ExplanationState::SummaryReady;
        Ok(())
    }

    /// Fetch the deeper explanation and diagram concurrently
    ///
    /// The two calls are independent: a diagram failure is logged and
    /// leaves `diagram()` empty without blocking the explanation, and a
    /// deeper-explanation failure returns the overlay to `SummaryReady`
    /// while keeping any diagram that did arrive.
    ///
    /// # Errors
    ///
    /// Returns an error when the deeper explanation fetch fails, or when
    /// called outside `SummaryReady`.
    pub async fn show_more(&mut self) -> Result<()> {
        if self.explanation != ExplanationState::SummaryReady {
            return Err(MentorError::InvalidState(format!(
                "show more is only available from SummaryReady (state: {:?})",
                self.explanation
            ))
            .into());
        }
        let summary = self
            .summary
            .as_ref()
            .ok_or_else(|| MentorError::InvalidState("no summary loaded".to_string()))?;

        self.explanation = ExplanationState::LoadingDeeper;

        let deeper_request = DeeperExplanationRequest {
            concept_name: summary.concept_name.clone(),
            current_explanation: summary.natural_explanation.clone(),
        };
        let diagram_request = VisualDiagramRequest {
            concept_name: summary.concept_name.clone(),
            diagram_type: "state_flow".to_string(),
            code: self.input.source.clone(),
            explanation: summary.natural_explanation.clone(),
        };

        let (deeper_result, diagram_result) = tokio::join!(
            self.backend.deeper_explanation(&deeper_request),
            self.backend.visual_diagram(&diagram_request),
        );

        match diagram_result {
            Ok(diagram) => self.diagram = Some(diagram),
            Err(e) => tracing::warn!("Diagram fetch failed (explanation unaffected): {}", e),
        }

        match deeper_result {
            Ok(deeper) => {
                self.deeper = Some(deeper);
                self.explanation = ExplanationState::DeeperReady;
                Ok(())
            }
            Err(e) => {
                self.explanation = ExplanationState::SummaryReady;
                Err(e)
            }
        }
    }

    /// Open the self-check answer box
    ///
    /// Available from `Closed` or again after a verdict.
    pub fn open_self_check(&mut self) -> Result<&str> {
        if self.summary.is_none() {
            return Err(MentorError::InvalidState(
                "self-check requires a loaded summary".to_string(),
            )
            .into());
        }
        self.self_check = SelfCheckState::Open;
        Ok(self.self_check_question())
    }

    /// Dismiss the answer box without submitting
    pub fn close_self_check(&mut self) {
        if self.self_check == SelfCheckState::Open {
            self.self_check = SelfCheckState::Closed;
        }
    }

    /// Submit a free-text answer for evaluation
    ///
    /// # Errors
    ///
    /// Returns an error when the box is not open, the answer is blank,
    /// or the evaluation call fails (state stays `Open` on failure).
    pub async fn submit_answer(&mut self, answer: &str) -> Result<EvaluateAnswerResponse> {
        if self.self_check != SelfCheckState::Open {
            return Err(
                MentorError::InvalidState("self-check box is not open".to_string()).into(),
            );
        }
        if answer.trim().is_empty() {
            return Err(MentorError::Validation("answer is empty".to_string()).into());
        }
        let concept = self
            .summary
            .as_ref()
            .map(|s| s.concept_name.clone())
            .unwrap_or_default();
        let request = EvaluateAnswerRequest {
            question: self.self_check_question().to_string(),
            student_answer: answer.to_string(),
            correct_concept: concept,
        };
        let verdict = self.backend.evaluate_answer(&request).await?;
        self.verdict = Some(verdict.clone());
        self.self_check = SelfCheckState::Evaluated;
        Ok(verdict)
    }

    /// The synthesized self-check question
    pub fn self_check_question(&self) -> &str {
        // Client-constructed; the backend only sees it at evaluation time
        "Can you explain, in your own words, what went wrong here and how you would fix it?"
    }

    /// Current explanation track state
    pub fn explanation_state(&self) -> ExplanationState {
        self.explanation
    }

    /// Current self-check track state
    pub fn self_check_state(&self) -> SelfCheckState {
        self.self_check
    }

    /// The summary explanation, once loaded
    pub fn summary(&self) -> Option<&TeachingResponse> {
        self.summary.as_ref()
    }

    /// The deeper explanation, once loaded
    pub fn deeper(&self) -> Option<&DeeperExplanationResponse> {
        self.deeper.as_ref()
    }

    /// The auxiliary diagram, if its fetch succeeded
    pub fn diagram(&self) -> Option<&VisualDiagramResponse> {
        self.diagram.as_ref()
    }

    /// The evaluation verdict, once submitted
    pub fn verdict(&self) -> Option<&EvaluateAnswerResponse> {
        self.verdict.as_ref()
    }

    /// The finding this overlay explains
    pub fn finding(&self) -> &crate::api::types::Finding {
        &self.input.finding
    }
}
