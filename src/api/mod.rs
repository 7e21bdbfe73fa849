//! Backend interface for codementor
//!
//! This module contains the backend abstraction the panels talk through
//! and the HTTP implementation against the Live Code Mentor API.
//! Panels hold an `Arc<dyn MentorBackend>` so tests can substitute a
//! scripted fake without a server.

pub mod http;
pub mod types;

pub use http::HttpBackend;
pub use types::*;

use crate::error::Result;
use async_trait::async_trait;

/// Abstraction over the Live Code Mentor backend
///
/// One method per consumed endpoint. Implementations must be cheap to
/// clone behind an `Arc` and safe to call concurrently; the client issues
/// the deeper-explanation and diagram fetches in parallel.
#[async_trait]
pub trait MentorBackend: Send + Sync {
    /// `GET /api/health`
    async fn health(&self) -> Result<HealthResponse>;

    /// `POST /api/analyze-code`
    async fn analyze_code(&self, req: &AnalyzeCodeRequest) -> Result<AnalyzeCodeResponse>;

    /// `POST /api/generate-teaching`
    async fn generate_teaching(&self, req: &TeachingRequest) -> Result<TeachingResponse>;

    /// `POST /api/generate-deeper-explanation`
    async fn deeper_explanation(
        &self,
        req: &DeeperExplanationRequest,
    ) -> Result<DeeperExplanationResponse>;

    /// `POST /api/generate-visual-diagram`
    async fn visual_diagram(&self, req: &VisualDiagramRequest) -> Result<VisualDiagramResponse>;

    /// `POST /api/evaluate-answer`
    async fn evaluate_answer(&self, req: &EvaluateAnswerRequest)
        -> Result<EvaluateAnswerResponse>;

    /// `POST /api/agent/chat`
    async fn agent_chat(&self, req: &AgentChatRequest) -> Result<AgentChatResponse>;

    /// `POST /api/english-chat`
    async fn english_chat(&self, req: &EnglishChatRequest) -> Result<EnglishChatResponse>;

    /// `POST /api/analyze-image`
    async fn analyze_image(&self, req: &ImageAnalysisRequest) -> Result<ImageAnalysisResponse>;

    /// `POST /api/upload-project` (multipart ZIP upload)
    async fn upload_project(
        &self,
        archive_name: &str,
        zip_bytes: Vec<u8>,
    ) -> Result<UploadProjectResponse>;

    /// `POST /api/analyze-project` (multipart form)
    async fn analyze_project(
        &self,
        project_id: &str,
        skill_level: &str,
    ) -> Result<ProjectOverviewResponse>;

    /// `GET /api/project/{id}/file?path=...`
    async fn get_file(&self, project_id: &str, path: &str) -> Result<FileContentResponse>;

    /// `POST /api/project/{id}/file`
    async fn save_file(&self, req: &SaveFileRequest) -> Result<SaveFileResponse>;

    /// `POST /api/project/{id}/run`
    async fn run_file(&self, req: &RunFileRequest) -> Result<RunFileResponse>;

    /// `POST /api/project/{id}/install-deps`
    async fn install_deps(&self, project_id: &str) -> Result<InstallDepsResponse>;

    /// `POST /api/project/{id}/terminal`
    async fn terminal(&self, req: &TerminalRequest) -> Result<TerminalResponse>;

    /// `POST /api/project/{id}/analyze-full`
    async fn analyze_full(
        &self,
        project_id: &str,
        skill_level: &str,
    ) -> Result<FullAnalysisResponse>;

    /// `POST /api/learning/onboard`
    async fn onboard(&self, profile: &LearningProfile) -> Result<OnboardResponse>;

    /// `POST /api/learning/mentor`
    async fn mentor_chat(&self, req: &MentorChatRequest) -> Result<MentorChatResponse>;

    /// `POST /api/learning/complete-topic`
    async fn complete_topic(&self, req: &CompleteTopicRequest) -> Result<CompleteTopicResponse>;
}
