//! HTTP implementation of the Live Code Mentor backend
//!
//! Thin reqwest wrapper around the backend's JSON-over-HTTPS API.
//! Each call is one request/response round trip; non-2xx statuses are
//! mapped to `MentorError::BackendStatus` with the body text preserved
//! so the UI can show a single human-readable notice.

use crate::api::types::*;
use crate::api::MentorBackend;
use crate::config::BackendConfig;
use crate::error::{MentorError, Result};

use async_trait::async_trait;
use reqwest::multipart;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use url::Url;

/// HTTP backend client
///
/// Connects to a Live Code Mentor server at a configurable base URL.
///
/// # Examples
///
/// ```no_run
/// use codementor::api::{HttpBackend, MentorBackend};
/// use codementor::config::BackendConfig;
///
/// # async fn example() -> codementor::error::Result<()> {
/// let config = BackendConfig {
///     base_url: "http://localhost:8000".to_string(),
///     timeout_seconds: 60,
/// };
/// let backend = HttpBackend::new(&config)?;
/// let health = backend.health().await?;
/// assert_eq!(health.status, "healthy");
/// # Ok(())
/// # }
/// ```
pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    /// Create a new HTTP backend client
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or HTTP client
    /// initialization fails.
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| MentorError::Config(format!("Invalid backend URL: {}", e)))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("codementor/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| MentorError::Backend(format!("Failed to create HTTP client: {}", e)))?;

        tracing::info!("Initialized backend client: base_url={}", base_url);

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| MentorError::Backend(format!("Invalid endpoint {}: {}", path, e)).into())
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        tracing::debug!("POST {}", url);
        let response = self.client.post(url).json(body).send().await?;
        Self::decode(path, response).await
    }

    async fn get_json<T>(&self, path: &str, query: &[(&str, &str)]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).query(query).send().await?;
        Self::decode(path, response).await
    }

    async fn post_multipart<T>(&self, path: &str, form: multipart::Form) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        tracing::debug!("POST (multipart) {}", url);
        let response = self.client.post(url).multipart(form).send().await?;
        Self::decode(path, response).await
    }

    async fn decode<T: DeserializeOwned>(path: &str, response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!("Backend returned {} for {}", status, path);
            return Err(MentorError::BackendStatus {
                status: status.as_u16(),
                endpoint: path.to_string(),
                message,
            }
            .into());
        }
        let parsed = response.json::<T>().await?;
        Ok(parsed)
    }
}

#[async_trait]
impl MentorBackend for HttpBackend {
    async fn health(&self) -> Result<HealthResponse> {
        self.get_json("/api/health", &[]).await
    }

    async fn analyze_code(&self, req: &AnalyzeCodeRequest) -> Result<AnalyzeCodeResponse> {
        self.post_json("/api/analyze-code", req).await
    }

    async fn generate_teaching(&self, req: &TeachingRequest) -> Result<TeachingResponse> {
        self.post_json("/api/generate-teaching", req).await
    }

    async fn deeper_explanation(
        &self,
        req: &DeeperExplanationRequest,
    ) -> Result<DeeperExplanationResponse> {
        self.post_json("/api/generate-deeper-explanation", req).await
    }

    async fn visual_diagram(&self, req: &VisualDiagramRequest) -> Result<VisualDiagramResponse> {
        self.post_json("/api/generate-visual-diagram", req).await
    }

    async fn evaluate_answer(
        &self,
        req: &EvaluateAnswerRequest,
    ) -> Result<EvaluateAnswerResponse> {
        self.post_json("/api/evaluate-answer", req).await
    }

    async fn agent_chat(&self, req: &AgentChatRequest) -> Result<AgentChatResponse> {
        self.post_json("/api/agent/chat", req).await
    }

    async fn english_chat(&self, req: &EnglishChatRequest) -> Result<EnglishChatResponse> {
        self.post_json("/api/english-chat", req).await
    }

    async fn analyze_image(&self, req: &ImageAnalysisRequest) -> Result<ImageAnalysisResponse> {
        self.post_json("/api/analyze-image", req).await
    }

    async fn upload_project(
        &self,
        archive_name: &str,
        zip_bytes: Vec<u8>,
    ) -> Result<UploadProjectResponse> {
        let part = multipart::Part::bytes(zip_bytes)
            .file_name(archive_name.to_string())
            .mime_str("application/zip")
            .map_err(|e| MentorError::Backend(format!("Invalid upload part: {}", e)))?;
        let form = multipart::Form::new().part("file", part);
        self.post_multipart("/api/upload-project", form).await
    }

    async fn analyze_project(
        &self,
        project_id: &str,
        skill_level: &str,
    ) -> Result<ProjectOverviewResponse> {
        let form = multipart::Form::new()
            .text("project_id", project_id.to_string())
            .text("skill_level", skill_level.to_string());
        self.post_multipart("/api/analyze-project", form).await
    }

    async fn get_file(&self, project_id: &str, path: &str) -> Result<FileContentResponse> {
        let endpoint = format!("/api/project/{}/file", project_id);
        self.get_json(&endpoint, &[("path", path)]).await
    }

    async fn save_file(&self, req: &SaveFileRequest) -> Result<SaveFileResponse> {
        let endpoint = format!("/api/project/{}/file", req.project_id);
        self.post_json(&endpoint, req).await
    }

    async fn run_file(&self, req: &RunFileRequest) -> Result<RunFileResponse> {
        let endpoint = format!("/api/project/{}/run", req.project_id);
        self.post_json(&endpoint, req).await
    }

    async fn install_deps(&self, project_id: &str) -> Result<InstallDepsResponse> {
        let endpoint = format!("/api/project/{}/install-deps", project_id);
        self.post_json(&endpoint, &serde_json::json!({})).await
    }

    async fn terminal(&self, req: &TerminalRequest) -> Result<TerminalResponse> {
        let endpoint = format!("/api/project/{}/terminal", req.project_id);
        self.post_json(&endpoint, req).await
    }

    async fn analyze_full(
        &self,
        project_id: &str,
        skill_level: &str,
    ) -> Result<FullAnalysisResponse> {
        let endpoint = format!("/api/project/{}/analyze-full", project_id);
        let body = serde_json::json!({
            "project_id": project_id,
            "skill_level": skill_level,
        });
        self.post_json(&endpoint, &body).await
    }

    async fn onboard(&self, profile: &LearningProfile) -> Result<OnboardResponse> {
        self.post_json("/api/learning/onboard", profile).await
    }

    async fn mentor_chat(&self, req: &MentorChatRequest) -> Result<MentorChatResponse> {
        self.post_json("/api/learning/mentor", req).await
    }

    async fn complete_topic(&self, req: &CompleteTopicRequest) -> Result<CompleteTopicResponse> {
        self.post_json("/api/learning/complete-topic", req).await
    }
}
