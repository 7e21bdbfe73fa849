//! Test utilities for codementor
//!
//! Provides `FakeBackend`, a scripted in-process implementation of
//! `MentorBackend` so panel state machines can be unit tested without a
//! server. Responses can be queued per endpoint; unqueued calls return
//! sensible defaults. Failures can be injected for the next call or for
//! one specific endpoint.

use crate::api::types::*;
use crate::api::MentorBackend;
use crate::error::{MentorError, Result};

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Scripted fake backend for unit tests
///
/// Every call is recorded by endpoint name so tests can assert on call
/// counts and ordering.
#[derive(Default)]
pub struct FakeBackend {
    calls: Mutex<Vec<String>>,
    fail_next: Mutex<Option<String>>,
    fail_endpoints: Mutex<HashMap<String, String>>,
    analyze: Mutex<VecDeque<AnalyzeCodeResponse>>,
    teaching: Mutex<VecDeque<TeachingResponse>>,
    deeper: Mutex<VecDeque<DeeperExplanationResponse>>,
    diagram: Mutex<VecDeque<VisualDiagramResponse>>,
    evaluate: Mutex<VecDeque<EvaluateAnswerResponse>>,
    chat: Mutex<VecDeque<AgentChatResponse>>,
    english: Mutex<VecDeque<EnglishChatResponse>>,
    upload: Mutex<VecDeque<UploadProjectResponse>>,
    overview: Mutex<VecDeque<ProjectOverviewResponse>>,
    file: Mutex<VecDeque<FileContentResponse>>,
    save: Mutex<VecDeque<SaveFileResponse>>,
    run: Mutex<VecDeque<RunFileResponse>>,
    deps: Mutex<VecDeque<InstallDepsResponse>>,
    terminal: Mutex<VecDeque<TerminalResponse>>,
    full: Mutex<VecDeque<FullAnalysisResponse>>,
    onboard: Mutex<VecDeque<OnboardResponse>>,
    mentor: Mutex<VecDeque<MentorChatResponse>>,
    complete: Mutex<VecDeque<CompleteTopicResponse>>,
}

impl FakeBackend {
    /// Create a fake with empty scripts
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail whichever endpoint is called next
    pub fn fail_next(&self, message: impl Into<String>) {
        *self.fail_next.lock().unwrap() = Some(message.into());
    }

    /// Fail the next call to one specific endpoint
    pub fn fail_endpoint(&self, endpoint: &str, message: impl Into<String>) {
        self.fail_endpoints
            .lock()
            .unwrap()
            .insert(endpoint.to_string(), message.into());
    }

    /// Endpoint names of every call made, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// How many times an endpoint was called
    pub fn call_count(&self, endpoint: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.as_str() == endpoint)
            .count()
    }

    pub fn script_analyze(&self, response: AnalyzeCodeResponse) {
        self.analyze.lock().unwrap().push_back(response);
    }

    pub fn script_teaching(&self, response: TeachingResponse) {
        self.teaching.lock().unwrap().push_back(response);
    }

    pub fn script_deeper(&self, response: DeeperExplanationResponse) {
        self.deeper.lock().unwrap().push_back(response);
    }

    pub fn script_diagram(&self, response: VisualDiagramResponse) {
        self.diagram.lock().unwrap().push_back(response);
    }

    pub fn script_evaluate(&self, response: EvaluateAnswerResponse) {
        self.evaluate.lock().unwrap().push_back(response);
    }

    pub fn script_chat(&self, response: AgentChatResponse) {
        self.chat.lock().unwrap().push_back(response);
    }

    pub fn script_english(&self, response: EnglishChatResponse) {
        self.english.lock().unwrap().push_back(response);
    }

    pub fn script_overview(&self, response: ProjectOverviewResponse) {
        self.overview.lock().unwrap().push_back(response);
    }

    pub fn script_save(&self, response: SaveFileResponse) {
        self.save.lock().unwrap().push_back(response);
    }

    pub fn script_upload(&self, response: UploadProjectResponse) {
        self.upload.lock().unwrap().push_back(response);
    }

    pub fn script_file(&self, response: FileContentResponse) {
        self.file.lock().unwrap().push_back(response);
    }

    pub fn script_run(&self, response: RunFileResponse) {
        self.run.lock().unwrap().push_back(response);
    }

    pub fn script_deps(&self, response: InstallDepsResponse) {
        self.deps.lock().unwrap().push_back(response);
    }

    pub fn script_terminal(&self, response: TerminalResponse) {
        self.terminal.lock().unwrap().push_back(response);
    }

    pub fn script_full(&self, response: FullAnalysisResponse) {
        self.full.lock().unwrap().push_back(response);
    }

    pub fn script_onboard(&self, response: OnboardResponse) {
        self.onboard.lock().unwrap().push_back(response);
    }

    pub fn script_mentor(&self, response: MentorChatResponse) {
        self.mentor.lock().unwrap().push_back(response);
    }

    pub fn script_complete(&self, response: CompleteTopicResponse) {
        self.complete.lock().unwrap().push_back(response);
    }

    fn record(&self, endpoint: &str) -> Result<()> {
        self.calls.lock().unwrap().push(endpoint.to_string());
        if let Some(message) = self.fail_next.lock().unwrap().take() {
            return Err(MentorError::Backend(message).into());
        }
        if let Some(message) = self.fail_endpoints.lock().unwrap().remove(endpoint) {
            return Err(MentorError::Backend(message).into());
        }
        Ok(())
    }

    fn pop<T>(queue: &Mutex<VecDeque<T>>) -> Option<T> {
        queue.lock().unwrap().pop_front()
    }
}

#[async_trait]
impl MentorBackend for FakeBackend {
    async fn health(&self) -> Result<HealthResponse> {
        self.record("health")?;
        Ok(HealthResponse {
            status: "healthy".to_string(),
            timestamp: String::new(),
        })
    }

    async fn analyze_code(&self, _req: &AnalyzeCodeRequest) -> Result<AnalyzeCodeResponse> {
        self.record("analyze_code")?;
        Ok(Self::pop(&self.analyze).unwrap_or(AnalyzeCodeResponse {
            bugs: vec![],
            overall_quality: "good".to_string(),
        }))
    }

    async fn generate_teaching(&self, _req: &TeachingRequest) -> Result<TeachingResponse> {
        self.record("generate_teaching")?;
        Ok(Self::pop(&self.teaching).unwrap_or(TeachingResponse {
            concept_name: "Concept".to_string(),
            natural_explanation: "Explanation".to_string(),
            why_it_matters: "It matters".to_string(),
            common_mistake: "Common mistake".to_string(),
        }))
    }

    async fn deeper_explanation(
        &self,
        _req: &DeeperExplanationRequest,
    ) -> Result<DeeperExplanationResponse> {
        self.record("deeper_explanation")?;
        Ok(Self::pop(&self.deeper).unwrap_or(DeeperExplanationResponse {
            deeper_explanation: "Deeper".to_string(),
            code_examples: vec![],
            related_concepts: vec![],
        }))
    }

    async fn visual_diagram(&self, _req: &VisualDiagramRequest) -> Result<VisualDiagramResponse> {
        self.record("visual_diagram")?;
        Ok(Self::pop(&self.diagram).unwrap_or(VisualDiagramResponse {
            svg: "<svg></svg>".to_string(),
        }))
    }

    async fn evaluate_answer(
        &self,
        _req: &EvaluateAnswerRequest,
    ) -> Result<EvaluateAnswerResponse> {
        self.record("evaluate_answer")?;
        Ok(Self::pop(&self.evaluate).unwrap_or(EvaluateAnswerResponse {
            understood: true,
            feedback: "Good".to_string(),
            encouragement: "Keep going".to_string(),
        }))
    }

    async fn agent_chat(&self, _req: &AgentChatRequest) -> Result<AgentChatResponse> {
        self.record("agent_chat")?;
        Ok(Self::pop(&self.chat).unwrap_or(AgentChatResponse {
            response: "ok".to_string(),
            suggestions: None,
        }))
    }

    async fn english_chat(&self, _req: &EnglishChatRequest) -> Result<EnglishChatResponse> {
        self.record("english_chat")?;
        Ok(Self::pop(&self.english).unwrap_or(EnglishChatResponse {
            response: "ok".to_string(),
            intent: "conversation".to_string(),
            corrections: vec![],
        }))
    }

    async fn analyze_image(&self, req: &ImageAnalysisRequest) -> Result<ImageAnalysisResponse> {
        self.record("analyze_image")?;
        Ok(ImageAnalysisResponse {
            analysis: "analysis".to_string(),
            task_type: req.task_type.clone(),
        })
    }

    async fn upload_project(
        &self,
        _archive_name: &str,
        _zip_bytes: Vec<u8>,
    ) -> Result<UploadProjectResponse> {
        self.record("upload_project")?;
        Ok(Self::pop(&self.upload).unwrap_or(UploadProjectResponse {
            project_id: "proj-1".to_string(),
            files: vec![FileNode {
                name: "main.py".to_string(),
                path: "main.py".to_string(),
                node_type: "file".to_string(),
                children: vec![],
            }],
            files_count: 1,
        }))
    }

    async fn analyze_project(
        &self,
        _project_id: &str,
        _skill_level: &str,
    ) -> Result<ProjectOverviewResponse> {
        self.record("analyze_project")?;
        Ok(Self::pop(&self.overview).unwrap_or(ProjectOverviewResponse {
            name: "demo".to_string(),
            languages: vec![],
            total_files: 1,
            readme_content: None,
        }))
    }

    async fn get_file(&self, _project_id: &str, path: &str) -> Result<FileContentResponse> {
        self.record("get_file")?;
        Ok(Self::pop(&self.file).unwrap_or(FileContentResponse {
            path: path.to_string(),
            content: format!("contents of {}", path),
            language: "python".to_string(),
        }))
    }

    async fn save_file(&self, _req: &SaveFileRequest) -> Result<SaveFileResponse> {
        self.record("save_file")?;
        Ok(Self::pop(&self.save).unwrap_or(SaveFileResponse {
            success: true,
            message: None,
        }))
    }

    async fn run_file(&self, _req: &RunFileRequest) -> Result<RunFileResponse> {
        self.record("run_file")?;
        Ok(Self::pop(&self.run).unwrap_or(RunFileResponse {
            output: "ran".to_string(),
            error: None,
            error_explanation: None,
            fix_suggestion: None,
            exit_code: 0,
            execution_time: 0.1,
        }))
    }

    async fn install_deps(&self, _project_id: &str) -> Result<InstallDepsResponse> {
        self.record("install_deps")?;
        Ok(Self::pop(&self.deps).unwrap_or(InstallDepsResponse {
            success: true,
            output: Some("installed".to_string()),
            error: None,
        }))
    }

    async fn terminal(&self, _req: &TerminalRequest) -> Result<TerminalResponse> {
        self.record("terminal")?;
        Ok(Self::pop(&self.terminal).unwrap_or(TerminalResponse {
            output: String::new(),
            error: None,
        }))
    }

    async fn analyze_full(
        &self,
        _project_id: &str,
        _skill_level: &str,
    ) -> Result<FullAnalysisResponse> {
        self.record("analyze_full")?;
        Ok(Self::pop(&self.full).unwrap_or(FullAnalysisResponse {
            architecture_overview: "overview".to_string(),
            entry_points: vec!["main.py".to_string()],
            issues: vec![],
            suggestions: vec![],
        }))
    }

    async fn onboard(&self, profile: &LearningProfile) -> Result<OnboardResponse> {
        self.record("onboard")?;
        Ok(Self::pop(&self.onboard).unwrap_or_else(|| OnboardResponse {
            profile: profile.clone(),
            skill_tree: SkillTreeNode {
                id: "root".to_string(),
                name: "Path".to_string(),
                status: TopicStatus::NotStarted,
                children: vec![],
            },
            weekly_plan: vec![],
            progress: LearningProgress::default(),
        }))
    }

    async fn mentor_chat(&self, _req: &MentorChatRequest) -> Result<MentorChatResponse> {
        self.record("mentor_chat")?;
        Ok(Self::pop(&self.mentor).unwrap_or(MentorChatResponse {
            response: "ok".to_string(),
            quiz: None,
        }))
    }

    async fn complete_topic(&self, _req: &CompleteTopicRequest) -> Result<CompleteTopicResponse> {
        self.record("complete_topic")?;
        Ok(Self::pop(&self.complete).unwrap_or(CompleteTopicResponse {
            progress: LearningProgress::default(),
        }))
    }
}
