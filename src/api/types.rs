//! Wire types for the Live Code Mentor backend API
//!
//! Request and response bodies for every backend endpoint the client
//! consumes. Field casing follows the backend contract exactly: the
//! teaching endpoints use camelCase, the agent/project/learning endpoints
//! use snake_case. Serde rename attributes keep the Rust side idiomatic.

use serde::{Deserialize, Serialize};

/// Severity of a reported code finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Syntax or runtime errors
    Critical,
    /// Logic issues
    Warning,
    /// Style and optimization notes
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Critical => write!(f, "critical"),
            Self::Warning => write!(f, "warning"),
            Self::Info => write!(f, "info"),
        }
    }
}

/// One reported code issue
///
/// `line` refers to a line number in the exact source text that was
/// submitted for analysis; it is meaningless against any other snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// 1-based line number in the analyzed snapshot
    pub line: u32,
    /// How serious the issue is
    pub severity: Severity,
    /// What is wrong
    pub message: String,
    /// How to fix it
    pub suggestion: String,
}

/// Request body for `POST /api/analyze-code`
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeCodeRequest {
    pub code: String,
    pub language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skill_level: Option<String>,
}

/// Response body for `POST /api/analyze-code`
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeCodeResponse {
    /// Findings in report order; empty means the code is clean
    #[serde(default)]
    pub bugs: Vec<Finding>,
    /// Coarse quality verdict: "good", "fair", or "poor"
    #[serde(default)]
    pub overall_quality: String,
}

/// The finding fields the teaching endpoint needs
#[derive(Debug, Clone, Serialize)]
pub struct BugRef {
    pub line: u32,
    pub message: String,
}

impl From<&Finding> for BugRef {
    fn from(finding: &Finding) -> Self {
        Self {
            line: finding.line,
            message: finding.message.clone(),
        }
    }
}

/// Request body for `POST /api/generate-teaching`
#[derive(Debug, Clone, Serialize)]
pub struct TeachingRequest {
    pub code: String,
    pub bug: BugRef,
    #[serde(rename = "mentorStyle")]
    pub mentor_style: String,
}

/// Response body for `POST /api/generate-teaching`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeachingResponse {
    pub concept_name: String,
    pub natural_explanation: String,
    pub why_it_matters: String,
    pub common_mistake: String,
}

/// Request body for `POST /api/generate-deeper-explanation`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeeperExplanationRequest {
    pub concept_name: String,
    pub current_explanation: String,
}

/// Response body for `POST /api/generate-deeper-explanation`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeeperExplanationResponse {
    pub deeper_explanation: String,
    #[serde(default)]
    pub code_examples: Vec<String>,
    #[serde(default)]
    pub related_concepts: Vec<String>,
}

/// Request body for `POST /api/generate-visual-diagram`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualDiagramRequest {
    pub concept_name: String,
    pub diagram_type: String,
    pub code: String,
    pub explanation: String,
}

/// Response body for `POST /api/generate-visual-diagram`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VisualDiagramResponse {
    pub svg: String,
}

/// Request body for `POST /api/evaluate-answer`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateAnswerRequest {
    pub question: String,
    pub student_answer: String,
    pub correct_concept: String,
}

/// Response body for `POST /api/evaluate-answer`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EvaluateAnswerResponse {
    pub understood: bool,
    pub feedback: String,
    #[serde(default)]
    pub encouragement: String,
}

/// One prior turn sent as chat context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryMessage {
    pub role: String,
    pub content: String,
}

/// Request body for `POST /api/agent/chat`
#[derive(Debug, Clone, Serialize)]
pub struct AgentChatRequest {
    pub agent_type: String,
    pub message: String,
    #[serde(default)]
    pub conversation_history: Vec<HistoryMessage>,
}

/// Response body for `POST /api/agent/chat`
#[derive(Debug, Clone, Deserialize)]
pub struct AgentChatResponse {
    pub response: String,
    #[serde(default)]
    pub suggestions: Option<Vec<String>>,
}

/// A grammar correction from the English tutor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Correction {
    pub original: String,
    pub corrected: String,
    pub explanation: String,
}

/// Request body for `POST /api/english-chat`
#[derive(Debug, Clone, Serialize)]
pub struct EnglishChatRequest {
    pub message: String,
    #[serde(rename = "conversationHistory")]
    pub conversation_history: Vec<HistoryMessage>,
}

/// Response body for `POST /api/english-chat`
#[derive(Debug, Clone, Deserialize)]
pub struct EnglishChatResponse {
    pub response: String,
    /// Detected intent: "question", "practice", or "conversation"
    #[serde(default)]
    pub intent: String,
    #[serde(default)]
    pub corrections: Vec<Correction>,
}

/// Request body for `POST /api/analyze-image`
#[derive(Debug, Clone, Serialize)]
pub struct ImageAnalysisRequest {
    /// Base64-encoded image bytes
    pub image_data: String,
    /// One of "code_screenshot", "whiteboard", "english_text", "general"
    pub task_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_context: Option<String>,
}

/// Response body for `POST /api/analyze-image`
#[derive(Debug, Clone, Deserialize)]
pub struct ImageAnalysisResponse {
    pub analysis: String,
    #[serde(default)]
    pub task_type: String,
}

/// A node in an uploaded project's file tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileNode {
    pub name: String,
    pub path: String,
    /// "file" or "directory"
    #[serde(rename = "type", default = "default_node_type")]
    pub node_type: String,
    #[serde(default)]
    pub children: Vec<FileNode>,
}

fn default_node_type() -> String {
    "file".to_string()
}

impl FileNode {
    /// Whether this node is a directory
    pub fn is_dir(&self) -> bool {
        self.node_type == "directory"
    }
}

/// Response body for `POST /api/upload-project`
#[derive(Debug, Clone, Deserialize)]
pub struct UploadProjectResponse {
    pub project_id: String,
    #[serde(default)]
    pub files: Vec<FileNode>,
    #[serde(default)]
    pub files_count: u32,
}

/// Per-language share of a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageStat {
    pub name: String,
    pub percentage: f64,
}

/// Response body for `POST /api/analyze-project`
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectOverviewResponse {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub languages: Vec<LanguageStat>,
    #[serde(default)]
    pub total_files: u32,
    #[serde(default)]
    pub readme_content: Option<String>,
}

/// Response body for `GET /api/project/{id}/file`
#[derive(Debug, Clone, Deserialize)]
pub struct FileContentResponse {
    pub path: String,
    pub content: String,
    #[serde(default)]
    pub language: String,
}

/// Request body for `POST /api/project/{id}/file`
#[derive(Debug, Clone, Serialize)]
pub struct SaveFileRequest {
    pub project_id: String,
    pub path: String,
    pub content: String,
}

/// Acknowledgement for a file save
#[derive(Debug, Clone, Deserialize)]
pub struct SaveFileResponse {
    #[serde(default = "default_true")]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

fn default_true() -> bool {
    true
}

/// Request body for `POST /api/project/{id}/run`
#[derive(Debug, Clone, Serialize)]
pub struct RunFileRequest {
    pub project_id: String,
    pub file_path: String,
    pub skill_level: String,
}

/// Response body for `POST /api/project/{id}/run`
#[derive(Debug, Clone, Deserialize)]
pub struct RunFileResponse {
    #[serde(default)]
    pub output: String,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_explanation: Option<String>,
    #[serde(default)]
    pub fix_suggestion: Option<String>,
    #[serde(default)]
    pub exit_code: i32,
    #[serde(default)]
    pub execution_time: f64,
}

/// Response body for `POST /api/project/{id}/install-deps`
#[derive(Debug, Clone, Deserialize)]
pub struct InstallDepsResponse {
    pub success: bool,
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Request body for `POST /api/project/{id}/terminal`
#[derive(Debug, Clone, Serialize)]
pub struct TerminalRequest {
    pub project_id: String,
    pub command: String,
}

/// Response body for `POST /api/project/{id}/terminal`
#[derive(Debug, Clone, Deserialize)]
pub struct TerminalResponse {
    #[serde(default)]
    pub output: String,
    #[serde(default)]
    pub error: Option<String>,
}

/// Response body for `POST /api/project/{id}/analyze-full`
#[derive(Debug, Clone, Deserialize)]
pub struct FullAnalysisResponse {
    #[serde(default)]
    pub architecture_overview: String,
    #[serde(default)]
    pub entry_points: Vec<String>,
    #[serde(default)]
    pub issues: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

/// Learner profile produced by the onboarding wizard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningProfile {
    pub target_role: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub background: String,
    #[serde(default)]
    pub hours_per_week: u32,
    #[serde(default)]
    pub learning_speed: String,
    #[serde(default)]
    pub preferred_style: String,
    #[serde(default)]
    pub target_months: u32,
}

/// Completion state of a skill-tree topic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopicStatus {
    NotStarted,
    InProgress,
    Completed,
}

/// A node in the learner's skill tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillTreeNode {
    pub id: String,
    pub name: String,
    pub status: TopicStatus,
    #[serde(default)]
    pub children: Vec<SkillTreeNode>,
}

/// One task in the weekly plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanTask {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub estimated_minutes: u32,
}

/// Aggregate progress counters for a learning journey
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct LearningProgress {
    #[serde(default)]
    pub completed_topics: u32,
    #[serde(default)]
    pub total_topics: u32,
    #[serde(default)]
    pub streak_days: u32,
}

/// Response body for `POST /api/learning/onboard`
#[derive(Debug, Clone, Deserialize)]
pub struct OnboardResponse {
    pub profile: LearningProfile,
    pub skill_tree: SkillTreeNode,
    #[serde(default)]
    pub weekly_plan: Vec<PlanTask>,
    #[serde(default)]
    pub progress: LearningProgress,
}

/// Request body for `POST /api/learning/mentor`
#[derive(Debug, Clone, Serialize)]
pub struct MentorChatRequest {
    pub message: String,
    pub topic: String,
    pub user_profile: LearningProfile,
    #[serde(default)]
    pub conversation_history: Vec<HistoryMessage>,
}

/// An optional quiz attached to a mentor reply
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MentorQuiz {
    pub question: String,
    #[serde(default)]
    pub concept: String,
}

/// Response body for `POST /api/learning/mentor`
#[derive(Debug, Clone, Deserialize)]
pub struct MentorChatResponse {
    pub response: String,
    #[serde(default)]
    pub quiz: Option<MentorQuiz>,
}

/// Request body for `POST /api/learning/complete-topic`
#[derive(Debug, Clone, Serialize)]
pub struct CompleteTopicRequest {
    pub topic_id: String,
    pub user_id: String,
}

/// Response body for `POST /api/learning/complete-topic`
#[derive(Debug, Clone, Deserialize)]
pub struct CompleteTopicResponse {
    pub progress: LearningProgress,
}

/// Response body for `GET /api/health`
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub timestamp: String,
}
