//! Learning path journey
//!
//! Drives the learner through onboarding, the roadmap skill tree, topic
//! study with the AI mentor, and the progress dashboard. Phases move
//! `Onboarding -> Roadmap <-> Learning` and `Roadmap <-> Dashboard`;
//! onboarding happens once per journey via a single round trip.
//!
//! Topic completion is the only mutation of the skill tree: the backend
//! acknowledges with refreshed progress counters, and exactly the
//! completed node's status flips client-side.

pub mod onboarding;

pub use onboarding::{OnboardingWizard, WizardStep};

use crate::api::types::{
    CompleteTopicRequest, LearningProfile, LearningProgress, MentorChatRequest, MentorQuiz,
    PlanTask, SkillTreeNode, TopicStatus,
};
use crate::api::MentorBackend;
use crate::error::{MentorError, Result};
use crate::session::ConversationLog;

use std::sync::Arc;

/// Where the learner currently is in the journey
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JourneyPhase {
    /// Collecting the profile; nothing else is reachable yet
    Onboarding,
    /// Browsing the skill tree and weekly plan
    Roadmap,
    /// Studying one topic with the mentor
    Learning,
    /// Viewing aggregate progress
    Dashboard,
}

/// One learner's journey through the skill tree
pub struct LearningJourney {
    backend: Arc<dyn MentorBackend>,
    user_id: String,
    phase: JourneyPhase,
    profile: Option<LearningProfile>,
    skill_tree: Option<SkillTreeNode>,
    weekly_plan: Vec<PlanTask>,
    progress: LearningProgress,
    current_topic: Option<String>,
    mentor_log: ConversationLog,
    last_quiz: Option<MentorQuiz>,
}

impl LearningJourney {
    /// Create a journey in the onboarding phase
    pub fn new(backend: Arc<dyn MentorBackend>, user_id: impl Into<String>) -> Self {
        Self {
            backend,
            user_id: user_id.into(),
            phase: JourneyPhase::Onboarding,
            profile: None,
            skill_tree: None,
            weekly_plan: Vec::new(),
            progress: LearningProgress::default(),
            current_topic: None,
            mentor_log: ConversationLog::new(),
            last_quiz: None,
        }
    }

    /// Current phase
    pub fn phase(&self) -> JourneyPhase {
        self.phase
    }

    /// The learner's profile, once onboarded
    pub fn profile(&self) -> Option<&LearningProfile> {
        self.profile.as_ref()
    }

    /// The skill tree root, once onboarded
    pub fn skill_tree(&self) -> Option<&SkillTreeNode> {
        self.skill_tree.as_ref()
    }

    /// The weekly plan tasks
    pub fn weekly_plan(&self) -> &[PlanTask] {
        &self.weekly_plan
    }

    /// Aggregate progress counters
    pub fn progress(&self) -> LearningProgress {
        self.progress
    }

    /// Id of the topic being studied, in the learning phase
    pub fn current_topic(&self) -> Option<&str> {
        self.current_topic.as_deref()
    }

    /// The mentor conversation for the current topic
    pub fn mentor_log(&self) -> &ConversationLog {
        &self.mentor_log
    }

    /// The quiz attached to the most recent mentor reply, if any
    pub fn last_quiz(&self) -> Option<&MentorQuiz> {
        self.last_quiz.as_ref()
    }

    /// Submit the finished profile, receiving tree, plan, and progress
    ///
    /// The single onboarding round trip. Success moves the journey to
    /// the roadmap; failure keeps it in onboarding with answers intact.
    pub async fn complete_onboarding(&mut self, profile: LearningProfile) -> Result<()> {
        if self.phase != JourneyPhase::Onboarding {
            return Err(MentorError::InvalidState("already onboarded".to_string()).into());
        }
        let response = self.backend.onboard(&profile).await?;
        tracing::info!(
            "Onboarded {} toward {}",
            self.user_id,
            response.profile.target_role
        );
        self.profile = Some(response.profile);
        self.skill_tree = Some(response.skill_tree);
        self.weekly_plan = response.weekly_plan;
        self.progress = response.progress;
        self.phase = JourneyPhase::Roadmap;
        Ok(())
    }

    /// Start studying a topic from the roadmap
    ///
    /// Seeds the mentor conversation with a client-constructed welcome
    /// message; no network call happens until the learner says something.
    pub fn start_topic(&mut self, topic_id: &str) -> Result<()> {
        if self.phase != JourneyPhase::Roadmap {
            return Err(
                MentorError::InvalidState("topics start from the roadmap".to_string()).into(),
            );
        }
        let tree = self
            .skill_tree
            .as_ref()
            .ok_or_else(|| MentorError::InvalidState("no skill tree".to_string()))?;
        let node = find_node(tree, topic_id)
            .ok_or_else(|| MentorError::Validation(format!("unknown topic: {}", topic_id)))?;
        let name = node.name.clone();

        if node.status == TopicStatus::NotStarted {
            if let Some(tree) = self.skill_tree.as_mut() {
                set_status(tree, topic_id, TopicStatus::InProgress);
            }
        }
        self.current_topic = Some(topic_id.to_string());
        self.mentor_log = ConversationLog::new();
        self.mentor_log.add_system(format!(
            "Welcome to \"{}\"! Ask me anything about it, or say \"quiz me\" when you feel ready.",
            name
        ));
        self.last_quiz = None;
        self.phase = JourneyPhase::Learning;
        Ok(())
    }

    /// Leave the current topic and return to the roadmap
    pub fn back_to_roadmap(&mut self) -> Result<()> {
        match self.phase {
            JourneyPhase::Learning | JourneyPhase::Dashboard => {
                self.phase = JourneyPhase::Roadmap;
                Ok(())
            }
            _ => Err(MentorError::InvalidState("not in a topic or dashboard".to_string()).into()),
        }
    }

    /// Open the progress dashboard from the roadmap
    pub fn open_dashboard(&mut self) -> Result<()> {
        if self.phase != JourneyPhase::Roadmap {
            return Err(MentorError::InvalidState(
                "the dashboard opens from the roadmap".to_string(),
            )
            .into());
        }
        self.phase = JourneyPhase::Dashboard;
        Ok(())
    }

    /// Send a message to the topic mentor
    ///
    /// On failure a single error-flagged turn records the problem and
    /// the conversation stays usable.
    pub async fn mentor_say(&mut self, message: &str) -> Result<String> {
        if self.phase != JourneyPhase::Learning {
            return Err(MentorError::InvalidState("no topic in progress".to_string()).into());
        }
        let topic = self
            .current_topic
            .clone()
            .ok_or_else(|| MentorError::InvalidState("no topic in progress".to_string()))?;
        let profile = self
            .profile
            .clone()
            .ok_or_else(|| MentorError::InvalidState("no profile".to_string()))?;

        self.mentor_log.add_user(message);
        let request = MentorChatRequest {
            message: message.to_string(),
            topic,
            user_profile: profile,
            conversation_history: self.mentor_log.recent_history(10),
        };
        match self.backend.mentor_chat(&request).await {
            Ok(reply) => {
                self.mentor_log.add_assistant(reply.response.clone(), None);
                self.last_quiz = reply.quiz;
                Ok(reply.response)
            }
            Err(e) => {
                self.mentor_log.add_error(format!("Mentor call failed: {}", e));
                Err(e)
            }
        }
    }

    /// Mark a topic complete
    ///
    /// Posts the completion, merges the returned progress counters, and
    /// flips exactly that node's status. Valid from the learning phase
    /// (for the current topic) or straight from the roadmap.
    pub async fn complete_topic(&mut self, topic_id: &str) -> Result<LearningProgress> {
        if self.phase == JourneyPhase::Onboarding {
            return Err(MentorError::InvalidState("not onboarded yet".to_string()).into());
        }
        let tree = self
            .skill_tree
            .as_ref()
            .ok_or_else(|| MentorError::InvalidState("no skill tree".to_string()))?;
        if find_node(tree, topic_id).is_none() {
            return Err(MentorError::Validation(format!("unknown topic: {}", topic_id)).into());
        }

        let request = CompleteTopicRequest {
            topic_id: topic_id.to_string(),
            user_id: self.user_id.clone(),
        };
        let response = self.backend.complete_topic(&request).await?;
        self.progress = response.progress;
        if let Some(tree) = self.skill_tree.as_mut() {
            set_status(tree, topic_id, TopicStatus::Completed);
        }
        if self.current_topic.as_deref() == Some(topic_id) {
            self.current_topic = None;
            self.phase = JourneyPhase::Roadmap;
        }
        Ok(self.progress)
    }
}

/// Depth-first search for a node by id
pub fn find_node<'a>(root: &'a SkillTreeNode, id: &str) -> Option<&'a SkillTreeNode> {
    if root.id == id {
        return Some(root);
    }
    root.children.iter().find_map(|child| find_node(child, id))
}

fn set_status(root: &mut SkillTreeNode, id: &str, status: TopicStatus) -> bool {
    if root.id == id {
        root.status = status;
        return true;
    }
    root.children
        .iter_mut()
        .any(|child| set_status(child, id, status))
}
