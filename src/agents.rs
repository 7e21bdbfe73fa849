//! Agent personas and mentor tuning knobs
//!
//! This module defines the backend chat personas the client can talk to
//! (coding, health, travel, business, english) together with the skill
//! level and mentor style parameters that shape teaching responses.
//! The persona is selected client-side and sent with every chat turn.

use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Backend chat persona selected for a conversation
///
/// Determines which system prompt the backend uses for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    /// Programming mentor: bug hunting, explanations, code review
    Coding,

    /// Health and wellness assistant
    Health,

    /// Trip planning assistant
    Travel,

    /// Business and career assistant
    Business,

    /// English language tutor with grammar corrections
    English,
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Coding => write!(f, "CODING"),
            Self::Health => write!(f, "HEALTH"),
            Self::Travel => write!(f, "TRAVEL"),
            Self::Business => write!(f, "BUSINESS"),
            Self::English => write!(f, "ENGLISH"),
        }
    }
}

impl AgentKind {
    /// Parse an agent kind from a string
    ///
    /// # Arguments
    ///
    /// * `s` - String representation of the agent ("coding", "health",
    ///   "travel", "business", or "english")
    ///
    /// # Examples
    ///
    /// ```
    /// use codementor::agents::AgentKind;
    ///
    /// let agent = AgentKind::parse_str("travel").unwrap();
    /// assert_eq!(agent, AgentKind::Travel);
    /// ```
    pub fn parse_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "coding" | "code" => Ok(Self::Coding),
            "health" => Ok(Self::Health),
            "travel" => Ok(Self::Travel),
            "business" => Ok(Self::Business),
            "english" => Ok(Self::English),
            other => Err(format!("Unknown agent: {}", other)),
        }
    }

    /// Wire name used in the `agent_type` request field
    pub fn api_name(&self) -> &'static str {
        match self {
            Self::Coding => "coding",
            Self::Health => "health",
            Self::Travel => "travel",
            Self::Business => "business",
            Self::English => "english",
        }
    }

    /// Get a user-friendly description of this agent
    pub fn description(&self) -> &'static str {
        match self {
            Self::Coding => "Programming mentor for bugs, concepts, and review",
            Self::Health => "Health and wellness assistant",
            Self::Travel => "Trip planning assistant",
            Self::Business => "Business and career assistant",
            Self::English => "English tutor with grammar corrections",
        }
    }

    /// Get a colored tag representation of this agent
    ///
    /// Suitable for display in the chat prompt, e.g. `[CODING]` in green.
    pub fn colored_tag(&self) -> String {
        match self {
            Self::Coding => format!("[{}]", "CODING".green()),
            Self::Health => format!("[{}]", "HEALTH".cyan()),
            Self::Travel => format!("[{}]", "TRAVEL".yellow()),
            Self::Business => format!("[{}]", "BUSINESS".purple()),
            Self::English => format!("[{}]", "ENGLISH".blue()),
        }
    }

    /// All selectable agents, in help-listing order
    pub fn all() -> &'static [AgentKind] {
        &[
            Self::Coding,
            Self::Health,
            Self::Travel,
            Self::Business,
            Self::English,
        ]
    }
}

/// Self-reported skill level sent with analysis and run requests
///
/// The backend tunes explanation depth to this level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    /// New to programming; explanations avoid jargon
    Beginner,
    /// Comfortable with basics; explanations assume fundamentals
    Intermediate,
    /// Experienced; explanations are terse and technical
    Advanced,
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Beginner => write!(f, "beginner"),
            Self::Intermediate => write!(f, "intermediate"),
            Self::Advanced => write!(f, "advanced"),
        }
    }
}

impl SkillLevel {
    /// Parse a skill level from a string
    ///
    /// # Examples
    ///
    /// ```
    /// use codementor::agents::SkillLevel;
    ///
    /// let level = SkillLevel::parse_str("advanced").unwrap();
    /// assert_eq!(level, SkillLevel::Advanced);
    /// ```
    pub fn parse_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            other => Err(format!("Unknown skill level: {}", other)),
        }
    }
}

/// Mentor style sent with teaching requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MentorStyle {
    /// Warm and encouraging, with simple analogies
    Patient,
    /// Guiding questions that lead to the answer
    Socratic,
    /// Straight to the point
    Direct,
}

impl fmt::Display for MentorStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Patient => write!(f, "patient"),
            Self::Socratic => write!(f, "socratic"),
            Self::Direct => write!(f, "direct"),
        }
    }
}

impl MentorStyle {
    /// Parse a mentor style from a string
    pub fn parse_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "patient" => Ok(Self::Patient),
            "socratic" => Ok(Self::Socratic),
            "direct" => Ok(Self::Direct),
            other => Err(format!("Unknown mentor style: {}", other)),
        }
    }
}

/// Current chat session tuning
///
/// Tracks the active agent persona and skill level during a session.
#[derive(Debug, Clone)]
pub struct ChatState {
    /// The active agent persona
    pub agent: AgentKind,
    /// The user's skill level
    pub skill: SkillLevel,
}

impl ChatState {
    /// Create a new chat state
    pub fn new(agent: AgentKind, skill: SkillLevel) -> Self {
        Self { agent, skill }
    }

    /// Switch to a new agent persona
    ///
    /// # Returns
    ///
    /// The old agent that was replaced
    pub fn switch_agent(&mut self, new_agent: AgentKind) -> AgentKind {
        let old_agent = self.agent;
        self.agent = new_agent;
        old_agent
    }

    /// Format a prompt string with the agent indicator
    ///
    /// # Examples
    ///
    /// ```
    /// use codementor::agents::{AgentKind, ChatState, SkillLevel};
    ///
    /// let state = ChatState::new(AgentKind::Coding, SkillLevel::Beginner);
    /// assert_eq!(state.format_prompt(), "[CODING] >> ");
    /// ```
    pub fn format_prompt(&self) -> String {
        format!("[{}] >> ", self.agent)
    }

    /// Format a prompt string with a colored agent indicator
    pub fn format_colored_prompt(&self) -> String {
        format!("{} >> ", self.agent.colored_tag())
    }
}
