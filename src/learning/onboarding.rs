//! Onboarding wizard state
//!
//! Four-step wizard that collects a learning profile before the single
//! onboarding round trip: goal, background, style, commitment. Steps
//! support back and forward navigation; the first step is gated on a
//! chosen target role, every other field has a sensible default.

use crate::api::types::LearningProfile;
use crate::error::{MentorError, Result};

/// The wizard's four steps, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    /// Target role and industry
    Goal,
    /// Prior experience
    Background,
    /// Learning speed and preferred style
    Style,
    /// Hours per week and target months
    Commitment,
}

impl WizardStep {
    /// Zero-based position, used for progress display
    pub fn index(&self) -> usize {
        match self {
            Self::Goal => 0,
            Self::Background => 1,
            Self::Style => 2,
            Self::Commitment => 3,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Goal => "What do you want to become?",
            Self::Background => "What's your background?",
            Self::Style => "How do you like to learn?",
            Self::Commitment => "How much time can you commit?",
        }
    }

    fn next(&self) -> Option<Self> {
        match self {
            Self::Goal => Some(Self::Background),
            Self::Background => Some(Self::Style),
            Self::Style => Some(Self::Commitment),
            Self::Commitment => None,
        }
    }

    fn previous(&self) -> Option<Self> {
        match self {
            Self::Goal => None,
            Self::Background => Some(Self::Goal),
            Self::Style => Some(Self::Background),
            Self::Commitment => Some(Self::Style),
        }
    }
}

/// In-progress onboarding answers
///
/// Mutated by the wizard prompts; turned into a `LearningProfile` once
/// the final step is confirmed.
#[derive(Debug, Clone)]
pub struct OnboardingWizard {
    step: WizardStep,
    pub target_role: String,
    pub industry: String,
    pub background: String,
    pub learning_speed: String,
    pub preferred_style: String,
    pub hours_per_week: u32,
    pub target_months: u32,
}

impl Default for OnboardingWizard {
    fn default() -> Self {
        Self {
            step: WizardStep::Goal,
            target_role: String::new(),
            industry: String::new(),
            background: "complete beginner".to_string(),
            learning_speed: "steady".to_string(),
            preferred_style: "hands-on".to_string(),
            hours_per_week: 5,
            target_months: 6,
        }
    }
}

impl OnboardingWizard {
    /// Start at the goal step
    pub fn new() -> Self {
        Self::default()
    }

    /// The current step
    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// Whether forward navigation is allowed from the current step
    ///
    /// Only the goal step gates: a target role must be chosen before the
    /// rest of the wizard opens up.
    pub fn can_advance(&self) -> bool {
        match self.step {
            WizardStep::Goal => !self.target_role.trim().is_empty(),
            _ => true,
        }
    }

    /// Move to the next step
    ///
    /// Returns false from the final step, which is left to
    /// [`finish`](Self::finish).
    pub fn advance(&mut self) -> Result<bool> {
        if !self.can_advance() {
            return Err(
                MentorError::Validation("pick a target role to continue".to_string()).into(),
            );
        }
        match self.step.next() {
            Some(next) => {
                self.step = next;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Move to the previous step, keeping all answers
    ///
    /// Returns false from the first step.
    pub fn back(&mut self) -> bool {
        match self.step.previous() {
            Some(previous) => {
                self.step = previous;
                true
            }
            None => false,
        }
    }

    /// Whether the wizard sits on its last step
    pub fn on_final_step(&self) -> bool {
        self.step == WizardStep::Commitment
    }

    /// Build the profile for the onboarding round trip
    ///
    /// # Errors
    ///
    /// Returns a validation error when the target role was never chosen,
    /// regardless of the current step.
    pub fn finish(&self) -> Result<LearningProfile> {
        if self.target_role.trim().is_empty() {
            return Err(MentorError::Validation("target role is required".to_string()).into());
        }
        Ok(LearningProfile {
            target_role: self.target_role.trim().to_string(),
            industry: self.industry.trim().to_string(),
            background: self.background.clone(),
            hours_per_week: self.hours_per_week,
            learning_speed: self.learning_speed.clone(),
            preferred_style: self.preferred_style.clone(),
            target_months: self.target_months,
        })
    }
}
