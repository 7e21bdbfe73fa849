//! Conversation log management
//!
//! This module implements the append-only message log behind every chat
//! panel: user and assistant turns with timestamps, error-flagged turns
//! for failed calls, a bounded recent-history window for backend context,
//! and regeneration that truncates back to the superseded assistant turn.

use crate::api::types::HistoryMessage;
use chrono::{DateTime, Utc};

/// Who produced a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// The human user
    User,
    /// The backend agent
    Assistant,
    /// Client-constructed context (welcome messages, topic seeds)
    System,
}

impl Role {
    /// Wire name used in conversation history payloads
    pub fn api_name(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::System => "system",
        }
    }
}

/// One turn in a conversation
#[derive(Debug, Clone)]
pub struct Message {
    /// Who produced it
    pub role: Role,
    /// The message text
    pub content: String,
    /// When it was appended locally
    pub timestamp: DateTime<Utc>,
    /// Agent persona active when the turn was produced
    pub agent_tag: Option<String>,
    /// True for the single error turn appended after a failed call
    pub is_error: bool,
}

impl Message {
    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now(),
            agent_tag: None,
            is_error: false,
        }
    }
}

/// Append-only message log for one chat panel
///
/// Messages are only ever appended during a session; `/clear` wipes the
/// log wholesale, and regeneration truncates back to (and excluding) the
/// assistant turn being regenerated.
///
/// # Examples
///
/// ```
/// use codementor::session::ConversationLog;
///
/// let mut log = ConversationLog::new();
/// log.add_user("hello");
/// log.add_assistant("hi there", None);
/// assert_eq!(log.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConversationLog {
    messages: Vec<Message>,
}

impl ConversationLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a user turn
    pub fn add_user(&mut self, content: impl Into<String>) {
        self.messages.push(Message::new(Role::User, content));
    }

    /// Append an assistant turn, optionally tagged with the agent persona
    pub fn add_assistant(&mut self, content: impl Into<String>, agent_tag: Option<String>) {
        let mut message = Message::new(Role::Assistant, content);
        message.agent_tag = agent_tag;
        self.messages.push(message);
    }

    /// Append the single error-flagged assistant turn for a failed call
    ///
    /// The log visibly records the failure; prior state is untouched.
    pub fn add_error(&mut self, content: impl Into<String>) {
        let mut message = Message::new(Role::Assistant, content);
        message.is_error = true;
        self.messages.push(message);
    }

    /// Append a client-constructed system turn (welcome messages)
    pub fn add_system(&mut self, content: impl Into<String>) {
        self.messages.push(Message::new(Role::System, content));
    }

    /// Wipe the log wholesale
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// All messages in append order
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of messages in the log
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the log is empty
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The last `window` non-error user/assistant turns as wire history
    ///
    /// Error turns never become backend context; they are a local record
    /// of the failure only.
    pub fn recent_history(&self, window: usize) -> Vec<HistoryMessage> {
        let turns: Vec<&Message> = self
            .messages
            .iter()
            .filter(|m| !m.is_error && matches!(m.role, Role::User | Role::Assistant))
            .collect();
        let start = turns.len().saturating_sub(window);
        turns[start..]
            .iter()
            .map(|m| HistoryMessage {
                role: m.role.api_name().to_string(),
                content: m.content.clone(),
            })
            .collect()
    }

    /// Truncate for regeneration and return the user turn to re-submit
    ///
    /// Removes the most recent assistant turn (and everything after it)
    /// while keeping the user turn that prompted it. Returns `None` when
    /// there is no assistant turn to regenerate, leaving the log intact.
    pub fn prepare_regeneration(&mut self) -> Option<String> {
        let assistant_idx = self
            .messages
            .iter()
            .rposition(|m| m.role == Role::Assistant)?;
        let user_content = self.messages[..assistant_idx]
            .iter()
            .rev()
            .find(|m| m.role == Role::User)?
            .content
            .clone();
        self.messages.truncate(assistant_idx);
        Some(user_content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_order_preserved() {
        let mut log = ConversationLog::new();
        log.add_user("one");
        log.add_assistant("two", Some("coding".to_string()));
        log.add_user("three");
        let contents: Vec<&str> = log.messages().iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_clear_wipes_wholesale() {
        let mut log = ConversationLog::new();
        log.add_user("hello");
        log.add_assistant("hi", None);
        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn test_error_turn_is_flagged_and_excluded_from_history() {
        let mut log = ConversationLog::new();
        log.add_user("hello");
        log.add_error("backend unreachable");
        assert!(log.messages()[1].is_error);
        let history = log.recent_history(10);
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].role, "user");
    }

    #[test]
    fn test_recent_history_window() {
        let mut log = ConversationLog::new();
        for i in 0..8 {
            log.add_user(format!("u{}", i));
            log.add_assistant(format!("a{}", i), None);
        }
        let history = log.recent_history(5);
        assert_eq!(history.len(), 5);
        assert_eq!(history[0].content, "a5");
        assert_eq!(history[4].content, "a7");
    }

    #[test]
    fn test_system_turns_excluded_from_history() {
        let mut log = ConversationLog::new();
        log.add_system("Welcome to Closures!");
        log.add_user("hi");
        let history = log.recent_history(10);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_regeneration_truncates_to_before_assistant_turn() {
        let mut log = ConversationLog::new();
        log.add_user("q1");
        log.add_assistant("a1", None);
        log.add_user("q2");
        log.add_assistant("a2", None);

        let len_before_response = 3; // q1, a1, q2
        let resubmit = log.prepare_regeneration().unwrap();
        assert_eq!(resubmit, "q2");
        assert_eq!(log.len(), len_before_response);

        // Re-appending the new assistant turn restores the original length
        log.add_assistant("a2-regenerated", None);
        assert_eq!(log.len(), 4);
    }

    #[test]
    fn test_regeneration_removes_trailing_error_turns() {
        let mut log = ConversationLog::new();
        log.add_user("q1");
        log.add_assistant("a1", None);
        log.add_error("transient failure");

        // The error turn has Role::Assistant, so it is itself the
        // regeneration target; everything from it onward goes.
        let resubmit = log.prepare_regeneration().unwrap();
        assert_eq!(resubmit, "q1");
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_regeneration_without_assistant_turn_is_noop() {
        let mut log = ConversationLog::new();
        log.add_user("q1");
        assert!(log.prepare_regeneration().is_none());
        assert_eq!(log.len(), 1);
    }
}
