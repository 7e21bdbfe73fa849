//! Interactive chat mode handler
//!
//! Runs a readline loop over a chat session against the backend agents.
//! Slash commands are parsed client-side and never dispatched; regular
//! turns go to the active agent with a bounded recent-history window.
//! The English agent takes a separate endpoint that returns grammar
//! corrections, rendered inline after the reply.

use crate::agents::{AgentKind, ChatState};
use crate::api::types::{AgentChatRequest, Correction, EnglishChatRequest};
use crate::api::MentorBackend;
use crate::commands::special_commands::{parse_special_command, print_help, SpecialCommand};
use crate::config::Config;
use crate::error::{MentorError, Result};
use crate::intent::{classify, Intent};
use crate::notify;
use crate::session::ConversationLog;

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::sync::Arc;

/// One interactive chat session
///
/// Separated from the readline loop so the submit/regenerate semantics
/// are testable against a fake backend.
pub struct ChatSession {
    backend: Arc<dyn MentorBackend>,
    pub state: ChatState,
    log: ConversationLog,
    history_window: usize,
    last_corrections: Vec<Correction>,
    suggestions: Vec<String>,
}

impl ChatSession {
    /// Create a session with an empty log
    pub fn new(backend: Arc<dyn MentorBackend>, state: ChatState, history_window: usize) -> Self {
        Self {
            backend,
            state,
            log: ConversationLog::new(),
            history_window,
            last_corrections: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// The conversation log
    pub fn log(&self) -> &ConversationLog {
        &self.log
    }

    /// Grammar corrections attached to the last English reply
    pub fn last_corrections(&self) -> &[Correction] {
        &self.last_corrections
    }

    /// Follow-up suggestions attached to the last agent reply
    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    /// Wipe the conversation log wholesale
    pub fn clear(&mut self) {
        self.log.clear();
        self.last_corrections.clear();
        self.suggestions.clear();
    }

    /// Submit one user turn to the active agent
    ///
    /// Appends the user turn, dispatches with the recent-history window,
    /// and appends the assistant turn. A failed call appends exactly one
    /// error-flagged turn and returns the error; nothing is retried.
    pub async fn submit(&mut self, text: &str) -> Result<String> {
        let text = text.trim();
        if text.is_empty() {
            return Err(MentorError::Validation("message is empty".to_string()).into());
        }
        self.log.add_user(text);
        let history = self.log.recent_history(self.history_window);
        self.last_corrections.clear();
        self.suggestions.clear();

        let result = if self.state.agent == AgentKind::English {
            let request = EnglishChatRequest {
                message: text.to_string(),
                conversation_history: history,
            };
            match self.backend.english_chat(&request).await {
                Ok(reply) => {
                    self.last_corrections = reply.corrections;
                    Ok(reply.response)
                }
                Err(e) => Err(e),
            }
        } else {
            let request = AgentChatRequest {
                agent_type: self.state.agent.api_name().to_string(),
                message: text.to_string(),
                conversation_history: history,
            };
            match self.backend.agent_chat(&request).await {
                Ok(reply) => {
                    self.suggestions = reply.suggestions.unwrap_or_default();
                    Ok(reply.response)
                }
                Err(e) => Err(e),
            }
        };

        match result {
            Ok(response) => {
                self.log
                    .add_assistant(&response, Some(self.state.agent.api_name().to_string()));
                Ok(response)
            }
            Err(e) => {
                self.log.add_error(format!("Agent call failed: {}", e));
                Err(e)
            }
        }
    }

    /// Regenerate the last assistant reply
    ///
    /// Truncates the log back to the superseded assistant turn and
    /// re-submits the user turn that prompted it. With no assistant turn
    /// to replace, the log is left intact and an error is returned.
    pub async fn regenerate(&mut self) -> Result<String> {
        let user_turn = self.log.prepare_regeneration().ok_or_else(|| {
            MentorError::InvalidState("nothing to regenerate yet".to_string())
        })?;
        // The user turn survived the truncation; dispatch without
        // re-appending it.
        let history = self.log.recent_history(self.history_window);
        let result = if self.state.agent == AgentKind::English {
            let request = EnglishChatRequest {
                message: user_turn.clone(),
                conversation_history: history,
            };
            self.backend.english_chat(&request).await.map(|r| r.response)
        } else {
            let request = AgentChatRequest {
                agent_type: self.state.agent.api_name().to_string(),
                message: user_turn.clone(),
                conversation_history: history,
            };
            self.backend.agent_chat(&request).await.map(|r| r.response)
        };
        match result {
            Ok(response) => {
                self.log
                    .add_assistant(&response, Some(self.state.agent.api_name().to_string()));
                Ok(response)
            }
            Err(e) => {
                self.log.add_error(format!("Regeneration failed: {}", e));
                Err(e)
            }
        }
    }
}

/// Suggest a better-suited agent for an off-topic message
///
/// Pure: the classifier only hints, it never switches agents by itself.
pub fn intent_hint(active: AgentKind, text: &str) -> Option<AgentKind> {
    let suggested = match classify(text) {
        Intent::Health => AgentKind::Health,
        Intent::Travel => AgentKind::Travel,
        Intent::Business => AgentKind::Business,
        Intent::Visual | Intent::Chat => return None,
    };
    if suggested == active {
        None
    } else {
        Some(suggested)
    }
}

fn print_corrections(corrections: &[Correction]) {
    if corrections.is_empty() {
        return;
    }
    println!("{}", "Corrections:".yellow().bold());
    for c in corrections {
        println!(
            "  {} -> {}",
            c.original.red().strikethrough(),
            c.corrected.green()
        );
        if !c.explanation.is_empty() {
            println!("    {}", c.explanation.dimmed());
        }
    }
    println!();
}

async fn print_status(session: &ChatSession, config: &Config) {
    println!("Agent:   {} - {}", session.state.agent, session.state.agent.description());
    println!("Skill:   {}", session.state.skill);
    println!("Backend: {}", config.backend.base_url);
    println!("Turns:   {}", session.log().len());
    match session.backend.health().await {
        Ok(health) => println!("Health:  {}", health.status.green()),
        Err(e) => println!("Health:  {} ({})", "unreachable".red(), e),
    }
}

/// Start interactive chat mode
///
/// # Arguments
///
/// * `config` - Loaded configuration
/// * `backend` - Backend the session talks to
/// * `agent` - Optional override for the configured default agent
pub async fn run(config: &Config, backend: Arc<dyn MentorBackend>, agent: Option<String>) -> Result<()> {
    let agent = match agent {
        Some(name) => AgentKind::parse_str(&name).map_err(MentorError::Validation)?,
        None => config.default_agent(),
    };
    let state = ChatState::new(agent, config.skill_level());
    let mut session = ChatSession::new(backend, state, config.chat.history_window);

    println!(
        "{} chat session - {} agent ({})",
        "codementor".bold(),
        session.state.agent,
        session.state.agent.description()
    );
    println!("Type '/help' for commands, 'exit' to leave.\n");

    let mut rl = DefaultEditor::new().map_err(|e| MentorError::Config(e.to_string()))?;
    loop {
        let prompt = session.state.format_colored_prompt();
        match rl.readline(&prompt) {
            Ok(line) => {
                let input = line.trim();
                if input.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(input);

                match parse_special_command(input) {
                    Ok(SpecialCommand::Exit) => break,
                    Ok(SpecialCommand::Help) => print_help(),
                    Ok(SpecialCommand::Clear) => {
                        session.clear();
                        notify::info("conversation cleared");
                    }
                    Ok(SpecialCommand::ShowStatus) => print_status(&session, config).await,
                    Ok(SpecialCommand::SwitchAgent(new_agent)) => {
                        let old = session.state.switch_agent(new_agent);
                        println!(
                            "Switched from {} to {} ({})",
                            old,
                            new_agent,
                            new_agent.description()
                        );
                    }
                    Ok(SpecialCommand::Regenerate) => match session.regenerate().await {
                        Ok(response) => println!("\n{}\n", response),
                        Err(e) => notify::error(&e.to_string()),
                    },
                    Ok(SpecialCommand::None) => {
                        if let Some(suggested) = intent_hint(session.state.agent, input) {
                            println!(
                                "{}",
                                format!(
                                    "tip: this sounds like a {} question, try '/agent {}'",
                                    suggested.api_name(),
                                    suggested.api_name()
                                )
                                .dimmed()
                            );
                        }
                        match session.submit(input).await {
                            Ok(response) => {
                                println!("\n{}\n", response);
                                print_corrections(session.last_corrections());
                                for suggestion in session.suggestions() {
                                    println!("  {} {}", "?".cyan(), suggestion.dimmed());
                                }
                            }
                            Err(e) => notify::error(&e.to_string()),
                        }
                    }
                    Err(e) => notify::error(&e.to_string()),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                tracing::error!("Readline error: {:?}", err);
                break;
            }
        }
    }
    println!("Goodbye!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::SkillLevel;
    use crate::api::types::{AgentChatResponse, EnglishChatResponse};
    use crate::test_utils::FakeBackend;

    fn session_with(fake: Arc<FakeBackend>, agent: AgentKind) -> ChatSession {
        ChatSession::new(fake, ChatState::new(agent, SkillLevel::Beginner), 10)
    }

    #[tokio::test]
    async fn test_submit_appends_user_and_assistant_turns() {
        let fake = Arc::new(FakeBackend::new());
        fake.script_chat(AgentChatResponse {
            response: "Use a base case.".to_string(),
            suggestions: Some(vec!["What is recursion?".to_string()]),
        });
        let mut session = session_with(fake.clone(), AgentKind::Coding);
        let reply = session.submit("my recursion never stops").await.unwrap();
        assert_eq!(reply, "Use a base case.");
        assert_eq!(session.log().len(), 2);
        assert_eq!(session.suggestions().len(), 1);
        assert_eq!(fake.call_count("agent_chat"), 1);
    }

    #[tokio::test]
    async fn test_empty_message_never_dispatches() {
        let fake = Arc::new(FakeBackend::new());
        let mut session = session_with(fake.clone(), AgentKind::Coding);
        assert!(session.submit("   ").await.is_err());
        assert_eq!(fake.call_count("agent_chat"), 0);
        assert!(session.log().is_empty());
    }

    #[tokio::test]
    async fn test_failed_submit_appends_single_error_turn() {
        let fake = Arc::new(FakeBackend::new());
        fake.fail_next("backend unreachable");
        let mut session = session_with(fake.clone(), AgentKind::Coding);
        assert!(session.submit("hello").await.is_err());

        let messages = session.log().messages();
        assert_eq!(messages.len(), 2);
        assert!(messages[1].is_error);

        // The session stays usable and the error turn never becomes context
        session.submit("hello again").await.unwrap();
        assert_eq!(session.log().len(), 4);
    }

    #[tokio::test]
    async fn test_english_agent_uses_english_endpoint_and_corrections() {
        let fake = Arc::new(FakeBackend::new());
        fake.script_english(EnglishChatResponse {
            response: "Nice try! Small fix below.".to_string(),
            intent: "conversation".to_string(),
            corrections: vec![Correction {
                original: "I goed there".to_string(),
                corrected: "I went there".to_string(),
                explanation: "irregular past tense".to_string(),
            }],
        });
        let mut session = session_with(fake.clone(), AgentKind::English);
        session.submit("I goed there yesterday").await.unwrap();
        assert_eq!(fake.call_count("english_chat"), 1);
        assert_eq!(fake.call_count("agent_chat"), 0);
        assert_eq!(session.last_corrections().len(), 1);
        assert_eq!(session.last_corrections()[0].corrected, "I went there");
    }

    #[tokio::test]
    async fn test_regenerate_length_arithmetic() {
        let fake = Arc::new(FakeBackend::new());
        let mut session = session_with(fake, AgentKind::Coding);
        session.submit("q1").await.unwrap();
        session.submit("q2").await.unwrap();
        let len_before = session.log().len();

        session.regenerate().await.unwrap();
        // One assistant turn replaced: same length as before
        assert_eq!(session.log().len(), len_before);
    }

    #[tokio::test]
    async fn test_regenerate_with_empty_log_is_rejected() {
        let fake = Arc::new(FakeBackend::new());
        let mut session = session_with(fake.clone(), AgentKind::Coding);
        assert!(session.regenerate().await.is_err());
        assert_eq!(fake.call_count("agent_chat"), 0);
    }

    #[tokio::test]
    async fn test_switching_agents_keeps_log() {
        let fake = Arc::new(FakeBackend::new());
        let mut session = session_with(fake, AgentKind::Coding);
        session.submit("hello").await.unwrap();
        session.state.switch_agent(AgentKind::Travel);
        assert_eq!(session.log().len(), 2);
        session.submit("plan a trip to Kyoto").await.unwrap();
        assert_eq!(session.log().len(), 4);
    }

    #[test]
    fn test_intent_hint_suggests_other_agent_only() {
        assert_eq!(
            intent_hint(AgentKind::Coding, "plan a trip to Tokyo in May"),
            Some(AgentKind::Travel)
        );
        assert_eq!(
            intent_hint(AgentKind::Travel, "plan a trip to Tokyo in May"),
            None
        );
        assert_eq!(intent_hint(AgentKind::Coding, "why is my loop slow"), None);
    }
}
