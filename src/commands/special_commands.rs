//! Special commands parser for interactive chat mode
//!
//! Parses the slash commands available during a chat session. Special
//! commands act on the session client-side and never reach the backend:
//! - Switch the agent persona
//! - Clear the conversation log
//! - Regenerate the last assistant reply
//! - Show session status or help
//! - Exit the session
//!
//! Commands are prefixed with `/` and are case-insensitive.

use crate::agents::AgentKind;
use thiserror::Error;

/// Errors that can occur when parsing special commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/help' to see available commands")]
    UnknownCommand(String),

    /// Command was given an unsupported argument
    #[error("Unsupported argument for {command}: {arg}\n\nType '/help' to see valid usage")]
    UnsupportedArgument { command: String, arg: String },

    /// Command requires an argument but none was provided
    #[error("Command {command} requires an argument\n\nUsage: {usage}")]
    MissingArgument { command: String, usage: String },
}

/// Special commands that can be executed during interactive chat
///
/// These commands modify the session state or provide information,
/// rather than being sent to the agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Switch to a different agent persona
    ///
    /// Changes which backend system prompt answers subsequent turns.
    /// The conversation log is kept.
    SwitchAgent(AgentKind),

    /// Wipe the conversation log wholesale
    Clear,

    /// Display current agent, skill level, and backend status
    ShowStatus,

    /// Regenerate the last assistant reply
    ///
    /// Truncates the log back to the superseded assistant turn and
    /// re-submits the user turn that prompted it.
    Regenerate,

    /// Display help information
    Help,

    /// Exit the interactive session
    Exit,

    /// Not a special command
    ///
    /// The input should be sent to the agent as a regular turn.
    None,
}

/// Parse a user input string into a special command
///
/// Commands are case-insensitive. Anything not starting with `/` (other
/// than the bare `exit`/`quit` words) is a regular chat turn.
///
/// # Errors
///
/// Returns `CommandError::UnknownCommand` if input starts with "/" but is
/// not a valid command, `CommandError::UnsupportedArgument` for an invalid
/// agent name, and `CommandError::MissingArgument` for a bare `/agent`.
///
/// # Examples
///
/// ```
/// use codementor::commands::special_commands::{parse_special_command, SpecialCommand};
/// use codementor::agents::AgentKind;
///
/// let cmd = parse_special_command("/agent travel").unwrap();
/// assert_eq!(cmd, SpecialCommand::SwitchAgent(AgentKind::Travel));
///
/// let cmd = parse_special_command("why does my loop hang?").unwrap();
/// assert_eq!(cmd, SpecialCommand::None);
///
/// assert!(parse_special_command("/frobnicate").is_err());
/// ```
pub fn parse_special_command(input: &str) -> Result<SpecialCommand, CommandError> {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();

    if !trimmed.starts_with('/') && lower != "exit" && lower != "quit" {
        return Ok(SpecialCommand::None);
    }

    match lower.as_str() {
        "/clear" => Ok(SpecialCommand::Clear),
        "/status" => Ok(SpecialCommand::ShowStatus),
        "/regen" | "/regenerate" => Ok(SpecialCommand::Regenerate),
        "/help" | "/?" => Ok(SpecialCommand::Help),

        "/agent" => Err(CommandError::MissingArgument {
            command: "/agent".to_string(),
            usage: "/agent <coding|health|travel|business|english>".to_string(),
        }),
        input if input.starts_with("/agent ") => {
            let arg = input[7..].trim();
            match AgentKind::parse_str(arg) {
                Ok(agent) => Ok(SpecialCommand::SwitchAgent(agent)),
                Err(_) => Err(CommandError::UnsupportedArgument {
                    command: "/agent".to_string(),
                    arg: arg.to_string(),
                }),
            }
        }

        "exit" | "quit" | "/exit" | "/quit" => Ok(SpecialCommand::Exit),

        input if input.starts_with('/') => {
            let cmd = input.split_whitespace().next().unwrap_or(input);
            Err(CommandError::UnknownCommand(cmd.to_string()))
        }

        _ => Ok(SpecialCommand::None),
    }
}

/// Display help text for special commands
pub fn print_help() {
    println!(
        r#"
Special Commands for Interactive Chat
=====================================

AGENT SWITCHING:
  /agent coding    - Programming mentor (default)
  /agent health    - Health and wellness assistant
  /agent travel    - Trip planning assistant
  /agent business  - Business and career assistant
  /agent english   - English tutor with grammar corrections

CONVERSATION:
  /clear           - Wipe the conversation log
  /regen           - Regenerate the last assistant reply

SESSION INFORMATION:
  /status          - Show current agent, skill level, and backend health
  /help            - Show this help message
  /?               - Same as /help

SESSION CONTROL:
  exit             - Exit interactive mode
  quit             - Same as exit

NOTES:
  - Commands are case-insensitive
  - Regular text (not starting with /) is sent to the active agent
  - Switching agents keeps the conversation log
"#
    );
}
