//! codementor - Interactive AI code mentor CLI library
//!
//! This library provides the core functionality for the codementor
//! client: chat sessions against mentor agents, code analysis with
//! teaching drill-downs, the project workspace, and the learning path,
//! all over a pluggable backend seam.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `agents`: Agent personas, skill levels, and mentor styles
//! - `analysis`: The code analysis panel and its supersede semantics
//! - `api`: Backend trait, wire types, and the HTTP implementation
//! - `commands`: CLI subcommand handlers and REPLs
//! - `learning`: Learning path journey and onboarding wizard
//! - `session`: Append-only conversation logs
//! - `teaching`: The teaching overlay state machines
//! - `workspace`: Project tabs, terminal transcript, and workspace ops
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use codementor::api::{HttpBackend, MentorBackend};
//! use codementor::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     config.validate()?;
//!     let backend = HttpBackend::new(&config.backend)?;
//!     let health = backend.health().await?;
//!     println!("backend is {}", health.status);
//!     Ok(())
//! }
//! ```

pub mod agents;
pub mod analysis;
pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod intent;
pub mod learning;
pub mod notify;
pub mod session;
pub mod teaching;
pub mod workspace;

// Re-export commonly used types
pub use agents::{AgentKind, ChatState, MentorStyle, SkillLevel};
pub use api::{HttpBackend, MentorBackend};
pub use config::Config;
pub use error::{MentorError, Result};
pub use session::ConversationLog;

#[cfg(test)]
pub mod test_utils;
