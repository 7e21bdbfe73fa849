//! Session state for conversation panels
//!
//! Each chat surface (agent chat, english tutor, learning mentor) owns
//! one `ConversationLog`; logs are never shared across panels.

pub mod conversation;

pub use conversation::{ConversationLog, Message, Role};
