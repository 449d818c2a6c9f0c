//! Data models module
//!
//! Defines chat messages, their lifecycle, attachments and conversations.
//! Includes Role, MessagePhase, FileInfo, Message, Conversation.

pub mod conversation;
pub mod message;

pub use conversation::Conversation;
pub use message::{compose_user_text, FileInfo, Message, MessagePhase, Role};
