use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::message::{FileInfo, Message};

/// Opening assistant message of every chat
pub const GREETING: &str = "Hello! I'm Verion, your AI legal assistant. I can help you analyze, summarize, and understand legal documents. How can I assist you today?";

/// An ordered chat transcript
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    /// When this chat was started
    pub started_at: DateTime<Utc>,
    /// Messages in display order
    pub messages: Vec<Message>,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            messages: vec![Message::assistant(1, GREETING)],
        }
    }

    /// Discard everything but a fresh greeting
    pub fn new_chat(&mut self) {
        *self = Self::new();
    }

    fn next_id(&self) -> u64 {
        self.messages.last().map_or(1, |m| m.id + 1)
    }

    /// Append a user message and return its id
    pub fn push_user(&mut self, text: impl Into<String>, attachment: Option<FileInfo>) -> u64 {
        let id = self.next_id();
        self.messages.push(Message::user(id, text, attachment));
        id
    }

    /// Append an assistant message awaiting its reply and return its id
    pub fn push_pending(&mut self) -> u64 {
        let id = self.next_id();
        self.messages.push(Message::pending(id));
        id
    }

    pub fn get(&self, id: u64) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut Message> {
        self.messages.iter_mut().find(|m| m.id == id)
    }

    /// Whether anything beyond the greeting was said
    pub fn has_exchanges(&self) -> bool {
        self.messages.len() > 1
    }
}
