use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, VerionError};

/// Reply shown when the inference request fails
pub const FAILURE_TEXT: &str = "⚠️ Unable to process your request. Please try again.";

/// Who wrote a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    User,
    Assistant,
}

/// Lifecycle of a message. Only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessagePhase {
    /// Waiting for the reply; show the analyzing indicator
    Pending,
    /// Reply known and being typed out
    Revealing,
    /// Full text shown statically
    Settled,
}

/// Metadata of an attached file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    pub name: String,
    pub file_type: String,
    /// Size in bytes
    pub size: u64,
}

impl FileInfo {
    /// `contract.pdf (12.3 KB)`
    pub fn label(&self) -> String {
        format!("{} ({:.1} KB)", self.name, self.size as f64 / 1024.0)
    }
}

/// A single chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: u64,
    pub role: Role,
    pub text: String,
    pub created_at: DateTime<Utc>,
    /// First attached file, shown on user messages
    pub attachment: Option<FileInfo>,
    pub phase: MessagePhase,
}

impl Message {
    pub fn user(id: u64, text: impl Into<String>, attachment: Option<FileInfo>) -> Self {
        Self {
            id,
            role: Role::User,
            text: text.into(),
            created_at: Utc::now(),
            attachment,
            phase: MessagePhase::Settled,
        }
    }

    pub fn assistant(id: u64, text: impl Into<String>) -> Self {
        Self {
            id,
            role: Role::Assistant,
            text: text.into(),
            created_at: Utc::now(),
            attachment: None,
            phase: MessagePhase::Settled,
        }
    }

    /// Assistant message awaiting its reply
    pub fn pending(id: u64) -> Self {
        Self {
            phase: MessagePhase::Pending,
            ..Self::assistant(id, String::new())
        }
    }

    /// Local wall-clock time, `HH:MM`
    pub fn timestamp(&self) -> String {
        self.created_at.with_timezone(&Local).format("%H:%M").to_string()
    }

    pub fn is_pending(&self) -> bool {
        self.phase == MessagePhase::Pending
    }

    /// Attach the resolved reply. Animated replies go to `Revealing`,
    /// others settle immediately.
    pub fn resolve(&mut self, text: impl Into<String>, animate: bool) -> Result<()> {
        let to = if animate {
            MessagePhase::Revealing
        } else {
            MessagePhase::Settled
        };
        self.transition(MessagePhase::Pending, to)?;
        self.text = text.into();
        Ok(())
    }

    /// Settle a pending message on the fixed failure text
    pub fn fail(&mut self) -> Result<()> {
        self.transition(MessagePhase::Pending, MessagePhase::Settled)?;
        self.text = FAILURE_TEXT.to_string();
        Ok(())
    }

    /// Typewriter finished
    pub fn finish_reveal(&mut self) -> Result<()> {
        self.transition(MessagePhase::Revealing, MessagePhase::Settled)
    }

    fn transition(&mut self, expected: MessagePhase, to: MessagePhase) -> Result<()> {
        if self.phase != expected {
            return Err(VerionError::InvalidTransition {
                from: self.phase,
                to,
            });
        }
        self.phase = to;
        Ok(())
    }
}

/// Text of the user's message: the prompt, or a file summary when only
/// attachments were given. `None` when there is nothing to send.
pub fn compose_user_text(prompt: &str, attachment_count: usize) -> Option<String> {
    let prompt = prompt.trim();
    if !prompt.is_empty() {
        Some(prompt.to_string())
    } else if attachment_count > 0 {
        Some(format!("Uploaded {} file(s)", attachment_count))
    } else {
        None
    }
}
