//! Transcript persistence module
//!
//! Saves finished chats as JSON files (`chat-<timestamp>.json`) in the
//! configured history directory and loads the most recent one back.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, VerionError};
use crate::models::Conversation;

const PREFIX: &str = "chat-";
const EXTENSION: &str = ".json";

/// File name a conversation is stored under
pub fn file_name(conversation: &Conversation) -> String {
    format!(
        "{}{}{}",
        PREFIX,
        conversation.started_at.format("%Y%m%d-%H%M%S-%3f"),
        EXTENSION
    )
}

/// Write a conversation to the history directory
pub fn save(conversation: &Conversation, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;

    let path = dir.join(file_name(conversation));
    let json = serde_json::to_string_pretty(conversation)?;
    fs::write(&path, json)?;

    tracing::info!(
        path = %path.display(),
        messages = conversation.messages.len(),
        "transcript saved"
    );
    Ok(path)
}

/// Load a transcript file
pub fn load(path: &Path) -> Result<Conversation> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Find the most recent transcript file in the history directory
pub fn find_latest(dir: &Path) -> Result<PathBuf> {
    if !dir.exists() {
        return Err(VerionError::History(format!(
            "History directory does not exist: {}",
            dir.display()
        )));
    }

    let mut transcripts = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_transcript = path.is_file()
            && path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(PREFIX) && n.ends_with(EXTENSION));
        if is_transcript {
            transcripts.push(path);
        }
    }

    // File names embed the start time, so the greatest name is the newest
    transcripts.into_iter().max().ok_or_else(|| {
        VerionError::History("No saved chats found. Run 'verion chat' first.".to_string())
    })
}

/// Load the most recent transcript
pub fn latest(dir: &Path) -> Result<Conversation> {
    load(&find_latest(dir)?)
}
