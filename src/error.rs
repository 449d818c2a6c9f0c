use thiserror::Error;

use crate::models::MessagePhase;

/// Verion error types
#[derive(Error, Debug)]
pub enum VerionError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("Attachment error: {0}")]
    Attachment(String),

    #[error("History error: {0}")]
    History(String),

    #[error("Invalid message transition: {from:?} -> {to:?}")]
    InvalidTransition { from: MessagePhase, to: MessagePhase },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for Verion operations
pub type Result<T> = std::result::Result<T, VerionError>;
