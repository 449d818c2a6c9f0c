use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Verion configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory where chat transcripts are saved
    pub history_dir: PathBuf,

    /// Remote inference endpoint settings
    pub inference: Inference,

    /// Display settings
    pub display: Display,
}

/// Remote inference endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Inference {
    /// Base URL of the assistant backend
    pub api_base_url: String,

    /// Path appended to the base URL for each request
    pub endpoint: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// Display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Display {
    /// Typewriter-animate assistant replies
    pub animate: bool,

    /// Delay between revealed characters, in milliseconds
    pub cadence_ms: u64,

    /// Caret appended while a reply is being revealed
    pub caret: String,
}

impl Inference {
    /// Full URL of the invoke endpoint
    pub fn url(&self) -> String {
        format!(
            "{}{}",
            self.api_base_url.trim_end_matches('/'),
            self.endpoint
        )
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Display {
    pub fn cadence(&self) -> Duration {
        Duration::from_millis(self.cadence_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            history_dir: PathBuf::from("./.verion/history"),
            inference: Inference::default(),
            display: Display::default(),
        }
    }
}

impl Default for Inference {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8002".to_string(),
            endpoint: "/invoke".to_string(),
            timeout_secs: 120,
        }
    }
}

impl Default for Display {
    fn default() -> Self {
        Self {
            animate: true,
            cadence_ms: 30,
            caret: "▌".to_string(),
        }
    }
}
