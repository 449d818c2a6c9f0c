use std::path::Path;

use crate::error::{Result, VerionError};
use crate::models::FileInfo;

/// A file queued for the next request
#[derive(Debug, Clone)]
pub struct Attachment {
    pub name: String,
    pub file_type: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    /// Read a file from disk and detect its type
    pub async fn load(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            VerionError::Attachment(format!("Cannot read '{}': {}", path.display(), e))
        })?;

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .ok_or_else(|| {
                VerionError::Attachment(format!("Not a file path: '{}'", path.display()))
            })?;

        let file_type = detect_file_type(&name, &bytes);
        tracing::debug!(%name, %file_type, size = bytes.len(), "attachment loaded");

        Ok(Self {
            name,
            file_type,
            bytes,
        })
    }

    pub fn info(&self) -> FileInfo {
        FileInfo {
            name: self.name.clone(),
            file_type: self.file_type.clone(),
            size: self.bytes.len() as u64,
        }
    }
}

/// Media subtype sniffed from content, else the lowercase extension,
/// else `txt`.
pub fn detect_file_type(name: &str, bytes: &[u8]) -> String {
    if let Some(kind) = infer::get(bytes) {
        if let Some((_, subtype)) = kind.mime_type().split_once('/') {
            if !subtype.is_empty() {
                return subtype.to_string();
            }
        }
    }

    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .map(str::to_lowercase)
        .unwrap_or_else(|| "txt".to_string())
}
