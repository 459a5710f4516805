//! Icon upload helpers: local icon files, data URLs and generated engine ids.

use std::path::Path;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};

use crate::types::errors::ApiError;

/// How icon files travel to the backend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum IconTransport {
    /// Multipart form posted to the `/with-icon` routes.
    #[default]
    Multipart,
    /// JSON body whose `icon` field holds a base64 data URL.
    DataUrl,
}

/// An icon image read from disk (or received from a UI) ready for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct IconFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl IconFile {
    pub fn new(file_name: &str, mime_type: &str, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.to_string(),
            mime_type: mime_type.to_string(),
            bytes,
        }
    }

    /// Reads an icon file, guessing its MIME type from the extension.
    pub async fn from_path(path: &Path) -> Result<Self, ApiError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ApiError::Io(format!("{}: {}", path.display(), e)))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "icon".to_string());
        let mime_type = guess_mime_type(&file_name).to_string();
        Ok(Self {
            file_name,
            mime_type,
            bytes,
        })
    }

    /// `data:<mime>;base64,<payload>`
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, BASE64.encode(&self.bytes))
    }
}

/// MIME type for common icon extensions.
pub fn guess_mime_type(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Engine id of the form `slug(name) + "_" + timestamp_millis`.
///
/// The slug is the lowercased name with everything outside `[a-z0-9]` dropped.
pub fn generate_engine_id(name: &str, timestamp_millis: i64) -> String {
    let slug: String = name
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect();
    format!("{}_{}", slug, timestamp_millis)
}

/// [`generate_engine_id`] stamped with the current time.
pub fn generate_engine_id_now(name: &str) -> String {
    generate_engine_id(name, chrono::Utc::now().timestamp_millis())
}
