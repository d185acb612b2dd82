//! `data:` URL handling for image payloads.

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

const DEFAULT_MIME: &str = "application/octet-stream";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DataUrlError {
    #[error("missing `data:` prefix")]
    MissingPrefix,
    #[error("missing payload separator")]
    MissingSeparator,
    #[error("payload is not base64-encoded")]
    NotBase64,
    #[error("base64 decode error: {0}")]
    Decode(String),
}

/// An image as the service exchanges it: MIME type plus base64 payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub mime_type: String,
    pub data: String,
}

impl ImageData {
    pub fn from_bytes(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: STANDARD.encode(bytes),
        }
    }

    pub fn from_data_url(url: &str) -> Result<Self, DataUrlError> {
        let rest = url
            .trim()
            .strip_prefix("data:")
            .ok_or(DataUrlError::MissingPrefix)?;
        let (header, payload) = rest.split_once(',').ok_or(DataUrlError::MissingSeparator)?;
        let mime = header
            .strip_suffix(";base64")
            .ok_or(DataUrlError::NotBase64)?;
        let mime = if mime.is_empty() { DEFAULT_MIME } else { mime };
        Ok(Self {
            mime_type: mime.to_string(),
            data: payload.to_string(),
        })
    }

    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    pub fn decode(&self) -> Result<Vec<u8>, DataUrlError> {
        STANDARD
            .decode(self.data.as_bytes())
            .map_err(|err| DataUrlError::Decode(err.to_string()))
    }

    /// File extension for saving; unknown image types fall back to `png`.
    pub fn extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/jpeg" | "image/jpg" => "jpg",
            "image/webp" => "webp",
            "image/gif" => "gif",
            "image/bmp" => "bmp",
            _ => "png",
        }
    }
}

/// Guesses a MIME type from the file extension. Content is never sniffed.
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        Some("mp4") => "video/mp4",
        Some("mov") => "video/quicktime",
        Some("mkv") => "video/x-matroska",
        Some("webm") => "video/webm",
        _ => DEFAULT_MIME,
    }
}
