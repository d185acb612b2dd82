use std::path::Path;

use crate::data_url::{mime_for_path, ImageData};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    /// Read the file and encode it as a data URL.
    Preview,
    /// Stat only.
    MetadataOnly,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedFile {
    pub name: String,
    pub size_bytes: u64,
    pub mime: String,
    pub preview: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error("not a regular file")]
    NotAFile,
    #[error("{0}")]
    Io(String),
}

impl From<std::io::Error> for LoadError {
    fn from(err: std::io::Error) -> Self {
        LoadError::Io(err.to_string())
    }
}

/// Reads a user-chosen file. No size or format checks are applied; the MIME
/// type comes from the extension only.
pub async fn load_file(path: &Path, mode: LoadMode) -> Result<LoadedFile, LoadError> {
    let metadata = tokio::fs::metadata(path).await?;
    if !metadata.is_file() {
        return Err(LoadError::NotAFile);
    }
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let mime = mime_for_path(path);

    let preview = match mode {
        LoadMode::Preview => {
            let bytes = tokio::fs::read(path).await?;
            Some(ImageData::from_bytes(mime, &bytes).to_data_url())
        }
        LoadMode::MetadataOnly => None,
    };

    Ok(LoadedFile {
        name,
        size_bytes: metadata.len(),
        mime: mime.to_string(),
        preview,
    })
}
