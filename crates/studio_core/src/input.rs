//! Input collection and validation for a tool screen.

use std::path::{Path, PathBuf};

use crate::InputRequirement;

/// A file chosen by the user, as reported back by the loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInput {
    pub name: String,
    pub size_bytes: u64,
    pub mime: String,
    /// `data:` URL of the content; only populated for image tools.
    pub preview: Option<String>,
}

/// How the loader should read a chosen file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileLoadMode {
    /// Read the whole file and encode it as a data URL.
    Preview,
    /// Only stat the file; contents are never read.
    MetadataOnly,
}

/// Media family a file picker accepts, as in `accept="image/*"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "webp", "gif", "bmp"];
const VIDEO_EXTENSIONS: [&str; 4] = ["mp4", "mov", "mkv", "webm"];

impl MediaKind {
    pub fn accept(self) -> &'static str {
        match self {
            MediaKind::Image => "image/*",
            MediaKind::Video => "video/*",
        }
    }

    /// Extension check applied when a file is chosen. Content is not sniffed.
    pub fn matches_path(self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
            return false;
        };
        let known: &[&str] = match self {
            MediaKind::Image => &IMAGE_EXTENSIONS,
            MediaKind::Video => &VIDEO_EXTENSIONS,
        };
        known.iter().any(|known| known.eq_ignore_ascii_case(ext))
    }

    pub fn matches_mime(self, mime: &str) -> bool {
        let prefix = match self {
            MediaKind::Image => "image/",
            MediaKind::Video => "video/",
        };
        mime.starts_with(prefix)
    }
}

impl InputRequirement {
    pub fn media_kind(self) -> Option<MediaKind> {
        match self {
            InputRequirement::ImageWithInstruction | InputRequirement::Image => {
                Some(MediaKind::Image)
            }
            InputRequirement::VideoFile => Some(MediaKind::Video),
            InputRequirement::Keyword | InputRequirement::SourceUrl => None,
        }
    }

    pub fn file_load_mode(self) -> Option<FileLoadMode> {
        self.media_kind().map(|kind| match kind {
            MediaKind::Image => FileLoadMode::Preview,
            MediaKind::Video => FileLoadMode::MetadataOnly,
        })
    }
}

/// Validated input. Only produced by [`InputForm::validate`], so never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputPayload {
    File {
        file: FileInput,
        instruction: Option<String>,
    },
    Url(String),
    Prompt(String),
}

/// Raw values currently entered on a screen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InputForm {
    file: Option<FileInput>,
    pending_file: Option<PathBuf>,
    url: String,
    prompt: String,
}

impl InputForm {
    pub fn file(&self) -> Option<&FileInput> {
        self.file.as_ref()
    }

    pub fn pending_file(&self) -> Option<&PathBuf> {
        self.pending_file.as_ref()
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub(crate) fn set_pending_file(&mut self, path: PathBuf) {
        self.pending_file = Some(path);
    }

    /// Stores a loaded file. Returns `false` unless `path` is the pending load.
    pub(crate) fn set_loaded_file(&mut self, path: &Path, file: FileInput) -> bool {
        if !self.clear_pending_file(path) {
            return false;
        }
        self.file = Some(file);
        true
    }

    /// Drops the pending load for `path`. Returns `false` if it was not pending.
    pub(crate) fn clear_pending_file(&mut self, path: &Path) -> bool {
        if self.pending_file.as_deref() != Some(path) {
            return false;
        }
        self.pending_file = None;
        true
    }

    pub(crate) fn set_url(&mut self, url: String) {
        self.url = url;
    }

    pub(crate) fn set_prompt(&mut self, prompt: String) {
        self.prompt = prompt;
    }

    /// Checks the form against `requirement`; `None` means start must be blocked.
    /// A file load still in flight blocks file tools, since it would replace
    /// the input the job was started with.
    pub fn validate(&self, requirement: InputRequirement) -> Option<InputPayload> {
        if self.pending_file.is_some() && requirement.media_kind().is_some() {
            return None;
        }
        match requirement {
            InputRequirement::ImageWithInstruction => {
                let file = self.file.as_ref().filter(|f| has_preview(f))?;
                let instruction = non_blank(&self.prompt)?;
                Some(InputPayload::File {
                    file: file.clone(),
                    instruction: Some(instruction),
                })
            }
            InputRequirement::Image => {
                let file = self.file.as_ref().filter(|f| has_preview(f))?;
                Some(InputPayload::File {
                    file: file.clone(),
                    instruction: None,
                })
            }
            InputRequirement::VideoFile => self.file.as_ref().map(|file| InputPayload::File {
                file: file.clone(),
                instruction: None,
            }),
            InputRequirement::Keyword => non_blank(&self.prompt).map(InputPayload::Prompt),
            InputRequirement::SourceUrl => parse_source_url(&self.url).map(InputPayload::Url),
        }
    }
}

fn has_preview(file: &FileInput) -> bool {
    file.preview.as_deref().is_some_and(|p| !p.is_empty())
}

fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Accepts absolute http(s) URLs only.
pub fn parse_source_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let parsed = url::Url::parse(trimmed).ok()?;
    match parsed.scheme() {
        "http" | "https" if parsed.host_str().is_some() => Some(parsed.to_string()),
        _ => None,
    }
}
