use std::fmt;
use std::path::PathBuf;

use crate::data_url::ImageData;
use crate::load::{LoadError, LoadedFile};

pub type JobId = u64;
pub type ScreenId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagResult {
    pub tags: Vec<String>,
    pub trending_score: u8,
    pub search_volume: String,
}

/// Work the engine can run for a job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobRequest {
    EditImage { image: String, instruction: String },
    EnhanceImage { image: String },
    GenerateTags { keyword: String },
    /// Progress simulation for the video tools; `label` is only logged.
    Simulate { label: String },
}

impl JobRequest {
    pub fn kind(&self) -> &'static str {
        match self {
            JobRequest::EditImage { .. } => "edit_image",
            JobRequest::EnhanceImage { .. } => "enhance_image",
            JobRequest::GenerateTags { .. } => "generate_tags",
            JobRequest::Simulate { .. } => "simulate",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutput {
    Image(ImageData),
    Tags(Vec<TagResult>),
    Simulated { ticks: u32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct JobProgress {
    pub job_id: JobId,
    pub progress: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    FileLoaded {
        screen_id: ScreenId,
        path: PathBuf,
        result: Result<LoadedFile, LoadError>,
    },
    Progress(JobProgress),
    JobCompleted {
        job_id: JobId,
        result: Result<JobOutput, ServiceError>,
    },
    ArtifactSaved {
        screen_id: ScreenId,
        result: Result<PathBuf, String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    #[error("no API key configured")]
    MissingApiKey,
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
    #[error("invalid source image: {0}")]
    InvalidImage(String),
    #[error("http status {status}: {message}")]
    HttpStatus { status: u16, message: String },
    #[error("request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    #[error("response contained no image")]
    NoImage,
}

impl fmt::Display for JobOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobOutput::Image(image) => write!(f, "image {} ({} b64 chars)", image.mime_type, image.data.len()),
            JobOutput::Tags(batch) => write!(f, "{} tag groups", batch.len()),
            JobOutput::Simulated { ticks } => write!(f, "simulated in {ticks} ticks"),
        }
    }
}
