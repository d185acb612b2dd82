use std::path::PathBuf;

use crate::{FileLoadMode, JobId, ScreenId, ToolId, ToolSettings};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    LoadFile {
        screen_id: ScreenId,
        path: PathBuf,
        mode: FileLoadMode,
    },
    EditImage {
        job_id: JobId,
        image: String,
        instruction: String,
    },
    EnhanceImage {
        job_id: JobId,
        image: String,
    },
    GenerateTags {
        job_id: JobId,
        keyword: String,
    },
    Simulate {
        job_id: JobId,
        tool: ToolId,
        settings: Option<ToolSettings>,
    },
    CancelJob {
        job_id: JobId,
    },
    SaveImage {
        screen_id: ScreenId,
        data_url: String,
        file_stem: &'static str,
    },
    CopyToClipboard {
        screen_id: ScreenId,
        text: String,
    },
}
