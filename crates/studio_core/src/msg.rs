use std::path::PathBuf;

use crate::{FileInput, JobId, JobOutcome, Route, ScreenId, SettingChange};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User picked the dashboard or a tool in the sidebar.
    Navigate(Route),
    /// User picked a file for the current screen.
    FileChosen(PathBuf),
    /// Loader finished reading a chosen file.
    FileLoaded {
        screen_id: ScreenId,
        path: PathBuf,
        result: Result<FileInput, String>,
    },
    /// User edited the URL box.
    UrlChanged(String),
    /// User edited the prompt, instruction or keyword box.
    PromptChanged(String),
    /// User changed one of the advanced video options.
    SettingChanged(SettingChange),
    /// User clicked the tool's primary action.
    StartClicked,
    /// User clicked "Process Another" or otherwise restarted the screen.
    ResetClicked,
    /// Engine progress for a job.
    JobProgress { job_id: JobId, progress: f32 },
    /// Engine completion for a job.
    JobFinished { job_id: JobId, outcome: JobOutcome },
    /// User asked to download the current result.
    DownloadClicked,
    /// Engine finished writing a downloaded artifact.
    ArtifactSaved {
        screen_id: ScreenId,
        result: Result<PathBuf, String>,
    },
    /// User asked to copy the tags of one result card.
    CopyTagsClicked { index: usize },
    /// Clipboard write finished.
    ClipboardWritten {
        screen_id: ScreenId,
        result: Result<(), String>,
    },
    /// User dismissed the retained error.
    DismissError,
    /// User dismissed the current notice.
    DismissNotice,
    /// UI/render tick to coalesce rendering.
    Tick,
}
