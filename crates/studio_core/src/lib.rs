//! NanoStudio core: pure state machine, tool registry and view-model helpers.
mod effect;
mod input;
mod job;
mod msg;
mod settings;
mod state;
pub mod tool;
mod update;
mod view_model;

pub use effect::Effect;
pub use input::{
    parse_source_url, FileInput, FileLoadMode, InputForm, InputPayload, MediaKind,
};
pub use job::{JobState, JobStatus};
pub use msg::Msg;
pub use settings::{
    AudioBitrate, AudioCleanup, AudioFormat, DenoiseStrength, SettingChange, TargetResolution,
    ToolSettings, UpscaleModel,
};
pub use state::{AppState, JobId, JobOutcome, Route, ScreenId, TagResult, ToolScreen};
pub use tool::{InputRequirement, ToolCategory, ToolDescriptor, ToolId, TOOLS};
pub use update::{update, SIMULATED_DOWNLOAD_NOTICE, TAGS_COPIED_NOTICE};
pub use view_model::{
    AppViewModel, FileSummary, InputView, NavEntry, ResultView, ScreenView, TagCardView,
    MAX_UPLOAD_HINT,
};
