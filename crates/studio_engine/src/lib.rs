//! NanoStudio engine: service calls, progress simulation and effect execution.
mod data_url;
mod engine;
mod export;
mod load;
mod persist;
mod service;
mod simulate;
mod sink;
mod types;

pub use data_url::{mime_for_path, DataUrlError, ImageData};
pub use engine::{EngineConfig, EngineEvents, EngineHandle, Timestamp};
pub use export::{save_image, ExportError};
pub use load::{load_file, LoadError, LoadMode, LoadedFile};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use service::{
    parse_tag_results, GeminiService, MediaService, ServiceSettings, ENHANCE_INSTRUCTION,
};
pub use simulate::{run_simulation, SimulatedProgress, SimulationSettings, Step, MAX_STEP};
pub use sink::{ChannelProgressSink, ProgressSink};
pub use types::{
    EngineEvent, JobId, JobOutput, JobProgress, JobRequest, ScreenId, ServiceError, TagResult,
};
