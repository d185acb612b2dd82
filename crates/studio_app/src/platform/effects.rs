use std::sync::{mpsc, Arc};
use std::thread;

use anyhow::Context;
use chrono::Utc;
use studio_core::{
    Effect, FileInput, FileLoadMode, JobOutcome, Msg, TagResult, ToolId, ToolSettings,
};
use studio_engine::{
    EngineConfig, EngineEvent, EngineEvents, EngineHandle, GeminiService, JobOutput, JobRequest,
    LoadMode, LoadedFile,
};
use studio_logging::{studio_debug, studio_info, studio_warn};

use super::config::AppConfig;

/// Turns core effects into engine commands and engine events back into
/// messages.
pub struct EffectRunner {
    engine: EngineHandle,
    msg_tx: mpsc::Sender<Msg>,
    clipboard: Option<arboard::Clipboard>,
}

impl EffectRunner {
    pub fn new(
        config: &AppConfig,
        api_key: Option<String>,
        msg_tx: mpsc::Sender<Msg>,
    ) -> anyhow::Result<Self> {
        if api_key.is_none() {
            studio_warn!("No API key set; image and tag tools will fail until one is provided");
        }
        let service = GeminiService::new(config.service_settings(api_key))
            .context("building the media service client")?;

        let output_dir = std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(&config.output_dir);
        let mut engine_config = EngineConfig::default_with_output(output_dir);
        engine_config.simulation = config.simulation();
        engine_config.timestamp = Arc::new(|| Utc::now().format("%Y%m%d-%H%M%S").to_string());

        let (engine, events) =
            EngineHandle::spawn(engine_config, Arc::new(service)).context("starting the engine")?;
        spawn_event_loop(events, msg_tx.clone())?;

        Ok(Self {
            engine,
            msg_tx,
            clipboard: None,
        })
    }

    pub fn enqueue(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::LoadFile {
                    screen_id,
                    path,
                    mode,
                } => {
                    studio_debug!("LoadFile screen_id={} path={:?}", screen_id, path);
                    self.engine.load_file(screen_id, path, map_load_mode(mode));
                }
                Effect::EditImage {
                    job_id,
                    image,
                    instruction,
                } => self
                    .engine
                    .run(job_id, JobRequest::EditImage { image, instruction }),
                Effect::EnhanceImage { job_id, image } => {
                    self.engine.run(job_id, JobRequest::EnhanceImage { image })
                }
                Effect::GenerateTags { job_id, keyword } => {
                    self.engine.run(job_id, JobRequest::GenerateTags { keyword })
                }
                Effect::Simulate {
                    job_id,
                    tool,
                    settings,
                } => self.engine.run(
                    job_id,
                    JobRequest::Simulate {
                        label: simulation_label(tool, settings.as_ref()),
                    },
                ),
                Effect::CancelJob { job_id } => self.engine.cancel(job_id),
                Effect::SaveImage {
                    screen_id,
                    data_url,
                    file_stem,
                } => self.engine.save_image(screen_id, data_url, file_stem),
                Effect::CopyToClipboard { screen_id, text } => {
                    let result = self.copy_text(&text);
                    let _ = self.msg_tx.send(Msg::ClipboardWritten { screen_id, result });
                }
            }
        }
    }

    pub fn shutdown(&self) {
        self.engine.shutdown();
    }

    /// The clipboard handle is kept for the whole session; on X11 the
    /// contents vanish when it is dropped.
    fn copy_text(&mut self, text: &str) -> Result<(), String> {
        let clipboard = match self.clipboard.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new().map_err(|e| format!("clipboard unavailable: {e}"))?,
        };
        let clipboard = self.clipboard.insert(clipboard);
        match clipboard.set_text(text) {
            Ok(()) => {
                studio_info!("Copied {} chars to clipboard", text.len());
                Ok(())
            }
            Err(err) => {
                studio_warn!("Clipboard write failed: {}", err);
                Err(err.to_string())
            }
        }
    }
}

fn spawn_event_loop(events: EngineEvents, msg_tx: mpsc::Sender<Msg>) -> anyhow::Result<()> {
    thread::Builder::new()
        .name("studio-events".to_string())
        .spawn(move || {
            while let Some(event) = events.recv() {
                if msg_tx.send(map_event(event)).is_err() {
                    break;
                }
            }
        })
        .context("starting the event pump")?;
    Ok(())
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::FileLoaded {
            screen_id,
            path,
            result,
        } => Msg::FileLoaded {
            screen_id,
            result: result.map(map_file).map_err(|err| err.to_string()),
            path,
        },
        EngineEvent::Progress(progress) => Msg::JobProgress {
            job_id: progress.job_id,
            progress: progress.progress,
        },
        EngineEvent::JobCompleted { job_id, result } => Msg::JobFinished {
            job_id,
            outcome: match result {
                Ok(JobOutput::Image(image)) => JobOutcome::Image(image.to_data_url()),
                Ok(JobOutput::Tags(batch)) => {
                    JobOutcome::Tags(batch.into_iter().map(map_tags).collect())
                }
                Ok(JobOutput::Simulated { .. }) => JobOutcome::Simulated,
                Err(err) => {
                    studio_warn!("Job {} failed: {}", job_id, err);
                    JobOutcome::Failed
                }
            },
        },
        EngineEvent::ArtifactSaved { screen_id, result } => {
            Msg::ArtifactSaved { screen_id, result }
        }
    }
}

fn map_load_mode(mode: FileLoadMode) -> LoadMode {
    match mode {
        FileLoadMode::Preview => LoadMode::Preview,
        FileLoadMode::MetadataOnly => LoadMode::MetadataOnly,
    }
}

fn map_file(file: LoadedFile) -> FileInput {
    FileInput {
        name: file.name,
        size_bytes: file.size_bytes,
        mime: file.mime,
        preview: file.preview,
    }
}

fn map_tags(result: studio_engine::TagResult) -> TagResult {
    TagResult {
        tags: result.tags,
        trending_score: result.trending_score,
        search_volume: result.search_volume,
    }
}

/// Log label for a simulated run: the tool and its chosen options.
fn simulation_label(tool: ToolId, settings: Option<&ToolSettings>) -> String {
    let options = settings
        .map(|settings| {
            settings
                .describe()
                .iter()
                .map(|(label, value)| format!("{label}={value}"))
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default();
    if options.is_empty() {
        tool.to_string()
    } else {
        format!("{tool} ({options})")
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;
    use studio_engine::{ImageData, JobProgress, LoadError, ServiceError};

    use super::*;

    #[test]
    fn completed_jobs_map_to_outcomes() {
        let image = ImageData::from_bytes("image/png", &[0, 1]);
        assert_eq!(
            map_event(EngineEvent::JobCompleted {
                job_id: 4,
                result: Ok(JobOutput::Image(image)),
            }),
            Msg::JobFinished {
                job_id: 4,
                outcome: JobOutcome::Image("data:image/png;base64,AAE=".into()),
            }
        );
        assert_eq!(
            map_event(EngineEvent::JobCompleted {
                job_id: 5,
                result: Err(ServiceError::Timeout),
            }),
            Msg::JobFinished {
                job_id: 5,
                outcome: JobOutcome::Failed,
            }
        );
        assert_eq!(
            map_event(EngineEvent::JobCompleted {
                job_id: 6,
                result: Ok(JobOutput::Tags(vec![studio_engine::TagResult {
                    tags: vec!["fitness".into(), "gym".into()],
                    trending_score: 80,
                    search_volume: "10K".into(),
                }])),
            }),
            Msg::JobFinished {
                job_id: 6,
                outcome: JobOutcome::Tags(vec![TagResult {
                    tags: vec!["fitness".into(), "gym".into()],
                    trending_score: 80,
                    search_volume: "10K".into(),
                }]),
            }
        );
    }

    #[test]
    fn progress_and_file_events_keep_their_ids() {
        assert_eq!(
            map_event(EngineEvent::Progress(JobProgress {
                job_id: 2,
                progress: 12.5,
            })),
            Msg::JobProgress {
                job_id: 2,
                progress: 12.5,
            }
        );
        assert_eq!(
            map_event(EngineEvent::FileLoaded {
                screen_id: 9,
                path: PathBuf::from("/missing.png"),
                result: Err(LoadError::NotAFile),
            }),
            Msg::FileLoaded {
                screen_id: 9,
                path: PathBuf::from("/missing.png"),
                result: Err("not a regular file".into()),
            }
        );
    }

    #[test]
    fn simulation_label_lists_options() {
        assert_eq!(
            simulation_label(
                ToolId::Mp4ToMp3,
                ToolSettings::defaults_for(ToolId::Mp4ToMp3).as_ref()
            ),
            "mp4_to_mp3 (Audio Bitrate=320 kbps (Studio), Format=MP3)"
        );
        assert_eq!(
            simulation_label(ToolId::YoutubeDownloader, None),
            "youtube_downloader"
        );
    }
}
