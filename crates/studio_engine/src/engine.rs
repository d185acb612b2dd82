use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use studio_logging::{studio_debug, studio_info, studio_warn};
use tokio_util::sync::CancellationToken;

use crate::data_url::ImageData;
use crate::export::save_image;
use crate::load::{load_file, LoadMode};
use crate::simulate::{run_simulation, SimulationSettings};
use crate::sink::{ChannelProgressSink, ProgressSink};
use crate::{EngineEvent, JobId, JobOutput, JobRequest, MediaService, ScreenId, ServiceError};

pub type Timestamp = Arc<dyn Fn() -> String + Send + Sync>;

#[derive(Clone)]
pub struct EngineConfig {
    pub simulation: SimulationSettings,
    pub output_dir: PathBuf,
    /// Timestamp used in exported file names.
    pub timestamp: Timestamp,
}

impl EngineConfig {
    pub fn default_with_output(output_dir: PathBuf) -> Self {
        Self {
            simulation: SimulationSettings::default(),
            output_dir,
            timestamp: Arc::new(|| "export".to_string()),
        }
    }
}

enum EngineCommand {
    LoadFile {
        screen_id: ScreenId,
        path: PathBuf,
        mode: LoadMode,
    },
    Run {
        job_id: JobId,
        request: JobRequest,
    },
    Cancel {
        job_id: JobId,
    },
    SaveImage {
        screen_id: ScreenId,
        data_url: String,
        file_stem: String,
    },
    Shutdown,
}

type TokenMap = Arc<Mutex<HashMap<JobId, CancellationToken>>>;

/// Command side of the engine. Cheap to clone; all clones feed one runtime.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

/// Event side of the engine.
pub struct EngineEvents {
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineEvents {
    /// Blocks until the next event; `None` once the engine has stopped.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

impl EngineHandle {
    /// Starts the engine thread and its tokio runtime.
    pub fn spawn(
        config: EngineConfig,
        service: Arc<dyn MediaService>,
    ) -> std::io::Result<(Self, EngineEvents)> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .thread_name("studio-engine")
            .build()?;

        thread::Builder::new()
            .name("studio-engine-cmd".to_string())
            .spawn(move || {
                let tokens: TokenMap = Arc::new(Mutex::new(HashMap::new()));
                while let Ok(command) = cmd_rx.recv() {
                    if matches!(command, EngineCommand::Shutdown) {
                        break;
                    }
                    dispatch(&runtime, &config, &service, &tokens, &event_tx, command);
                }
                cancel_all(&tokens);
                runtime.shutdown_timeout(Duration::from_secs(1));
                studio_info!("Engine stopped");
            })?;

        Ok((Self { cmd_tx }, EngineEvents { event_rx }))
    }

    pub fn load_file(&self, screen_id: ScreenId, path: PathBuf, mode: LoadMode) {
        self.send(EngineCommand::LoadFile {
            screen_id,
            path,
            mode,
        });
    }

    pub fn run(&self, job_id: JobId, request: JobRequest) {
        self.send(EngineCommand::Run { job_id, request });
    }

    pub fn cancel(&self, job_id: JobId) {
        self.send(EngineCommand::Cancel { job_id });
    }

    pub fn save_image(&self, screen_id: ScreenId, data_url: String, file_stem: impl Into<String>) {
        self.send(EngineCommand::SaveImage {
            screen_id,
            data_url,
            file_stem: file_stem.into(),
        });
    }

    /// Cancels every job in flight and stops the runtime.
    pub fn shutdown(&self) {
        self.send(EngineCommand::Shutdown);
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            studio_warn!("Engine command dropped: engine already stopped");
        }
    }
}

fn dispatch(
    runtime: &tokio::runtime::Runtime,
    config: &EngineConfig,
    service: &Arc<dyn MediaService>,
    tokens: &TokenMap,
    event_tx: &mpsc::Sender<EngineEvent>,
    command: EngineCommand,
) {
    match command {
        EngineCommand::LoadFile {
            screen_id,
            path,
            mode,
        } => {
            let event_tx = event_tx.clone();
            runtime.spawn(async move {
                let result = load_file(&path, mode).await;
                if let Err(err) = &result {
                    studio_warn!("Loading {:?} failed: {}", path, err);
                }
                let _ = event_tx.send(EngineEvent::FileLoaded {
                    screen_id,
                    path,
                    result,
                });
            });
        }
        EngineCommand::Run { job_id, request } => {
            let token = CancellationToken::new();
            if let Ok(mut map) = tokens.lock() {
                map.insert(job_id, token.clone());
            }
            studio_info!("Job {} started: {}", job_id, request.kind());
            let service = service.clone();
            let simulation = config.simulation.clone();
            let tokens = tokens.clone();
            let event_tx = event_tx.clone();
            runtime.spawn(async move {
                let sink = ChannelProgressSink::new(event_tx.clone());
                let outcome = tokio::select! {
                    _ = token.cancelled() => None,
                    result = execute(service.as_ref(), job_id, request, &simulation, &sink) => Some(result),
                };
                if let Ok(mut map) = tokens.lock() {
                    map.remove(&job_id);
                }
                match outcome {
                    Some(result) => {
                        match &result {
                            Ok(output) => studio_info!("Job {} finished: {}", job_id, output),
                            Err(err) => studio_warn!("Job {} failed: {}", job_id, err),
                        }
                        let _ = event_tx.send(EngineEvent::JobCompleted { job_id, result });
                    }
                    None => studio_debug!("Job {} cancelled", job_id),
                }
            });
        }
        EngineCommand::Cancel { job_id } => {
            let token = tokens.lock().ok().and_then(|mut map| map.remove(&job_id));
            match token {
                Some(token) => token.cancel(),
                None => studio_debug!("Cancel for job {} ignored: not running", job_id),
            }
        }
        EngineCommand::SaveImage {
            screen_id,
            data_url,
            file_stem,
        } => {
            let output_dir = config.output_dir.clone();
            let timestamp = (config.timestamp)();
            let event_tx = event_tx.clone();
            runtime.spawn_blocking(move || {
                let result = save_image(&output_dir, &file_stem, &timestamp, &data_url)
                    .map_err(|err| err.to_string());
                match &result {
                    Ok(path) => studio_info!("Saved artifact to {:?}", path),
                    Err(err) => studio_warn!("Saving artifact failed: {}", err),
                }
                let _ = event_tx.send(EngineEvent::ArtifactSaved { screen_id, result });
            });
        }
        EngineCommand::Shutdown => {}
    }
}

async fn execute(
    service: &dyn MediaService,
    job_id: JobId,
    request: JobRequest,
    simulation: &SimulationSettings,
    sink: &dyn ProgressSink,
) -> Result<JobOutput, ServiceError> {
    match request {
        JobRequest::EditImage { image, instruction } => {
            let source = parse_source(&image)?;
            service
                .edit_image(&source, &instruction)
                .await
                .map(JobOutput::Image)
        }
        JobRequest::EnhanceImage { image } => {
            let source = parse_source(&image)?;
            service.enhance_image(&source).await.map(JobOutput::Image)
        }
        JobRequest::GenerateTags { keyword } => {
            service.generate_tags(&keyword).await.map(JobOutput::Tags)
        }
        JobRequest::Simulate { label } => {
            studio_debug!("Job {} simulating {}", job_id, label);
            let mut rng = StdRng::from_entropy();
            let ticks = run_simulation(job_id, simulation, &mut rng, sink).await;
            Ok(JobOutput::Simulated { ticks })
        }
    }
}

fn parse_source(data_url: &str) -> Result<ImageData, ServiceError> {
    ImageData::from_data_url(data_url).map_err(|err| ServiceError::InvalidImage(err.to_string()))
}

fn cancel_all(tokens: &TokenMap) {
    if let Ok(mut map) = tokens.lock() {
        for (job_id, token) in map.drain() {
            studio_debug!("Cancelling job {} on shutdown", job_id);
            token.cancel();
        }
    }
}
