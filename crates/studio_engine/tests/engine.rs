use std::fs;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use studio_engine::{
    EngineConfig, EngineEvent, EngineEvents, EngineHandle, ImageData, JobOutput, JobRequest,
    LoadMode, MediaService, ServiceError, SimulationSettings, TagResult,
};
use tempfile::TempDir;
use tokio::sync::Notify;

const WAIT: Duration = Duration::from_secs(5);

/// Echoes the source image back, or parks until released.
struct FakeService {
    gate: Option<Arc<Notify>>,
}

#[async_trait]
impl MediaService for FakeService {
    async fn edit_image(
        &self,
        source: &ImageData,
        _instruction: &str,
    ) -> Result<ImageData, ServiceError> {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        Ok(source.clone())
    }

    async fn enhance_image(&self, _source: &ImageData) -> Result<ImageData, ServiceError> {
        Err(ServiceError::NoImage)
    }

    async fn generate_tags(&self, keyword: &str) -> Result<Vec<TagResult>, ServiceError> {
        Ok(vec![TagResult {
            tags: vec![keyword.to_string()],
            trending_score: 50,
            search_volume: "1K".to_string(),
        }])
    }
}

fn spawn(dir: &TempDir, gate: Option<Arc<Notify>>) -> (EngineHandle, EngineEvents) {
    studio_logging::initialize_for_tests();
    let mut config = EngineConfig::default_with_output(dir.path().join("out"));
    config.simulation = SimulationSettings {
        tick: Duration::from_millis(1),
    };
    config.timestamp = Arc::new(|| "20261019-083000".to_string());
    EngineHandle::spawn(config, Arc::new(FakeService { gate })).unwrap()
}

fn next_completion(events: &EngineEvents) -> (u64, Result<JobOutput, ServiceError>) {
    loop {
        match events.recv_timeout(WAIT).expect("engine went quiet") {
            EngineEvent::JobCompleted { job_id, result } => return (job_id, result),
            EngineEvent::Progress(_) => continue,
            other => panic!("unexpected event {other:?}"),
        }
    }
}

#[test]
fn simulation_streams_progress_then_completes() {
    let dir = TempDir::new().unwrap();
    let (engine, events) = spawn(&dir, None);

    engine.run(
        3,
        JobRequest::Simulate {
            label: "noise clear".into(),
        },
    );

    let mut last = 0.0;
    let ticks = loop {
        match events.recv_timeout(WAIT).expect("engine went quiet") {
            EngineEvent::Progress(progress) => {
                assert_eq!(progress.job_id, 3);
                assert!(progress.progress >= last);
                assert!(progress.progress < 100.0);
                last = progress.progress;
            }
            EngineEvent::JobCompleted { job_id, result } => {
                assert_eq!(job_id, 3);
                match result {
                    Ok(JobOutput::Simulated { ticks }) => break ticks,
                    other => panic!("unexpected result {other:?}"),
                }
            }
            other => panic!("unexpected event {other:?}"),
        }
    };
    assert!(ticks >= 13, "each step is below 8 points");
    engine.shutdown();
}

#[test]
fn service_jobs_report_their_own_outcome() {
    let dir = TempDir::new().unwrap();
    let (engine, events) = spawn(&dir, None);

    engine.run(
        1,
        JobRequest::GenerateTags {
            keyword: "Fitness".into(),
        },
    );
    let (job_id, result) = next_completion(&events);
    assert_eq!(job_id, 1);
    assert!(matches!(result, Ok(JobOutput::Tags(batch)) if batch[0].tags == ["Fitness"]));

    engine.run(
        2,
        JobRequest::EnhanceImage {
            image: "data:image/png;base64,AAE=".into(),
        },
    );
    assert_eq!(next_completion(&events), (2, Err(ServiceError::NoImage)));

    engine.run(
        4,
        JobRequest::EditImage {
            image: "not a data url".into(),
            instruction: "make it blue".into(),
        },
    );
    let (job_id, result) = next_completion(&events);
    assert_eq!(job_id, 4);
    assert!(matches!(result, Err(ServiceError::InvalidImage(_))));
    engine.shutdown();
}

#[test]
fn cancelled_job_never_reports_completion() {
    let dir = TempDir::new().unwrap();
    let gate = Arc::new(Notify::new());
    let (engine, events) = spawn(&dir, Some(gate.clone()));

    engine.run(
        7,
        JobRequest::EditImage {
            image: "data:image/png;base64,AAE=".into(),
            instruction: "add a hat".into(),
        },
    );
    engine.cancel(7);
    gate.notify_one();

    assert_eq!(events.recv_timeout(Duration::from_millis(300)), None);

    engine.run(
        8,
        JobRequest::GenerateTags {
            keyword: "travel".into(),
        },
    );
    let (job_id, _) = next_completion(&events);
    assert_eq!(job_id, 8);
    engine.shutdown();
}

#[test]
fn loads_files_and_saves_artifacts() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("photo.jpg");
    fs::write(&source, [0xFFu8, 0xD8]).unwrap();
    let (engine, events) = spawn(&dir, None);

    engine.load_file(11, source.clone(), LoadMode::Preview);
    match events.recv_timeout(WAIT) {
        Some(EngineEvent::FileLoaded {
            screen_id,
            path,
            result: Ok(file),
        }) => {
            assert_eq!(screen_id, 11);
            assert_eq!(path, source);
            assert_eq!(file.mime, "image/jpeg");
            assert_eq!(file.preview.as_deref(), Some("data:image/jpeg;base64,/9g="));
        }
        other => panic!("unexpected event {other:?}"),
    }

    engine.save_image(11, "data:image/png;base64,AAE=".into(), "gemini-edit");
    let saved = match events.recv_timeout(WAIT) {
        Some(EngineEvent::ArtifactSaved {
            screen_id: 11,
            result: Ok(path),
        }) => path,
        other => panic!("unexpected event {other:?}"),
    };
    assert_eq!(
        saved,
        dir.path().join("out").join("gemini-edit-20261019-083000.png")
    );
    assert_eq!(fs::read(saved).unwrap(), vec![0u8, 1]);

    engine.save_image(11, "garbage".into(), "gemini-edit");
    assert!(matches!(
        events.recv_timeout(WAIT),
        Some(EngineEvent::ArtifactSaved {
            screen_id: 11,
            result: Err(_),
        })
    ));
    engine.shutdown();
}
