//! Progress simulation for the video tools.
//!
//! Nothing is transcoded, denoised or downloaded here. The driver only walks a
//! progress value up to 100 in random steps on a fixed cadence so the screen
//! can show activity before declaring success.

use std::time::Duration;

use rand::Rng;
use studio_logging::studio_trace;
use tokio::time::MissedTickBehavior;

use crate::{EngineEvent, JobId, JobProgress, ProgressSink};

/// Upper bound (exclusive) of a single random step, in percentage points.
pub const MAX_STEP: f32 = 8.0;

#[derive(Debug, Clone)]
pub struct SimulationSettings {
    pub tick: Duration,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(400),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    Advanced(f32),
    Finished,
}

/// Random-walk progress counter, clamped at 100.
#[derive(Debug, Clone, Default)]
pub struct SimulatedProgress {
    progress: f32,
}

impl SimulatedProgress {
    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn tick<R: Rng>(&mut self, rng: &mut R) -> Step {
        if self.progress >= 100.0 {
            return Step::Finished;
        }
        self.progress += rng.gen_range(0.0..MAX_STEP);
        if self.progress >= 100.0 {
            self.progress = 100.0;
            Step::Finished
        } else {
            Step::Advanced(self.progress)
        }
    }
}

/// Drives a simulation to completion, emitting progress on every tick.
/// Returns the number of ticks taken. Dropping the future stops the ticker.
pub async fn run_simulation<R: Rng + Send>(
    job_id: JobId,
    settings: &SimulationSettings,
    rng: &mut R,
    sink: &dyn ProgressSink,
) -> u32 {
    let mut interval = tokio::time::interval(settings.tick);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately; progress starts one period later.
    interval.tick().await;

    let mut progress = SimulatedProgress::default();
    let mut ticks = 0u32;
    loop {
        interval.tick().await;
        ticks += 1;
        let step = progress.tick(rng);
        studio_trace!("Job {} tick {}: {:?}", job_id, ticks, step);
        match step {
            Step::Advanced(value) => sink.emit(EngineEvent::Progress(JobProgress {
                job_id,
                progress: value,
            })),
            Step::Finished => return ticks,
        }
    }
}
