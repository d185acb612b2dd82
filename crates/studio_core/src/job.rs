//! Per-screen job lifecycle.

use crate::JobId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobStatus {
    #[default]
    Idle,
    Processing,
    Completed,
}

/// Lifecycle of the job owned by one tool screen.
///
/// Progress only moves forward while processing and is pinned to 100 on
/// completion. Replies for any job other than `active` are rejected, which is
/// what keeps late engine events from touching a reset or replaced screen.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JobState {
    status: JobStatus,
    progress: f32,
    active: Option<JobId>,
    error: Option<String>,
}

impl JobState {
    pub fn status(&self) -> JobStatus {
        self.status
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn active_job(&self) -> Option<JobId> {
        self.active
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_processing(&self) -> bool {
        self.status == JobStatus::Processing
    }

    pub(crate) fn begin(&mut self, job_id: JobId) {
        self.status = JobStatus::Processing;
        self.progress = 0.0;
        self.active = Some(job_id);
        self.error = None;
    }

    fn owns(&self, job_id: JobId) -> bool {
        self.is_processing() && self.active == Some(job_id)
    }

    /// Records reported progress. Returns `true` if the visible value changed.
    pub(crate) fn advance(&mut self, job_id: JobId, progress: f32) -> bool {
        if !self.owns(job_id) || !progress.is_finite() {
            return false;
        }
        let next = progress.clamp(0.0, 100.0).max(self.progress);
        if next == self.progress {
            return false;
        }
        self.progress = next;
        true
    }

    pub(crate) fn complete(&mut self, job_id: JobId) -> bool {
        if !self.owns(job_id) {
            return false;
        }
        self.status = JobStatus::Completed;
        self.progress = 100.0;
        self.active = None;
        true
    }

    pub(crate) fn fail(&mut self, job_id: JobId, message: String) -> bool {
        if !self.owns(job_id) {
            return false;
        }
        self.status = JobStatus::Idle;
        self.progress = 0.0;
        self.active = None;
        self.error = Some(message);
        true
    }

    pub(crate) fn dismiss_error(&mut self) -> bool {
        self.error.take().is_some()
    }

    /// Returns the job that was in flight, if any.
    pub(crate) fn reset(&mut self) -> Option<JobId> {
        let in_flight = if self.is_processing() {
            self.active
        } else {
            None
        };
        *self = JobState::default();
        in_flight
    }
}
