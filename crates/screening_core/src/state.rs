use std::time::Duration;

use crate::error::ScreeningError;
use crate::types::{JobId, JobStatus, ScreeningJob};

/// Retry budget for a deferred job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            max_attempts: 450,
        }
    }
}

impl PollSettings {
    /// Wall time the budget covers, used in the timeout message.
    pub fn budget(&self) -> Duration {
        self.interval.saturating_mul(self.max_attempts)
    }
}

/// Poller state for a single job. Owned by one polling loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollState {
    job: ScreeningJob,
    settings: PollSettings,
    finished: bool,
}

impl PollState {
    pub fn new(job_id: impl Into<JobId>, settings: PollSettings) -> Self {
        Self {
            job: ScreeningJob::new(job_id),
            settings,
            finished: false,
        }
    }

    pub fn job(&self) -> &ScreeningJob {
        &self.job
    }

    pub fn settings(&self) -> &PollSettings {
        &self.settings
    }

    /// True once a result (or error) has been delivered.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub(crate) fn observe(&mut self, status: JobStatus) {
        self.job.status = status;
        self.job.attempt = self.job.attempt.saturating_add(1);
    }

    pub(crate) fn budget_exhausted(&self) -> bool {
        self.job.attempt >= self.settings.max_attempts
    }

    pub(crate) fn finish(&mut self) {
        self.finished = true;
    }
}

/// Single-slot record of the most recently submitted deferred job.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionState {
    current_job: Option<JobId>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any previous job id.
    pub fn begin(&mut self, job_id: impl Into<JobId>) {
        self.current_job = Some(job_id.into());
    }

    pub fn current_job(&self) -> Option<&str> {
        self.current_job.as_deref()
    }

    pub fn require_job(&self) -> Result<&str, ScreeningError> {
        self.current_job().ok_or(ScreeningError::NoActiveJob)
    }
}
