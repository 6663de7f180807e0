use std::time::Duration;

use crate::{JobId, JobStatus, ScreeningError, ScreeningResult};

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Issue the next status query once `delay` has elapsed.
    Query {
        job_id: JobId,
        attempt: u32,
        delay: Duration,
    },
    /// The job is still queued or running.
    Progress {
        job_id: JobId,
        status: JobStatus,
        attempt: u32,
    },
    /// The one terminal outcome of the job. Nothing follows it.
    Deliver(Result<ScreeningResult, ScreeningError>),
}
