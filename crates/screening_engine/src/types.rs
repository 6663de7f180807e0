use screening_core::{JobId, JobStatus, ScreeningError, ScreeningResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobProgress {
    pub job_id: JobId,
    pub status: JobStatus,
    pub attempt: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// The server deferred the submission to a background job.
    Submitted { job_id: JobId },
    Progress(JobProgress),
    /// Exactly one per submission that was not superseded.
    /// `job_id` is `None` for immediate replies and submission failures.
    Completed {
        job_id: Option<JobId>,
        result: Result<ScreeningResult, ScreeningError>,
    },
    /// Polling stopped because a newer submission replaced the job.
    Cancelled { job_id: JobId },
    Summary(Result<String, ScreeningError>),
}

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelProgressSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}
