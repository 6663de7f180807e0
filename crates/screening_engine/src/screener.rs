use std::sync::Arc;

use engine_logging::{engine_info, engine_warn};
use screening_core::{
    JobId, PollSettings, ScreeningError, ScreeningRequest, SessionState, SubmissionOutcome,
};

use crate::api::ScreeningApi;
use crate::poller::{JobPoller, PollHandle, PollOutcome};
use crate::submission::SubmissionClient;
use crate::summary::SummaryClient;
use crate::types::{EngineEvent, ProgressSink};

/// Owns the session and at most one live poller.
///
/// A new submission cancels the poller of the previous job before anything
/// is sent, so only the newest job can deliver a result.
pub struct Screener {
    submission: SubmissionClient,
    poller: JobPoller,
    summary: SummaryClient,
    session: SessionState,
    active: Option<PollHandle>,
    sink: Arc<dyn ProgressSink>,
}

impl Screener {
    pub fn new(
        api: Arc<dyn ScreeningApi>,
        poll: PollSettings,
        sink: Arc<dyn ProgressSink>,
    ) -> Self {
        Self {
            submission: SubmissionClient::new(api.clone()),
            poller: JobPoller::new(api.clone(), poll),
            summary: SummaryClient::new(api),
            session: SessionState::new(),
            active: None,
            sink,
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Job id of the poller still running, if any.
    pub fn active_job(&self) -> Option<&str> {
        self.active
            .as_ref()
            .filter(|handle| !handle.is_finished())
            .map(PollHandle::job_id)
    }

    /// Submits `request`; the outcome reaches the sink as `Completed`.
    ///
    /// Returns the job id when the server deferred the work. Only deferred
    /// jobs move the session, so after an immediate reply summaries still
    /// refer to the last deferred job.
    pub async fn submit(&mut self, request: &ScreeningRequest) -> Option<JobId> {
        self.cancel_active();

        match self.submission.submit(request).await {
            Ok(SubmissionOutcome::Immediate(result)) => {
                self.sink.emit(EngineEvent::Completed {
                    job_id: None,
                    result: Ok(result),
                });
                None
            }
            Ok(SubmissionOutcome::Deferred(job_id)) => {
                self.session.begin(job_id.clone());
                self.sink.emit(EngineEvent::Submitted {
                    job_id: job_id.clone(),
                });
                self.active = Some(PollHandle::spawn(
                    self.poller.clone(),
                    job_id.clone(),
                    self.sink.clone(),
                ));
                Some(job_id)
            }
            Err(err) => {
                engine_warn!("Submission rejected: {}", err);
                self.sink.emit(EngineEvent::Completed {
                    job_id: None,
                    result: Err(err),
                });
                None
            }
        }
    }

    pub async fn request_summary(&self) -> Result<String, ScreeningError> {
        self.summary.request_summary(&self.session).await
    }

    pub fn cancel_active(&mut self) {
        if let Some(handle) = self.active.take() {
            if !handle.is_finished() {
                engine_info!("Cancelling polling of superseded job {}", handle.job_id());
            }
            handle.cancel();
        }
    }

    /// Waits for the live poller, if any, and returns its outcome.
    pub async fn wait(&mut self) -> PollOutcome {
        match self.active.take() {
            Some(handle) => handle.outcome().await,
            None => None,
        }
    }
}
