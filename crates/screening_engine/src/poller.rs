use std::sync::Arc;

use engine_logging::{engine_debug, engine_info, engine_warn};
use screening_core::{
    start, update, Effect, JobId, Msg, PollSettings, ScreeningError, ScreeningResult,
};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::api::ScreeningApi;
use crate::types::{EngineEvent, JobProgress, ProgressSink};

/// `None` means the poll was cancelled before reaching a terminal state.
pub type PollOutcome = Option<Result<ScreeningResult, ScreeningError>>;

/// Drives the core poll state machine against the service, one query at a time.
#[derive(Clone)]
pub struct JobPoller {
    api: Arc<dyn ScreeningApi>,
    settings: PollSettings,
}

impl JobPoller {
    pub fn new(api: Arc<dyn ScreeningApi>, settings: PollSettings) -> Self {
        Self { api, settings }
    }

    pub async fn run(
        &self,
        job_id: JobId,
        sink: &dyn ProgressSink,
        cancel: &CancellationToken,
    ) -> PollOutcome {
        let (mut state, mut effects) = start(job_id, self.settings);

        loop {
            let mut next_query = None;
            for effect in std::mem::take(&mut effects) {
                match effect {
                    Effect::Progress {
                        job_id,
                        status,
                        attempt,
                    } => sink.emit(EngineEvent::Progress(JobProgress {
                        job_id,
                        status,
                        attempt,
                    })),
                    Effect::Query {
                        job_id,
                        attempt,
                        delay,
                    } => next_query = Some((job_id, attempt, delay)),
                    Effect::Deliver(outcome) => {
                        match &outcome {
                            Ok(result) => engine_info!(
                                "Job {} finished after {} polls: {}",
                                state.job().id,
                                state.job().attempt,
                                result.kind()
                            ),
                            Err(err) => {
                                engine_warn!("Job {} ended with error: {}", state.job().id, err)
                            }
                        }
                        return Some(outcome);
                    }
                }
            }

            let Some((job_id, attempt, delay)) = next_query else {
                return Some(Err(ScreeningError::Protocol(format!(
                    "polling of job {} stopped without a result",
                    state.job().id
                ))));
            };

            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    engine_info!("Polling of job {} cancelled before attempt {}", job_id, attempt);
                    return None;
                }
                _ = tokio::time::sleep(delay) => {}
            }

            engine_debug!("Querying status of job {} (attempt {})", job_id, attempt);
            let msg = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    engine_info!("Polling of job {} cancelled during attempt {}", job_id, attempt);
                    return None;
                }
                reply = self.api.status(&job_id) => match reply {
                    Ok(reply) => Msg::StatusReceived(reply),
                    Err(err) => Msg::QueryFailed(err),
                },
            };
            (state, effects) = update(state, msg);
        }
    }
}

/// A spawned polling task that can be cancelled.
pub struct PollHandle {
    job_id: JobId,
    cancel: CancellationToken,
    join: JoinHandle<PollOutcome>,
}

impl PollHandle {
    /// Spawns the poller on the current runtime. The task reports its end to
    /// `sink` as `Completed` or `Cancelled`.
    pub fn spawn(poller: JobPoller, job_id: JobId, sink: Arc<dyn ProgressSink>) -> Self {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let task_job_id = job_id.clone();
        let join = tokio::spawn(async move {
            let outcome = poller.run(task_job_id.clone(), sink.as_ref(), &token).await;
            match &outcome {
                Some(result) => sink.emit(EngineEvent::Completed {
                    job_id: Some(task_job_id),
                    result: result.clone(),
                }),
                None => sink.emit(EngineEvent::Cancelled {
                    job_id: task_job_id,
                }),
            }
            outcome
        });
        Self {
            job_id,
            cancel,
            join,
        }
    }

    pub fn job_id(&self) -> &str {
        &self.job_id
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Waits for the task to end.
    pub async fn outcome(self) -> PollOutcome {
        match self.join.await {
            Ok(outcome) => outcome,
            Err(err) => Some(Err(ScreeningError::Protocol(format!(
                "polling task for job {} ended abnormally: {err}",
                self.job_id
            )))),
        }
    }
}
