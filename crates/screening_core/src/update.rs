use std::time::Duration;

use crate::normalize::{normalize_status, StatusUpdate};
use crate::{Effect, JobId, Msg, PollSettings, PollState, ScreeningError};

/// Creates the poller state for a freshly deferred job and asks for the first query.
pub fn start(job_id: impl Into<JobId>, settings: PollSettings) -> (PollState, Vec<Effect>) {
    let state = PollState::new(job_id, settings);
    let effects = vec![Effect::Query {
        job_id: state.job().id.clone(),
        attempt: 0,
        delay: Duration::ZERO,
    }];
    (state, effects)
}

/// Pure update function: applies a query outcome to the poller and returns any effects.
///
/// Once a `Deliver` effect has been produced the state is finished and every
/// later message is ignored.
pub fn update(mut state: PollState, msg: Msg) -> (PollState, Vec<Effect>) {
    if state.is_finished() {
        return (state, Vec::new());
    }

    let effects = match msg {
        Msg::StatusReceived(reply) => match normalize_status(reply) {
            StatusUpdate::Pending(status) => {
                state.observe(status);
                let job_id = state.job().id.clone();
                let attempt = state.job().attempt;
                let progress = Effect::Progress {
                    job_id: job_id.clone(),
                    status,
                    attempt,
                };
                if state.budget_exhausted() {
                    state.finish();
                    let elapsed_secs = state.settings().budget().as_secs();
                    vec![
                        progress,
                        Effect::Deliver(Err(ScreeningError::TimedOut { elapsed_secs })),
                    ]
                } else {
                    vec![
                        progress,
                        Effect::Query {
                            job_id,
                            attempt,
                            delay: state.settings().interval,
                        },
                    ]
                }
            }
            StatusUpdate::Terminal(result) => {
                state.finish();
                vec![Effect::Deliver(Ok(result))]
            }
        },
        // Not retried: only queued/running replies consume the budget.
        Msg::QueryFailed(err) => {
            state.finish();
            vec![Effect::Deliver(Err(err))]
        }
    };

    (state, effects)
}
