use std::sync::Arc;

use engine_logging::{engine_info, engine_warn};
use screening_core::{normalize_submission, ScreeningError, ScreeningRequest, SubmissionOutcome};

use crate::api::ScreeningApi;

/// Sends the artifact and classifies the immediate reply.
#[derive(Clone)]
pub struct SubmissionClient {
    api: Arc<dyn ScreeningApi>,
}

impl SubmissionClient {
    pub fn new(api: Arc<dyn ScreeningApi>) -> Self {
        Self { api }
    }

    pub async fn submit(
        &self,
        request: &ScreeningRequest,
    ) -> Result<SubmissionOutcome, ScreeningError> {
        engine_info!(
            "Submitting {} bytes={} limit={:?} profile={:?}",
            request.file_name,
            request.content.len(),
            request.catalog_limit,
            request.profile.map(|p| p.as_str())
        );

        let reply = match self.api.submit(request).await {
            Ok(reply) => reply,
            Err(err) => {
                engine_warn!("Submission of {} failed: {}", request.file_name, err);
                return Err(err);
            }
        };

        let outcome = normalize_submission(reply)?;
        match &outcome {
            SubmissionOutcome::Deferred(job_id) => {
                engine_info!("Submission deferred as job {}", job_id);
            }
            SubmissionOutcome::Immediate(result) => {
                engine_info!("Submission answered immediately: {}", result.kind());
            }
        }
        Ok(outcome)
    }
}
