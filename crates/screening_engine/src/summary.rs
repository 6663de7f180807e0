use std::sync::Arc;

use engine_logging::{engine_info, engine_warn};
use screening_core::{ScreeningError, SessionState};

use crate::api::ScreeningApi;

/// Fetches the consolidated report for the session's current job.
#[derive(Clone)]
pub struct SummaryClient {
    api: Arc<dyn ScreeningApi>,
}

impl SummaryClient {
    pub fn new(api: Arc<dyn ScreeningApi>) -> Self {
        Self { api }
    }

    /// Returns the report URL.
    pub async fn request_summary(&self, session: &SessionState) -> Result<String, ScreeningError> {
        let job_id = session.require_job()?;
        engine_info!("Requesting summary report for job {}", job_id);

        let reply = self.api.summary(job_id).await?;
        match reply.pdf_url.filter(|url| !url.trim().is_empty()) {
            Some(url) => Ok(url),
            None => {
                engine_warn!(
                    "Summary for job {} has no report url (server said {:?})",
                    job_id,
                    reply.error
                );
                Err(ScreeningError::SummaryUnavailable)
            }
        }
    }
}
