use std::sync::Arc;

use engine_logging::engine_debug;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use screening_core::{ScreeningError, ScreeningRequest, ServerReply, SummaryReply};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::error::Category;
use url::Url;

use crate::settings::{ClientSettings, CredentialProvider, SettingsError};

/// Transport seam to the remote screening service.
#[async_trait::async_trait]
pub trait ScreeningApi: Send + Sync {
    /// `POST /screen`
    async fn submit(&self, request: &ScreeningRequest) -> Result<ServerReply, ScreeningError>;

    /// `GET /screen_status/{job_id}`
    async fn status(&self, job_id: &str) -> Result<ServerReply, ScreeningError>;

    /// `GET /summary_pdf/{job_id}`
    async fn summary(&self, job_id: &str) -> Result<SummaryReply, ScreeningError>;
}

#[derive(Clone)]
pub struct ReqwestScreeningApi {
    base_url: Url,
    client: reqwest::Client,
    credential: Arc<dyn CredentialProvider>,
}

impl ReqwestScreeningApi {
    pub fn new(
        settings: &ClientSettings,
        credential: Arc<dyn CredentialProvider>,
    ) -> Result<Self, SettingsError> {
        let base_url = settings.parsed_base_url()?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| SettingsError::Client(err.to_string()))?;
        Ok(Self {
            base_url,
            client,
            credential,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ScreeningError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                ScreeningError::Transport(format!("{} cannot be a base url", self.base_url))
            })?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ScreeningError> {
        engine_debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .bearer_auth(self.credential.bearer_token())
            .send()
            .await
            .map_err(map_reqwest_error)?;
        read_json(response).await
    }
}

#[async_trait::async_trait]
impl ScreeningApi for ReqwestScreeningApi {
    async fn submit(&self, request: &ScreeningRequest) -> Result<ServerReply, ScreeningError> {
        let url = self.endpoint(&["screen"])?;
        let artifact = Part::bytes(request.content.clone()).file_name(request.file_name.clone());
        let mut form = Form::new().part("file", artifact);
        if let Some(limit) = request.catalog_limit {
            form = form.text("limit", limit.to_string());
        }
        if let Some(profile) = request.profile {
            form = form.text("profile", profile.as_str());
        }

        engine_debug!("POST {}", url);
        let response = self
            .client
            .post(url)
            .bearer_auth(self.credential.bearer_token())
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        read_json(response).await
    }

    async fn status(&self, job_id: &str) -> Result<ServerReply, ScreeningError> {
        let url = self.endpoint(&["screen_status", job_id])?;
        self.get_json(url).await
    }

    async fn summary(&self, job_id: &str) -> Result<SummaryReply, ScreeningError> {
        let url = self.endpoint(&["summary_pdf", job_id])?;
        self.get_json(url).await
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ScreeningError> {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED {
        return Err(ScreeningError::Auth);
    }
    if !status.is_success() {
        let message = response
            .bytes()
            .await
            .ok()
            .and_then(|body| serde_json::from_slice::<ErrorBody>(&body).ok())
            .and_then(|body| body.error.or(body.message));
        return Err(ScreeningError::server(status.as_u16(), message));
    }

    let body = response.bytes().await.map_err(map_reqwest_error)?;
    serde_json::from_slice(&body).map_err(map_decode_error)
}

/// Unparseable bytes are a transport fault; well-formed JSON of the wrong
/// shape is a protocol violation.
fn map_decode_error(err: serde_json::Error) -> ScreeningError {
    match err.classify() {
        Category::Data => ScreeningError::Protocol(format!("unexpected reply shape: {err}")),
        Category::Io | Category::Syntax | Category::Eof => {
            ScreeningError::Transport(format!("invalid reply body: {err}"))
        }
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ScreeningError {
    if err.is_timeout() {
        return ScreeningError::Transport(format!("request timed out: {err}"));
    }
    ScreeningError::Transport(err.to_string())
}
