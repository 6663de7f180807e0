use std::fmt;
use std::time::Duration;

use screening_core::PollSettings;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub poll: PollSettings,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
            poll: PollSettings::default(),
        }
    }
}

impl ClientSettings {
    /// Default settings pointed at another service root.
    pub fn with_base_url(base_url: &str) -> Result<Self, SettingsError> {
        parse_base_url(base_url)?;
        Ok(Self {
            base_url: base_url.trim().to_string(),
            ..Self::default()
        })
    }

    /// The validated service root.
    pub fn parsed_base_url(&self) -> Result<Url, SettingsError> {
        parse_base_url(&self.base_url)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("invalid base url {url}: {message}")]
    InvalidBaseUrl { url: String, message: String },
    #[error("failed to build http client: {0}")]
    Client(String),
}

fn parse_base_url(raw: &str) -> Result<Url, SettingsError> {
    let invalid = |message: String| SettingsError::InvalidBaseUrl {
        url: raw.to_string(),
        message,
    };
    let url = Url::parse(raw.trim()).map_err(|err| invalid(err.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(invalid("url cannot be used as a base".to_string()));
    }
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme {other}"))),
    }
}

/// Supplies the bearer token attached to every request.
pub trait CredentialProvider: Send + Sync {
    fn bearer_token(&self) -> String;
}

/// A fixed shared secret, as the screening service currently expects.
#[derive(Clone)]
pub struct StaticCredential {
    token: String,
}

impl StaticCredential {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl fmt::Debug for StaticCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticCredential")
            .field("token", &engine_logging::redacted(&self.token))
            .finish()
    }
}

impl CredentialProvider for StaticCredential {
    fn bearer_token(&self) -> String {
        self.token.clone()
    }
}
