//! Screening engine: HTTP transport, job polling and session orchestration.
mod api;
mod engine;
mod poller;
mod screener;
mod settings;
mod submission;
mod summary;
mod types;

pub use api::{ReqwestScreeningApi, ScreeningApi};
pub use engine::EngineHandle;
pub use poller::{JobPoller, PollHandle, PollOutcome};
pub use screener::Screener;
pub use settings::{
    ClientSettings, CredentialProvider, SettingsError, StaticCredential, DEFAULT_BASE_URL,
};
pub use submission::SubmissionClient;
pub use summary::SummaryClient;
pub use types::{ChannelProgressSink, EngineEvent, JobProgress, ProgressSink};
