//! Screening core: data model, payload normalization and the pure job-polling state machine.
mod effect;
mod error;
mod msg;
mod normalize;
mod state;
mod types;
mod update;
mod view_model;
mod wire;

pub use effect::Effect;
pub use error::ScreeningError;
pub use msg::Msg;
pub use normalize::{
    normalize_status, normalize_submission, StatusUpdate, SubmissionOutcome,
    DEFAULT_ALL_CLEAR_MESSAGE, DEFAULT_FAILED_MESSAGE, UNEXPECTED_RESPONSE_MESSAGE,
};
pub use state::{PollSettings, PollState, SessionState};
pub use types::{
    Geometry, JobId, JobStatus, OperationalProfile, Priority, RiskLevel, ScreeningJob,
    ScreeningRequest, ScreeningResult, ScreeningStats, ThreatEvent,
};
pub use update::{start, update};
pub use view_model::{
    classify_threats, SessionBadge, Severity, CRITICAL_LABEL, MANNED_LABEL, YELLOW_LABEL,
};
pub use wire::{ServerReply, SummaryReply, WireStats, WireThreat};
