use thiserror::Error;

/// Every way a submission, poll or summary request can end without a result.
///
/// All variants are terminal; only `queued`/`running` replies are ever
/// followed by another request.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ScreeningError {
    #[error("enterprise authorization required")]
    Auth,
    #[error("{message}")]
    Server { status: u16, message: String },
    #[error("network error: {0}")]
    Transport(String),
    #[error(
        "screening timed out after {} (server still processing); try a smaller catalog limit",
        format_elapsed(*elapsed_secs)
    )]
    TimedOut { elapsed_secs: u64 },
    #[error("protocol error: {0}")]
    Protocol(String),
    #[error("no active screening job; submit a file first")]
    NoActiveJob,
    #[error("summary report unavailable")]
    SummaryUnavailable,
}

impl ScreeningError {
    pub fn server(status: u16, message: Option<String>) -> Self {
        ScreeningError::Server {
            status,
            message: message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| "server error".to_string()),
        }
    }
}

fn format_elapsed(secs: u64) -> String {
    if secs >= 60 && secs % 60 == 0 {
        format!("{} minutes", secs / 60)
    } else {
        format!("{secs} seconds")
    }
}
