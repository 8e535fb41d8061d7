use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("API not configured")]
    NotConfigured,

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error: {0}")]
    Status(StatusCode),

    #[error("Malformed response: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}

/// Which of the four failure classes an [`ApiError`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    NotConfigured,
    Transport,
    Status,
    MalformedResponse,
}

impl ApiError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ApiError::NotConfigured => FailureKind::NotConfigured,
            ApiError::Transport(_) => FailureKind::Transport,
            ApiError::Status(_) => FailureKind::Status,
            ApiError::MalformedResponse(_) => FailureKind::MalformedResponse,
        }
    }
}

impl FailureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FailureKind::NotConfigured => "not_configured",
            FailureKind::Transport => "transport",
            FailureKind::Status => "status",
            FailureKind::MalformedResponse => "malformed_response",
        }
    }
}
