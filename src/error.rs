use thiserror::Error;

pub use anyhow::Context;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    pub fn message<T: Into<String>>(msg: T) -> Self {
        AppError::Message(msg.into())
    }
}

/// Why a daily series request produced no data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchFailure {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("upstream returned status {0}")]
    Status(u16),
    #[error("rate limited: {0}")]
    RateLimited(String),
    #[error("symbol rejected: {0}")]
    InvalidSymbol(String),
    #[error("malformed payload: {0}")]
    Malformed(String),
}

impl FetchFailure {
    /// Transient failures a caller could reasonably try again later.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchFailure::Transport(_) | FetchFailure::RateLimited(_) => true,
            FetchFailure::Status(status) => *status == 429 || *status >= 500,
            FetchFailure::InvalidSymbol(_) | FetchFailure::Malformed(_) => false,
        }
    }
}
