//! TTS error types.

use thiserror::Error;

pub type TtsResult<T> = Result<T, TtsError>;

#[derive(Debug, Error)]
pub enum TtsError {
    #[error("Synthesis request failed: {0}")]
    RequestFailed(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Every configured narration provider failed")]
    AllProvidersFailed,
}

impl TtsError {
    /// Whether a retry against the same provider can help.
    pub fn is_retryable(&self) -> bool {
        match self {
            TtsError::Network(e) => e.is_timeout() || e.is_connect(),
            TtsError::RequestFailed(_) => false,
            TtsError::Io(_) => false,
            TtsError::AllProvidersFailed => false,
        }
    }
}
