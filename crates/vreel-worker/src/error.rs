//! Worker error types.
//!
//! Everything that becomes a `WorkerError` is fatal for the current
//! attempt; the queue decides whether the job retries. Degradable
//! acquisition failures never construct one of these.

use thiserror::Error;

pub type WorkerResult<T> = Result<T, WorkerError>;

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("Job failed: {0}")]
    JobFailed(String),

    #[error("Media error: {0}")]
    Media(#[from] vreel_media::MediaError),

    #[error("Queue error: {0}")]
    Queue(#[from] vreel_queue::QueueError),

    #[error("Storage error: {0}")]
    Storage(#[from] vreel_storage::StorageError),

    #[error("Theme error: {0}")]
    Theme(#[from] vreel_models::ThemeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl WorkerError {
    pub fn job_failed(msg: impl Into<String>) -> Self {
        Self::JobFailed(msg.into())
    }
}
