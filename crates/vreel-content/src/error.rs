//! Content error types.

use thiserror::Error;

pub type ContentResult<T> = Result<T, ContentError>;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("No poetry available for the requested constraints")]
    NoPoetry,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
