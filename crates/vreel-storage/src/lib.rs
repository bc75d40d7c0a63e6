//! S3-compatible object storage client.
//!
//! Finished videos are uploaded once and addressed by a public URL; the
//! uploader owns nothing else about delivery.

pub mod client;
pub mod error;

pub use client::{S3Client, S3Config};
pub use error::{StorageError, StorageResult};
