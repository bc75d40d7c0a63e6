//! Render worker.
//!
//! Consumes generation jobs from the queue under a bounded concurrency
//! budget and runs each through the pipeline: acquire media (concurrent,
//! degradable), compose, render, deliver, record status. Temporary files
//! are cleaned up on every exit path.

pub mod acquire;
pub mod config;
pub mod error;
pub mod executor;
pub mod processor;
pub mod workdir;

pub use config::WorkerConfig;
pub use error::{WorkerError, WorkerResult};
pub use executor::JobExecutor;
pub use processor::ProcessingContext;
