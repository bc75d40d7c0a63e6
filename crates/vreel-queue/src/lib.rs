//! Redis Streams job queue for render work.
//!
//! One stream carries generation jobs consumed by worker processes
//! through a consumer group; retries are counted per message and
//! exhausted jobs land in a dead-letter stream. Job status lives in
//! Redis hashes ([`StatusStore`]) and live progress fans out over
//! pub/sub ([`ProgressChannel`]).

pub mod error;
pub mod job;
pub mod progress;
pub mod queue;
pub mod status;

pub use error::{QueueError, QueueResult};
pub use job::{GenerateVideoJob, QueueJob};
pub use progress::{ProgressChannel, ProgressEvent};
pub use queue::{JobQueue, QueueConfig};
pub use status::StatusStore;
