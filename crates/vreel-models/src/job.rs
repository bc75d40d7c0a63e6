//! Job and video identifiers plus queue-facing status records.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct JobId(pub String);

impl JobId {
    /// Generate a new random job ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a generated video.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct VideoId(pub String);

impl VideoId {
    /// Generate a new random video ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for VideoId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Job state in the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum JobState {
    /// Job is waiting in queue
    #[default]
    Pending,
    /// Job is being processed
    Processing,
    /// Job completed successfully
    Completed,
    /// Job failed (may be retried)
    Failed,
    /// Job sent to DLQ after max retries
    DeadLettered,
}

impl JobState {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobState::Pending => "pending",
            JobState::Processing => "processing",
            JobState::Completed => "completed",
            JobState::Failed => "failed",
            JobState::DeadLettered => "dead_lettered",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, JobState::Completed | JobState::DeadLettered)
    }
}

/// Status record for a job, written by the worker and polled by the API.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct JobStatus {
    /// Job ID
    pub job_id: JobId,
    /// Video ID the job renders
    pub video_id: VideoId,
    /// Current state
    pub state: JobState,
    /// URL of the finished video (set on completion)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    /// Realized duration of the finished video in seconds (set on completion)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<f64>,
    /// Failure description (set on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl JobStatus {
    /// Create a fresh pending status.
    pub fn pending(job_id: JobId, video_id: VideoId) -> Self {
        Self {
            job_id,
            video_id,
            state: JobState::Pending,
            video_url: None,
            duration_seconds: None,
            error: None,
            updated_at: Utc::now(),
        }
    }

    /// Transition to processing.
    pub fn processing(mut self) -> Self {
        self.state = JobState::Processing;
        self.updated_at = Utc::now();
        self
    }

    /// Transition to completed with the finished video.
    pub fn completed(mut self, video_url: impl Into<String>, duration_seconds: f64) -> Self {
        self.state = JobState::Completed;
        self.video_url = Some(video_url.into());
        self.duration_seconds = Some(duration_seconds);
        self.error = None;
        self.updated_at = Utc::now();
        self
    }

    /// Transition to failed with a description of the failing stage.
    pub fn failed(mut self, error: impl Into<String>) -> Self {
        self.state = JobState::Failed;
        self.error = Some(error.into());
        self.updated_at = Utc::now();
        self
    }
}
