//! Progress message schema published over the progress channel.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A progress update for a running job.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProgressMessage {
    /// Human-readable stage description
    Log { message: String },
    /// Percent complete (0-100)
    Progress { percent: u8 },
    /// Render finished; video uploaded
    Done {
        video_url: String,
        duration_seconds: f64,
    },
    /// Render failed
    Error { message: String },
}

impl ProgressMessage {
    pub fn log(message: impl Into<String>) -> Self {
        Self::Log {
            message: message.into(),
        }
    }

    pub fn progress(percent: u8) -> Self {
        Self::Progress {
            percent: percent.min(100),
        }
    }

    pub fn done(video_url: impl Into<String>, duration_seconds: f64) -> Self {
        Self::Done {
            video_url: video_url.into(),
            duration_seconds,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }
}
