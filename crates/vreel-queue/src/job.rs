//! Job types for the queue.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vreel_models::{AnimationMode, JobId, ThemeKind, VideoId};

/// Job to generate one poetry video.
///
/// Carries everything the worker needs except media, which it acquires
/// itself: the validated poem lines, the theme selection and the
/// request-level overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateVideoJob {
    /// Unique job ID
    pub job_id: JobId,
    /// Video ID the render will produce
    pub video_id: VideoId,
    /// Validated, trimmed poem lines
    pub lines: Vec<String>,
    /// Theme driving palette, fonts and media matching
    pub theme: ThemeKind,
    /// Caption animation override; theme default when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<AnimationMode>,
    /// Nominal duration in seconds; system default when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_hint: Option<u32>,
    /// Whether to synthesize narration
    #[serde(default)]
    pub enable_narration: bool,
    /// Narration voice identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
    /// Narration speaking rate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaking_rate: Option<f32>,
    /// URL of a custom background clip
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_background: Option<String>,
    /// When the job was created
    pub created_at: DateTime<Utc>,
}

impl GenerateVideoJob {
    /// Create a new generation job.
    pub fn new(lines: Vec<String>, theme: ThemeKind) -> Self {
        Self {
            job_id: JobId::new(),
            video_id: VideoId::new(),
            lines,
            theme,
            animation: None,
            duration_hint: None,
            enable_narration: false,
            voice: None,
            speaking_rate: None,
            custom_background: None,
            created_at: Utc::now(),
        }
    }

    /// Set the animation override.
    pub fn with_animation(mut self, animation: Option<AnimationMode>) -> Self {
        self.animation = animation;
        self
    }

    /// Set the duration hint.
    pub fn with_duration_hint(mut self, hint: Option<u32>) -> Self {
        self.duration_hint = hint;
        self
    }

    /// Enable narration with an optional voice and rate.
    pub fn with_narration(mut self, voice: Option<String>, rate: Option<f32>) -> Self {
        self.enable_narration = true;
        self.voice = voice;
        self.speaking_rate = rate;
        self
    }

    /// Set a custom background URL.
    pub fn with_custom_background(mut self, url: Option<String>) -> Self {
        self.custom_background = url;
        self
    }

    /// Generate idempotency key for deduplication.
    pub fn idempotency_key(&self) -> String {
        format!("generate:{}", self.video_id)
    }
}

/// Generic job wrapper for queue storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QueueJob {
    /// Render one poetry video
    GenerateVideo(GenerateVideoJob),
}

impl QueueJob {
    pub fn job_id(&self) -> &JobId {
        match self {
            QueueJob::GenerateVideo(j) => &j.job_id,
        }
    }

    pub fn video_id(&self) -> &VideoId {
        match self {
            QueueJob::GenerateVideo(j) => &j.video_id,
        }
    }

    pub fn idempotency_key(&self) -> String {
        match self {
            QueueJob::GenerateVideo(j) => j.idempotency_key(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_job_serde_roundtrip() {
        let job = GenerateVideoJob::new(
            vec!["first".to_string(), "second".to_string(), "third".to_string()],
            ThemeKind::Ocean,
        )
        .with_duration_hint(Some(20))
        .with_narration(Some("female_calm".to_string()), Some(0.85));

        let wrapper = QueueJob::GenerateVideo(job.clone());
        let json = serde_json::to_string(&wrapper).expect("serialize QueueJob");
        assert!(json.contains("\"type\":\"generate_video\""));

        let decoded: QueueJob = serde_json::from_str(&json).expect("deserialize QueueJob");
        match decoded {
            QueueJob::GenerateVideo(j) => {
                assert_eq!(j.job_id, job.job_id);
                assert_eq!(j.video_id, job.video_id);
                assert_eq!(j.lines, job.lines);
                assert_eq!(j.theme, ThemeKind::Ocean);
                assert!(j.enable_narration);
                assert_eq!(j.duration_hint, Some(20));
            }
        }
    }

    #[test]
    fn idempotency_key_tracks_video() {
        let job = GenerateVideoJob::new(vec!["a".to_string()], ThemeKind::Nature);
        assert_eq!(job.idempotency_key(), format!("generate:{}", job.video_id));
    }
}
