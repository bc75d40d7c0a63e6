//! Narration provider contract.

use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::TtsResult;

/// Default narration voice.
pub const DEFAULT_VOICE: &str = "female_calm";

/// Default speaking rate (slightly slower than neutral reads better for
/// poetry).
pub const DEFAULT_SPEAKING_RATE: f32 = 0.85;

/// One synthesis request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesisRequest {
    /// Text to speak
    pub text: String,
    /// Voice identifier
    pub voice: String,
    /// Speaking rate (0.5 = slow, 1.0 = normal, 2.0 = fast)
    pub rate: f32,
}

impl SynthesisRequest {
    /// Request with the default voice and rate.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice: DEFAULT_VOICE.to_string(),
            rate: DEFAULT_SPEAKING_RATE,
        }
    }

    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = voice.into();
        self
    }

    pub fn with_rate(mut self, rate: f32) -> Self {
        self.rate = rate;
        self
    }

    /// Join poem lines into the narration script.
    pub fn from_lines(lines: &[String]) -> Self {
        Self::new(lines.join("\n"))
    }
}

/// A narration synthesis backend.
#[async_trait]
pub trait NarrationProvider: Send + Sync {
    /// Provider name for logs.
    fn name(&self) -> &str;

    /// Synthesize `request` into an audio file at `dest`.
    async fn synthesize(&self, request: &SynthesisRequest, dest: &Path) -> TtsResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_from_lines_joins() {
        let lines = vec!["first".to_string(), "second".to_string()];
        let req = SynthesisRequest::from_lines(&lines);
        assert_eq!(req.text, "first\nsecond");
        assert_eq!(req.voice, DEFAULT_VOICE);
        assert!((req.rate - DEFAULT_SPEAKING_RATE).abs() < f32::EPSILON);
    }
}
