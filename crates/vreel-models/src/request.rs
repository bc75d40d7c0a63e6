//! Generation request schema and poetry validation bounds.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::theme::{AnimationMode, ThemeKind};

/// Default minimum number of poetry lines.
pub const DEFAULT_MIN_LINES: usize = 3;
/// Default maximum number of poetry lines.
pub const DEFAULT_MAX_LINES: usize = 12;

/// Configured window for accepted poetry line counts.
///
/// Enforced at intake: requests below `min` are rejected, requests above
/// `max` are truncated before a job is enqueued. The composition engine
/// never sees out-of-window input.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
pub struct LineBounds {
    pub min: usize,
    pub max: usize,
}

impl Default for LineBounds {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_LINES,
            max: DEFAULT_MAX_LINES,
        }
    }
}

impl LineBounds {
    /// Create bounds from environment variables.
    pub fn from_env() -> Self {
        let parse = |var: &str, default: usize| {
            std::env::var(var)
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(default)
        };
        Self {
            min: parse("POETRY_MIN_LINES", DEFAULT_MIN_LINES),
            max: parse("POETRY_MAX_LINES", DEFAULT_MAX_LINES),
        }
    }

    /// Whether a line count falls inside the window.
    pub fn contains(&self, count: usize) -> bool {
        count >= self.min && count <= self.max
    }
}

/// Split free-form poetry text into trimmed, non-empty lines.
pub fn normalize_poetry(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// A video generation request as submitted to the API.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Validate)]
pub struct GenerateVideoRequest {
    /// Theme selecting palette, fonts and content matching
    pub theme: ThemeKind,

    /// Custom poetry text (newline-separated); curated poetry is selected
    /// when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_poetry: Option<String>,

    /// URL of a custom background clip
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url)]
    pub custom_background: Option<String>,

    /// Caption animation override; theme default when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<AnimationMode>,

    /// Nominal duration in seconds; system default when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 5, max = 120))]
    pub duration: Option<u32>,

    /// Whether to synthesize narration
    #[serde(default)]
    pub enable_narration: bool,

    /// Narration voice identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,

    /// Narration speaking rate (0.5 = slow, 1.0 = normal, 2.0 = fast)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.5, max = 2.0))]
    pub speaking_rate: Option<f32>,
}

impl GenerateVideoRequest {
    /// Minimal request for a theme with all defaults.
    pub fn for_theme(theme: ThemeKind) -> Self {
        Self {
            theme,
            custom_poetry: None,
            custom_background: None,
            animation: None,
            duration: None,
            enable_narration: false,
            voice: None,
            speaking_rate: None,
        }
    }
}
