//! Render specifications handed from the intake path to the worker.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::encoding::EncodingConfig;
use crate::theme::{AnimationMode, ThemeConfig};

/// Default output width in pixels (9:16 portrait).
pub const DEFAULT_WIDTH: u32 = 1080;
/// Default output height in pixels.
pub const DEFAULT_HEIGHT: u32 = 1920;
/// Default output frame rate.
pub const DEFAULT_FPS: u32 = 24;

/// Raised when the output profile is unusable. This is a fatal
/// configuration error; there is no fallback resolution.
#[derive(Debug, Error)]
#[error("Invalid output profile: {0}")]
pub struct InvalidProfile(pub String);

/// Fixed output resolution and frame rate for one render.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
pub struct OutputProfile {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
}

impl Default for OutputProfile {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            fps: DEFAULT_FPS,
        }
    }
}

impl OutputProfile {
    /// Create profile from environment variables, falling back to the
    /// portrait defaults.
    pub fn from_env() -> Self {
        let parse = |var: &str, default: u32| {
            std::env::var(var)
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(default)
        };
        Self {
            width: parse("VIDEO_WIDTH", DEFAULT_WIDTH),
            height: parse("VIDEO_HEIGHT", DEFAULT_HEIGHT),
            fps: parse("VIDEO_FPS", DEFAULT_FPS),
        }
    }

    /// Reject profiles that cannot be rendered.
    pub fn validate(&self) -> Result<(), InvalidProfile> {
        if self.width == 0 || self.height == 0 {
            return Err(InvalidProfile(format!(
                "resolution {}x{} must be non-zero",
                self.width, self.height
            )));
        }
        if self.fps == 0 {
            return Err(InvalidProfile("fps must be non-zero".to_string()));
        }
        Ok(())
    }
}

/// Everything the composition engine needs for one render.
///
/// Media inputs (background clip, music, narration) are acquired by the
/// worker and passed separately; this struct carries only the request-
/// derived parameters.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RenderSpec {
    /// Ordered, non-empty caption lines (validated upstream)
    pub lines: Vec<String>,
    /// Theme configuration (validated at load)
    pub theme: ThemeConfig,
    /// Caption animation mode
    pub animation: AnimationMode,
    /// Requested nominal duration in seconds; `None` uses the system default
    pub duration_hint: Option<u32>,
    /// Output resolution and frame rate
    pub output: OutputProfile,
    /// Encoder settings
    pub encoding: EncodingConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_is_portrait() {
        let profile = OutputProfile::default();
        assert_eq!(profile.width, 1080);
        assert_eq!(profile.height, 1920);
        assert_eq!(profile.fps, 24);
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn zero_dimensions_rejected() {
        let profile = OutputProfile {
            width: 0,
            height: 1920,
            fps: 24,
        };
        assert!(profile.validate().is_err());

        let profile = OutputProfile {
            width: 1080,
            height: 1920,
            fps: 0,
        };
        assert!(profile.validate().is_err());
    }
}
