//! Shared data models for the VerseReel backend.
//!
//! This crate provides Serde-serializable types for:
//! - Job and video identifiers, job states and status records
//! - Theme configuration (palette, fonts, animation defaults)
//! - Generation requests and their validation bounds
//! - Render specifications and encoding configuration
//! - Progress message schemas

pub mod encoding;
pub mod job;
pub mod progress;
pub mod render;
pub mod request;
pub mod theme;

// Re-export common types
pub use encoding::EncodingConfig;
pub use job::{JobId, JobState, JobStatus, VideoId};
pub use progress::ProgressMessage;
pub use render::{OutputProfile, RenderSpec};
pub use request::{normalize_poetry, GenerateVideoRequest, LineBounds};
pub use theme::{AnimationMode, Color, ColorPalette, ThemeConfig, ThemeError, ThemeKind};
