//! FFmpeg CLI wrapper and timeline composition engine.
//!
//! This crate provides:
//! - Type-safe multi-input FFmpeg command building
//! - Progress parsing from `-progress pipe:2`
//! - Cancellation and timeout support via tokio
//! - The composition pipeline: duration resolution, background adaptation,
//!   audio mixing, caption layout, animation scheduling and frame
//!   composition into a single deterministic filter graph
//! - Rendering with realized-duration verification
//!
//! The pipeline is split into a pure planning layer (everything up to
//! [`compose::compose`], which yields a [`compose::CompositionPlan`]) and
//! an execution layer ([`render::render_plan`]). The planning layer never
//! touches FFmpeg, which keeps the timeline semantics testable.

pub mod animate;
pub mod audio;
pub mod background;
pub mod command;
pub mod compose;
pub mod duration;
pub mod error;
pub mod fetch;
pub mod fs_utils;
pub mod layout;
pub mod probe;
pub mod progress;
pub mod render;

pub use animate::{schedule_line, LinePhase, LineSchedule};
pub use audio::{mix_audio, AudioMixPlan, MUSIC_GAIN, MUSIC_GAIN_UNDER_NARRATION, NARRATION_GAIN};
pub use background::{adapt_background, BackgroundPlan, BackgroundSource};
pub use command::{check_ffmpeg, check_ffprobe, FfmpegCommand, FfmpegInput, FfmpegRunner};
pub use compose::{compose, CompositionInputs, CompositionPlan};
pub use duration::{resolve_duration, DEFAULT_DURATION_SECS, NARRATION_BUFFER_SECS};
pub use error::{MediaError, MediaResult};
pub use fetch::fetch_to_file;
pub use layout::{layout_captions, CaptionLayout, LinePlacement};
pub use probe::{get_duration, probe_audio, probe_video, MediaAsset, MediaInfo};
pub use progress::FfmpegProgress;
pub use render::{render_plan, RenderOptions, RenderedVideo};
