//! Background track adaptation.
//!
//! Normalizes an arbitrary-length background clip, or a solid-color
//! fallback, to the resolved duration and the output resolution. The
//! result is one FFmpeg input plus the filter chain that produces the
//! `[bg]` label consumed by the compositor.

use vreel_models::render::OutputProfile;
use vreel_models::theme::Color;

use crate::command::FfmpegInput;
use crate::probe::MediaAsset;

/// Filter label produced by every background chain.
pub const BG_LABEL: &str = "bg";

/// Where the background pixels come from.
#[derive(Debug, Clone)]
pub enum BackgroundSource {
    /// A real clip of known duration
    Clip(MediaAsset),
    /// Solid fill in the theme accent color
    Solid(Color),
}

/// One FFmpeg input and the filter chain normalizing it to `[bg]`.
#[derive(Debug, Clone)]
pub struct BackgroundPlan {
    pub input: FfmpegInput,
    pub filter: String,
}

/// Number of *extra* repeats needed for a clip to cover `target` seconds.
///
/// Zero when the clip already covers the target; `-stream_loop n` plays
/// the input `n + 1` times.
pub fn extra_loops(clip_secs: f64, target_secs: f64) -> u32 {
    if clip_secs <= 0.0 || clip_secs >= target_secs {
        return 0;
    }
    (target_secs / clip_secs).ceil() as u32 - 1
}

/// Adapt a background source to the target duration and resolution.
///
/// - Shorter clips are repeated (no crossfade) until they cover the
///   target, then trimmed to it exactly.
/// - Longer clips contribute only their `[0, target)` prefix.
/// - Every clip is aspect-filled to the output resolution: scaled up
///   until both dimensions cover the frame, then center-cropped. The
///   frame is always fully covered.
/// - The solid fallback is a lavfi color source of exactly the target
///   duration.
///
/// `input_index` is the position the returned input will occupy in the
/// final command's input list.
pub fn adapt_background(
    source: &BackgroundSource,
    target_secs: f64,
    profile: &OutputProfile,
    input_index: usize,
) -> BackgroundPlan {
    let (w, h, fps) = (profile.width, profile.height, profile.fps);

    match source {
        BackgroundSource::Clip(asset) => {
            let mut input = FfmpegInput::file(&asset.path);
            let loops = extra_loops(asset.duration, target_secs);
            if loops > 0 {
                input = input.stream_loop(loops);
            }

            let filter = format!(
                "[{idx}:v]scale={w}:{h}:force_original_aspect_ratio=increase,\
                 crop={w}:{h},setsar=1,fps={fps},\
                 trim=duration={t:.3},setpts=PTS-STARTPTS[{label}]",
                idx = input_index,
                w = w,
                h = h,
                fps = fps,
                t = target_secs,
                label = BG_LABEL,
            );

            BackgroundPlan { input, filter }
        }
        BackgroundSource::Solid(color) => {
            let input = FfmpegInput::lavfi(format!(
                "color=c={}:s={}x{}:r={}",
                color.to_ffmpeg(),
                w,
                h,
                fps
            ))
            .duration(target_secs);

            let filter = format!(
                "[{idx}:v]setsar=1,trim=duration={t:.3},setpts=PTS-STARTPTS[{label}]",
                idx = input_index,
                t = target_secs,
                label = BG_LABEL,
            );

            BackgroundPlan { input, filter }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn asset(duration: f64) -> MediaAsset {
        MediaAsset {
            path: PathBuf::from("/tmp/bg.mp4"),
            duration,
        }
    }

    fn profile() -> OutputProfile {
        OutputProfile::default()
    }

    #[test]
    fn extra_loops_math() {
        assert_eq!(extra_loops(5.0, 14.3), 2); // 3 plays cover 15s
        assert_eq!(extra_loops(18.0, 18.0), 0);
        assert_eq!(extra_loops(40.0, 18.0), 0);
        assert_eq!(extra_loops(6.0, 18.0), 2); // exactly 3 plays
        assert_eq!(extra_loops(0.0, 18.0), 0);
    }

    #[test]
    fn short_clip_loops_then_trims() {
        let source = BackgroundSource::Clip(asset(5.0));
        let plan = adapt_background(&source, 14.3, &profile(), 0);

        assert!(plan.input.args().contains(&"-stream_loop".to_string()));
        assert!(plan.input.args().contains(&"2".to_string()));
        assert!(plan.filter.contains("trim=duration=14.300"));
        assert!(plan.filter.ends_with("[bg]"));
    }

    #[test]
    fn long_clip_takes_prefix() {
        let source = BackgroundSource::Clip(asset(40.0));
        let plan = adapt_background(&source, 18.0, &profile(), 0);

        assert!(!plan.input.args().contains(&"-stream_loop".to_string()));
        assert!(plan.filter.contains("trim=duration=18.000"));
    }

    #[test]
    fn clip_fills_frame() {
        let source = BackgroundSource::Clip(asset(20.0));
        let plan = adapt_background(&source, 18.0, &profile(), 0);

        assert!(plan
            .filter
            .contains("scale=1080:1920:force_original_aspect_ratio=increase"));
        assert!(plan.filter.contains("crop=1080:1920"));
    }

    #[test]
    fn solid_fallback_uses_accent() {
        let accent = Color::from_hex("#8fbc8f").unwrap();
        let source = BackgroundSource::Solid(accent);
        let plan = adapt_background(&source, 18.0, &profile(), 0);

        assert!(plan.input.source().contains("color=c=0x8FBC8F"));
        assert!(plan.input.source().contains("s=1080x1920"));
        assert!(plan.input.args().contains(&"lavfi".to_string()));
        assert!(plan.input.args().contains(&"18.000".to_string()));
        assert!(plan.filter.ends_with("[bg]"));
    }

    #[test]
    fn input_index_flows_into_filter() {
        let source = BackgroundSource::Clip(asset(10.0));
        let plan = adapt_background(&source, 18.0, &profile(), 3);
        assert!(plan.filter.starts_with("[3:v]"));
    }
}
