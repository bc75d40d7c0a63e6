//! Frame composition.
//!
//! Stacks the adapted background, the readability overlay, the shared
//! text panel and the scheduled caption lines into one deterministic
//! filter graph, and binds the mixed audio chain to it. The result is a
//! complete FFmpeg invocation; nothing has executed yet.
//!
//! Z-order, bottom to top: background, overlay, panel, caption lines.

use std::path::Path;

use tracing::debug;

use vreel_models::render::RenderSpec;

use crate::animate::schedule_line;
use crate::audio::{mix_audio, AUDIO_LABEL};
use crate::background::{adapt_background, BackgroundSource, BG_LABEL};
use crate::command::FfmpegCommand;
use crate::duration::resolve_duration;
use crate::error::MediaResult;
use crate::layout::layout_captions;
use crate::probe::MediaAsset;

/// Filter label of the finished video chain.
pub const VIDEO_LABEL: &str = "vout";

/// Media acquired for one render. Absent entries use their documented
/// fallback (solid background, silent or music-only mix, hint duration).
#[derive(Debug, Clone, Default)]
pub struct CompositionInputs {
    pub background: Option<MediaAsset>,
    pub music: Option<MediaAsset>,
    pub narration: Option<MediaAsset>,
}

/// A fully composed render: the authoritative duration and the FFmpeg
/// command that realizes it.
#[derive(Debug, Clone)]
pub struct CompositionPlan {
    /// Resolved output duration in seconds
    pub resolved_duration: f64,
    /// Number of caption lines placed
    pub line_count: usize,
    /// Complete FFmpeg invocation
    pub command: FfmpegCommand,
}

/// Escape text for use inside a single-quoted drawtext value.
pub fn escape_drawtext(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('\'', "'\\''")
}

/// Compose one render into an executable plan.
///
/// Fatal errors: an invalid output profile and an empty caption set.
/// Everything else has been degraded to a fallback before this point.
pub fn compose(
    spec: &RenderSpec,
    inputs: &CompositionInputs,
    output_path: &Path,
) -> MediaResult<CompositionPlan> {
    spec.output.validate()?;

    let layout = layout_captions(&spec.lines, &spec.theme, &spec.output)?;

    let resolved_duration = resolve_duration(
        spec.duration_hint,
        inputs.narration.as_ref().map(|n| n.duration),
    );

    debug!(
        duration = resolved_duration,
        lines = layout.lines.len(),
        background = inputs.background.is_some(),
        music = inputs.music.is_some(),
        narration = inputs.narration.is_some(),
        "Composing timeline"
    );

    let background_source = match &inputs.background {
        Some(asset) => BackgroundSource::Clip(asset.clone()),
        None => BackgroundSource::Solid(spec.theme.palette.accent),
    };

    let mut command = FfmpegCommand::new(output_path);

    // Input 0: background (clip or lavfi color)
    let bg_plan = adapt_background(&background_source, resolved_duration, &spec.output, 0);
    command.add_input(bg_plan.input.clone());

    // Audio inputs follow the background
    let audio_plan = mix_audio(
        inputs.music.as_ref(),
        inputs.narration.as_ref(),
        resolved_duration,
        command.inputs().len(),
    );
    for input in &audio_plan.inputs {
        command.add_input(input.clone());
    }

    // Video chain: background -> readability overlay -> panel -> lines
    let overlay = spec.theme.palette.background_overlay;
    let mut video_chain = format!(
        "[{bg}]drawbox=x=0:y=0:w=iw:h=ih:color={overlay}:t=fill,\
         drawbox=x=(iw-{pw})/2:y={py}:w={pw}:h={ph}:color=0x000000@0.60:t=fill",
        bg = BG_LABEL,
        overlay = overlay.to_ffmpeg_alpha(),
        pw = layout.panel_width,
        py = layout.panel_y,
        ph = layout.panel_height,
    );

    let text_color = spec.theme.palette.secondary.to_ffmpeg();
    let font_family = escape_drawtext(&spec.theme.font_family);

    for line in &layout.lines {
        let schedule = schedule_line(spec.animation, line.slot, resolved_duration);

        // Wrapped rows share the line's slot and schedule
        for (row_index, row) in line.rows.iter().enumerate() {
            let y = line.y + row_index as i32 * spec.theme.font_size as i32;
            let mut drawtext = format!(
                ",drawtext=text='{text}':font='{font}':fontsize={size}:\
                 fontcolor={color}:x=(w-text_w)/2:y={y}",
                text = escape_drawtext(row),
                font = font_family,
                size = spec.theme.font_size,
                color = text_color,
                y = y,
            );

            if schedule.fade_in > 0.0 {
                drawtext.push_str(&format!(
                    ":alpha='if(lt(t,{d:.2}),0,if(lt(t,{df:.2}),(t-{d:.2})/{f:.2},1))'",
                    d = schedule.start_delay,
                    df = schedule.start_delay + schedule.fade_in,
                    f = schedule.fade_in,
                ));
            }

            drawtext.push_str(&format!(":enable='gte(t,{:.2})'", schedule.start_delay));
            video_chain.push_str(&drawtext);
        }
    }
    video_chain.push_str(&format!("[{VIDEO_LABEL}]"));

    let filter_complex = format!("{};{};{}", bg_plan.filter, audio_plan.filter, video_chain);

    let command = command
        .filter_complex(filter_complex)
        .map(format!("[{VIDEO_LABEL}]"))
        .map(format!("[{AUDIO_LABEL}]"))
        .frame_rate(spec.output.fps)
        .duration(resolved_duration)
        .output_args(spec.encoding.to_ffmpeg_args());

    Ok(CompositionPlan {
        resolved_duration,
        line_count: layout.lines.len(),
        command,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use vreel_models::encoding::EncodingConfig;
    use vreel_models::render::OutputProfile;
    use vreel_models::theme::{AnimationMode, Color, ColorPalette, ThemeConfig};

    fn theme() -> ThemeConfig {
        ThemeConfig {
            name: "Nature".into(),
            description: String::new(),
            background_keywords: vec![],
            palette: ColorPalette {
                primary: Color::from_hex("#2d5016").unwrap(),
                secondary: Color::from_hex("#ffffff").unwrap(),
                accent: Color::from_hex("#8fbc8f").unwrap(),
                background_overlay: Color::from_rgba_str("rgba(0, 0, 0, 0.3)").unwrap(),
            },
            font_family: "serif".into(),
            font_size: 48,
            line_spacing: 1.4,
            default_animation: AnimationMode::FadeIn,
            poetry_topics: vec![],
        }
    }

    fn spec(lines: &[&str]) -> RenderSpec {
        RenderSpec {
            lines: lines.iter().map(|s| s.to_string()).collect(),
            theme: theme(),
            animation: AnimationMode::FadeIn,
            duration_hint: Some(18),
            output: OutputProfile::default(),
            encoding: EncodingConfig::default(),
        }
    }

    fn asset(name: &str, duration: f64) -> MediaAsset {
        MediaAsset {
            path: PathBuf::from(format!("/tmp/{name}")),
            duration,
        }
    }

    fn filter_of(plan: &CompositionPlan) -> String {
        let args = plan.command.build_args();
        let pos = args.iter().position(|a| a == "-filter_complex").unwrap();
        args[pos + 1].clone()
    }

    #[test]
    fn no_inputs_composes_solid_and_silence() {
        let plan = compose(
            &spec(&["one", "two", "three", "four"]),
            &CompositionInputs::default(),
            Path::new("/tmp/out.mp4"),
        )
        .unwrap();

        assert_eq!(plan.resolved_duration, 18.0);
        assert_eq!(plan.line_count, 4);

        let inputs = plan.command.inputs();
        assert_eq!(inputs.len(), 2);
        assert!(inputs[0].source().starts_with("color=c=0x8FBC8F"));
        assert!(inputs[1].source().starts_with("anullsrc"));

        let filter = filter_of(&plan);
        assert!(filter.contains("[bg]"));
        assert!(filter.contains("[aout]"));
        assert!(filter.contains("[vout]"));
    }

    #[test]
    fn narration_overrides_duration() {
        let mut inputs = CompositionInputs::default();
        inputs.narration = Some(asset("voice.mp3", 12.3));
        inputs.music = Some(asset("music.mp3", 5.0));

        let plan = compose(&spec(&["a", "b", "c", "d", "e", "f"]), &inputs, Path::new("/tmp/out.mp4"))
            .unwrap();

        assert!((plan.resolved_duration - 14.3).abs() < 1e-9);

        let args = plan.command.build_args();
        let joined = args.join(" ");
        // Music looped twice more to cover 14.3s, narration untouched
        assert!(joined.contains("-stream_loop 2 -i /tmp/music.mp3"));
        assert!(joined.contains("-t 14.300"));

        let filter = filter_of(&plan);
        assert!(filter.contains("volume=0.15"));
        assert!(filter.contains("volume=0.50"));
    }

    #[test]
    fn z_order_is_overlay_panel_then_text() {
        let plan = compose(
            &spec(&["first", "second", "third"]),
            &CompositionInputs::default(),
            Path::new("/tmp/out.mp4"),
        )
        .unwrap();
        let filter = filter_of(&plan);

        let overlay_pos = filter.find("drawbox=x=0:y=0:w=iw:h=ih").unwrap();
        let panel_pos = filter.find("color=0x000000@0.60").unwrap();
        let text_pos = filter.find("drawtext").unwrap();
        assert!(overlay_pos < panel_pos);
        assert!(panel_pos < text_pos);
    }

    #[test]
    fn lines_are_staggered_in_filter() {
        let plan = compose(
            &spec(&["first", "second", "third"]),
            &CompositionInputs::default(),
            Path::new("/tmp/out.mp4"),
        )
        .unwrap();
        let filter = filter_of(&plan);

        assert!(filter.contains("enable='gte(t,0.00)'"));
        assert!(filter.contains("enable='gte(t,0.50)'"));
        assert!(filter.contains("enable='gte(t,1.00)'"));
        // fade_in mode: 1s fades starting at each delay
        assert!(filter.contains("(t-0.50)/1.00"));
    }

    #[test]
    fn maps_both_streams_and_encodes() {
        let plan = compose(
            &spec(&["a", "b", "c"]),
            &CompositionInputs::default(),
            Path::new("/tmp/out.mp4"),
        )
        .unwrap();
        let args = plan.command.build_args();
        let joined = args.join(" ");

        assert!(joined.contains("-map [vout] -map [aout]"));
        assert!(joined.contains("-r 24"));
        assert!(joined.contains("-c:v libx264"));
        assert!(joined.contains("-pix_fmt yuv420p"));
        assert_eq!(args.last().unwrap(), "/tmp/out.mp4");
    }

    #[test]
    fn empty_lines_are_fatal() {
        let err = compose(
            &spec(&["   ", ""]),
            &CompositionInputs::default(),
            Path::new("/tmp/out.mp4"),
        )
        .unwrap_err();
        assert!(matches!(err, crate::error::MediaError::NoTextLines));
    }

    #[test]
    fn invalid_profile_is_fatal() {
        let mut s = spec(&["a", "b", "c"]);
        s.output.fps = 0;
        let err = compose(&s, &CompositionInputs::default(), Path::new("/tmp/out.mp4"))
            .unwrap_err();
        assert!(matches!(err, crate::error::MediaError::InvalidProfile(_)));
    }

    #[test]
    fn drawtext_escaping() {
        assert_eq!(escape_drawtext("it's 100%"), "it'\\''s 100\\%");
        assert_eq!(escape_drawtext("a\\b"), "a\\\\b");
    }

    #[test]
    fn text_color_comes_from_theme() {
        let plan = compose(
            &spec(&["a", "b", "c"]),
            &CompositionInputs::default(),
            Path::new("/tmp/out.mp4"),
        )
        .unwrap();
        let filter = filter_of(&plan);
        assert!(filter.contains("fontcolor=0xFFFFFF"));
        assert!(filter.contains("font='serif'"));
    }
}
