//! End-to-end composition scenarios, asserted against the built plan.
//!
//! Rendering shells out to FFmpeg, so these tests exercise the planning
//! layer: the invocation that would run, its inputs, its filter graph and
//! its duration clamp.

use std::path::{Path, PathBuf};

use vreel_media::compose::{compose, CompositionInputs, CompositionPlan};
use vreel_media::probe::MediaAsset;
use vreel_models::encoding::EncodingConfig;
use vreel_models::render::{OutputProfile, RenderSpec};
use vreel_models::theme::{AnimationMode, Color, ColorPalette, ThemeConfig};

fn nature_theme() -> ThemeConfig {
    ThemeConfig {
        name: "Nature".into(),
        description: "Peaceful nature scenes".into(),
        background_keywords: vec!["forest".into(), "green".into()],
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
        poetry_topics: vec!["nature".into()],
    }
}

fn spec(lines: &[&str], duration_hint: Option<u32>) -> RenderSpec {
    RenderSpec {
        lines: lines.iter().map(|s| s.to_string()).collect(),
        theme: nature_theme(),
        animation: AnimationMode::FadeIn,
        duration_hint,
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

fn args_of(plan: &CompositionPlan) -> Vec<String> {
    plan.command.build_args()
}

fn filter_of(plan: &CompositionPlan) -> String {
    let args = args_of(plan);
    let pos = args.iter().position(|a| a == "-filter_complex").unwrap();
    args[pos + 1].clone()
}

/// Scenario A: 4-line poem, no narration, hint 18s, no clips available.
/// Expect an 18s plan over a solid accent background with a silence bed.
#[test]
fn scenario_a_bare_request() {
    let plan = compose(
        &spec(&["one", "two", "three", "four"], Some(18)),
        &CompositionInputs::default(),
        Path::new("/tmp/a.mp4"),
    )
    .unwrap();

    assert_eq!(plan.resolved_duration, 18.0);
    assert_eq!(plan.line_count, 4);

    let inputs = plan.command.inputs();
    assert_eq!(inputs.len(), 2);
    assert!(inputs[0].source().starts_with("color=c=0x8FBC8F:s=1080x1920:r=24"));
    assert!(inputs[1].source().starts_with("anullsrc"));

    let joined = args_of(&plan).join(" ");
    assert!(joined.contains("-t 18.000"));
    assert!(joined.contains("-r 24"));
}

/// Scenario B: 6-line poem, 12.3s narration, 2s buffer -> 14.3s; 5s music
/// looped 3x (two extra plays) then trimmed; narration unmodified with the
/// trailing 2s narration-silent while music continues.
#[test]
fn scenario_b_narration_driven() {
    let mut inputs = CompositionInputs::default();
    inputs.music = Some(asset("music.mp3", 5.0));
    inputs.narration = Some(asset("voice.mp3", 12.3));

    let plan = compose(
        &spec(&["a", "b", "c", "d", "e", "f"], Some(18)),
        &inputs,
        Path::new("/tmp/b.mp4"),
    )
    .unwrap();

    assert!((plan.resolved_duration - 14.3).abs() < 1e-9);

    let joined = args_of(&plan).join(" ");
    assert!(joined.contains("-stream_loop 2 -i /tmp/music.mp3"));
    assert!(joined.contains("-i /tmp/voice.mp3"));
    assert!(!joined.contains("-stream_loop 2 -i /tmp/voice.mp3"));
    assert!(joined.contains("-t 14.300"));

    let filter = filter_of(&plan);
    // Music trimmed to the mix duration and ducked under the narration
    assert!(filter.contains("atrim=duration=14.300"));
    assert!(filter.contains("volume=0.15"));
    assert!(filter.contains("volume=0.50"));
    // amix keyed on the music chain keeps the full 14.3s even after the
    // narration runs out at 12.3s
    assert!(filter.contains("amix=inputs=2:duration=first:normalize=0"));
}

/// Scenario C: 40s background clip against an 18s target contributes only
/// its [0, 18) prefix, unlooped.
#[test]
fn scenario_c_long_background_prefix() {
    let mut inputs = CompositionInputs::default();
    inputs.background = Some(asset("bg.mp4", 40.0));

    let plan = compose(
        &spec(&["a", "b", "c", "d"], Some(18)),
        &inputs,
        Path::new("/tmp/c.mp4"),
    )
    .unwrap();

    assert_eq!(plan.resolved_duration, 18.0);

    let joined = args_of(&plan).join(" ");
    assert!(joined.contains("-i /tmp/bg.mp4"));
    assert!(!joined.contains("-stream_loop"));

    let filter = filter_of(&plan);
    assert!(filter.contains("trim=duration=18.000"));
    assert!(filter.contains("scale=1080:1920:force_original_aspect_ratio=increase"));
    assert!(filter.contains("crop=1080:1920"));
}

/// A short background loops enough times to cover the target before the
/// trim (never under-filled).
#[test]
fn short_background_loops_to_cover() {
    let mut inputs = CompositionInputs::default();
    inputs.background = Some(asset("bg.mp4", 7.0));

    let plan = compose(
        &spec(&["a", "b", "c"], Some(18)),
        &inputs,
        Path::new("/tmp/d.mp4"),
    )
    .unwrap();

    let joined = args_of(&plan).join(" ");
    // 7s * 3 plays = 21s >= 18s
    assert!(joined.contains("-stream_loop 2 -i /tmp/bg.mp4"));
    assert!(filter_of(&plan).contains("trim=duration=18.000"));
}

/// The mixed stream exists and is clamped to the resolved duration for
/// every input presence combination.
#[test]
fn mix_duration_invariant_all_combinations() {
    let cases: Vec<(Option<MediaAsset>, Option<MediaAsset>)> = vec![
        (None, None),
        (Some(asset("m.mp3", 5.0)), None),
        (None, Some(asset("v.mp3", 9.0))),
        (Some(asset("m.mp3", 5.0)), Some(asset("v.mp3", 9.0))),
    ];

    for (music, narration) in cases {
        let narration_present = narration.is_some();
        let inputs = CompositionInputs {
            background: None,
            music,
            narration,
        };
        let plan = compose(
            &spec(&["a", "b", "c"], Some(18)),
            &inputs,
            Path::new("/tmp/e.mp4"),
        )
        .unwrap();

        let expected = if narration_present { 11.0 } else { 18.0 };
        assert!((plan.resolved_duration - expected).abs() < 1e-9);

        let filter = filter_of(&plan);
        assert!(filter.contains("[aout]"), "audio chain missing");
        assert!(
            filter.contains(&format!("atrim=duration={expected:.3}")),
            "mix not clamped to resolved duration: {filter}"
        );

        let joined = args_of(&plan).join(" ");
        assert!(joined.contains(&format!("-t {expected:.3}")));
    }
}

/// Both video and audio chains are mapped into the output so the encoded
/// file carries exactly one stream of each.
#[test]
fn output_maps_one_video_one_audio() {
    let plan = compose(
        &spec(&["a", "b", "c"], None),
        &CompositionInputs::default(),
        Path::new("/tmp/f.mp4"),
    )
    .unwrap();

    let args = args_of(&plan);
    let maps: Vec<&String> = args
        .iter()
        .enumerate()
        .filter(|(_, a)| *a == "-map")
        .map(|(i, _)| &args[i + 1])
        .collect();
    assert_eq!(maps, vec!["[vout]", "[aout]"]);

    // No hint defaults to the nominal duration
    assert_eq!(plan.resolved_duration, 18.0);
}
