//! Audio mixing.
//!
//! Produces one mixed audio stream of exactly the resolved duration from
//! an optional music track and an optional narration track. Music is
//! looped or trimmed to fit; narration is never looped and never
//! stretched: longer narration is trimmed, shorter narration is followed
//! by silence. Whenever speech is present the music is ducked so it stays
//! intelligible.

use crate::command::FfmpegInput;
use crate::probe::MediaAsset;

/// Filter label produced by every audio chain.
pub const AUDIO_LABEL: &str = "aout";

/// Music gain when it is the only audible layer.
pub const MUSIC_GAIN: f64 = 0.25;

/// Music gain while narration plays.
pub const MUSIC_GAIN_UNDER_NARRATION: f64 = 0.15;

/// Narration gain.
pub const NARRATION_GAIN: f64 = 0.5;

/// FFmpeg inputs plus the filter chain producing `[aout]`.
#[derive(Debug, Clone)]
pub struct AudioMixPlan {
    pub inputs: Vec<FfmpegInput>,
    pub filter: String,
}

/// Number of *extra* repeats for a music track to cover `target` seconds.
fn extra_loops(clip_secs: f64, target_secs: f64) -> u32 {
    if clip_secs <= 0.0 || clip_secs >= target_secs {
        return 0;
    }
    (target_secs / clip_secs).ceil() as u32 - 1
}

/// Build the mixed audio stream for one render.
///
/// The mixed stream's duration equals `target_secs` for every combination
/// of present/absent inputs:
/// - both: music is loop/trim-normalized to the target and mixed with the
///   gain-adjusted narration (`amix` keyed on the music's duration)
/// - music only: loop/trim-normalized and gain-adjusted
/// - narration only: trimmed if longer, padded with silence if shorter
/// - neither: a silence bed of the target duration
///
/// `first_input_index` is the position the first returned input will
/// occupy in the final command's input list.
pub fn mix_audio(
    music: Option<&MediaAsset>,
    narration: Option<&MediaAsset>,
    target_secs: f64,
    first_input_index: usize,
) -> AudioMixPlan {
    let mut inputs = Vec::new();
    let mut filter = String::new();

    match (music, narration) {
        (Some(music), Some(narration)) => {
            let mut music_input = FfmpegInput::file(&music.path);
            let loops = extra_loops(music.duration, target_secs);
            if loops > 0 {
                music_input = music_input.stream_loop(loops);
            }
            let music_idx = first_input_index;
            let narration_idx = first_input_index + 1;
            inputs.push(music_input);
            inputs.push(FfmpegInput::file(&narration.path));

            // Music fills the whole timeline; narration is laid on top
            // unmodified and amix follows the music's (exact) duration.
            filter.push_str(&format!(
                "[{music_idx}:a]atrim=duration={t:.3},asetpts=PTS-STARTPTS,\
                 volume={mg:.2}[mus];\
                 [{narration_idx}:a]atrim=duration={t:.3},asetpts=PTS-STARTPTS,\
                 volume={ng:.2}[voc];\
                 [mus][voc]amix=inputs=2:duration=first:normalize=0[{label}]",
                music_idx = music_idx,
                narration_idx = narration_idx,
                t = target_secs,
                mg = MUSIC_GAIN_UNDER_NARRATION,
                ng = NARRATION_GAIN,
                label = AUDIO_LABEL,
            ));
        }
        (Some(music), None) => {
            let mut music_input = FfmpegInput::file(&music.path);
            let loops = extra_loops(music.duration, target_secs);
            if loops > 0 {
                music_input = music_input.stream_loop(loops);
            }
            inputs.push(music_input);

            filter.push_str(&format!(
                "[{idx}:a]atrim=duration={t:.3},asetpts=PTS-STARTPTS,\
                 volume={mg:.2}[{label}]",
                idx = first_input_index,
                t = target_secs,
                mg = MUSIC_GAIN,
                label = AUDIO_LABEL,
            ));
        }
        (None, Some(narration)) => {
            inputs.push(FfmpegInput::file(&narration.path));

            // atrim only cuts narration that is longer than the target;
            // apad extends a shorter one with silence up to it.
            filter.push_str(&format!(
                "[{idx}:a]atrim=duration={t:.3},asetpts=PTS-STARTPTS,\
                 volume={ng:.2},apad=whole_dur={t:.3}[{label}]",
                idx = first_input_index,
                t = target_secs,
                ng = NARRATION_GAIN,
                label = AUDIO_LABEL,
            ));
        }
        (None, None) => {
            inputs.push(
                FfmpegInput::lavfi("anullsrc=channel_layout=stereo:sample_rate=44100")
                    .duration(target_secs),
            );

            filter.push_str(&format!(
                "[{idx}:a]atrim=duration={t:.3}[{label}]",
                idx = first_input_index,
                t = target_secs,
                label = AUDIO_LABEL,
            ));
        }
    }

    AudioMixPlan { inputs, filter }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn asset(name: &str, duration: f64) -> MediaAsset {
        MediaAsset {
            path: PathBuf::from(format!("/tmp/{name}")),
            duration,
        }
    }

    #[test]
    fn both_present_ducks_music() {
        let music = asset("music.mp3", 5.0);
        let narration = asset("voice.mp3", 12.3);
        let plan = mix_audio(Some(&music), Some(&narration), 14.3, 1);

        assert_eq!(plan.inputs.len(), 2);
        // 5s track needs 2 extra plays to cover 14.3s
        assert!(plan.inputs[0].args().contains(&"-stream_loop".to_string()));
        assert!(plan.inputs[0].args().contains(&"2".to_string()));
        // Narration input carries no looping args
        assert!(plan.inputs[1].args().is_empty());

        assert!(plan.filter.contains("volume=0.15"));
        assert!(plan.filter.contains("volume=0.50"));
        assert!(plan.filter.contains("amix=inputs=2:duration=first:normalize=0"));
        assert!(plan.filter.contains("[1:a]"));
        assert!(plan.filter.contains("[2:a]"));
        assert!(plan.filter.ends_with("[aout]"));
    }

    #[test]
    fn music_only_full_gain() {
        let music = asset("music.mp3", 30.0);
        let plan = mix_audio(Some(&music), None, 18.0, 1);

        assert_eq!(plan.inputs.len(), 1);
        assert!(!plan.inputs[0].args().contains(&"-stream_loop".to_string()));
        assert!(plan.filter.contains("volume=0.25"));
        assert!(plan.filter.contains("atrim=duration=18.000"));
        assert!(!plan.filter.contains("amix"));
    }

    #[test]
    fn narration_only_pads_to_target() {
        let narration = asset("voice.mp3", 12.3);
        let plan = mix_audio(None, Some(&narration), 14.3, 1);

        assert_eq!(plan.inputs.len(), 1);
        assert!(plan.inputs[0].args().is_empty(), "narration is never looped");
        assert!(plan.filter.contains("volume=0.50"));
        assert!(plan.filter.contains("apad=whole_dur=14.300"));
    }

    #[test]
    fn narration_longer_than_target_is_trimmed() {
        let narration = asset("voice.mp3", 30.0);
        let plan = mix_audio(None, Some(&narration), 18.0, 1);

        assert!(plan.filter.contains("atrim=duration=18.000"));
        assert!(!plan.inputs[0].args().contains(&"-stream_loop".to_string()));
    }

    #[test]
    fn neither_present_yields_silence() {
        let plan = mix_audio(None, None, 18.0, 1);

        assert_eq!(plan.inputs.len(), 1);
        assert!(plan.inputs[0].source().starts_with("anullsrc"));
        assert!(plan.inputs[0].args().contains(&"18.000".to_string()));
        assert!(plan.filter.contains("atrim=duration=18.000"));
        assert!(plan.filter.ends_with("[aout]"));
    }

    #[test]
    fn input_indices_are_sequential() {
        let music = asset("music.mp3", 10.0);
        let narration = asset("voice.mp3", 8.0);
        let plan = mix_audio(Some(&music), Some(&narration), 18.0, 4);

        assert!(plan.filter.contains("[4:a]"));
        assert!(plan.filter.contains("[5:a]"));
    }
}
