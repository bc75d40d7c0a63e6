//! Caption animation scheduling.
//!
//! Every line's reveal is decided once at composition time from its index
//! and the animation mode: a start delay staggers the lines, a fade span
//! brings each one in, and the line then stays visible until the end of
//! the timeline. There is no playback-time state; `phase_at` evaluates
//! the same schedule for tests and tooling.

use vreel_models::theme::AnimationMode;

/// Reveal timing for one caption line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSchedule {
    /// Seconds from timeline start until the line begins appearing
    pub start_delay: f64,
    /// Fade-in span in seconds (zero means instantaneous)
    pub fade_in: f64,
    /// Seconds the line exists on screen (ends exactly at the timeline end)
    pub visible: f64,
}

/// Phase of a line at a given timeline position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinePhase {
    /// Not yet started
    Pending,
    /// Fading in
    Appearing,
    /// Fully revealed
    Visible,
}

impl LineSchedule {
    /// Timeline position at which the line ends.
    pub fn end(&self) -> f64 {
        self.start_delay + self.visible
    }

    /// Evaluate the line's phase at timeline position `t`.
    pub fn phase_at(&self, t: f64) -> LinePhase {
        if t < self.start_delay {
            LinePhase::Pending
        } else if t < self.start_delay + self.fade_in {
            LinePhase::Appearing
        } else {
            LinePhase::Visible
        }
    }
}

/// Per-line stagger in seconds for a mode.
pub fn stagger(mode: AnimationMode) -> f64 {
    match mode {
        AnimationMode::FadeIn => 0.5,
        AnimationMode::Typewriter => 0.8,
        AnimationMode::SlideUp => 0.3,
        AnimationMode::WordByWord => 0.6,
        AnimationMode::GentleZoom => 0.4,
    }
}

/// Fade-in span in seconds for a mode.
pub fn fade(mode: AnimationMode) -> f64 {
    match mode {
        AnimationMode::FadeIn => 1.0,
        AnimationMode::Typewriter => 0.1,
        AnimationMode::SlideUp => 0.0,
        AnimationMode::WordByWord => 0.5,
        AnimationMode::GentleZoom => 0.8,
    }
}

/// Schedule line `index` of a composition lasting `total_duration`.
///
/// Later lines start later and are therefore visible for less time; every
/// line ends exactly with the timeline, never past it.
pub fn schedule_line(mode: AnimationMode, index: usize, total_duration: f64) -> LineSchedule {
    let start_delay = index as f64 * stagger(mode);
    LineSchedule {
        start_delay,
        fade_in: fade(mode),
        visible: (total_duration - start_delay).max(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_MODES: &[AnimationMode] = &[
        AnimationMode::FadeIn,
        AnimationMode::Typewriter,
        AnimationMode::SlideUp,
        AnimationMode::WordByWord,
        AnimationMode::GentleZoom,
    ];

    #[test]
    fn delays_strictly_increase() {
        for &mode in ALL_MODES {
            let mut prev = -1.0;
            for i in 0..8 {
                let schedule = schedule_line(mode, i, 18.0);
                assert!(
                    schedule.start_delay > prev,
                    "{mode}: delay not increasing at line {i}"
                );
                prev = schedule.start_delay;
            }
        }
    }

    #[test]
    fn lines_end_at_timeline_end() {
        for &mode in ALL_MODES {
            for i in 0..8 {
                let schedule = schedule_line(mode, i, 18.0);
                assert!(
                    (schedule.end() - 18.0).abs() < 1e-9,
                    "{mode}: line {i} ends at {}",
                    schedule.end()
                );
            }
        }
    }

    #[test]
    fn last_line_still_visible() {
        // 8 lines with the widest stagger (typewriter, 0.8s) still leave
        // the last line positive screen time for any D > 5.6s.
        let schedule = schedule_line(AnimationMode::Typewriter, 7, 18.0);
        assert!(schedule.visible > 0.0);
    }

    #[test]
    fn known_mode_table() {
        fn close(a: f64, b: f64) -> bool {
            (a - b).abs() < 1e-9
        }
        assert!(close(schedule_line(AnimationMode::FadeIn, 2, 18.0).start_delay, 1.0));
        assert!(close(schedule_line(AnimationMode::FadeIn, 0, 18.0).fade_in, 1.0));
        assert!(close(schedule_line(AnimationMode::Typewriter, 1, 18.0).start_delay, 0.8));
        assert!(close(schedule_line(AnimationMode::SlideUp, 3, 18.0).start_delay, 0.9));
        assert!(close(schedule_line(AnimationMode::SlideUp, 0, 18.0).fade_in, 0.0));
        assert!(close(schedule_line(AnimationMode::WordByWord, 2, 18.0).start_delay, 1.2));
        assert!(close(schedule_line(AnimationMode::GentleZoom, 5, 18.0).start_delay, 2.0));
    }

    #[test]
    fn phase_progression() {
        let schedule = schedule_line(AnimationMode::FadeIn, 2, 18.0);
        // delay 1.0, fade 1.0
        assert_eq!(schedule.phase_at(0.0), LinePhase::Pending);
        assert_eq!(schedule.phase_at(0.99), LinePhase::Pending);
        assert_eq!(schedule.phase_at(1.5), LinePhase::Appearing);
        assert_eq!(schedule.phase_at(2.0), LinePhase::Visible);
        assert_eq!(schedule.phase_at(17.9), LinePhase::Visible);
    }

    #[test]
    fn instant_modes_skip_appearing() {
        let schedule = schedule_line(AnimationMode::SlideUp, 1, 18.0);
        assert_eq!(schedule.phase_at(0.3), LinePhase::Visible);
        assert_eq!(schedule.phase_at(0.29), LinePhase::Pending);
    }

    #[test]
    fn delay_past_duration_clamps_visibility() {
        let schedule = schedule_line(AnimationMode::Typewriter, 10, 5.0);
        assert_eq!(schedule.visible, 0.0);
    }
}
