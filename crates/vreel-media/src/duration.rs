//! Output duration resolution.
//!
//! The resolved duration is the single authoritative length for one
//! render; every downstream stage (background adaptation, audio mixing,
//! caption scheduling, output clamping) is sized against it and it is
//! never renegotiated mid-composition.

/// Nominal output duration when the request carries no hint.
pub const DEFAULT_DURATION_SECS: f64 = 18.0;

/// Trailing buffer added after narration ends.
pub const NARRATION_BUFFER_SECS: f64 = 2.0;

/// Resolve the output duration for one render.
///
/// When a narration track is present its duration plus
/// [`NARRATION_BUFFER_SECS`] *overrides* the hint entirely, so a short
/// requested duration with a long narration yields a longer video than
/// requested. This is intentional and uncapped; callers that need a
/// platform length limit must enforce it themselves.
///
/// A narration that failed to load is passed as `None` by the acquisition
/// layer and the hint applies unchanged.
pub fn resolve_duration(duration_hint: Option<u32>, narration_duration: Option<f64>) -> f64 {
    match narration_duration {
        Some(narration) => narration + NARRATION_BUFFER_SECS,
        None => duration_hint
            .map(f64::from)
            .unwrap_or(DEFAULT_DURATION_SECS),
    }
}
