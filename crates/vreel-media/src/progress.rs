//! FFmpeg progress reporting.

/// Progress snapshot parsed from FFmpeg's `-progress pipe:2` output.
#[derive(Debug, Clone, Default)]
pub struct FfmpegProgress {
    /// Current frame number
    pub frame: u64,
    /// Encoding speed in frames per second
    pub fps: f64,
    /// Output timestamp in milliseconds
    pub out_time_ms: i64,
    /// Output timestamp as HH:MM:SS.micros
    pub out_time: String,
    /// Encoding speed relative to realtime (e.g. 1.5 = 1.5x)
    pub speed: f64,
    /// Whether FFmpeg reported `progress=end`
    pub is_complete: bool,
}

impl FfmpegProgress {
    /// Output position in seconds.
    pub fn seconds(&self) -> f64 {
        self.out_time_ms as f64 / 1000.0
    }

    /// Fraction of a target duration completed, clamped to `[0, 1]`.
    pub fn fraction_of(&self, total_secs: f64) -> f64 {
        if total_secs <= 0.0 {
            return 0.0;
        }
        (self.seconds() / total_secs).clamp(0.0, 1.0)
    }
}

/// Callback invoked with progress updates.
pub type ProgressCallback = Box<dyn Fn(FfmpegProgress) + Send>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fraction_clamps() {
        let progress = FfmpegProgress {
            out_time_ms: 9_000,
            ..Default::default()
        };
        assert!((progress.fraction_of(18.0) - 0.5).abs() < 1e-9);
        assert!((progress.fraction_of(4.0) - 1.0).abs() < 1e-9);
        assert_eq!(progress.fraction_of(0.0), 0.0);
    }
}
