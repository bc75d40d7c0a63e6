//! Worker configuration.

use std::time::Duration;

/// Worker configuration.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Maximum concurrent render jobs
    pub max_concurrent_jobs: usize,
    /// Maximum concurrent FFmpeg processes across all jobs
    pub max_ffmpeg_processes: usize,
    /// Timeout for a single external fetch (background, narration)
    pub fetch_timeout: Duration,
    /// Timeout for the encode step
    pub render_timeout: Duration,
    /// Graceful shutdown timeout
    pub shutdown_timeout: Duration,
    /// Work directory for temporary files
    pub work_dir: String,
    /// Delivery directory used when no object storage is configured
    pub delivery_dir: String,
    /// How often the worker should scan for orphaned pending jobs
    pub claim_interval: Duration,
    /// Minimum idle time before a pending job can be claimed (crash recovery)
    pub claim_min_idle: Duration,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_jobs: 2,
            max_ffmpeg_processes: 4,
            fetch_timeout: Duration::from_secs(60),
            render_timeout: Duration::from_secs(600),
            shutdown_timeout: Duration::from_secs(30),
            work_dir: "/tmp/vreel".to_string(),
            delivery_dir: "./delivery".to_string(),
            claim_interval: Duration::from_secs(30),
            claim_min_idle: Duration::from_secs(300),
        }
    }
}

impl WorkerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let secs = |var: &str, default: u64| {
            Duration::from_secs(
                std::env::var(var)
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(default),
            )
        };

        Self {
            max_concurrent_jobs: std::env::var("WORKER_MAX_JOBS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(2),
            max_ffmpeg_processes: std::env::var("WORKER_MAX_FFMPEG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(4),
            fetch_timeout: secs("WORKER_FETCH_TIMEOUT", 60),
            render_timeout: secs("WORKER_RENDER_TIMEOUT", 600),
            shutdown_timeout: secs("WORKER_SHUTDOWN_TIMEOUT", 30),
            work_dir: std::env::var("WORKER_WORK_DIR").unwrap_or_else(|_| "/tmp/vreel".to_string()),
            delivery_dir: std::env::var("WORKER_DELIVERY_DIR")
                .unwrap_or_else(|_| "./delivery".to_string()),
            claim_interval: secs("WORKER_CLAIM_INTERVAL_SECS", 30),
            claim_min_idle: secs("WORKER_CLAIM_MIN_IDLE_SECS", 300),
        }
    }
}
