//! Job processing logic.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::{watch, Semaphore};
use tracing::{info, warn};

use vreel_content::{theme_config, MediaLibrary};
use vreel_media::compose::compose;
use vreel_media::fs_utils::move_file;
use vreel_media::render::{render_plan, RenderOptions};
use vreel_models::encoding::EncodingConfig;
use vreel_models::render::{OutputProfile, RenderSpec};
use vreel_models::JobStatus;
use vreel_queue::{GenerateVideoJob, ProgressChannel, StatusStore};
use vreel_storage::{S3Client, S3Config};
use vreel_tts::ProviderChain;

use crate::config::WorkerConfig;
use crate::error::{WorkerError, WorkerResult};
use crate::workdir::WorkDir;

/// Where finished videos go.
pub enum Delivery {
    /// Upload to object storage
    Storage(S3Client),
    /// Move into a local directory, addressed as file:// (no storage
    /// configured; useful for development)
    LocalDir(PathBuf),
}

/// Context shared by all jobs on one worker.
pub struct ProcessingContext {
    pub config: WorkerConfig,
    pub delivery: Delivery,
    pub progress: ProgressChannel,
    pub status: StatusStore,
    pub library: MediaLibrary,
    pub tts: ProviderChain,
    pub http: reqwest::Client,
    pub ffmpeg_semaphore: Arc<Semaphore>,
    /// Worker-wide cancellation; flips on shutdown
    pub cancel: watch::Receiver<bool>,
}

impl ProcessingContext {
    pub async fn new(config: WorkerConfig, cancel: watch::Receiver<bool>) -> WorkerResult<Self> {
        let delivery = if S3Config::is_configured() {
            Delivery::Storage(S3Client::from_env().await?)
        } else {
            warn!(
                "No object storage configured; delivering to {}",
                config.delivery_dir
            );
            Delivery::LocalDir(PathBuf::from(&config.delivery_dir))
        };

        let redis_url =
            std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string());
        let progress = ProgressChannel::new(&redis_url)?;
        let status = StatusStore::new(&redis_url)?;

        let tts = ProviderChain::from_env()
            .map_err(|e| WorkerError::job_failed(format!("TTS chain setup failed: {e}")))?;

        let http = reqwest::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(10))
            .build()
            .map_err(|e| WorkerError::job_failed(format!("HTTP client setup failed: {e}")))?;

        let ffmpeg_semaphore = Arc::new(Semaphore::new(config.max_ffmpeg_processes));

        Ok(Self {
            config,
            delivery,
            progress,
            status,
            library: MediaLibrary::from_env(),
            tts,
            http,
            ffmpeg_semaphore,
            cancel,
        })
    }
}

/// Process one generation job end to end.
///
/// Degradable failures have already been absorbed by acquisition; any
/// error that escapes this function is fatal for the attempt and names
/// the failing stage.
pub async fn process_generate(ctx: &ProcessingContext, job: &GenerateVideoJob) -> WorkerResult<()> {
    info!("Processing job {} (video {})", job.job_id, job.video_id);

    ctx.status
        .put(&JobStatus::pending(job.job_id.clone(), job.video_id.clone()).processing())
        .await?;
    ctx.progress.log(&job.job_id, "Starting render...").await.ok();
    ctx.progress.progress(&job.job_id, 5).await.ok();

    let theme = theme_config(job.theme);
    theme.validate()?;
    let animation = job.animation.unwrap_or(theme.default_animation);

    let work_dir = WorkDir::create(PathBuf::from(&ctx.config.work_dir).join(job.video_id.as_str()))
        .await?;

    // Acquire all media concurrently; absences degrade to fallbacks.
    ctx.progress.log(&job.job_id, "Acquiring media...").await.ok();
    let inputs = crate::acquire::acquire_media(ctx, job, &theme, &work_dir).await;
    ctx.progress.progress(&job.job_id, 40).await.ok();

    let spec = RenderSpec {
        lines: job.lines.clone(),
        theme,
        animation,
        duration_hint: job.duration_hint,
        output: OutputProfile::from_env(),
        encoding: EncodingConfig::default(),
    };

    let output_path = work_dir.join("output.mp4");
    let plan = compose(&spec, &inputs, &output_path)?;

    ctx.progress
        .log(
            &job.job_id,
            format!("Rendering {:.1}s timeline...", plan.resolved_duration),
        )
        .await
        .ok();

    // Bound concurrent encodes across the whole worker
    let _permit = ctx
        .ffmpeg_semaphore
        .acquire()
        .await
        .map_err(|_| WorkerError::job_failed("FFmpeg semaphore closed"))?;

    let rendered = render_plan(
        &plan,
        RenderOptions {
            timeout_secs: Some(ctx.config.render_timeout.as_secs()),
            cancel: Some(ctx.cancel.clone()),
        },
    )
    .await?;

    ctx.progress.progress(&job.job_id, 80).await.ok();
    ctx.progress.log(&job.job_id, "Publishing video...").await.ok();

    let video_url = deliver(ctx, &rendered.path, job.video_id.as_str()).await?;

    ctx.status
        .put(
            &JobStatus::pending(job.job_id.clone(), job.video_id.clone())
                .completed(&video_url, rendered.duration),
        )
        .await?;
    ctx.progress
        .done(&job.job_id, &video_url, rendered.duration)
        .await
        .ok();

    work_dir.cleanup().await;

    info!(
        "Completed job {} -> {} ({:.1}s)",
        job.job_id, video_url, rendered.duration
    );
    Ok(())
}

/// Publish the finished file and return its URL.
async fn deliver(
    ctx: &ProcessingContext,
    path: &std::path::Path,
    video_id: &str,
) -> WorkerResult<String> {
    match &ctx.delivery {
        Delivery::Storage(s3) => Ok(s3.upload_video(path, video_id).await?),
        Delivery::LocalDir(dir) => {
            let dest = dir.join(format!("{video_id}.mp4"));
            move_file(path, &dest).await?;
            Ok(format!("file://{}", dest.display()))
        }
    }
}

impl ProcessingContext {
    /// Record a failed attempt for a job.
    pub async fn record_failure(&self, job: &GenerateVideoJob, error: &str) {
        let status =
            JobStatus::pending(job.job_id.clone(), job.video_id.clone()).failed(error);
        if let Err(e) = self.status.put(&status).await {
            warn!("Failed to record failure for job {}: {}", job.job_id, e);
        }
    }
}
