//! Plan execution.
//!
//! Serializes a [`CompositionPlan`](crate::compose::CompositionPlan) to a
//! single encoded file and verifies the written result. Inputs are read-
//! only throughout; the only side effect is the one output file.

use std::path::PathBuf;

use tokio::sync::watch;
use tracing::{debug, info};

use crate::command::FfmpegRunner;
use crate::compose::CompositionPlan;
use crate::error::{MediaError, MediaResult};
use crate::probe::probe_video;

/// Execution options for one render.
#[derive(Default)]
pub struct RenderOptions {
    /// Kill the encode after this many seconds
    pub timeout_secs: Option<u64>,
    /// Cooperative cancellation signal
    pub cancel: Option<watch::Receiver<bool>>,
}

/// A finished render: the output file and its realized duration.
#[derive(Debug, Clone)]
pub struct RenderedVideo {
    pub path: PathBuf,
    pub duration: f64,
}

/// Execute a composition plan.
///
/// Encoder failures are fatal; the caller owns retry policy. On success
/// the output is probed so the returned duration reflects the encoded
/// file, not the plan.
pub async fn render_plan(plan: &CompositionPlan, opts: RenderOptions) -> MediaResult<RenderedVideo> {
    let output = plan.command.output().to_path_buf();

    if let Some(parent) = output.parent() {
        if !parent.exists() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    info!(
        output = %output.display(),
        duration = plan.resolved_duration,
        lines = plan.line_count,
        "Rendering composition"
    );

    let mut runner = FfmpegRunner::new();
    if let Some(secs) = opts.timeout_secs {
        runner = runner.with_timeout(secs);
    }
    if let Some(cancel) = opts.cancel {
        runner = runner.with_cancel(cancel);
    }

    let target = plan.resolved_duration;
    runner
        .run_with_progress(&plan.command, move |progress| {
            debug!(
                "Encode progress: {:.1}s / {:.1}s ({:.2}x)",
                progress.seconds(),
                target,
                progress.speed
            );
        })
        .await?;

    if !output.exists() {
        return Err(MediaError::internal(format!(
            "FFmpeg reported success but {} does not exist",
            output.display()
        )));
    }

    let info = probe_video(&output).await?;

    info!(
        output = %output.display(),
        realized = info.duration,
        "Render complete"
    );

    Ok(RenderedVideo {
        path: output,
        duration: info.duration,
    })
}
