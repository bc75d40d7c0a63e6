//! Video generation handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tracing::info;
use validator::Validate;

use vreel_content::theme_config;
use vreel_models::request::normalize_poetry;
use vreel_models::{GenerateVideoRequest, JobId, JobStatus};
use vreel_queue::GenerateVideoJob;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Response for an accepted generation request.
#[derive(Serialize)]
pub struct SubmitResponse {
    pub job_id: JobId,
    pub video_id: vreel_models::VideoId,
    pub theme: String,
    pub poetry_lines: Vec<String>,
    pub status: &'static str,
}

/// Submit a generation request. Returns 202 with the job handle; the
/// render itself runs on the worker.
pub async fn submit_video(
    State(state): State<AppState>,
    Json(request): Json<GenerateVideoRequest>,
) -> ApiResult<(StatusCode, Json<SubmitResponse>)> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let theme = theme_config(request.theme);

    // Resolve the poem: custom text wins, curated otherwise. Length
    // bounds are enforced here, upstream of the composition engine.
    let mut lines = match &request.custom_poetry {
        Some(text) => {
            let lines = normalize_poetry(text);
            if lines.len() < state.line_bounds.min {
                return Err(ApiError::bad_request(format!(
                    "Poetry must have at least {} lines",
                    state.line_bounds.min
                )));
            }
            lines
        }
        None => state
            .poetry
            .select_for_topics(&theme.poetry_topics)?
            .lines_owned(),
    };
    lines.truncate(state.line_bounds.max);

    let job = GenerateVideoJob::new(lines.clone(), request.theme)
        .with_animation(request.animation)
        .with_duration_hint(request.duration)
        .with_custom_background(request.custom_background.clone());

    let job = if request.enable_narration {
        job.with_narration(request.voice.clone(), request.speaking_rate)
    } else {
        job
    };

    info!(
        "Submitting job {} (theme: {}, {} lines, narration: {})",
        job.job_id,
        request.theme,
        lines.len(),
        request.enable_narration
    );

    // Record the pending status before the job becomes visible to workers
    state
        .status
        .put(&JobStatus::pending(job.job_id.clone(), job.video_id.clone()))
        .await?;

    let response = SubmitResponse {
        job_id: job.job_id.clone(),
        video_id: job.video_id.clone(),
        theme: request.theme.to_string(),
        poetry_lines: lines,
        status: "pending",
    };

    state.queue.enqueue_generate(job).await?;

    Ok((StatusCode::ACCEPTED, Json(response)))
}

/// Poll the status of a generation job.
pub async fn get_video_status(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> ApiResult<Json<JobStatus>> {
    let job_id = JobId::from_string(job_id);
    match state.status.get(&job_id).await? {
        Some(status) => Ok(Json(status)),
        None => Err(ApiError::not_found(format!("Job {job_id} not found"))),
    }
}
