//! Media acquisition for one render.
//!
//! Background, music and narration are fetched concurrently, each under
//! its own bounded timeout. Every failure here is degradable by
//! contract: the result is simply absence, and the composition engine
//! substitutes the documented fallback (solid background, music-only or
//! silent mix, hint-based duration).

use tracing::{info, warn};

use vreel_media::compose::CompositionInputs;
use vreel_media::fetch::fetch_to_file;
use vreel_media::probe::MediaAsset;
use vreel_models::theme::ThemeConfig;
use vreel_queue::GenerateVideoJob;
use vreel_tts::SynthesisRequest;

use crate::processor::ProcessingContext;
use crate::workdir::WorkDir;

/// Acquire all media for a job. All three acquisitions run concurrently
/// and must settle before duration resolution.
pub async fn acquire_media(
    ctx: &ProcessingContext,
    job: &GenerateVideoJob,
    theme: &ThemeConfig,
    work_dir: &WorkDir,
) -> CompositionInputs {
    let (background, music, narration) = tokio::join!(
        acquire_background(ctx, job, theme, work_dir),
        acquire_music(ctx),
        acquire_narration(ctx, job, work_dir),
    );

    CompositionInputs {
        background,
        music,
        narration,
    }
}

/// Background clip: request URL first, then the local library, else none.
async fn acquire_background(
    ctx: &ProcessingContext,
    job: &GenerateVideoJob,
    theme: &ThemeConfig,
    work_dir: &WorkDir,
) -> Option<MediaAsset> {
    if let Some(url) = &job.custom_background {
        let dest = work_dir.join("background.mp4");
        let fetched = fetch_to_file(&ctx.http, url, &dest, ctx.config.fetch_timeout).await;
        match fetched {
            Ok(()) => match MediaAsset::video(&dest).await {
                Ok(asset) => {
                    info!("Using custom background ({:.1}s)", asset.duration);
                    return Some(asset);
                }
                Err(e) => warn!("Custom background unusable, falling back: {}", e),
            },
            Err(e) => warn!("Custom background fetch failed, falling back: {}", e),
        }
    }

    match ctx.library.pick_background(&theme.background_keywords).await {
        Ok(Some(path)) => match MediaAsset::video(&path).await {
            Ok(asset) => {
                info!("Using library background {} ({:.1}s)", path.display(), asset.duration);
                Some(asset)
            }
            Err(e) => {
                warn!("Library background {} unusable: {}", path.display(), e);
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            warn!("Background library scan failed: {}", e);
            None
        }
    }
}

/// Background music from the local library, else none.
async fn acquire_music(ctx: &ProcessingContext) -> Option<MediaAsset> {
    match ctx.library.pick_music().await {
        Ok(Some(path)) => match MediaAsset::audio(&path).await {
            Ok(asset) => {
                info!("Using music track {} ({:.1}s)", path.display(), asset.duration);
                Some(asset)
            }
            Err(e) => {
                warn!("Music track {} unusable: {}", path.display(), e);
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            warn!("Music library scan failed: {}", e);
            None
        }
    }
}

/// Narration via the provider chain. Total chain failure, a synthesis
/// timeout, or an unreadable result all degrade to absence; the duration
/// resolver then falls back to the hint.
async fn acquire_narration(
    ctx: &ProcessingContext,
    job: &GenerateVideoJob,
    work_dir: &WorkDir,
) -> Option<MediaAsset> {
    if !job.enable_narration {
        return None;
    }
    if ctx.tts.is_empty() {
        warn!("Narration requested but no providers configured");
        return None;
    }

    let mut request = SynthesisRequest::from_lines(&job.lines);
    if let Some(voice) = &job.voice {
        request = request.with_voice(voice.clone());
    }
    if let Some(rate) = job.speaking_rate {
        request = request.with_rate(rate);
    }

    let dest = work_dir.join("narration.mp3");
    let synthesis = tokio::time::timeout(ctx.config.fetch_timeout, ctx.tts.synthesize(&request, &dest));

    match synthesis.await {
        Ok(Ok(())) => match MediaAsset::audio(&dest).await {
            Ok(asset) => {
                info!("Narration synthesized ({:.1}s)", asset.duration);
                Some(asset)
            }
            Err(e) => {
                warn!("Narration audio unusable, continuing without: {}", e);
                None
            }
        },
        Ok(Err(e)) => {
            warn!("Narration synthesis failed, continuing without: {}", e);
            None
        }
        Err(_) => {
            warn!(
                "Narration synthesis timed out after {:?}, continuing without",
                ctx.config.fetch_timeout
            );
            None
        }
    }
}
