//! FFprobe media information.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

use crate::error::{MediaError, MediaResult};

/// Media file information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaInfo {
    /// Duration in seconds
    pub duration: f64,
    /// Width in pixels (0 for audio-only files)
    pub width: u32,
    /// Height in pixels (0 for audio-only files)
    pub height: u32,
    /// Frame rate (fps, 0.0 for audio-only files)
    pub fps: f64,
    /// Whether the file has a video stream
    pub has_video: bool,
    /// Whether the file has an audio stream
    pub has_audio: bool,
    /// File size in bytes
    pub size: u64,
}

/// A probed media file: a path with its known duration.
///
/// This is the unit the composition pipeline works with; the file on disk
/// is never mutated, adaptations (trim/loop/gain) are expressed in the
/// filter graph.
#[derive(Debug, Clone)]
pub struct MediaAsset {
    pub path: PathBuf,
    pub duration: f64,
}

impl MediaAsset {
    /// Probe a video file into an asset. Fails without a video stream.
    pub async fn video(path: impl AsRef<Path>) -> MediaResult<Self> {
        let path = path.as_ref();
        let info = probe_video(path).await?;
        Ok(Self {
            path: path.to_path_buf(),
            duration: info.duration,
        })
    }

    /// Probe an audio file into an asset. Fails without an audio stream.
    pub async fn audio(path: impl AsRef<Path>) -> MediaResult<Self> {
        let path = path.as_ref();
        let info = probe_audio(path).await?;
        Ok(Self {
            path: path.to_path_buf(),
            duration: info.duration,
        })
    }
}

/// FFprobe JSON output format.
#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    format: FfprobeFormat,
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    duration: Option<String>,
    size: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    codec_type: String,
    width: Option<u32>,
    height: Option<u32>,
    r_frame_rate: Option<String>,
    avg_frame_rate: Option<String>,
}

/// Probe a media file for information.
pub async fn probe_media(path: impl AsRef<Path>) -> MediaResult<MediaInfo> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(MediaError::FileNotFound(path.to_path_buf()));
    }

    // Check FFprobe exists
    which::which("ffprobe").map_err(|_| MediaError::FfprobeNotFound)?;

    let output = Command::new("ffprobe")
        .args([
            "-v",
            "quiet",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
        ])
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await?;

    if !output.status.success() {
        return Err(MediaError::FfprobeFailed {
            message: "FFprobe failed".to_string(),
            stderr: Some(String::from_utf8_lossy(&output.stderr).to_string()),
        });
    }

    let probe: FfprobeOutput = serde_json::from_slice(&output.stdout)?;

    let video_stream = probe.streams.iter().find(|s| s.codec_type == "video");
    let has_audio = probe.streams.iter().any(|s| s.codec_type == "audio");

    // Parse duration
    let duration = probe
        .format
        .duration
        .as_ref()
        .and_then(|d| d.parse::<f64>().ok())
        .unwrap_or(0.0);

    // Parse size
    let size = probe
        .format
        .size
        .as_ref()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0);

    // Parse frame rate
    let fps = video_stream
        .and_then(|s| {
            s.avg_frame_rate
                .as_ref()
                .or(s.r_frame_rate.as_ref())
                .and_then(|r| parse_frame_rate(r))
        })
        .unwrap_or(0.0);

    Ok(MediaInfo {
        duration,
        width: video_stream.and_then(|s| s.width).unwrap_or(0),
        height: video_stream.and_then(|s| s.height).unwrap_or(0),
        fps,
        has_video: video_stream.is_some(),
        has_audio,
        size,
    })
}

/// Probe a file that must contain a video stream.
pub async fn probe_video(path: impl AsRef<Path>) -> MediaResult<MediaInfo> {
    let info = probe_media(&path).await?;
    if !info.has_video {
        return Err(MediaError::InvalidMedia(format!(
            "No video stream found in {}",
            path.as_ref().display()
        )));
    }
    Ok(info)
}

/// Probe a file that must contain an audio stream.
pub async fn probe_audio(path: impl AsRef<Path>) -> MediaResult<MediaInfo> {
    let info = probe_media(&path).await?;
    if !info.has_audio {
        return Err(MediaError::InvalidMedia(format!(
            "No audio stream found in {}",
            path.as_ref().display()
        )));
    }
    Ok(info)
}

/// Get media duration in seconds.
pub async fn get_duration(path: impl AsRef<Path>) -> MediaResult<f64> {
    let info = probe_media(path).await?;
    Ok(info.duration)
}

/// Parse frame rate string (e.g., "30/1" or "29.97").
fn parse_frame_rate(s: &str) -> Option<f64> {
    if let Some((num, den)) = s.split_once('/') {
        let num: f64 = num.parse().ok()?;
        let den: f64 = den.parse().ok()?;
        if den > 0.0 {
            return Some(num / den);
        }
    }
    s.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frame_rate() {
        assert!((parse_frame_rate("30/1").unwrap() - 30.0).abs() < 0.01);
        assert!((parse_frame_rate("30000/1001").unwrap() - 29.97).abs() < 0.01);
        assert!((parse_frame_rate("29.97").unwrap() - 29.97).abs() < 0.01);
        assert!(parse_frame_rate("bogus").is_none());
    }

    #[tokio::test]
    async fn test_probe_missing_file() {
        let err = probe_media("/definitely/not/here.mp4").await.unwrap_err();
        assert!(matches!(err, MediaError::FileNotFound(_)));
    }
}
