//! Local background/music library.
//!
//! Scans configured directories for usable media files. Absence at every
//! level (missing dir, empty dir, no keyword match) is an expected
//! outcome, not an error; the pipeline falls back per its contract.

use std::path::{Path, PathBuf};

use rand::seq::IndexedRandom;
use tracing::debug;

use crate::error::ContentResult;

const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "avi"];
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "m4a"];

/// Filesystem-backed media library.
#[derive(Debug, Clone)]
pub struct MediaLibrary {
    backgrounds_dir: PathBuf,
    music_dir: PathBuf,
}

impl MediaLibrary {
    pub fn new(backgrounds_dir: impl Into<PathBuf>, music_dir: impl Into<PathBuf>) -> Self {
        Self {
            backgrounds_dir: backgrounds_dir.into(),
            music_dir: music_dir.into(),
        }
    }

    /// Create from environment variables.
    pub fn from_env() -> Self {
        Self {
            backgrounds_dir: std::env::var("BACKGROUNDS_DIR")
                .unwrap_or_else(|_| "./assets/backgrounds".to_string())
                .into(),
            music_dir: std::env::var("MUSIC_DIR")
                .unwrap_or_else(|_| "./assets/music".to_string())
                .into(),
        }
    }

    /// Pick a background clip, preferring files whose name contains one of
    /// the theme's keywords.
    pub async fn pick_background(&self, keywords: &[String]) -> ContentResult<Option<PathBuf>> {
        let files = list_with_extensions(&self.backgrounds_dir, VIDEO_EXTENSIONS).await?;
        if files.is_empty() {
            debug!(
                "No background clips in {}",
                self.backgrounds_dir.display()
            );
            return Ok(None);
        }

        let matching: Vec<&PathBuf> = files
            .iter()
            .filter(|path| {
                let name = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().to_lowercase())
                    .unwrap_or_default();
                keywords.iter().any(|k| name.contains(&k.to_lowercase()))
            })
            .collect();

        let mut rng = rand::rng();
        let picked = if matching.is_empty() {
            files.choose(&mut rng).cloned()
        } else {
            matching.choose(&mut rng).map(|p| (*p).clone())
        };

        Ok(picked)
    }

    /// Pick a random music track.
    pub async fn pick_music(&self) -> ContentResult<Option<PathBuf>> {
        let files = list_with_extensions(&self.music_dir, AUDIO_EXTENSIONS).await?;
        if files.is_empty() {
            debug!("No music tracks in {}", self.music_dir.display());
            return Ok(None);
        }
        Ok(files.choose(&mut rand::rng()).cloned())
    }
}

/// List files in `dir` with one of the given extensions. A missing
/// directory yields an empty list.
async fn list_with_extensions(dir: &Path, extensions: &[&str]) -> ContentResult<Vec<PathBuf>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let matches = path
            .extension()
            .map(|e| {
                let ext = e.to_string_lossy().to_lowercase();
                extensions.contains(&ext.as_str())
            })
            .unwrap_or(false);
        if matches {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn touch(dir: &Path, name: &str) {
        tokio::fs::write(dir.join(name), b"").await.unwrap();
    }

    #[tokio::test]
    async fn missing_dirs_yield_absence() {
        let library = MediaLibrary::new("/no/such/dir", "/no/such/dir");
        assert!(library.pick_background(&[]).await.unwrap().is_none());
        assert!(library.pick_music().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn keyword_match_preferred() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "forest_walk.mp4").await;
        touch(dir.path(), "city_neon.mp4").await;
        touch(dir.path(), "notes.txt").await;

        let library = MediaLibrary::new(dir.path(), dir.path());
        for _ in 0..10 {
            let picked = library
                .pick_background(&["forest".to_string()])
                .await
                .unwrap()
                .unwrap();
            assert!(picked.to_string_lossy().contains("forest_walk"));
        }
    }

    #[tokio::test]
    async fn falls_back_to_any_clip() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "city_neon.mp4").await;

        let library = MediaLibrary::new(dir.path(), dir.path());
        let picked = library
            .pick_background(&["forest".to_string()])
            .await
            .unwrap();
        assert!(picked.is_some());
    }

    #[tokio::test]
    async fn music_filters_extensions() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "calm.mp3").await;
        touch(dir.path(), "readme.md").await;

        let library = MediaLibrary::new(dir.path(), dir.path());
        let picked = library.pick_music().await.unwrap().unwrap();
        assert!(picked.to_string_lossy().ends_with("calm.mp3"));
    }
}
