//! Per-job working directory with guaranteed cleanup.

use std::path::{Path, PathBuf};

use tracing::warn;

/// An isolated directory for one render's temporary files.
///
/// Explicit [`cleanup`](WorkDir::cleanup) is the normal exit; the `Drop`
/// impl backs it up so abandonment on any error or cancellation path
/// still removes the directory. Partially written outputs therefore never
/// remain anywhere a consumer looks.
#[derive(Debug)]
pub struct WorkDir {
    path: PathBuf,
    cleaned: bool,
}

impl WorkDir {
    /// Create the directory (and parents).
    pub async fn create(path: impl Into<PathBuf>) -> std::io::Result<Self> {
        let path = path.into();
        tokio::fs::create_dir_all(&path).await?;
        Ok(Self {
            path,
            cleaned: false,
        })
    }

    /// The directory path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A file path inside the directory.
    pub fn join(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }

    /// Remove the directory and all contents.
    pub async fn cleanup(mut self) {
        self.cleaned = true;
        if let Err(e) = tokio::fs::remove_dir_all(&self.path).await {
            warn!("Failed to clean work dir {}: {}", self.path.display(), e);
        }
    }
}

impl Drop for WorkDir {
    fn drop(&mut self) {
        if !self.cleaned && self.path.exists() {
            if let Err(e) = std::fs::remove_dir_all(&self.path) {
                warn!("Failed to clean work dir {} on drop: {}", self.path.display(), e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn explicit_cleanup_removes_dir() {
        let base = tempfile::tempdir().unwrap();
        let dir = WorkDir::create(base.path().join("job-1")).await.unwrap();
        tokio::fs::write(dir.join("output.mp4"), b"partial").await.unwrap();
        let path = dir.path().to_path_buf();

        dir.cleanup().await;
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn drop_removes_dir_on_abandonment() {
        let base = tempfile::tempdir().unwrap();
        let path;
        {
            let dir = WorkDir::create(base.path().join("job-2")).await.unwrap();
            tokio::fs::write(dir.join("output.mp4"), b"partial").await.unwrap();
            path = dir.path().to_path_buf();
            // dropped without cleanup, as on an error path
        }
        assert!(!path.exists());
    }
}
