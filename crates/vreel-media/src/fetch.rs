//! Remote media fetch.

use std::path::Path;
use std::time::Duration;

use tracing::{debug, info};

use crate::error::{MediaError, MediaResult};

/// Download a remote media resource to `dest` under a bounded timeout.
///
/// The whole transfer shares one deadline; a stalled or slow source
/// becomes a [`MediaError::Timeout`], which callers treat as a degradable
/// acquisition failure.
pub async fn fetch_to_file(
    client: &reqwest::Client,
    url: &str,
    dest: impl AsRef<Path>,
    timeout: Duration,
) -> MediaResult<()> {
    let dest = dest.as_ref();
    debug!("Fetching {} -> {}", url, dest.display());

    let fetch = async {
        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| MediaError::fetch_failed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MediaError::fetch_failed(format!(
                "{url} returned {status}"
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| MediaError::fetch_failed(e.to_string()))?;

        tokio::fs::write(dest, &bytes).await?;
        Ok::<u64, MediaError>(bytes.len() as u64)
    };

    let size = tokio::time::timeout(timeout, fetch)
        .await
        .map_err(|_| MediaError::Timeout(timeout.as_secs()))??;

    info!("Fetched {} ({} bytes)", dest.display(), size);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unreachable_host_is_fetch_failure() {
        let client = reqwest::Client::new();
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("clip.mp4");

        let err = fetch_to_file(
            &client,
            "http://127.0.0.1:1/clip.mp4",
            &dest,
            Duration::from_secs(5),
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err,
            MediaError::FetchFailed { .. } | MediaError::Timeout(_)
        ));
        assert!(!dest.exists());
    }
}
