//! HTTP narration provider.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::error::{TtsError, TtsResult};
use crate::provider::{NarrationProvider, SynthesisRequest};

/// Configuration for an HTTP synthesis backend.
#[derive(Debug, Clone)]
pub struct HttpTtsConfig {
    /// Provider name for logs
    pub name: String,
    /// Base URL of the synthesis service
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Max retries per request
    pub max_retries: u32,
}

impl HttpTtsConfig {
    pub fn new(name: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into(),
            timeout: Duration::from_secs(60),
            max_retries: 2,
        }
    }
}

/// Synthesis backend speaking a plain HTTP contract: POST
/// `{base_url}/synthesize` with the request JSON, audio bytes back.
pub struct HttpTtsProvider {
    http: Client,
    config: HttpTtsConfig,
}

impl HttpTtsProvider {
    /// Create a new provider.
    pub fn new(config: HttpTtsConfig) -> TtsResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(TtsError::Network)?;

        Ok(Self { http, config })
    }

    /// Check if the provider is reachable.
    pub async fn health_check(&self) -> bool {
        let url = format!("{}/health", self.config.base_url);
        match self.http.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!("TTS provider {} health check error: {}", self.config.name, e);
                false
            }
        }
    }

    /// Execute with retry logic.
    async fn with_retry<F, Fut, T>(&self, operation: F) -> TtsResult<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = TtsResult<T>>,
    {
        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) if e.is_retryable() && attempt < self.config.max_retries => {
                    let delay = Duration::from_millis(500 * 2u64.pow(attempt));
                    warn!(
                        "TTS request to {} failed (attempt {}), retrying in {:?}: {}",
                        self.config.name,
                        attempt + 1,
                        delay,
                        e
                    );
                    tokio::time::sleep(delay).await;
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or(TtsError::RequestFailed("Unknown error".to_string())))
    }
}

#[async_trait]
impl NarrationProvider for HttpTtsProvider {
    fn name(&self) -> &str {
        &self.config.name
    }

    async fn synthesize(&self, request: &SynthesisRequest, dest: &Path) -> TtsResult<()> {
        let url = format!("{}/synthesize", self.config.base_url);
        debug!("Sending synthesis request to {}", url);

        let response = self
            .with_retry(|| async {
                self.http
                    .post(&url)
                    .json(request)
                    .send()
                    .await
                    .map_err(TtsError::Network)
            })
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TtsError::RequestFailed(format!(
                "{} returned {}: {}",
                self.config.name, status, body
            )));
        }

        let bytes = response.bytes().await.map_err(TtsError::Network)?;
        if bytes.is_empty() {
            return Err(TtsError::RequestFailed(format!(
                "{} returned empty audio",
                self.config.name
            )));
        }

        tokio::fs::write(dest, &bytes).await?;
        debug!("Wrote {} bytes of narration to {}", bytes.len(), dest.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = HttpTtsConfig::new("edge", "http://localhost:8002");
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.max_retries, 2);
    }

    #[tokio::test]
    async fn unreachable_provider_fails() {
        let mut config = HttpTtsConfig::new("dead", "http://127.0.0.1:1");
        config.max_retries = 0;
        config.timeout = Duration::from_secs(2);
        let provider = HttpTtsProvider::new(config).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("voice.mp3");
        let err = provider
            .synthesize(&SynthesisRequest::new("hello"), &dest)
            .await
            .unwrap_err();

        assert!(matches!(err, TtsError::Network(_)));
        assert!(!dest.exists());
    }
}
