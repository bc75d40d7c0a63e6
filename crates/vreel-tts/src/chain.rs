//! Ordered provider chain.

use std::path::Path;

use tracing::{info, warn};

use crate::error::{TtsError, TtsResult};
use crate::http::{HttpTtsConfig, HttpTtsProvider};
use crate::provider::{NarrationProvider, SynthesisRequest};

/// Narration providers tried in configuration order.
///
/// The first success wins. When every provider fails the chain reports
/// [`TtsError::AllProvidersFailed`]; callers degrade that to "narration
/// absent" rather than failing the render.
pub struct ProviderChain {
    providers: Vec<Box<dyn NarrationProvider>>,
}

impl ProviderChain {
    /// Chain over an explicit provider list.
    pub fn new(providers: Vec<Box<dyn NarrationProvider>>) -> Self {
        Self { providers }
    }

    /// Build HTTP providers from `TTS_PROVIDER_URLS` (comma-separated).
    /// An unset or empty variable yields an empty chain, which always
    /// reports total failure.
    pub fn from_env() -> TtsResult<Self> {
        let urls = std::env::var("TTS_PROVIDER_URLS").unwrap_or_default();
        let mut providers: Vec<Box<dyn NarrationProvider>> = Vec::new();

        for (index, url) in urls
            .split(',')
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .enumerate()
        {
            let config = HttpTtsConfig::new(format!("tts-{index}"), url);
            providers.push(Box::new(HttpTtsProvider::new(config)?));
        }

        Ok(Self::new(providers))
    }

    /// Number of configured providers.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether the chain has no providers.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Try each provider in order until one writes `dest`.
    pub async fn synthesize(&self, request: &SynthesisRequest, dest: &Path) -> TtsResult<()> {
        for provider in &self.providers {
            match provider.synthesize(request, dest).await {
                Ok(()) => {
                    info!("Narration synthesized by {}", provider.name());
                    return Ok(());
                }
                Err(e) => {
                    warn!("Narration provider {} failed: {}", provider.name(), e);
                }
            }
        }

        Err(TtsError::AllProvidersFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct FailingProvider {
        name: String,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl NarrationProvider for FailingProvider {
        fn name(&self) -> &str {
            &self.name
        }

        async fn synthesize(&self, _request: &SynthesisRequest, _dest: &Path) -> TtsResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(TtsError::RequestFailed("down".to_string()))
        }
    }

    struct WritingProvider {
        name: String,
    }

    #[async_trait]
    impl NarrationProvider for WritingProvider {
        fn name(&self) -> &str {
            &self.name
        }

        async fn synthesize(&self, _request: &SynthesisRequest, dest: &Path) -> TtsResult<()> {
            tokio::fs::write(dest, b"audio").await?;
            Ok(())
        }
    }

    #[tokio::test]
    async fn falls_through_to_working_provider() {
        let calls = Arc::new(AtomicUsize::new(0));
        let chain = ProviderChain::new(vec![
            Box::new(FailingProvider {
                name: "a".into(),
                calls: Arc::clone(&calls),
            }),
            Box::new(WritingProvider { name: "b".into() }),
        ]);

        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("voice.mp3");
        chain
            .synthesize(&SynthesisRequest::new("hello"), &dest)
            .await
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(dest.exists());
    }

    #[tokio::test]
    async fn total_failure_is_one_error() {
        let calls = Arc::new(AtomicUsize::new(0));
        let chain = ProviderChain::new(vec![
            Box::new(FailingProvider {
                name: "a".into(),
                calls: Arc::clone(&calls),
            }),
            Box::new(FailingProvider {
                name: "b".into(),
                calls: Arc::clone(&calls),
            }),
        ]);

        let dir = tempfile::tempdir().unwrap();
        let err = chain
            .synthesize(&SynthesisRequest::new("hello"), &dir.path().join("v.mp3"))
            .await
            .unwrap_err();

        assert!(matches!(err, TtsError::AllProvidersFailed));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn empty_chain_fails_immediately() {
        let chain = ProviderChain::new(vec![]);
        let dir = tempfile::tempdir().unwrap();
        let err = chain
            .synthesize(&SynthesisRequest::new("hello"), &dir.path().join("v.mp3"))
            .await
            .unwrap_err();
        assert!(matches!(err, TtsError::AllProvidersFailed));
    }
}
