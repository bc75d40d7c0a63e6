//! Narration synthesis behind a provider-chain interface.
//!
//! Providers share one narrow contract: text in, an audio file out, or a
//! failure. The chain tries them in order; total failure is surfaced as a
//! single error the render pipeline treats as "narration absent".

pub mod chain;
pub mod error;
pub mod http;
pub mod provider;

pub use chain::ProviderChain;
pub use error::{TtsError, TtsResult};
pub use http::{HttpTtsConfig, HttpTtsProvider};
pub use provider::{NarrationProvider, SynthesisRequest};
