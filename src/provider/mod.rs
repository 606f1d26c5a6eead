//! Provider abstraction for text generation
//!
//! Normalizes any generation backend to a single "prompt → text" contract.
//! The exchange pipeline never knows which implementation is active: the
//! real Gemini provider when a credential is configured, deterministic echo
//! mode otherwise.

mod echo;
mod gemini;

pub use echo::EchoProvider;
pub use gemini::GeminiProvider;

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::Config;

/// Failures from a generation backend. These are absorbed by the exchange
/// pipeline and converted to message content, never surfaced to callers.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Gemini API error: {status} - {body}")]
    Api { status: u16, body: String },

    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

/// Unified provider trait for generation backends
#[async_trait]
pub trait Provider: Send + Sync {
    /// Produce reply text for a prompt routed by model tag.
    async fn generate(&self, prompt: &str, model_tag: &str) -> Result<String, ProviderError>;

    /// Get the provider name for logging
    fn name(&self) -> &'static str;
}

/// Select the generation provider from configuration.
pub fn from_config(config: &Config) -> Arc<dyn Provider> {
    match &config.gemini_api_key {
        Some(key) => {
            let provider = GeminiProvider::new(key.clone());
            info!("Generation provider: {}", provider.name());
            Arc::new(provider)
        }
        None => {
            warn!("GEMINI_API_KEY not set - replies will echo the prompt");
            info!("Generation provider: {}", EchoProvider.name());
            Arc::new(EchoProvider)
        }
    }
}
