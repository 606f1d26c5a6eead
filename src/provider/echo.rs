//! Deterministic echo provider used when no Gemini credential is configured.
//!
//! Side-effect-free and fully deterministic, which makes it the reference
//! backend for tests of the surrounding pipeline.

use async_trait::async_trait;

use super::{Provider, ProviderError};

pub struct EchoProvider;

#[async_trait]
impl Provider for EchoProvider {
    async fn generate(&self, prompt: &str, _model_tag: &str) -> Result<String, ProviderError> {
        Ok(format!("You said: \"{}\"", prompt))
    }

    fn name(&self) -> &'static str {
        "echo"
    }
}
