// src/chat/service.rs
// The message exchange pipeline: validate, persist the prompt, generate a
// reply, persist the reply.

use std::sync::Arc;
use tracing::{info, warn};

use super::store::ChatStore;
use super::{Message, Model, Role};
use crate::error::ChatError;
use crate::provider::Provider;

/// One user prompt plus its resulting assistant reply.
#[derive(Debug, Clone)]
pub struct Exchange {
    pub user_message: Message,
    pub ai_message: Message,
}

pub struct ChatService {
    store: Arc<dyn ChatStore>,
    provider: Arc<dyn Provider>,
}

impl ChatService {
    pub fn new(store: Arc<dyn ChatStore>, provider: Arc<dyn Provider>) -> Self {
        Self { store, provider }
    }

    pub async fn list_models(&self) -> Result<Vec<Model>, ChatError> {
        self.store
            .list_models()
            .await
            .map_err(|e| ChatError::storage("failed to fetch models", e))
    }

    /// Run one exchange: persist the user message, obtain a reply, persist
    /// the assistant message, return both records.
    ///
    /// The two writes are sequential and not wrapped in a transaction. A
    /// failed assistant write therefore leaves the user message behind;
    /// history remains the source of truth and callers must tolerate a user
    /// message with no reply.
    pub async fn send_message(
        &self,
        user_id: &str,
        model_tag: &str,
        prompt: &str,
    ) -> Result<Exchange, ChatError> {
        validate_send(user_id, model_tag, prompt)?;

        let user_message = self
            .store
            .insert_message(user_id, model_tag, Role::User, prompt)
            .await
            .map_err(|e| ChatError::storage("user message write failed", e))?;

        // Generation failures never abort the exchange; the error detail
        // becomes the reply content and the turn stays visible in history.
        let reply = match self.provider.generate(prompt, model_tag).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Generation failed, storing error reply: {}", e);
                format!("Error: {}. Please check your API key and try again.", e)
            }
        };

        let ai_message = self
            .store
            .insert_message(user_id, model_tag, Role::Assistant, &reply)
            .await
            .map_err(|e| ChatError::storage("assistant message write failed", e))?;

        info!(
            "Exchange complete for user {} on model tag {}",
            user_id, model_tag
        );

        Ok(Exchange {
            user_message,
            ai_message,
        })
    }

    pub async fn history(
        &self,
        user_id: &str,
        model_tag: Option<&str>,
    ) -> Result<Vec<Message>, ChatError> {
        if user_id.trim().is_empty() {
            return Err(ChatError::validation("userId must not be empty"));
        }

        self.store
            .list_messages(user_id, model_tag)
            .await
            .map_err(|e| ChatError::storage("failed to fetch chat history", e))
    }
}

// Fail-fast and side-effect-free: malformed input never reaches the store.
fn validate_send(user_id: &str, model_tag: &str, prompt: &str) -> Result<(), ChatError> {
    if user_id.trim().is_empty() {
        return Err(ChatError::validation("userId must not be empty"));
    }
    if model_tag.trim().is_empty() {
        return Err(ChatError::validation("modelTag must not be empty"));
    }
    if prompt.trim().is_empty() {
        return Err(ChatError::validation("prompt must not be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_send_rejects_empty_fields() {
        assert!(validate_send("u1", "gemini-pro-latest", "hi").is_ok());
        assert!(validate_send("", "gemini-pro-latest", "hi").is_err());
        assert!(validate_send("u1", "", "hi").is_err());
        assert!(validate_send("u1", "gemini-pro-latest", "").is_err());
        assert!(validate_send("u1", "gemini-pro-latest", "   ").is_err());
    }
}
