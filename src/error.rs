// src/error.rs
// Domain error taxonomy for the chat pipeline.

use thiserror::Error;

/// Failures surfaced by `ChatService` operations.
///
/// Provider failures are deliberately absent: a failed generation call is
/// downgraded to message content inside the exchange, never raised here.
#[derive(Debug, Error)]
pub enum ChatError {
    /// Malformed or missing input, raised before any side effect.
    #[error("{0}")]
    Validation(String),

    /// A persistence read or write failed. The context string distinguishes
    /// the write that failed: a user-message write failure leaves no partial
    /// state, while an assistant-message write failure leaves an orphaned
    /// user message behind.
    #[error("{context}: {detail}")]
    Storage {
        context: &'static str,
        detail: String,
    },
}

impl ChatError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn storage(context: &'static str, source: anyhow::Error) -> Self {
        Self::Storage {
            context,
            detail: source.to_string(),
        }
    }
}
