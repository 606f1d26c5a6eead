// src/api/error.rs
// Centralized error handling for HTTP API responses

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;
use tracing::error;

use crate::error::ChatError;

/// Standard API error response format
#[derive(Debug)]
pub struct ApiError {
    pub message: String,
    pub status_code: StatusCode,
    pub error_code: Option<String>,
}

impl ApiError {
    /// Create a new internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: StatusCode::INTERNAL_SERVER_ERROR,
            error_code: Some("INTERNAL_ERROR".to_string()),
        }
    }

    /// Create a new bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: StatusCode::BAD_REQUEST,
            error_code: Some("BAD_REQUEST".to_string()),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<ChatError> for ApiError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::Validation(message) => ApiError::bad_request(message),
            storage @ ChatError::Storage { .. } => {
                error!("Storage failure: {}", storage);
                ApiError::internal(storage.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response_json = json!({
            "error": true,
            "message": self.message,
            "status": self.status_code.as_u16()
        });

        if let Some(error_code) = self.error_code {
            response_json["error_code"] = json!(error_code);
        }

        (self.status_code, Json(response_json)).into_response()
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_bad_request() {
        let api_error: ApiError = ChatError::validation("prompt must not be empty").into();
        assert_eq!(api_error.status_code, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.message, "prompt must not be empty");
    }

    #[test]
    fn test_storage_maps_to_internal_error() {
        let api_error: ApiError =
            ChatError::storage("user message write failed", anyhow::anyhow!("boom")).into();
        assert_eq!(api_error.status_code, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(api_error.message.contains("user message write failed"));
    }
}
