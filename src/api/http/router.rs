// src/api/http/router.rs
// HTTP router composition for the chat API

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use super::{
    chat::{get_history, send_message},
    health::health_check,
    models::get_models,
};
use crate::state::AppState;

/// API router. Nested under /api in main.rs.
pub fn api_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        // Health
        .route("/health", get(health_check))

        // Model catalog
        .route("/models", get(get_models))

        // Chat
        .route("/chat", post(send_message))
        .route("/chat/history", get(get_history))

        .with_state(app_state)
}
