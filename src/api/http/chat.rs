// src/api/http/chat.rs

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::api::error::ApiResult;
use crate::chat::Message;
use crate::state::AppState;

// Envelope fields are camelCase on the wire; record fields stay snake_case.

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub model_tag: String,
    pub prompt: String,
    pub user_id: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageResponse {
    pub user_message: Message,
    pub ai_message: Message,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQuery {
    pub user_id: Option<String>,
    pub model_tag: Option<String>,
}

pub async fn send_message(
    State(app_state): State<Arc<AppState>>,
    Json(request): Json<SendMessageRequest>,
) -> ApiResult<Json<SendMessageResponse>> {
    info!("Chat request for model tag: {}", request.model_tag);

    let exchange = app_state
        .chat_service
        .send_message(&request.user_id, &request.model_tag, &request.prompt)
        .await?;

    Ok(Json(SendMessageResponse {
        user_message: exchange.user_message,
        ai_message: exchange.ai_message,
    }))
}

pub async fn get_history(
    State(app_state): State<Arc<AppState>>,
    Query(params): Query<HistoryQuery>,
) -> ApiResult<Json<Vec<Message>>> {
    let user_id = params.user_id.as_deref().unwrap_or_default();

    let messages = app_state
        .chat_service
        .history(user_id, params.model_tag.as_deref())
        .await?;

    info!(
        "Returning {} history messages for user {}",
        messages.len(),
        user_id
    );

    Ok(Json(messages))
}
