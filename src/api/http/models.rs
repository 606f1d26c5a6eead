// src/api/http/models.rs

use axum::{Json, extract::State};
use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::chat::Model;
use crate::state::AppState;

/// GET /models — the catalog in display order.
pub async fn get_models(State(app_state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Model>>> {
    let models = app_state.chat_service.list_models().await?;
    Ok(Json(models))
}
