// src/state.rs

use sqlx::SqlitePool;
use std::sync::Arc;

use crate::chat::{ChatService, SqliteChatStore};
use crate::provider::Provider;

#[derive(Clone)]
pub struct AppState {
    pub sqlite_pool: SqlitePool,
    pub chat_service: Arc<ChatService>,
}

/// Wire the store and the selected provider into the exchange service.
pub fn create_app_state(pool: SqlitePool, provider: Arc<dyn Provider>) -> AppState {
    let store = Arc::new(SqliteChatStore::new(pool.clone()));
    let chat_service = Arc::new(ChatService::new(store, provider));

    AppState {
        sqlite_pool: pool,
        chat_service,
    }
}
