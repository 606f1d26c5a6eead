// src/api/http/health.rs
//
// Health check endpoint for load balancers and local smoke tests.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use std::sync::Arc;

use crate::state::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    db: &'static str,
}

/// GET /health
///
/// Returns 200 if the database is reachable, 503 otherwise.
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let db_ok = sqlx::query("SELECT 1")
        .fetch_one(&state.sqlite_pool)
        .await
        .is_ok();

    let response = HealthResponse {
        status: if db_ok { "healthy" } else { "unhealthy" },
        db: if db_ok { "ok" } else { "error" },
    };

    if db_ok {
        (StatusCode::OK, Json(response))
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Json(response))
    }
}
