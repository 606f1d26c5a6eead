// tests/api_http_test.rs
// Router-level tests over the HTTP surface: wire casing, validation status
// codes, and error envelopes.

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use colloquy::api::http::router::api_router;
use colloquy::provider::EchoProvider;
use colloquy::state::create_app_state;

async fn test_app() -> Router {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    sqlx::migrate!("./migrations").run(&pool).await.unwrap();

    let app_state = Arc::new(create_app_state(pool, Arc::new(EchoProvider)));
    Router::new().nest("/api", api_router(app_state))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_send_message_round_trip() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/chat",
            json!({
                "modelTag": "gemini-1.5-flash-latest",
                "prompt": "hello",
                "userId": "u1"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;

    assert_eq!(body["userMessage"]["role"], "user");
    assert_eq!(body["userMessage"]["content"], "hello");
    assert_eq!(body["userMessage"]["user_id"], "u1");
    assert_eq!(body["aiMessage"]["role"], "assistant");
    assert_eq!(body["aiMessage"]["content"], "You said: \"hello\"");

    // The exchange is visible through history afterwards.
    let response = app
        .oneshot(get("/api/chat/history?userId=u1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let history = body_json(response).await;
    assert_eq!(history.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_empty_prompt_returns_bad_request() {
    let app = test_app().await;

    let response = app
        .oneshot(post_json(
            "/api/chat",
            json!({ "modelTag": "gemini-pro-latest", "prompt": "", "userId": "u1" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], true);
    assert_eq!(body["error_code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_missing_body_field_is_rejected() {
    let app = test_app().await;

    let response = app
        .oneshot(post_json(
            "/api/chat",
            json!({ "prompt": "hello", "userId": "u1" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_history_requires_user_id() {
    let app = test_app().await;

    let response = app.oneshot(get("/api/chat/history")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_history_filters_by_model_tag_param() {
    let app = test_app().await;

    for (tag, prompt) in [("tag-a", "one"), ("tag-b", "two")] {
        let response = app
            .clone()
            .oneshot(post_json(
                "/api/chat",
                json!({ "modelTag": tag, "prompt": prompt, "userId": "u1" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .oneshot(get("/api/chat/history?userId=u1&modelTag=tag-a"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let history = body_json(response).await;
    let messages = history.as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert!(messages.iter().all(|m| m["model_tag"] == "tag-a"));
}

#[tokio::test]
async fn test_models_endpoint_returns_seeded_catalog() {
    let app = test_app().await;

    let response = app.oneshot(get("/api/models")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let models = body.as_array().unwrap();
    assert_eq!(models.len(), 3);
    assert_eq!(models[0]["tag"], "gemini-1.5-pro-latest");
    assert_eq!(models[0]["name"], "Gemini 1.5 Pro");
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = test_app().await;

    let response = app.oneshot(get("/api/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["db"], "ok");
}
