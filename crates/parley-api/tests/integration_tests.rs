//! Integration tests for the Parley API.
//!
//! Every test builds its own router over an in-memory database with a fixed
//! clock, then drives it with `oneshot` requests.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use parley_api::create_router;
use parley_api::handlers::{CreateChatResponse, HealthResponse, SendMessageResponse};
use parley_api::state::AppState;
use parley_chat::responses::DATABASE_DEFINITION;
use parley_chat::{ChatError, ContextRetriever, FixedClock, KnowledgeBase, ResponseGenerator};
use parley_core::config::ParleyConfig;
use parley_core::types::{ConversationId, Message};
use parley_storage::{Database, MessageRepository};

// =============================================================================
// Helpers
// =============================================================================

/// Fresh state over an in-memory DB; the clock is pinned to 09:00.
fn make_state() -> AppState {
    let database = Arc::new(Database::in_memory().unwrap());
    let retriever = Arc::new(MessageRepository::new(Arc::clone(&database)));
    let generator = ResponseGenerator::new(Arc::new(KnowledgeBase::builtin()), retriever)
        .with_clock(Arc::new(FixedClock(9)));
    AppState::with_generator(ParleyConfig::default(), database, generator)
}

struct FailingRetriever;

#[async_trait]
impl ContextRetriever for FailingRetriever {
    async fn recent_messages(
        &self,
        _conversation_id: ConversationId,
        _limit: usize,
    ) -> Result<Vec<Message>, ChatError> {
        Err(ChatError::Context("store offline".into()))
    }
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::delete(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, json: &str) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(json.to_string()))
        .unwrap()
}

async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn create_chat(state: &AppState, name: &str) -> Uuid {
    let app = create_router(state.clone());
    let resp = app
        .oneshot(post_json("/api/chats", &format!(r#"{{"name":"{}"}}"#, name)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let created: CreateChatResponse = serde_json::from_value(body_json(resp).await).unwrap();
    created.chat_id
}

async fn send(state: &AppState, chat_id: Uuid, message: &str) -> axum::response::Response {
    let app = create_router(state.clone());
    let body = serde_json::json!({ "message": message, "chatId": chat_id }).to_string();
    app.oneshot(post_json("/api/messages", &body)).await.unwrap()
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health() {
    let app = create_router(make_state());
    let resp = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let health: HealthResponse = serde_json::from_value(body_json(resp).await).unwrap();
    assert_eq!(health.status, "healthy");
    assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
    assert_eq!(health.database, "ok");
}

// =============================================================================
// Chats
// =============================================================================

#[tokio::test]
async fn test_create_chat_uses_camel_case() {
    let app = create_router(make_state());
    let resp = app
        .oneshot(post_json("/api/chats", r#"{"name":"Rust questions"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["name"], "Rust questions");
    assert!(json["chatId"].is_string());
}

#[tokio::test]
async fn test_create_chat_missing_name_is_rejected() {
    let app = create_router(make_state());
    let resp = app.oneshot(post_json("/api/chats", "{}")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let json = body_json(resp).await;
    assert_eq!(json["error"], "bad_request");
    assert!(json["message"].is_string());
}

#[tokio::test]
async fn test_create_chat_invalid_json_is_rejected() {
    let app = create_router(make_state());
    let resp = app.oneshot(post_json("/api/chats", "{not json")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["error"], "bad_request");
}

#[tokio::test]
async fn test_list_chats_newest_first() {
    let state = make_state();
    create_chat(&state, "first").await;
    create_chat(&state, "second").await;

    let resp = create_router(state).oneshot(get("/api/chats")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["second", "first"]);
}

#[tokio::test]
async fn test_delete_chat_removes_messages() {
    let state = make_state();
    let chat_id = create_chat(&state, "doomed").await;
    assert_eq!(send(&state, chat_id, "hello").await.status(), StatusCode::OK);

    let resp = create_router(state.clone())
        .oneshot(delete(&format!("/api/chats/{}", chat_id)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["success"], true);

    assert_eq!(state.messages.count(chat_id).unwrap(), 0);
    assert!(state.conversations.find_by_id(chat_id).unwrap().is_none());
}

#[tokio::test]
async fn test_delete_unknown_chat_is_not_found() {
    let app = create_router(make_state());
    let resp = app
        .oneshot(delete(&format!("/api/chats/{}", Uuid::new_v4())))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(resp).await["error"], "not_found");
}

#[tokio::test]
async fn test_delete_malformed_id_is_bad_request() {
    let app = create_router(make_state());
    let resp = app.oneshot(delete("/api/chats/not-a-uuid")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["error"], "bad_request");
}

// =============================================================================
// Messages
// =============================================================================

#[tokio::test]
async fn test_send_message_greeting_uses_clock() {
    let state = make_state();
    let chat_id = create_chat(&state, "greet").await;

    let resp = send(&state, chat_id, "Hello there").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let sent: SendMessageResponse = serde_json::from_value(body_json(resp).await).unwrap();
    assert!(sent.success);
    assert!(sent.bot_response.starts_with("Good morning!"));
    assert_ne!(sent.user_message_id, sent.bot_message_id);
}

#[tokio::test]
async fn test_send_message_response_keys() {
    let state = make_state();
    let chat_id = create_chat(&state, "keys").await;

    let json = body_json(send(&state, chat_id, "What is a database?").await).await;
    assert_eq!(json["success"], true);
    assert!(json["userMessageId"].is_string());
    assert!(json["botMessageId"].is_string());
    assert_eq!(json["botResponse"], DATABASE_DEFINITION);
}

#[tokio::test]
async fn test_send_message_stores_both_sides() {
    let state = make_state();
    let chat_id = create_chat(&state, "history").await;
    send(&state, chat_id, "What is a database?").await;

    let resp = create_router(state)
        .oneshot(get(&format!("/api/messages/{}", chat_id)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    let messages = json.as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["sender"], "user");
    assert_eq!(messages[0]["content"], "What is a database?");
    assert_eq!(messages[1]["sender"], "bot");
    assert_eq!(messages[1]["content"], DATABASE_DEFINITION);
    assert_eq!(messages[1]["chat_id"], chat_id.to_string());
}

#[tokio::test]
async fn test_send_message_unknown_chat_is_not_found() {
    let state = make_state();
    let resp = send(&state, Uuid::new_v4(), "hello").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_send_message_wrong_chat_id_type_is_bad_request() {
    let app = create_router(make_state());
    let resp = app
        .oneshot(post_json("/api/messages", r#"{"message":"hi","chatId":42}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let json = body_json(resp).await;
    assert_eq!(json["error"], "bad_request");
    assert!(json["message"].is_string());
}

#[tokio::test]
async fn test_list_messages_malformed_id_is_bad_request() {
    let app = create_router(make_state());
    let resp = app.oneshot(get("/api/messages/42")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["error"], "bad_request");
}

#[tokio::test]
async fn test_send_message_generation_failure() {
    let database = Arc::new(Database::in_memory().unwrap());
    let generator =
        ResponseGenerator::new(Arc::new(KnowledgeBase::builtin()), Arc::new(FailingRetriever));
    let state = AppState::with_generator(ParleyConfig::default(), database, generator);
    let chat_id = create_chat(&state, "broken").await;

    let resp = send(&state, chat_id, "hello").await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(resp).await;
    assert_eq!(json["error"], "internal_error");
    assert!(json["message"].as_str().unwrap().contains("store offline"));

    // The user message is kept; no bot reply is stored.
    let history = state.messages.recent(chat_id, 10).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].content, "hello");
}

#[tokio::test]
async fn test_list_messages_respects_history_limit() {
    let database = Arc::new(Database::in_memory().unwrap());
    let retriever = Arc::new(MessageRepository::new(Arc::clone(&database)));
    let generator = ResponseGenerator::new(Arc::new(KnowledgeBase::builtin()), retriever)
        .with_clock(Arc::new(FixedClock(9)));
    let mut config = ParleyConfig::default();
    config.chat.history_limit = 3;
    let state = AppState::with_generator(config, database, generator);
    let chat_id = create_chat(&state, "limited").await;

    send(&state, chat_id, "thanks").await;
    send(&state, chat_id, "goodbye").await;

    let resp = create_router(state)
        .oneshot(get(&format!("/api/messages/{}", chat_id)))
        .await
        .unwrap();
    let json = body_json(resp).await;
    let contents: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["content"].as_str().unwrap())
        .collect();
    assert_eq!(contents.len(), 3);
    assert_eq!(contents[1], "goodbye");
}

#[tokio::test]
async fn test_list_messages_unknown_chat_is_empty() {
    let app = create_router(make_state());
    let resp = app
        .oneshot(get(&format!("/api/messages/{}", Uuid::new_v4())))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, serde_json::json!([]));
}
