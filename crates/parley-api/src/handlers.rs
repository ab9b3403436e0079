//! Route handler functions for all API endpoints.
//!
//! Each handler extracts path parameters or a JSON body, works against the
//! repositories and the response engine in AppState, and returns JSON.
//! Extractor rejections are taken as `Result` so malformed requests get the
//! same `{error, message}` body as every other failure.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use parley_core::types::{Conversation, Message, Sender};

use crate::error::ApiError;
use crate::state::AppState;

// =============================================================================
// Request types
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateChatRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub message: String,
    pub chat_id: Uuid,
}

// =============================================================================
// Response types
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChatResponse {
    pub success: bool,
    pub chat_id: Uuid,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<Conversation> for ChatResponse {
    fn from(c: Conversation) -> Self {
        Self {
            id: c.id,
            name: c.name,
            created_at: c.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageResponse {
    pub success: bool,
    pub user_message_id: Uuid,
    pub bot_message_id: Uuid,
    pub bot_response: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub id: Uuid,
    pub chat_id: Uuid,
    pub content: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

impl From<Message> for MessageResponse {
    fn from(m: Message) -> Self {
        Self {
            id: m.id,
            chat_id: m.conversation_id,
            content: m.content,
            sender: m.sender,
            timestamp: m.timestamp,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// "healthy", or "degraded" when the database does not answer.
    pub status: String,
    pub version: String,
    /// "ok" or "unavailable".
    pub database: String,
    pub uptime_secs: u64,
}

// =============================================================================
// Handler functions
// =============================================================================

/// POST /api/chats - create a conversation.
pub async fn create_chat(
    State(state): State<AppState>,
    payload: Result<Json<CreateChatRequest>, JsonRejection>,
) -> Result<Json<CreateChatResponse>, ApiError> {
    let Json(body) = payload?;
    let conversation = state.conversations.create(&body.name)?;
    tracing::info!(conversation_id = %conversation.id, "Chat created");
    Ok(Json(CreateChatResponse {
        success: true,
        chat_id: conversation.id,
        name: conversation.name,
    }))
}

/// GET /api/chats - list conversations, newest first.
pub async fn list_chats(
    State(state): State<AppState>,
) -> Result<Json<Vec<ChatResponse>>, ApiError> {
    let chats = state
        .conversations
        .list()?
        .into_iter()
        .map(ChatResponse::from)
        .collect();
    Ok(Json(chats))
}

/// DELETE /api/chats/{chat_id} - delete a conversation and its messages.
pub async fn delete_chat(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let Path(chat_id) = path?;
    if !state.conversations.delete(chat_id)? {
        return Err(ApiError::NotFound(format!("Chat {} not found", chat_id)));
    }
    tracing::info!(conversation_id = %chat_id, "Chat deleted");
    Ok(Json(SuccessResponse { success: true }))
}

/// POST /api/messages - store a user message and the generated bot reply.
///
/// If generation fails the bot reply is not stored; the user message is.
pub async fn send_message(
    State(state): State<AppState>,
    payload: Result<Json<SendMessageRequest>, JsonRejection>,
) -> Result<Json<SendMessageResponse>, ApiError> {
    let Json(body) = payload?;
    if state.conversations.find_by_id(body.chat_id)?.is_none() {
        return Err(ApiError::NotFound(format!("Chat {} not found", body.chat_id)));
    }

    let user_message = state
        .messages
        .append(body.chat_id, &body.message, Sender::User)?;

    let bot_response = state.generator.generate(&body.message, body.chat_id).await?;

    let bot_message = state
        .messages
        .append(body.chat_id, &bot_response, Sender::Bot)?;

    Ok(Json(SendMessageResponse {
        success: true,
        user_message_id: user_message.id,
        bot_message_id: bot_message.id,
        bot_response,
    }))
}

/// GET /api/messages/{chat_id} - recent history, oldest first.
pub async fn list_messages(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Vec<MessageResponse>>, ApiError> {
    let Path(chat_id) = path?;
    let limit = state.config.chat.history_limit;
    let messages = state
        .messages
        .recent(chat_id, limit)?
        .into_iter()
        .map(MessageResponse::from)
        .collect();
    Ok(Json(messages))
}

/// GET /health - health check.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let (status, database) = match state.database.ping() {
        Ok(()) => ("healthy", "ok"),
        Err(e) => {
            tracing::warn!(error = %e, "Health check: database unavailable");
            ("degraded", "unavailable")
        }
    };
    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database.to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}
