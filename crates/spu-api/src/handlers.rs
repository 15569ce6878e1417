//! Route handler functions.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

use spu_core::ConversationTurn;

use crate::error::ApiError;
use crate::state::AppState;

/// Returned for any body that is not a non-empty `messages` array.
/// Bodies over the size cap get 413 instead.
pub const INVALID_MESSAGES: &str = "Invalid messages format";

// =============================================================================
// Request / response types
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    /// Size of the rule table, excluding the fallback.
    pub rules: usize,
    pub enhancer: bool,
}

/// Convert client messages to turns. Roles other than user and assistant
/// (e.g. a client-supplied system prompt) are dropped.
fn to_turns(messages: Vec<ChatMessage>) -> Vec<ConversationTurn> {
    messages
        .into_iter()
        .filter_map(|m| match m.role.as_str() {
            "user" => Some(ConversationTurn::user(m.content)),
            "assistant" => Some(ConversationTurn::assistant(m.content, false)),
            _ => None,
        })
        .collect()
}

// =============================================================================
// Handlers
// =============================================================================

/// POST /api/chat - answer the last user message of the supplied history.
pub async fn chat(
    State(state): State<AppState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(request) = body.map_err(|e| {
        debug!(error = %e, "Rejected chat body");
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge
        } else {
            ApiError::BadRequest(INVALID_MESSAGES.to_string())
        }
    })?;
    if request.messages.is_empty() {
        return Err(ApiError::BadRequest(INVALID_MESSAGES.to_string()));
    }

    let history = to_turns(request.messages);
    let outcome = state.pipeline.answer_stateless(&history).await?;

    Ok(Json(ChatResponse {
        message: outcome.answer,
    }))
}

/// GET /health - health check.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        rules: state.pipeline.classifier().rules().len(),
        enhancer: state.pipeline.is_enhancing(),
    })
}
