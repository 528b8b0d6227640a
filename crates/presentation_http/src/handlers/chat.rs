//! Chat handler

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

/// Warning returned instead of a reply when the message is empty
pub(crate) const EMPTY_MESSAGE_WARNING: &str = "⚠️ Please enter a valid message.";

/// Chat request body, shared with the /tts endpoint
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// User message
    pub message: String,
}

/// Chat response body, shared with the /stt endpoint
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// Assistant reply, or a user-facing warning
    pub reply: String,
}

/// Handle a chat request
///
/// An empty message is answered with a warning reply and a success status;
/// the client renders it like any other reply.
#[instrument(skip(state, request), fields(message_len = request.message.len()))]
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let prompt = request.message.trim();
    if prompt.is_empty() {
        return Ok(Json(ChatResponse {
            reply: EMPTY_MESSAGE_WARNING.to_string(),
        }));
    }

    let reply = state.chat.respond(prompt).await?;

    Ok(Json(ChatResponse { reply }))
}
