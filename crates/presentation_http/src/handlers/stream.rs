//! Streaming chat handler
//!
//! The reply is generated in full before streaming begins; tokens are then
//! replayed over SSE at a fixed cadence to simulate live typing on the
//! client.

use std::{convert::Infallible, time::Duration};

use axum::{
    extract::{Query, State},
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::{self, Stream, StreamExt};
use serde::Deserialize;
use tracing::instrument;

use crate::{error::ApiError, handlers::chat::EMPTY_MESSAGE_WARNING, state::AppState};

/// Delay between successive token events
const TOKEN_DELAY: Duration = Duration::from_millis(50);

/// Terminal event data marking the end of the stream
const DONE_SENTINEL: &str = "[DONE]";

/// Streaming chat query parameters
#[derive(Debug, Deserialize)]
pub struct StreamChatQuery {
    /// User message
    pub query: String,
}

/// Handle a streaming chat request via SSE
#[instrument(skip(state, params), fields(query_len = params.query.len()))]
pub async fn stream_chat(
    State(state): State<AppState>,
    Query(params): Query<StreamChatQuery>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError> {
    let prompt = params.query.trim();

    let reply = if prompt.is_empty() {
        EMPTY_MESSAGE_WARNING.to_string()
    } else {
        state.chat.respond(prompt).await?
    };

    Ok(Sse::new(token_events(&reply)).keep_alive(KeepAlive::default()))
}

/// Split a reply into display tokens, each carrying a trailing space
fn reply_tokens(reply: &str) -> Vec<String> {
    reply.split_whitespace().map(|t| format!("{t} ")).collect()
}

/// Build the paced token stream, terminated by the `[DONE]` sentinel
fn token_events(reply: &str) -> impl Stream<Item = Result<Event, Infallible>> + use<> {
    stream::iter(reply_tokens(reply))
        .then(|token| async move {
            tokio::time::sleep(TOKEN_DELAY).await;
            Ok::<_, Infallible>(
                Event::default().data(serde_json::json!({ "text": token }).to_string()),
            )
        })
        .chain(stream::once(async {
            Ok::<_, Infallible>(Event::default().data(DONE_SENTINEL))
        }))
}
