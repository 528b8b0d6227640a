//! Route definitions

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::{handlers, state::AppState};

/// Largest accepted request body, sized for voice uploads
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // Chat API
        .route("/chat", post(handlers::chat::chat))
        .route("/stream-chat", get(handlers::stream::stream_chat))
        // Speech API
        .route("/stt", post(handlers::speech::stt))
        .route("/tts", post(handlers::speech::tts))
        // Voice uploads exceed axum's default body limit
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}
