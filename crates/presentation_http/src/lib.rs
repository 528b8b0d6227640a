//! AgriVoice HTTP presentation layer
//!
//! Exposes the chat, transcription and synthesis services over a small JSON
//! and multipart API, plus an SSE endpoint for progressive reply display.

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::{AppConfig, ConfigError};
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
