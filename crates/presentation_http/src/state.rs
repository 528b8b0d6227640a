//! Application state shared across handlers

use std::sync::Arc;

use application::{ChatService, SynthesisCoordinator, TranscriptionService};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Chat service for reply generation
    pub chat: Arc<ChatService>,
    /// Transcription service for voice input
    pub transcription: Arc<TranscriptionService>,
    /// Coordinator for speech synthesis with last-request-wins semantics
    pub synthesis: SynthesisCoordinator,
}
