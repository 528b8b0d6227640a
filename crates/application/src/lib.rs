//! Application services for the AgriVoice relay
//!
//! Orchestrates the `ai_core` and `ai_speech` ports:
//! - `ChatService` - prompt shaping, generation, markdown cleanup
//! - `TranscriptionService` - best-effort voice transcription
//! - `SynthesisService` / `SynthesisCoordinator` - chunked speech synthesis
//!   with last-request-wins cancellation

pub mod chat;
pub mod error;
pub mod normalize;
pub mod synthesis;
pub mod transcribe;

pub use chat::ChatService;
pub use error::ApplicationError;
pub use normalize::clean_markdown;
pub use synthesis::{SynthesisCoordinator, SynthesisOutcome, SynthesisService, SynthesizedAudio};
pub use transcribe::TranscriptionService;
