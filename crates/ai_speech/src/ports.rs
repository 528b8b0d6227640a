//! Port definitions for speech processing
//!
//! Defines the traits (ports) that speech processing adapters must implement.

use async_trait::async_trait;

use crate::error::SpeechError;
use crate::types::{AudioData, Transcription};

/// Port for Speech-to-Text (STT) implementations
///
/// Implementations of this trait convert audio data to text transcriptions.
#[async_trait]
pub trait SpeechToText: Send + Sync {
    /// Transcribe audio to text
    ///
    /// Returns the best transcript for the first audio channel. A recording
    /// with no recognizable speech yields an empty transcription, not an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns `SpeechError` if the provider call fails.
    async fn transcribe(&self, audio: AudioData) -> Result<Transcription, SpeechError>;

    /// Check if the STT service is available
    async fn is_available(&self) -> bool;

    /// Get the name of the current STT model
    fn model_name(&self) -> &str;
}

/// Port for Text-to-Speech (TTS) implementations
///
/// Implementations of this trait convert text to audio speech.
#[async_trait]
pub trait TextToSpeech: Send + Sync {
    /// Convert text to speech using the configured voice model
    ///
    /// The input is expected to fit inside the provider's per-request limit;
    /// callers split longer text with [`crate::chunker::split_text`] first.
    ///
    /// # Errors
    ///
    /// Returns `SpeechError` if synthesis fails or the text is empty.
    async fn synthesize(&self, text: &str) -> Result<AudioData, SpeechError>;

    /// Check if the TTS service is available
    async fn is_available(&self) -> bool;

    /// Get the name of the current TTS voice model
    fn model_name(&self) -> &str;
}
