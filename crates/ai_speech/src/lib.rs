//! AI Speech - Speech-to-Text and Text-to-Speech abstractions
//!
//! Provides traits and implementations for speech processing:
//! - `SpeechToText` - Transcribe audio to text (STT)
//! - `TextToSpeech` - Synthesize speech from text (TTS)
//!
//! # Architecture
//!
//! This crate follows the ports & adapters pattern:
//! - `ports` module defines the traits (ports)
//! - `providers` module contains concrete implementations (adapters)
//! - `chunker` splits long text into provider-safe chunks
//!
//! # Example
//!
//! ```ignore
//! use ai_speech::{AudioData, AudioFormat, DeepgramSpeechProvider, SpeechToText, TextToSpeech};
//!
//! let provider = DeepgramSpeechProvider::new(config)?;
//!
//! // Transcribe audio
//! let audio = AudioData::new(bytes, AudioFormat::Wav);
//! let transcription = provider.transcribe(audio).await?;
//!
//! // Synthesize speech
//! let audio = provider.synthesize("Hello, world!").await?;
//! ```

pub mod chunker;
pub mod config;
pub mod error;
pub mod ports;
pub mod providers;
pub mod types;

pub use chunker::{MAX_CHUNK_CHARS, split_text};
pub use config::DeepgramConfig;
pub use error::SpeechError;
pub use ports::{SpeechToText, TextToSpeech};
pub use providers::deepgram::DeepgramSpeechProvider;
pub use types::{AudioData, AudioFormat, Transcription};
