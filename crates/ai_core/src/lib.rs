//! AI Core - Text generation abstractions
//!
//! Provides the `TextGenerator` port and the Gemini REST adapter used by the
//! relay to produce chat replies.
//!
//! # Architecture
//!
//! This crate follows the ports & adapters pattern:
//! - `ports` module defines the trait (port)
//! - `gemini` module contains the concrete implementation (adapter)

pub mod config;
pub mod error;
pub mod gemini;
pub mod ports;

pub use config::GeminiConfig;
pub use error::InferenceError;
pub use gemini::GeminiTextGenerator;
pub use ports::{GenerationRequest, GenerationResponse, TextGenerator};
