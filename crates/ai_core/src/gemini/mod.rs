//! Gemini text generation adapter
//!
//! Talks to the Gemini `generateContent` REST API.

mod client;

pub use client::GeminiTextGenerator;
