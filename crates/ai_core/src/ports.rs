//! Port definitions for text generation
//!
//! Defines the trait (port) that generation adapters must implement.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::InferenceError;

/// Request for text generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// The prompt to generate from
    pub prompt: String,
    /// Model to use (overrides config default)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Temperature for sampling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Maximum tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl GenerationRequest {
    /// Create a simple single-prompt request
    pub fn prompt(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            model: None,
            temperature: None,
            max_tokens: None,
        }
    }

    /// Set the model for this request
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set temperature
    pub const fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }
}

/// Response from text generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// Generated content
    pub content: String,
    /// Model that generated the response
    pub model: String,
    /// Finish reason reported by the provider
    pub finish_reason: Option<String>,
}

/// Port for text generation implementations
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a complete response for a prompt
    ///
    /// # Errors
    ///
    /// Returns `InferenceError` if the provider call fails.
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, InferenceError>;

    /// Check if the generation service is reachable
    async fn health_check(&self) -> Result<bool, InferenceError>;

    /// Get the current default model
    fn default_model(&self) -> &str;
}
