//! Gemini client implementation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::config::GeminiConfig;
use crate::error::InferenceError;
use crate::ports::{GenerationRequest, GenerationResponse, TextGenerator};

/// Text generator backed by the Gemini REST API
#[derive(Debug, Clone)]
pub struct GeminiTextGenerator {
    client: Client,
    config: GeminiConfig,
}

impl GeminiTextGenerator {
    /// Create a new Gemini text generator
    ///
    /// # Errors
    ///
    /// Returns `InferenceError::Configuration` if the configuration is invalid.
    pub fn new(config: GeminiConfig) -> Result<Self, InferenceError> {
        config.validate().map_err(InferenceError::Configuration)?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| InferenceError::ConnectionFailed(e.to_string()))?;

        info!(
            base_url = %config.base_url,
            model = %config.default_model,
            "Initialized Gemini text generator"
        );

        Ok(Self { client, config })
    }

    fn api_key(&self) -> &str {
        self.config.api_key.as_deref().unwrap_or_default()
    }

    /// Build the generateContent URL for a model
    fn generate_url(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.config.base_url, model)
    }

    /// Get the model to use for a request
    fn resolve_model<'a>(&'a self, request: &'a GenerationRequest) -> &'a str {
        request
            .model
            .as_deref()
            .unwrap_or(&self.config.default_model)
    }
}

/// Gemini-format generation request
#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GeminiGenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct GeminiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(rename = "maxOutputTokens", skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

/// Gemini-format generation response
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    #[serde(rename = "finishReason", default)]
    finish_reason: Option<String>,
}

/// Gemini API error response
#[derive(Debug, Deserialize)]
struct GeminiApiError {
    error: GeminiApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GeminiApiErrorDetail {
    message: String,
    #[serde(default)]
    status: Option<String>,
}

#[async_trait]
impl TextGenerator for GeminiTextGenerator {
    #[instrument(skip(self, request), fields(model = %self.resolve_model(&request), prompt_len = request.prompt.len()))]
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, InferenceError> {
        let model = self.resolve_model(&request).to_string();

        let gemini_request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: request.prompt,
                }],
            }],
            generation_config: Some(GeminiGenerationConfig {
                temperature: request.temperature.or(Some(self.config.temperature)),
                max_output_tokens: request.max_tokens.or(Some(self.config.max_tokens)),
            }),
        };

        debug!("Sending request to Gemini");

        let response = self
            .client
            .post(self.generate_url(&model))
            .header("x-goog-api-key", self.api_key())
            .json(&gemini_request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "Generation request failed");

            if let Ok(api_error) = serde_json::from_str::<GeminiApiError>(&body) {
                return match api_error.error.status.as_deref() {
                    Some("RESOURCE_EXHAUSTED") => Err(InferenceError::RateLimited),
                    Some("NOT_FOUND") => Err(InferenceError::ModelNotAvailable(model)),
                    _ => Err(InferenceError::ServerError(api_error.error.message)),
                };
            }

            return Err(InferenceError::ServerError(format!(
                "Status {status}: {body}"
            )));
        }

        let gemini_response: GeminiResponse = response
            .json()
            .await
            .map_err(|e| InferenceError::InvalidResponse(e.to_string()))?;

        let candidate = gemini_response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| InferenceError::InvalidResponse("No candidates returned".to_string()))?;

        let content = candidate
            .content
            .map(|c| {
                c.parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        debug!(content_len = content.len(), "Generation completed");

        Ok(GenerationResponse {
            content,
            model,
            finish_reason: candidate.finish_reason,
        })
    }

    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<bool, InferenceError> {
        let response = self
            .client
            .get(format!("{}/models", self.config.base_url))
            .header("x-goog-api-key", self.api_key())
            .timeout(Duration::from_secs(5))
            .send()
            .await;

        match response {
            Ok(resp) => Ok(resp.status().is_success()),
            Err(e) if e.is_timeout() || e.is_connect() => Ok(false),
            Err(e) => Err(InferenceError::RequestFailed(e.to_string())),
        }
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }
}
