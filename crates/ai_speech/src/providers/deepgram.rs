//! Deepgram speech provider
//!
//! Implements `SpeechToText` against the Deepgram prerecorded listen API and
//! `TextToSpeech` against the Deepgram speak API.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::config::DeepgramConfig;
use crate::error::SpeechError;
use crate::ports::{SpeechToText, TextToSpeech};
use crate::types::{AudioData, Transcription};

/// Deepgram speech provider implementing both STT and TTS
#[derive(Debug, Clone)]
pub struct DeepgramSpeechProvider {
    client: Client,
    config: DeepgramConfig,
}

impl DeepgramSpeechProvider {
    /// Create a new Deepgram speech provider
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Configuration` if the configuration is invalid.
    pub fn new(config: DeepgramConfig) -> Result<Self, SpeechError> {
        config.validate().map_err(SpeechError::Configuration)?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| SpeechError::Configuration(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    fn api_key(&self) -> &str {
        self.config.api_key.as_deref().unwrap_or_default()
    }

    /// Build the STT endpoint URL
    fn listen_url(&self) -> String {
        format!("{}/v1/listen", self.config.base_url)
    }

    /// Build the TTS endpoint URL
    fn speak_url(&self) -> String {
        format!("{}/v1/speak", self.config.base_url)
    }
}

/// Deepgram prerecorded transcription response
#[derive(Debug, Deserialize)]
struct ListenResponse {
    #[serde(default)]
    results: Option<ListenResults>,
}

#[derive(Debug, Deserialize)]
struct ListenResults {
    #[serde(default)]
    channels: Vec<ListenChannel>,
}

#[derive(Debug, Deserialize)]
struct ListenChannel {
    #[serde(default)]
    alternatives: Vec<ListenAlternative>,
}

#[derive(Debug, Deserialize)]
struct ListenAlternative {
    #[serde(default)]
    transcript: String,
    #[serde(default)]
    confidence: Option<f32>,
}

/// Deepgram API error response
#[derive(Debug, Deserialize)]
struct DeepgramApiError {
    err_code: Option<String>,
    err_msg: Option<String>,
}

#[async_trait]
impl SpeechToText for DeepgramSpeechProvider {
    #[instrument(skip(self, audio), fields(audio_size = audio.size_bytes(), format = ?audio.format()))]
    async fn transcribe(&self, audio: AudioData) -> Result<Transcription, SpeechError> {
        debug!("Transcribing audio with Deepgram");

        if audio.is_empty() {
            return Err(SpeechError::InvalidAudio("Audio data is empty".to_string()));
        }

        let mime_type = audio.mime_type();

        let response = self
            .client
            .post(self.listen_url())
            .query(&[
                ("model", self.config.stt_model.as_str()),
                ("language", self.config.language.as_str()),
                ("smart_format", if self.config.smart_format { "true" } else { "false" }),
            ])
            .header("Authorization", format!("Token {}", self.api_key()))
            .header("Content-Type", mime_type)
            .body(audio.into_data())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "Transcription request failed");

            if status.as_u16() == 429 {
                return Err(SpeechError::RateLimited);
            }

            if let Ok(api_error) = serde_json::from_str::<DeepgramApiError>(&body) {
                let message = api_error
                    .err_msg
                    .or(api_error.err_code)
                    .unwrap_or_else(|| status.to_string());
                return Err(SpeechError::TranscriptionFailed(message));
            }

            return Err(SpeechError::TranscriptionFailed(format!(
                "HTTP {status}: {body}"
            )));
        }

        let listen_response: ListenResponse = response
            .json()
            .await
            .map_err(|e| SpeechError::InvalidResponse(format!("Failed to parse response: {e}")))?;

        // Best alternative of the first channel; absence means silence, not failure.
        let alternative = listen_response
            .results
            .and_then(|r| r.channels.into_iter().next())
            .and_then(|c| c.alternatives.into_iter().next());

        let transcription = match alternative {
            Some(alt) => {
                let mut t = Transcription::new(alt.transcript.trim());
                if let Some(confidence) = alt.confidence {
                    t = t.with_confidence(confidence);
                }
                t
            },
            None => Transcription::new(""),
        };

        debug!(
            text_len = transcription.text.len(),
            "Transcription complete"
        );

        Ok(transcription)
    }

    async fn is_available(&self) -> bool {
        // The auth endpoint is cheap and validates the key at the same time
        let url = format!("{}/v1/auth/token", self.config.base_url);

        match self
            .client
            .get(&url)
            .header("Authorization", format!("Token {}", self.api_key()))
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!("Deepgram STT availability check failed: {}", e);
                false
            },
        }
    }

    fn model_name(&self) -> &str {
        &self.config.stt_model
    }
}

#[async_trait]
impl TextToSpeech for DeepgramSpeechProvider {
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    async fn synthesize(&self, text: &str) -> Result<AudioData, SpeechError> {
        debug!("Synthesizing speech with Deepgram");

        if text.is_empty() {
            return Err(SpeechError::SynthesisFailed(
                "Text cannot be empty".to_string(),
            ));
        }

        let response = self
            .client
            .post(self.speak_url())
            .query(&[
                ("model", self.config.tts_model.as_str()),
                ("encoding", self.config.output_format.extension()),
            ])
            .header("Authorization", format!("Token {}", self.api_key()))
            .json(&serde_json::json!({ "text": text }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "Synthesis request failed");

            if status.as_u16() == 429 {
                return Err(SpeechError::RateLimited);
            }

            if let Ok(api_error) = serde_json::from_str::<DeepgramApiError>(&body) {
                if api_error.err_code.as_deref() == Some("INVALID_MODEL") {
                    return Err(SpeechError::ModelNotAvailable(
                        self.config.tts_model.clone(),
                    ));
                }
                let message = api_error
                    .err_msg
                    .or(api_error.err_code)
                    .unwrap_or_else(|| status.to_string());
                return Err(SpeechError::SynthesisFailed(message));
            }

            return Err(SpeechError::SynthesisFailed(format!(
                "HTTP {status}: {body}"
            )));
        }

        let audio_bytes: Bytes = response
            .bytes()
            .await
            .map_err(|e| SpeechError::InvalidResponse(format!("Failed to read audio: {e}")))?;

        debug!(audio_size = audio_bytes.len(), "Speech synthesis complete");

        Ok(AudioData::new(
            audio_bytes.to_vec(),
            self.config.output_format,
        ))
    }

    async fn is_available(&self) -> bool {
        let url = format!("{}/v1/auth/token", self.config.base_url);

        match self
            .client
            .get(&url)
            .header("Authorization", format!("Token {}", self.api_key()))
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!("Deepgram TTS availability check failed: {}", e);
                false
            },
        }
    }

    fn model_name(&self) -> &str {
        &self.config.tts_model
    }
}
