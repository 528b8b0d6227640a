//! Configuration for speech processing

use serde::{Deserialize, Serialize};

use crate::types::AudioFormat;

/// Configuration for the Deepgram speech service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeepgramConfig {
    /// Deepgram API key
    #[serde(default)]
    pub api_key: Option<String>,

    /// Deepgram API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Speech-to-text model
    #[serde(default = "default_stt_model")]
    pub stt_model: String,

    /// Language hint for transcription
    #[serde(default = "default_language")]
    pub language: String,

    /// Enable smart formatting (punctuation, numerals)
    #[serde(default = "default_smart_format")]
    pub smart_format: bool,

    /// Text-to-speech voice model
    #[serde(default = "default_tts_model")]
    pub tts_model: String,

    /// Output audio encoding for TTS
    #[serde(default = "default_output_format")]
    pub output_format: AudioFormat,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_base_url() -> String {
    "https://api.deepgram.com".to_string()
}

fn default_stt_model() -> String {
    "nova-2".to_string()
}

fn default_language() -> String {
    "en-IN".to_string()
}

const fn default_smart_format() -> bool {
    true
}

fn default_tts_model() -> String {
    "aura-asteria-en".to_string()
}

const fn default_output_format() -> AudioFormat {
    AudioFormat::Mp3
}

const fn default_timeout_ms() -> u64 {
    30000 // 30 seconds
}

impl Default for DeepgramConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            stt_model: default_stt_model(),
            language: default_language(),
            smart_format: default_smart_format(),
            tts_model: default_tts_model(),
            output_format: default_output_format(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl DeepgramConfig {
    /// Create a config from an API key, keeping defaults for everything else
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Default::default()
        }
    }

    /// Create a minimal config for testing
    #[cfg(test)]
    pub fn test() -> Self {
        Self::with_api_key("test-key")
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error message if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.api_key.is_none() {
            return Err("Deepgram API key is required".to_string());
        }

        if self.timeout_ms == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}
