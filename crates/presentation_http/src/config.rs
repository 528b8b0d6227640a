//! Server configuration loaded from the environment
//!
//! Provider API keys are mandatory; the process refuses to start without
//! them. Everything else has local-development defaults.

use ai_core::GeminiConfig;
use ai_speech::DeepgramConfig;
use thiserror::Error;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is not set
    #[error("{0} is not set; add it to the environment or a .env file")]
    MissingKey(&'static str),

    /// An environment variable holds an unparseable value
    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// HTTP server settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
}

/// Full application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub gemini: GeminiConfig,
    pub deepgram: DeepgramConfig,
}

impl AppConfig {
    /// Load configuration from the environment, reading `.env` first
    ///
    /// # Errors
    ///
    /// Fails when `GEMINI_API_KEY` or `DEEPGRAM_API_KEY` is missing, or when
    /// `PORT` does not parse as a port number.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_env_fn(|name| std::env::var(name).ok())
    }

    /// Load configuration through an environment lookup function
    fn from_env_fn(env: impl Fn(&'static str) -> Option<String>) -> Result<Self, ConfigError> {
        let gemini_key = env("GEMINI_API_KEY")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::MissingKey("GEMINI_API_KEY"))?;
        let deepgram_key = env("DEEPGRAM_API_KEY")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::MissingKey("DEEPGRAM_API_KEY"))?;

        let host = env("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = match env("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                name: "PORT",
                value: raw,
            })?,
            None => 8000,
        };

        Ok(Self {
            server: ServerConfig { host, port },
            gemini: GeminiConfig::with_api_key(gemini_key),
            deepgram: DeepgramConfig::with_api_key(deepgram_key),
        })
    }

    /// Address string the server binds to
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
