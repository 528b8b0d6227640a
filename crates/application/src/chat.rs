//! Chat service - prompt shaping and reply generation

use std::{fmt, sync::Arc};

use ai_core::{GenerationRequest, TextGenerator};
use chrono::Local;
use tracing::{debug, instrument};

use crate::{error::ApplicationError, normalize::clean_markdown};

/// Prompts that short-circuit to the canned greeting
const GREETINGS: &[&str] = &["hello", "hi", "hii", "hello?"];

/// Canned greeting returned without a provider call
const GREETING_REPLY: &str =
    "Hi! I'm your Kerala Agri Chatbot. Ask me about farming, weather, or anything else!";

/// Fallback when normalization leaves nothing to say
const EMPTY_REPLY_FALLBACK: &str = "Sorry, I couldn't generate a response.";

/// Service producing chat replies from user prompts
pub struct ChatService {
    generator: Arc<dyn TextGenerator>,
}

impl fmt::Debug for ChatService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatService").finish_non_exhaustive()
    }
}

impl ChatService {
    /// Create a new chat service
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Produce a reply for a user prompt
    ///
    /// Greetings are answered locally. Prompts mentioning "today" are grounded
    /// with the current date before being sent to the provider. The provider's
    /// output is stripped of markdown; an empty cleaned reply is replaced with
    /// a fixed fallback so the caller never sees empty text.
    ///
    /// # Errors
    ///
    /// Provider failures propagate as `ApplicationError::Inference`.
    #[instrument(skip(self, message), fields(message_len = message.len()))]
    pub async fn respond(&self, message: &str) -> Result<String, ApplicationError> {
        let prompt = message.trim();
        let lowered = prompt.to_lowercase();

        if GREETINGS.contains(&lowered.as_str()) {
            debug!("Greeting answered locally");
            return Ok(GREETING_REPLY.to_string());
        }

        let prompt = if lowered.contains("today") {
            let today = Local::now().format("%A, %B %d, %Y");
            format!("{prompt} (Current date is {today})")
        } else {
            prompt.to_string()
        };

        let response = self
            .generator
            .generate(GenerationRequest::prompt(prompt))
            .await?;

        let cleaned = clean_markdown(&response.content);

        debug!(
            model = %response.model,
            reply_len = cleaned.len(),
            "Chat reply generated"
        );

        if cleaned.is_empty() {
            Ok(EMPTY_REPLY_FALLBACK.to_string())
        } else {
            Ok(cleaned)
        }
    }

    /// Check if the underlying generator is healthy
    pub async fn is_healthy(&self) -> bool {
        self.generator.health_check().await.unwrap_or(false)
    }
}
