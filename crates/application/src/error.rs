//! Application-level errors

use thiserror::Error;

/// Errors surfaced by the application services
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Text generation provider failed
    #[error("Inference error: {0}")]
    Inference(#[from] ai_core::InferenceError),

    /// Speech provider failed
    #[error("Speech error: {0}")]
    Speech(#[from] ai_speech::SpeechError),

    /// Scratch file I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal invariant violated
    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inference_error_converts() {
        let source = ai_core::InferenceError::RateLimited;
        let err: ApplicationError = source.into();
        assert!(matches!(err, ApplicationError::Inference(_)));
        assert_eq!(err.to_string(), "Inference error: Rate limit exceeded");
    }

    #[test]
    fn speech_error_converts() {
        let source = ai_speech::SpeechError::SynthesisFailed("boom".to_string());
        let err: ApplicationError = source.into();
        assert!(matches!(err, ApplicationError::Speech(_)));
    }

    #[test]
    fn io_error_converts() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: ApplicationError = source.into();
        assert!(matches!(err, ApplicationError::Io(_)));
    }

    #[test]
    fn internal_error_message() {
        let err = ApplicationError::Internal("worker stopped".to_string());
        assert_eq!(err.to_string(), "Internal error: worker stopped");
    }
}
