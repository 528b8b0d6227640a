//! Transcription service - best-effort voice-to-text

use std::{fmt, sync::Arc};

use ai_speech::{AudioData, SpeechToText};
use tracing::{debug, instrument};

use crate::error::ApplicationError;

/// Service transcribing uploaded audio
pub struct TranscriptionService {
    stt: Arc<dyn SpeechToText>,
}

impl fmt::Debug for TranscriptionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranscriptionService").finish_non_exhaustive()
    }
}

impl TranscriptionService {
    /// Create a new transcription service
    pub fn new(stt: Arc<dyn SpeechToText>) -> Self {
        Self { stt }
    }

    /// Transcribe an audio upload to text
    ///
    /// Returns the trimmed best transcript, which may be empty when the
    /// recording holds no recognizable speech. The caller decides how to
    /// present an empty transcript; it is not an error here.
    ///
    /// # Errors
    ///
    /// Provider failures propagate as `ApplicationError::Speech`.
    #[instrument(skip(self, audio), fields(audio_size = audio.size_bytes()))]
    pub async fn transcribe(&self, audio: AudioData) -> Result<String, ApplicationError> {
        let transcription = self.stt.transcribe(audio).await?;

        debug!(
            text_len = transcription.text.len(),
            confidence = ?transcription.confidence,
            "Transcription finished"
        );

        Ok(transcription.text.trim().to_string())
    }

    /// Check if the underlying speech provider is reachable
    pub async fn is_available(&self) -> bool {
        self.stt.is_available().await
    }
}

#[cfg(test)]
mod tests {
    use ai_speech::{AudioFormat, SpeechError, Transcription};
    use async_trait::async_trait;
    use mockall::mock;

    use super::*;

    mock! {
        Stt {}

        #[async_trait]
        impl SpeechToText for Stt {
            async fn transcribe(&self, audio: AudioData) -> Result<Transcription, SpeechError>;
            async fn is_available(&self) -> bool;
            fn model_name(&self) -> &str;
        }
    }

    #[tokio::test]
    async fn returns_trimmed_transcript() {
        let mut stt = MockStt::new();
        stt.expect_transcribe()
            .returning(|_| Ok(Transcription::new("  sow paddy in june  ")));

        let service = TranscriptionService::new(Arc::new(stt));
        let audio = AudioData::new(vec![1, 2, 3], AudioFormat::Wav);

        assert_eq!(service.transcribe(audio).await.unwrap(), "sow paddy in june");
    }

    #[tokio::test]
    async fn empty_transcript_is_not_an_error() {
        let mut stt = MockStt::new();
        stt.expect_transcribe()
            .returning(|_| Ok(Transcription::new("")));

        let service = TranscriptionService::new(Arc::new(stt));
        let audio = AudioData::new(vec![1, 2, 3], AudioFormat::Webm);

        assert_eq!(service.transcribe(audio).await.unwrap(), "");
    }

    #[tokio::test]
    async fn provider_error_propagates() {
        let mut stt = MockStt::new();
        stt.expect_transcribe()
            .returning(|_| Err(SpeechError::RateLimited));

        let service = TranscriptionService::new(Arc::new(stt));
        let audio = AudioData::new(vec![1], AudioFormat::Wav);

        let result = service.transcribe(audio).await;
        assert!(matches!(result, Err(ApplicationError::Speech(_))));
    }
}
