//! Types for speech processing
//!
//! Contains data structures for audio data, formats and transcriptions.

use serde::{Deserialize, Serialize};

/// Supported audio formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    /// MP3 format
    Mp3,
    /// WAV format (uncompressed)
    Wav,
    /// WebM format (browser MediaRecorder default)
    Webm,
    /// OGG container
    Ogg,
}

impl AudioFormat {
    /// Get the MIME type for this audio format
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
            Self::Wav => "audio/wav",
            Self::Webm => "audio/webm",
            Self::Ogg => "audio/ogg",
        }
    }

    /// Get the file extension for this audio format
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
            Self::Webm => "webm",
            Self::Ogg => "ogg",
        }
    }

    /// Parse audio format from MIME type
    #[must_use]
    pub fn from_mime_type(mime: &str) -> Option<Self> {
        // Handle compound MIME types like "audio/webm; codecs=opus"
        let base_mime = mime.split(';').next().unwrap_or(mime).trim();

        match base_mime {
            "audio/mpeg" | "audio/mp3" => Some(Self::Mp3),
            "audio/wav" | "audio/x-wav" | "audio/wave" => Some(Self::Wav),
            "audio/webm" => Some(Self::Webm),
            "audio/ogg" => Some(Self::Ogg),
            _ => None,
        }
    }
}

/// Container for audio data with metadata
#[derive(Debug, Clone)]
pub struct AudioData {
    /// Raw audio bytes
    data: Vec<u8>,
    /// Audio format
    format: AudioFormat,
}

impl AudioData {
    /// Create new audio data
    #[must_use]
    pub const fn new(data: Vec<u8>, format: AudioFormat) -> Self {
        Self { data, format }
    }

    /// Get the raw audio bytes
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume and return the raw audio bytes
    #[must_use]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Get the audio format
    #[must_use]
    pub const fn format(&self) -> AudioFormat {
        self.format
    }

    /// Get the size of the audio data in bytes
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Check if the audio data is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the MIME type for this audio
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// Generate a filename with appropriate extension
    #[must_use]
    pub fn filename(&self, base: &str) -> String {
        format!("{}.{}", base, self.format.extension())
    }
}

/// Result of speech-to-text transcription
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcription {
    /// Transcribed text
    pub text: String,
    /// Confidence score (0.0 - 1.0)
    pub confidence: Option<f32>,
}

impl Transcription {
    /// Create a simple transcription with just text
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            confidence: None,
        }
    }

    /// Set the confidence score
    #[must_use]
    pub const fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = Some(confidence);
        self
    }

    /// Check if transcription is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod audio_format {
        use super::*;

        #[test]
        fn mime_types_are_correct() {
            assert_eq!(AudioFormat::Mp3.mime_type(), "audio/mpeg");
            assert_eq!(AudioFormat::Wav.mime_type(), "audio/wav");
            assert_eq!(AudioFormat::Webm.mime_type(), "audio/webm");
            assert_eq!(AudioFormat::Ogg.mime_type(), "audio/ogg");
        }

        #[test]
        fn extensions_are_correct() {
            assert_eq!(AudioFormat::Mp3.extension(), "mp3");
            assert_eq!(AudioFormat::Wav.extension(), "wav");
            assert_eq!(AudioFormat::Webm.extension(), "webm");
            assert_eq!(AudioFormat::Ogg.extension(), "ogg");
        }

        #[test]
        fn from_mime_type_simple() {
            assert_eq!(
                AudioFormat::from_mime_type("audio/mpeg"),
                Some(AudioFormat::Mp3)
            );
            assert_eq!(
                AudioFormat::from_mime_type("audio/mp3"),
                Some(AudioFormat::Mp3)
            );
            assert_eq!(
                AudioFormat::from_mime_type("audio/x-wav"),
                Some(AudioFormat::Wav)
            );
            assert_eq!(
                AudioFormat::from_mime_type("audio/webm"),
                Some(AudioFormat::Webm)
            );
        }

        #[test]
        fn from_mime_type_with_codecs() {
            // Browsers send this format from MediaRecorder
            assert_eq!(
                AudioFormat::from_mime_type("audio/webm; codecs=opus"),
                Some(AudioFormat::Webm)
            );
        }

        #[test]
        fn from_mime_type_unknown() {
            assert_eq!(AudioFormat::from_mime_type("audio/unknown"), None);
            assert_eq!(AudioFormat::from_mime_type("text/plain"), None);
        }
    }

    mod audio_data {
        use super::*;

        #[test]
        fn new_creates_audio_data() {
            let data = vec![1, 2, 3, 4];
            let audio = AudioData::new(data.clone(), AudioFormat::Mp3);

            assert_eq!(audio.data(), &data);
            assert_eq!(audio.format(), AudioFormat::Mp3);
        }

        #[test]
        fn size_bytes_returns_data_length() {
            let audio = AudioData::new(vec![0; 1024], AudioFormat::Mp3);
            assert_eq!(audio.size_bytes(), 1024);
        }

        #[test]
        fn is_empty_returns_true_for_empty_data() {
            let audio = AudioData::new(vec![], AudioFormat::Mp3);
            assert!(audio.is_empty());
        }

        #[test]
        fn into_data_consumes_and_returns_bytes() {
            let original = vec![1, 2, 3, 4, 5];
            let audio = AudioData::new(original.clone(), AudioFormat::Wav);
            assert_eq!(audio.into_data(), original);
        }

        #[test]
        fn filename_includes_extension() {
            let audio = AudioData::new(vec![], AudioFormat::Mp3);
            assert_eq!(audio.filename("speech"), "speech.mp3");

            let audio = AudioData::new(vec![], AudioFormat::Wav);
            assert_eq!(audio.filename("upload"), "upload.wav");
        }

        #[test]
        fn mime_type_delegates_to_format() {
            let audio = AudioData::new(vec![], AudioFormat::Wav);
            assert_eq!(audio.mime_type(), "audio/wav");
        }
    }

    mod transcription {
        use super::*;

        #[test]
        fn new_creates_simple_transcription() {
            let transcription = Transcription::new("Hello, world!");
            assert_eq!(transcription.text, "Hello, world!");
            assert!(transcription.confidence.is_none());
        }

        #[test]
        fn with_confidence_sets_confidence() {
            let transcription = Transcription::new("Test").with_confidence(0.95);
            assert_eq!(transcription.confidence, Some(0.95));
        }

        #[test]
        fn is_empty_returns_true_for_whitespace_only() {
            let transcription = Transcription::new("   \n\t  ");
            assert!(transcription.is_empty());
        }

        #[test]
        fn is_empty_returns_false_for_text() {
            let transcription = Transcription::new("Hello");
            assert!(!transcription.is_empty());
        }
    }
}
