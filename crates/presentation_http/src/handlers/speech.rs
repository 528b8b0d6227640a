//! Speech handlers - voice upload transcription and reply synthesis

use ai_speech::{AudioData, AudioFormat};
use application::SynthesisOutcome;
use axum::{
    Json,
    extract::{Multipart, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::instrument;

use crate::{
    error::ApiError,
    handlers::chat::{ChatRequest, ChatResponse},
    state::AppState,
};

/// Warning returned when the recording yields no transcript
pub(crate) const EMPTY_AUDIO_WARNING: &str = "⚠️ Could not transcribe audio.";

/// Error body for an empty synthesis request
pub(crate) const EMPTY_TEXT_ERROR: &str = "Empty text";

/// Error body when a newer request cancelled this synthesis
pub(crate) const SUPERSEDED_ERROR: &str = "TTS cancelled due to new input";

/// Error-shaped body returned by /tts with a success status
#[derive(Debug, Serialize)]
pub struct TtsErrorBody {
    pub error: String,
}

/// Handle a speech-to-text upload
///
/// Expects a multipart form with a `file` field holding the recording. The
/// audio format is taken from the part's content type, defaulting to WAV.
/// An empty transcript is answered with a warning reply, not an error.
#[instrument(skip(state, multipart))]
pub async fn stt(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ChatResponse>, ApiError> {
    let mut upload: Option<AudioData> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let format = field
            .content_type()
            .and_then(AudioFormat::from_mime_type)
            .unwrap_or(AudioFormat::Wav);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;

        upload = Some(AudioData::new(bytes.to_vec(), format));
        break;
    }

    let Some(audio) = upload else {
        return Err(ApiError::BadRequest(
            "Missing multipart field \"file\"".to_string(),
        ));
    };

    let transcript = state.transcription.transcribe(audio).await?;

    let reply = if transcript.is_empty() {
        EMPTY_AUDIO_WARNING.to_string()
    } else {
        transcript
    };

    Ok(Json(ChatResponse { reply }))
}

/// Handle a text-to-speech request
///
/// Responds with the synthesized MP3 bytes, or an `{error}` JSON body with a
/// success status when the text is empty or a newer request superseded this
/// one. Only provider failures produce an error status.
#[instrument(skip(state, request), fields(text_len = request.message.len()))]
pub async fn tts(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Response, ApiError> {
    let text = request.message.trim();
    if text.is_empty() {
        return Ok(Json(TtsErrorBody {
            error: EMPTY_TEXT_ERROR.to_string(),
        })
        .into_response());
    }

    match state.synthesis.synthesize(text).await? {
        SynthesisOutcome::Completed(audio) => {
            let bytes = audio
                .into_bytes()
                .await
                .map_err(|e| ApiError::Internal(e.to_string()))?;
            Ok(([(header::CONTENT_TYPE, "audio/mpeg")], bytes).into_response())
        },
        SynthesisOutcome::Superseded => Ok(Json(TtsErrorBody {
            error: SUPERSEDED_ERROR.to_string(),
        })
        .into_response()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tts_error_body_serialize() {
        let body = TtsErrorBody {
            error: EMPTY_TEXT_ERROR.to_string(),
        };
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"error":"Empty text"}"#);
    }

    #[test]
    fn superseded_body_is_distinct_from_empty_text() {
        assert_ne!(SUPERSEDED_ERROR, EMPTY_TEXT_ERROR);
    }
}
