//! End-to-end tests over the HTTP surface with stubbed providers

use std::sync::Arc;

use ai_core::{GenerationRequest, GenerationResponse, InferenceError, TextGenerator};
use ai_speech::{AudioData, AudioFormat, SpeechError, SpeechToText, TextToSpeech, Transcription};
use application::{ChatService, SynthesisCoordinator, SynthesisService, TranscriptionService};
use async_trait::async_trait;
use axum_test::{
    TestServer,
    multipart::{MultipartForm, Part},
};
use presentation_http::{create_router, state::AppState};
use serde_json::{Value, json};

/// Generator answering every prompt with a fixed reply
struct CannedGenerator {
    reply: &'static str,
}

#[async_trait]
impl TextGenerator for CannedGenerator {
    async fn generate(
        &self,
        _request: GenerationRequest,
    ) -> Result<GenerationResponse, InferenceError> {
        Ok(GenerationResponse {
            content: self.reply.to_string(),
            model: "gemini-2.5-flash".to_string(),
            finish_reason: Some("STOP".to_string()),
        })
    }

    async fn health_check(&self) -> Result<bool, InferenceError> {
        Ok(true)
    }

    fn default_model(&self) -> &str {
        "gemini-2.5-flash"
    }
}

/// Generator standing in for an unreachable provider
struct DownGenerator;

#[async_trait]
impl TextGenerator for DownGenerator {
    async fn generate(
        &self,
        _request: GenerationRequest,
    ) -> Result<GenerationResponse, InferenceError> {
        Err(InferenceError::ConnectionFailed("unreachable".to_string()))
    }

    async fn health_check(&self) -> Result<bool, InferenceError> {
        Ok(false)
    }

    fn default_model(&self) -> &str {
        "gemini-2.5-flash"
    }
}

/// Speech provider echoing synthesis input and returning a fixed transcript
struct EchoSpeech;

#[async_trait]
impl SpeechToText for EchoSpeech {
    async fn transcribe(&self, _audio: AudioData) -> Result<Transcription, SpeechError> {
        Ok(Transcription::new("how do I grow paddy"))
    }

    async fn is_available(&self) -> bool {
        true
    }

    fn model_name(&self) -> &str {
        "nova-2"
    }
}

#[async_trait]
impl TextToSpeech for EchoSpeech {
    async fn synthesize(&self, text: &str) -> Result<AudioData, SpeechError> {
        Ok(AudioData::new(text.as_bytes().to_vec(), AudioFormat::Mp3))
    }

    async fn is_available(&self) -> bool {
        true
    }

    fn model_name(&self) -> &str {
        "aura-asteria-en"
    }
}

/// Speech provider hearing nothing in every recording
struct SilentSpeech;

#[async_trait]
impl SpeechToText for SilentSpeech {
    async fn transcribe(&self, _audio: AudioData) -> Result<Transcription, SpeechError> {
        Ok(Transcription::new(""))
    }

    async fn is_available(&self) -> bool {
        true
    }

    fn model_name(&self) -> &str {
        "nova-2"
    }
}

fn build_server(
    generator: Arc<dyn TextGenerator>,
    stt: Arc<dyn SpeechToText>,
    tts: Arc<dyn TextToSpeech>,
) -> TestServer {
    let state = AppState {
        chat: Arc::new(ChatService::new(generator)),
        transcription: Arc::new(TranscriptionService::new(stt)),
        synthesis: SynthesisCoordinator::spawn(SynthesisService::new(tts)),
    };

    TestServer::new(create_router(state)).unwrap()
}

fn server_with_generator(generator: Arc<dyn TextGenerator>) -> TestServer {
    let speech = Arc::new(EchoSpeech);
    build_server(generator, speech.clone(), speech)
}

fn server_with_reply(reply: &'static str) -> TestServer {
    server_with_generator(Arc::new(CannedGenerator { reply }))
}

#[tokio::test]
async fn health_endpoint_is_ok() {
    let server = server_with_reply("unused");

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn ready_endpoint_reflects_providers() {
    let server = server_with_reply("unused");

    let response = server.get("/ready").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["ready"], true);
}

#[tokio::test]
async fn chat_returns_the_generated_reply() {
    let server = server_with_reply("Sow paddy after the first rains.");

    let response = server
        .post("/chat")
        .json(&json!({ "message": "When should I sow paddy?" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["reply"], "Sow paddy after the first rains.");
}

#[tokio::test]
async fn chat_strips_markdown_from_the_reply() {
    let server = server_with_reply("Use **organic** manure.");

    let response = server
        .post("/chat")
        .json(&json!({ "message": "fertilizer?" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["reply"], "Use organic manure.");
}

#[tokio::test]
async fn empty_chat_message_gets_a_warning_with_success_status() {
    let server = server_with_reply("unused");

    let response = server.post("/chat").json(&json!({ "message": "   " })).await;

    response.assert_status_ok();
    let body: Value = response.json();
    let reply = body["reply"].as_str().unwrap();
    assert!(!reply.is_empty());
    assert!(reply.contains("valid message"));
}

#[tokio::test]
async fn greeting_is_answered_without_the_provider() {
    let server = server_with_generator(Arc::new(DownGenerator));

    let response = server.post("/chat").json(&json!({ "message": "hello" })).await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(
        body["reply"],
        "Hi! I'm your Kerala Agri Chatbot. Ask me about farming, weather, or anything else!"
    );
}

#[tokio::test]
async fn provider_failure_surfaces_as_generic_error_status() {
    let server = server_with_generator(Arc::new(DownGenerator));

    let response = server
        .post("/chat")
        .json(&json!({ "message": "non-greeting question" }))
        .await;

    response.assert_status(axum::http::StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json();
    assert_eq!(body["code"], "service_unavailable");
}

fn voice_upload(field: &str) -> MultipartForm {
    MultipartForm::new().add_part(
        field.to_string(),
        Part::bytes(vec![0u8; 64])
            .file_name("voice.wav")
            .mime_type("audio/wav"),
    )
}

#[tokio::test]
async fn stt_returns_the_transcript() {
    let server = server_with_reply("unused");

    let response = server.post("/stt").multipart(voice_upload("file")).await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["reply"], "how do I grow paddy");
}

#[tokio::test]
async fn silent_recording_gets_a_warning_with_success_status() {
    let server = build_server(
        Arc::new(CannedGenerator { reply: "unused" }),
        Arc::new(SilentSpeech),
        Arc::new(EchoSpeech),
    );

    let response = server.post("/stt").multipart(voice_upload("file")).await;

    response.assert_status_ok();
    let body: Value = response.json();
    let reply = body["reply"].as_str().unwrap();
    assert!(!reply.is_empty());
    assert!(reply.contains("transcribe"));
}

#[tokio::test]
async fn stt_without_a_file_field_is_a_bad_request() {
    let server = server_with_reply("unused");

    let response = server
        .post("/stt")
        .multipart(voice_upload("attachment"))
        .await;

    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "bad_request");
}

#[tokio::test]
async fn tts_returns_audio_bytes() {
    let server = server_with_reply("unused");

    let response = server
        .post("/tts")
        .json(&json!({ "message": "rain is expected." }))
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "audio/mpeg"
    );
    assert_eq!(response.as_bytes().as_ref(), b"rain is expected.".as_slice());
}

#[tokio::test]
async fn empty_tts_message_gets_an_error_body_with_success_status() {
    let server = server_with_reply("unused");

    let response = server.post("/tts").json(&json!({ "message": "" })).await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["error"], "Empty text");
}

#[tokio::test]
async fn stream_chat_emits_tokens_and_a_done_sentinel() {
    let server = server_with_reply("rain is expected");

    let response = server
        .get("/stream-chat")
        .add_query_param("query", "weather?")
        .await;

    response.assert_status_ok();
    let text = response.text();

    assert_eq!(text.matches("{\"text\":").count(), 3);
    assert!(text.contains("rain "));
    assert!(text.contains("expected "));
    assert!(text.contains("[DONE]"));
}

#[tokio::test]
async fn stream_chat_with_empty_query_streams_the_warning() {
    let server = server_with_reply("unused");

    let response = server
        .get("/stream-chat")
        .add_query_param("query", "  ")
        .await;

    response.assert_status_ok();
    let text = response.text();
    assert!(text.contains("message."));
    assert!(text.contains("[DONE]"));
}
