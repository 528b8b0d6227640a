//! AgriVoice HTTP Server
//!
//! Main entry point for the relay API server.

use std::sync::Arc;

use ai_core::GeminiTextGenerator;
use ai_speech::{DeepgramSpeechProvider, SpeechToText, TextToSpeech};
use application::{ChatService, SynthesisCoordinator, SynthesisService, TranscriptionService};
use presentation_http::{AppConfig, routes, state::AppState};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agrivoice_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("🌾 AgriVoice relay v{} starting...", env!("CARGO_PKG_VERSION"));

    // Missing provider credentials are fatal; the server refuses to start.
    let config = AppConfig::load().map_err(|e| anyhow::anyhow!("Configuration error: {e}"))?;

    info!(
        host = %config.server.host,
        port = %config.server.port,
        text_model = %config.gemini.default_model,
        stt_model = %config.deepgram.stt_model,
        tts_model = %config.deepgram.tts_model,
        "Configuration loaded"
    );

    let generator = GeminiTextGenerator::new(config.gemini.clone())
        .map_err(|e| anyhow::anyhow!("Failed to initialize text generation: {e}"))?;

    let speech = Arc::new(
        DeepgramSpeechProvider::new(config.deepgram.clone())
            .map_err(|e| anyhow::anyhow!("Failed to initialize speech provider: {e}"))?,
    );
    let stt: Arc<dyn SpeechToText> = speech.clone();
    let tts: Arc<dyn TextToSpeech> = speech;

    let chat = ChatService::new(Arc::new(generator));
    let transcription = TranscriptionService::new(stt);
    let synthesis = SynthesisCoordinator::spawn(SynthesisService::new(tts));

    let state = AppState {
        chat: Arc::new(chat),
        transcription: Arc::new(transcription),
        synthesis,
    };

    let app = routes::create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(routes::MAX_BODY_BYTES))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr).await?;

    info!("🚀 Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Server shutdown complete");

    Ok(())
}

/// Wait for SIGINT or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("📥 Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("📥 Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
