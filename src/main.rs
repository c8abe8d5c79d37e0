use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use medley::application::services::ProcessingService;
use medley::infrastructure::observability::{TracingConfig, init_tracing};
use medley::infrastructure::openai::{
    OpenAiIntentExtractor, OpenAiSpeechSynthesizer, OpenAiTranscriptionEngine,
    OpenAiVisionExtractor,
};
use medley::presentation::{AppState, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env()?;

    init_tracing(TracingConfig::default(), settings.server.port);

    let openai = &settings.openai;

    let vision_extractor = Arc::new(OpenAiVisionExtractor::new(
        openai.api_key.clone(),
        openai.base_url.clone(),
        openai.vision_model.clone(),
    ));
    let transcription_engine = Arc::new(OpenAiTranscriptionEngine::new(
        openai.api_key.clone(),
        openai.base_url.clone(),
        openai.transcription_model.clone(),
    ));
    let intent_extractor = Arc::new(OpenAiIntentExtractor::new(
        openai.api_key.clone(),
        openai.base_url.clone(),
        openai.intent_model.clone(),
    ));
    let speech_synthesizer = Arc::new(OpenAiSpeechSynthesizer::new(
        openai.api_key.clone(),
        openai.base_url.clone(),
        openai.speech_model.clone(),
        openai.speech_voice.clone(),
    ));

    let processing_service = Arc::new(ProcessingService::new(
        vision_extractor,
        transcription_engine,
        intent_extractor,
        speech_synthesizer,
    ));

    let state = AppState {
        processing_service,
        upload_settings: settings.upload.clone(),
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
