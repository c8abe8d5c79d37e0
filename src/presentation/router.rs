use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{
    IntentExtractor, SpeechSynthesizer, TranscriptionEngine, VisionExtractor,
};
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{health_handler, process_handler};
use crate::presentation::state::AppState;

pub fn create_router<V, T, I, S>(state: AppState<V, T, I, S>) -> Router
where
    V: VisionExtractor + 'static,
    T: TranscriptionEngine + 'static,
    I: IntentExtractor + 'static,
    S: SpeechSynthesizer + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/v1/process", post(process_handler::<V, T, I, S>))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
