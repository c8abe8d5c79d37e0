use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use base64::{Engine as _, engine::general_purpose};
use serde::{Deserialize, Serialize};

use crate::application::ports::{
    IntentExtractor, SpeechSynthesizer, TranscriptionEngine, VisionExtractor,
};
use crate::application::services::{ProcessingError, ProcessingResult};
use crate::domain::{IntentParameters, Upload};
use crate::presentation::state::AppState;

#[derive(Deserialize)]
pub struct ProcessRequest {
    pub file: FilePayload,
}

#[derive(Deserialize)]
pub struct FilePayload {
    pub name: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    /// File content, standard base64.
    pub data: String,
}

#[derive(Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "lowercase")]
pub enum ProcessResponse {
    Image {
        content: String,
    },
    Audio {
        transcription: String,
        #[serde(rename = "intentParameters")]
        intent_parameters: IntentParameters,
        #[serde(rename = "audioResponse")]
        audio_response: String,
    },
}

impl From<ProcessingResult> for ProcessResponse {
    fn from(result: ProcessingResult) -> Self {
        match result {
            ProcessingResult::Image { content } => Self::Image { content },
            ProcessingResult::Audio {
                transcription,
                intent,
                audio_response,
            } => Self::Audio {
                transcription,
                intent_parameters: intent,
                audio_response,
            },
        }
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[tracing::instrument(
    skip(state, request),
    fields(filename = %request.file.name, mime_type = %request.file.mime_type)
)]
pub async fn process_handler<V, T, I, S>(
    State(state): State<AppState<V, T, I, S>>,
    Json(request): Json<ProcessRequest>,
) -> impl IntoResponse
where
    V: VisionExtractor + 'static,
    T: TranscriptionEngine + 'static,
    I: IntentExtractor + 'static,
    S: SpeechSynthesizer + 'static,
{
    let data = match general_purpose::STANDARD.decode(&request.file.data) {
        Ok(d) => d,
        Err(e) => {
            tracing::warn!(error = %e, "Upload payload was not valid base64");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Invalid base64 file data: {}", e),
                }),
            )
                .into_response();
        }
    };

    tracing::debug!(bytes = data.len(), "File data received");

    if data.len() > state.upload_settings.max_file_size_bytes() {
        tracing::warn!(
            bytes = data.len(),
            limit_mb = state.upload_settings.max_file_size_mb,
            "Upload exceeds size limit"
        );
        return (
            StatusCode::PAYLOAD_TOO_LARGE,
            Json(ErrorResponse {
                error: format!(
                    "File exceeds the {} MB upload limit",
                    state.upload_settings.max_file_size_mb
                ),
            }),
        )
            .into_response();
    }

    let upload = Upload::new(request.file.name, request.file.mime_type, data);

    match state.processing_service.process(upload).await {
        Ok(result) => (StatusCode::OK, Json(ProcessResponse::from(result))).into_response(),
        Err(ProcessingError::UnsupportedMediaType(mime)) => {
            tracing::warn!(mime_type = %mime, "Unsupported media type");
            (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                Json(ErrorResponse {
                    error: format!("Unsupported file type: {}", mime),
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Processing failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Processing failed: {}", e),
                }),
            )
                .into_response()
        }
    }
}
