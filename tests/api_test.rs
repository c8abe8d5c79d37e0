use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use base64::{Engine as _, engine::general_purpose};
use tower::ServiceExt;

use medley::application::ports::{
    IntentError, IntentExtractor, SpeechSynthesizer, SynthesisError, TranscriptionEngine,
    TranscriptionError, VisionError, VisionExtractor,
};
use medley::application::services::ProcessingService;
use medley::domain::IntentParameters;
use medley::presentation::{AppState, UploadSettings, create_router};

const TEST_MAX_FILE_SIZE_MB: usize = 1;
const TEST_EXTRACTED_FIELDS: &str = r#"{"name":"Jane Doe","phone":"555-1234"}"#;
const TEST_TRANSCRIPT: &str = "turn on the lights";
const TEST_INTENT_RESPONSE: &str = "Sure, turning on the lights!";
const TEST_AUDIO_BYTES: &[u8] = b"mpeg frames";

#[derive(Default)]
struct PipelineCounters {
    vision: AtomicUsize,
    transcription: AtomicUsize,
    intent: AtomicUsize,
    synthesis: AtomicUsize,
}

struct MockVisionExtractor {
    counters: Arc<PipelineCounters>,
}

#[async_trait::async_trait]
impl VisionExtractor for MockVisionExtractor {
    async fn extract_fields(
        &self,
        _image: &[u8],
        _mime_type: &str,
    ) -> Result<String, VisionError> {
        self.counters.vision.fetch_add(1, Ordering::SeqCst);
        Ok(TEST_EXTRACTED_FIELDS.to_string())
    }
}

struct MockTranscriptionEngine {
    counters: Arc<PipelineCounters>,
}

#[async_trait::async_trait]
impl TranscriptionEngine for MockTranscriptionEngine {
    async fn transcribe(&self, _audio_data: &[u8]) -> Result<String, TranscriptionError> {
        self.counters.transcription.fetch_add(1, Ordering::SeqCst);
        Ok(TEST_TRANSCRIPT.to_string())
    }
}

struct FailingTranscriptionEngine {
    counters: Arc<PipelineCounters>,
}

#[async_trait::async_trait]
impl TranscriptionEngine for FailingTranscriptionEngine {
    async fn transcribe(&self, _audio_data: &[u8]) -> Result<String, TranscriptionError> {
        self.counters.transcription.fetch_add(1, Ordering::SeqCst);
        Err(TranscriptionError::ApiRequestFailed(
            "status 500 Internal Server Error: upstream down".to_string(),
        ))
    }
}

struct MockIntentExtractor {
    counters: Arc<PipelineCounters>,
}

#[async_trait::async_trait]
impl IntentExtractor for MockIntentExtractor {
    async fn extract_intent(
        &self,
        _transcription: &str,
    ) -> Result<IntentParameters, IntentError> {
        self.counters.intent.fetch_add(1, Ordering::SeqCst);
        let mut intent = IntentParameters::new(TEST_INTENT_RESPONSE);
        intent.extra.insert(
            "action".to_string(),
            serde_json::Value::String("turn_on_lights".to_string()),
        );
        Ok(intent)
    }
}

struct MockSpeechSynthesizer {
    counters: Arc<PipelineCounters>,
    last_input: Arc<Mutex<Option<String>>>,
}

#[async_trait::async_trait]
impl SpeechSynthesizer for MockSpeechSynthesizer {
    async fn synthesize(&self, text: &str) -> Result<String, SynthesisError> {
        self.counters.synthesis.fetch_add(1, Ordering::SeqCst);
        *self.last_input.lock().unwrap() = Some(text.to_string());
        Ok(format!(
            "data:audio/mpeg;base64,{}",
            general_purpose::STANDARD.encode(TEST_AUDIO_BYTES)
        ))
    }
}

struct TestHarness {
    app: axum::Router,
    counters: Arc<PipelineCounters>,
    last_synthesis_input: Arc<Mutex<Option<String>>>,
}

fn create_test_app() -> TestHarness {
    let counters = Arc::new(PipelineCounters::default());
    let last_synthesis_input = Arc::new(Mutex::new(None));

    let processing_service = Arc::new(ProcessingService::new(
        Arc::new(MockVisionExtractor {
            counters: Arc::clone(&counters),
        }),
        Arc::new(MockTranscriptionEngine {
            counters: Arc::clone(&counters),
        }),
        Arc::new(MockIntentExtractor {
            counters: Arc::clone(&counters),
        }),
        Arc::new(MockSpeechSynthesizer {
            counters: Arc::clone(&counters),
            last_input: Arc::clone(&last_synthesis_input),
        }),
    ));

    let app = create_router(AppState {
        processing_service,
        upload_settings: UploadSettings {
            max_file_size_mb: TEST_MAX_FILE_SIZE_MB,
        },
    });

    TestHarness {
        app,
        counters,
        last_synthesis_input,
    }
}

fn create_failing_transcription_app() -> TestHarness {
    let counters = Arc::new(PipelineCounters::default());
    let last_synthesis_input = Arc::new(Mutex::new(None));

    let processing_service = Arc::new(ProcessingService::new(
        Arc::new(MockVisionExtractor {
            counters: Arc::clone(&counters),
        }),
        Arc::new(FailingTranscriptionEngine {
            counters: Arc::clone(&counters),
        }),
        Arc::new(MockIntentExtractor {
            counters: Arc::clone(&counters),
        }),
        Arc::new(MockSpeechSynthesizer {
            counters: Arc::clone(&counters),
            last_input: Arc::clone(&last_synthesis_input),
        }),
    ));

    let app = create_router(AppState {
        processing_service,
        upload_settings: UploadSettings {
            max_file_size_mb: TEST_MAX_FILE_SIZE_MB,
        },
    });

    TestHarness {
        app,
        counters,
        last_synthesis_input,
    }
}

fn process_request(name: &str, mime_type: &str, bytes: &[u8]) -> Request<Body> {
    let body = serde_json::json!({
        "file": {
            "name": name,
            "type": mime_type,
            "data": general_purpose::STANDARD.encode(bytes),
        }
    });

    Request::builder()
        .method("POST")
        .uri("/api/v1/process")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn given_running_server_when_health_check_then_returns_ok() {
    let harness = create_test_app();

    let response = harness
        .app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn given_unsupported_mime_type_when_processing_then_rejects_without_inference_calls() {
    let harness = create_test_app();

    let response = harness
        .app
        .oneshot(process_request("report.pdf", "application/pdf", b"%PDF-1.4"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(harness.counters.vision.load(Ordering::SeqCst), 0);
    assert_eq!(harness.counters.transcription.load(Ordering::SeqCst), 0);
    assert_eq!(harness.counters.intent.load(Ordering::SeqCst), 0);
    assert_eq!(harness.counters.synthesis.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn given_jpeg_upload_when_processing_then_returns_extracted_fields_verbatim() {
    let harness = create_test_app();

    let response = harness
        .app
        .oneshot(process_request(
            "business-card.jpg",
            "image/jpeg",
            b"\xff\xd8\xff\xe0fake jpeg",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    assert_eq!(json["kind"], "image");
    assert_eq!(json["data"]["content"], TEST_EXTRACTED_FIELDS);

    assert_eq!(harness.counters.vision.load(Ordering::SeqCst), 1);
    assert_eq!(harness.counters.transcription.load(Ordering::SeqCst), 0);
    assert_eq!(harness.counters.synthesis.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn given_wav_upload_when_processing_then_returns_full_audio_result() {
    let harness = create_test_app();

    let response = harness
        .app
        .oneshot(process_request("command.wav", "audio/wav", b"RIFFfake wav"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    assert_eq!(json["kind"], "audio");
    assert_eq!(json["data"]["transcription"], TEST_TRANSCRIPT);
    assert_eq!(json["data"]["intentParameters"]["response"], TEST_INTENT_RESPONSE);
    assert_eq!(json["data"]["intentParameters"]["action"], "turn_on_lights");

    let audio_response = json["data"]["audioResponse"].as_str().unwrap();
    let payload = audio_response
        .strip_prefix("data:audio/mpeg;base64,")
        .expect("audio response must be an mpeg data URL");
    assert!(!payload.is_empty());
    assert_eq!(
        general_purpose::STANDARD.decode(payload).unwrap(),
        TEST_AUDIO_BYTES
    );

    assert_eq!(harness.counters.transcription.load(Ordering::SeqCst), 1);
    assert_eq!(harness.counters.intent.load(Ordering::SeqCst), 1);
    assert_eq!(harness.counters.synthesis.load(Ordering::SeqCst), 1);
    assert_eq!(harness.counters.vision.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn given_audio_pipeline_when_synthesizing_then_receives_exact_intent_response() {
    let harness = create_test_app();

    let response = harness
        .app
        .oneshot(process_request("command.wav", "audio/wav", b"RIFFfake wav"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        harness.last_synthesis_input.lock().unwrap().as_deref(),
        Some(TEST_INTENT_RESPONSE)
    );
}

#[tokio::test]
async fn given_invalid_base64_data_when_processing_then_returns_bad_request() {
    let harness = create_test_app();

    let body = serde_json::json!({
        "file": {
            "name": "photo.png",
            "type": "image/png",
            "data": "!!!not base64!!!",
        }
    });

    let response = harness
        .app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/process")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(harness.counters.vision.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn given_oversized_upload_when_processing_then_returns_payload_too_large() {
    let harness = create_test_app();
    let oversized = vec![0u8; TEST_MAX_FILE_SIZE_MB * 1024 * 1024 + 1];

    let response = harness
        .app
        .oneshot(process_request("big.png", "image/png", &oversized))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(harness.counters.vision.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn given_missing_body_when_processing_then_returns_bad_request() {
    let harness = create_test_app();

    let response = harness
        .app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/process")
                .header("content-type", "application/json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn given_transcription_failure_when_processing_then_aborts_without_partial_result() {
    let harness = create_failing_transcription_app();

    let response = harness
        .app
        .oneshot(process_request("command.wav", "audio/wav", b"RIFFfake wav"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = response_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("transcription"));

    // The pipeline stops at the first failure.
    assert_eq!(harness.counters.transcription.load(Ordering::SeqCst), 1);
    assert_eq!(harness.counters.intent.load(Ordering::SeqCst), 0);
    assert_eq!(harness.counters.synthesis.load(Ordering::SeqCst), 0);
    assert!(harness.last_synthesis_input.lock().unwrap().is_none());
}

#[tokio::test]
async fn given_request_without_id_when_any_endpoint_then_response_contains_request_id() {
    let harness = create_test_app();

    let response = harness
        .app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn given_request_with_id_when_any_endpoint_then_response_echoes_request_id() {
    let harness = create_test_app();

    let response = harness
        .app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("x-request-id", "test-request-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers().get("x-request-id").unwrap(),
        "test-request-123"
    );
}
