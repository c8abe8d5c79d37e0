use std::sync::Arc;

use crate::application::ports::{
    IntentError, IntentExtractor, SpeechSynthesizer, SynthesisError, TranscriptionEngine,
    TranscriptionError, VisionError, VisionExtractor,
};
use crate::domain::{IntentParameters, MediaType, Upload};

/// Routes an upload to the pipeline matching its MIME-type prefix and
/// sequences the inference calls for that pipeline.
pub struct ProcessingService<V, T, I, S>
where
    V: VisionExtractor,
    T: TranscriptionEngine,
    I: IntentExtractor,
    S: SpeechSynthesizer,
{
    vision_extractor: Arc<V>,
    transcription_engine: Arc<T>,
    intent_extractor: Arc<I>,
    speech_synthesizer: Arc<S>,
}

impl<V, T, I, S> ProcessingService<V, T, I, S>
where
    V: VisionExtractor,
    T: TranscriptionEngine,
    I: IntentExtractor,
    S: SpeechSynthesizer,
{
    pub fn new(
        vision_extractor: Arc<V>,
        transcription_engine: Arc<T>,
        intent_extractor: Arc<I>,
        speech_synthesizer: Arc<S>,
    ) -> Self {
        Self {
            vision_extractor,
            transcription_engine,
            intent_extractor,
            speech_synthesizer,
        }
    }

    /// Process a single upload. The first failing step aborts the request;
    /// no partial result is returned for the audio path.
    pub async fn process(&self, upload: Upload) -> Result<ProcessingResult, ProcessingError> {
        match upload.media_type() {
            Some(MediaType::Image) => {
                let content = self
                    .vision_extractor
                    .extract_fields(&upload.data, &upload.mime_type)
                    .await?;

                tracing::info!(
                    filename = %upload.filename,
                    chars = content.len(),
                    "Image field extraction completed"
                );

                Ok(ProcessingResult::Image { content })
            }
            Some(MediaType::Audio) => {
                // Strictly sequential: each step consumes the previous output.
                let transcription = self
                    .transcription_engine
                    .transcribe(&upload.data)
                    .await?;

                let intent = self.intent_extractor.extract_intent(&transcription).await?;

                let audio_response = self
                    .speech_synthesizer
                    .synthesize(&intent.response)
                    .await?;

                tracing::info!(
                    filename = %upload.filename,
                    transcript_chars = transcription.len(),
                    "Audio pipeline completed"
                );

                Ok(ProcessingResult::Audio {
                    transcription,
                    intent,
                    audio_response,
                })
            }
            None => Err(ProcessingError::UnsupportedMediaType(
                upload.mime_type.clone(),
            )),
        }
    }
}

/// Outcome of one processed upload; the variant always matches the
/// MIME-type branch taken.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessingResult {
    Image {
        content: String,
    },
    Audio {
        transcription: String,
        intent: IntentParameters,
        audio_response: String,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),
    #[error("image extraction: {0}")]
    Vision(#[from] VisionError),
    #[error("transcription: {0}")]
    Transcription(#[from] TranscriptionError),
    #[error("intent extraction: {0}")]
    Intent(#[from] IntentError),
    #[error("speech synthesis: {0}")]
    Synthesis(#[from] SynthesisError),
}
