use std::sync::Arc;

use crate::application::ports::{
    IntentExtractor, SpeechSynthesizer, TranscriptionEngine, VisionExtractor,
};
use crate::application::services::ProcessingService;
use crate::presentation::config::UploadSettings;

pub struct AppState<V, T, I, S>
where
    V: VisionExtractor,
    T: TranscriptionEngine,
    I: IntentExtractor,
    S: SpeechSynthesizer,
{
    pub processing_service: Arc<ProcessingService<V, T, I, S>>,
    pub upload_settings: UploadSettings,
}

impl<V, T, I, S> Clone for AppState<V, T, I, S>
where
    V: VisionExtractor,
    T: TranscriptionEngine,
    I: IntentExtractor,
    S: SpeechSynthesizer,
{
    fn clone(&self) -> Self {
        Self {
            processing_service: Arc::clone(&self.processing_service),
            upload_settings: self.upload_settings.clone(),
        }
    }
}
