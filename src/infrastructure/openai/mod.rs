mod intent_extractor;
mod speech_synthesizer;
mod transcription_engine;
mod vision_extractor;

pub use intent_extractor::OpenAiIntentExtractor;
pub use speech_synthesizer::OpenAiSpeechSynthesizer;
pub use transcription_engine::OpenAiTranscriptionEngine;
pub use vision_extractor::OpenAiVisionExtractor;

pub(crate) const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
