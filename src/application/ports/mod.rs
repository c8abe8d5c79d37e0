mod intent_extractor;
mod speech_synthesizer;
mod transcription_engine;
mod vision_extractor;

pub use intent_extractor::{IntentError, IntentExtractor};
pub use speech_synthesizer::{SpeechSynthesizer, SynthesisError};
pub use transcription_engine::{TranscriptionEngine, TranscriptionError};
pub use vision_extractor::{VisionError, VisionExtractor};
