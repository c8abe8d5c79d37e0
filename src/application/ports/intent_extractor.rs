use async_trait::async_trait;

use crate::domain::IntentParameters;

#[async_trait]
pub trait IntentExtractor: Send + Sync {
    /// Interpret a transcribed utterance into structured intent parameters.
    ///
    /// A payload that cannot be parsed into an object is an error, never a
    /// substitute value; the request fails as a whole.
    async fn extract_intent(&self, transcription: &str)
        -> Result<IntentParameters, IntentError>;
}

#[derive(Debug, thiserror::Error)]
pub enum IntentError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("model returned no content")]
    EmptyResponse,
    #[error("model returned a non-JSON intent payload: {0}")]
    MalformedResponse(String),
}
