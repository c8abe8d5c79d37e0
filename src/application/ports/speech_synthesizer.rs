use async_trait::async_trait;

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Render spoken audio for `text`, returned as a
    /// `data:audio/mpeg;base64,<payload>` data URL ready for playback.
    async fn synthesize(&self, text: &str) -> Result<String, SynthesisError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
}
