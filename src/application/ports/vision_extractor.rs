use async_trait::async_trait;

#[async_trait]
pub trait VisionExtractor: Send + Sync {
    /// Extract labeled fields from an image as model-produced text.
    ///
    /// The returned string is the model output verbatim. It is requested as
    /// JSON but not guaranteed to parse; the caller owns that decision.
    async fn extract_fields(&self, image: &[u8], mime_type: &str) -> Result<String, VisionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum VisionError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
