use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use serde::Deserialize;

use crate::application::ports::{VisionError, VisionExtractor};

use super::DEFAULT_BASE_URL;

const FIELD_EXTRACTION_PROMPT: &str = "Extract all clearly labeled fields from this image of a \
     printed card or document and return them as a JSON object with key-value pairs. Respond in JSON";

/// Placeholder returned when the model produces no content at all.
const NO_CONTENT_FALLBACK: &str = "No response generated";

pub struct OpenAiVisionExtractor {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiVisionExtractor {
    pub fn new(api_key: String, base_url: Option<String>, model: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: model.unwrap_or_else(|| "gpt-4.1".to_string()),
        }
    }
}

#[derive(Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[async_trait]
impl VisionExtractor for OpenAiVisionExtractor {
    #[tracing::instrument(skip(self, image, mime_type), fields(bytes = image.len(), mime_type = %mime_type))]
    async fn extract_fields(&self, image: &[u8], mime_type: &str) -> Result<String, VisionError> {
        let b64 = general_purpose::STANDARD.encode(image);
        let data_url = format!("data:{mime_type};base64,{b64}");

        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                {
                    "role": "user",
                    "content": [
                        {
                            "type": "text",
                            "text": FIELD_EXTRACTION_PROMPT
                        },
                        {
                            "type": "image_url",
                            "image_url": { "url": data_url, "detail": "high" }
                        }
                    ]
                }
            ],
            "response_format": { "type": "json_object" }
        });

        let url = format!("{}/chat/completions", self.base_url);

        tracing::debug!(model = %self.model, "Sending image to vision model");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| VisionError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(VisionError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let completion: ChatCompletion = response
            .json()
            .await
            .map_err(|e| VisionError::InvalidResponse(format!("parse response: {}", e)))?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content);

        let content = match content {
            Some(text) => text,
            None => {
                tracing::warn!("Vision model returned no content");
                NO_CONTENT_FALLBACK.to_string()
            }
        };

        tracing::info!(chars = content.len(), "Image field extraction completed");

        Ok(content)
    }
}
