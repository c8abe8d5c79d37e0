use async_trait::async_trait;
use serde::Deserialize;

use crate::application::ports::{IntentError, IntentExtractor};
use crate::domain::IntentParameters;
use crate::infrastructure::observability::sanitize_prompt;

use super::DEFAULT_BASE_URL;

const INTENT_SYSTEM_PROMPT: &str = "Extract intent and parameters from the user's command. \
     Respond in JSON as a single object. The object must always have a 'response' property \
     whose value is a string that naturally responds to the transcription text. You may \
     include other properties as needed.";

pub struct OpenAiIntentExtractor {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiIntentExtractor {
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
impl IntentExtractor for OpenAiIntentExtractor {
    #[tracing::instrument(skip(self, transcription))]
    async fn extract_intent(
        &self,
        transcription: &str,
    ) -> Result<IntentParameters, IntentError> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                {
                    "role": "system",
                    "content": INTENT_SYSTEM_PROMPT
                },
                {
                    "role": "user",
                    "content": [
                        {
                            "type": "text",
                            "text": transcription
                        }
                    ]
                }
            ],
            "response_format": { "type": "json_object" }
        });

        let url = format!("{}/chat/completions", self.base_url);

        tracing::debug!(
            model = %self.model,
            transcription = %sanitize_prompt(transcription),
            "Requesting intent parameters"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| IntentError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(IntentError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let completion: ChatCompletion = response
            .json()
            .await
            .map_err(|e| IntentError::ApiRequestFailed(format!("parse response: {}", e)))?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(IntentError::EmptyResponse)?;

        // The model is asked for JSON but nothing enforces it; a payload
        // that does not parse into an object fails the request.
        let intent: IntentParameters = serde_json::from_str(&content).map_err(|e| {
            tracing::warn!(error = %e, raw = %sanitize_prompt(&content), "Intent payload was not valid JSON");
            IntentError::MalformedResponse(content.clone())
        })?;

        tracing::info!(
            extra_keys = intent.extra.len(),
            "Intent extraction completed"
        );

        Ok(intent)
    }
}
