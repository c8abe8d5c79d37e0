use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};

use crate::application::ports::{SpeechSynthesizer, SynthesisError};

use super::DEFAULT_BASE_URL;

const TONE_INSTRUCTIONS: &str = "Speak in a cheerful and positive tone.";

pub struct OpenAiSpeechSynthesizer {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    voice: String,
}

impl OpenAiSpeechSynthesizer {
    pub fn new(
        api_key: String,
        base_url: Option<String>,
        model: Option<String>,
        voice: Option<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: model.unwrap_or_else(|| "gpt-4o-mini-tts".to_string()),
            voice: voice.unwrap_or_else(|| "coral".to_string()),
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for OpenAiSpeechSynthesizer {
    #[tracing::instrument(skip(self, text), fields(chars = text.len()))]
    async fn synthesize(&self, text: &str) -> Result<String, SynthesisError> {
        let url = format!("{}/audio/speech", self.base_url);

        let body = serde_json::json!({
            "model": self.model,
            "voice": self.voice,
            "input": text,
            "instructions": TONE_INSTRUCTIONS
        });

        tracing::debug!(model = %self.model, voice = %self.voice, "Requesting speech synthesis");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| SynthesisError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(SynthesisError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let audio_bytes = response
            .bytes()
            .await
            .map_err(|e| SynthesisError::ApiRequestFailed(format!("body: {}", e)))?;

        tracing::info!(bytes = audio_bytes.len(), "Speech synthesis completed");

        let b64 = general_purpose::STANDARD.encode(&audio_bytes);
        Ok(format!("data:audio/mpeg;base64,{b64}"))
    }
}
