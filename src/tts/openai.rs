//! OpenAI speech API adapter.
//!
//! Maps the remote service to the [`SpeechSynthesizer`] contract: input is
//! clamped to the provider limit, the credential is checked before any
//! network traffic, and every provider or transport failure is returned as
//! an error value.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::config::PipelineConfig;
use crate::error::{ArtigoTtsError, Result};
use crate::tts::{clamp_input, SpeechSynthesizer};

const SPEECH_ENDPOINT: &str = "https://api.openai.com/v1/audio/speech";

/// Speech synthesis through the OpenAI API.
pub struct OpenAiTts {
    client: Client,
    api_key: String,
    model: String,
    voice: String,
    response_format: String,
}

impl OpenAiTts {
    /// Build an adapter from the pipeline configuration. The HTTP client
    /// carries the configured per-request timeout.
    pub fn new(config: &PipelineConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(ArtigoTtsError::Http)?;

        Ok(Self {
            client,
            api_key: config.openai_api_key.clone(),
            model: config.tts_model.as_str().to_string(),
            voice: config.tts_voice.as_str().to_string(),
            response_format: config.audio_format.as_str().to_string(),
        })
    }
}

#[async_trait]
impl SpeechSynthesizer for OpenAiTts {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
        if self.api_key.trim().is_empty() {
            return Err(ArtigoTtsError::MissingCredential);
        }

        let input = clamp_input(text);
        if input.len() < text.len() {
            log::warn!(
                "input truncated from {} to {} characters before synthesis",
                text.chars().count(),
                input.chars().count()
            );
        }

        log::info!(
            "sending speech request: model={} voice={} format={} chars={}",
            self.model,
            self.voice,
            self.response_format,
            input.chars().count()
        );

        let response = self
            .client
            .post(SPEECH_ENDPOINT)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&serde_json::json!({
                "model": self.model,
                "voice": self.voice,
                "input": input,
                "response_format": self.response_format,
            }))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ArtigoTtsError::Synthesis("speech request timed out".to_string())
                } else {
                    ArtigoTtsError::Http(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|e| format!("failed to read error response: {}", e));
            let message = extract_api_error(&error_text);
            log::error!("OpenAI API error (status {}): {}", status, message);
            return Err(ArtigoTtsError::Synthesis(format!(
                "API error ({}): {}",
                status, message
            )));
        }

        let bytes = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                ArtigoTtsError::Synthesis("speech response timed out".to_string())
            } else {
                ArtigoTtsError::Http(e)
            }
        })?;
        if bytes.is_empty() {
            return Err(ArtigoTtsError::Synthesis(
                "received empty audio response".to_string(),
            ));
        }

        log::info!("received {} bytes of audio", bytes.len());
        Ok(bytes.to_vec())
    }
}

/// Pull the `error.message` field out of an API error body, falling back
/// to the raw body when it is not the expected JSON shape.
fn extract_api_error(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v["error"]["message"]
                .as_str()
                .map(|s| s.to_string())
        })
        .unwrap_or_else(|| body.to_string())
}
