//! Ollama text generation client.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use sheetpilot_config::LlmConfig;
use sheetpilot_protocols::{ExtractError, TextGenerator};

/// Client for a local Ollama server's `/api/generate` endpoint.
pub struct OllamaGenerator {
    base_url: String,
    model: String,
    temperature: Option<f32>,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<GenerateOptions>,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaGenerator {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            temperature: None,
            client,
        }
    }

    pub fn from_config(config: &LlmConfig) -> Self {
        let mut generator = Self::new(
            &config.base_url,
            &config.model,
            Duration::from_secs(config.timeout_secs),
        );
        generator.temperature = config.temperature;
        generator
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/api/generate", self.base_url)
    }
}

#[async_trait]
impl TextGenerator for OllamaGenerator {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<String, ExtractError> {
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: self.temperature.map(|temperature| GenerateOptions { temperature }),
        };

        info!("Sending extraction prompt to {} ({})", self.model, self.base_url);
        let response = self
            .client
            .post(self.endpoint())
            .json(&request)
            .send()
            .await
            .map_err(|e| ExtractError::Unavailable(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ExtractError::Unavailable(e.to_string()))?;

        if !status.is_success() {
            return Err(ExtractError::Generation {
                status: status.as_u16(),
                message: body,
            });
        }

        let parsed: GenerateResponse =
            serde_json::from_str(&body).map_err(|e| ExtractError::MalformedResponse {
                reason: format!("unexpected generate response: {e}"),
                raw: body.clone(),
            })?;

        debug!(chars = parsed.response.len(), "Model response received");
        Ok(parsed.response.trim().to_string())
    }
}

#[cfg(test)]
#[path = "ollama_tests.rs"]
mod tests;
