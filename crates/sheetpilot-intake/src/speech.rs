//! Speech-to-text over an OpenAI-compatible transcription endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::{info, warn};

use sheetpilot_config::SpeechConfig;
use sheetpilot_protocols::{AudioClip, TranscribeError, Transcriber};

/// Uploads audio as multipart form data and reads back `{"text": ...}`.
pub struct HttpTranscriber {
    url: String,
    api_key: Option<String>,
    model: String,
    language: Option<String>,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    #[serde(default)]
    text: String,
}

impl HttpTranscriber {
    pub fn new(url: impl Into<String>, model: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self {
            url: url.into(),
            api_key: None,
            model: model.into(),
            language: None,
            client,
        }
    }

    pub fn from_config(config: &SpeechConfig) -> Self {
        let mut transcriber = Self::new(
            &config.url,
            &config.model,
            Duration::from_secs(config.timeout_secs),
        );
        transcriber.api_key = config.api_key.clone().filter(|key| !key.is_empty());
        transcriber.language = config.language.clone();
        transcriber
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    fn build_form(&self, audio: AudioClip) -> Result<Form, TranscribeError> {
        let mut part = Part::bytes(audio.bytes).file_name(audio.file_name);
        if let Some(mime) = audio.content_type.as_deref() {
            part = part
                .mime_str(mime)
                .map_err(|e| TranscribeError::Unrecognized(format!("bad content type: {e}")))?;
        }

        let mut form = Form::new()
            .part("file", part)
            .text("model", self.model.clone());
        if let Some(language) = &self.language {
            form = form.text("language", language.clone());
        }
        Ok(form)
    }
}

#[async_trait]
impl Transcriber for HttpTranscriber {
    async fn transcribe(&self, audio: AudioClip) -> Result<String, TranscribeError> {
        if audio.is_empty() {
            return Err(TranscribeError::EmptyAudio);
        }

        info!(bytes = audio.bytes.len(), file = %audio.file_name, "Transcribing audio");
        let form = self.build_form(audio)?;

        let mut request = self.client.post(&self.url).multipart(form);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| TranscribeError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Speech service rejected the upload");
            return Err(TranscribeError::Service {
                status: status.as_u16(),
                message,
            });
        }

        let body: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| TranscribeError::Unrecognized(format!("unexpected response: {e}")))?;

        let text = body.text.trim().to_string();
        if text.is_empty() {
            return Err(TranscribeError::Unrecognized(
                "no speech detected".to_string(),
            ));
        }

        info!(chars = text.len(), "Transcription complete");
        Ok(text)
    }
}

#[cfg(test)]
#[path = "speech_tests.rs"]
mod tests;
