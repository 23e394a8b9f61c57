//! Traits for the services that turn speech and free text into a record.

use async_trait::async_trait;

use crate::error::{ExtractError, TranscribeError};

/// A text generation backend (local LLM server or hosted API).
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Model identifier, for logging.
    fn model(&self) -> &str;

    /// Complete `prompt` and return the raw generated text.
    async fn generate(&self, prompt: &str) -> Result<String, ExtractError>;
}

/// An uploaded audio file.
#[derive(Debug, Clone)]
pub struct AudioClip {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl AudioClip {
    pub fn wav(bytes: Vec<u8>) -> Self {
        Self {
            file_name: "audio.wav".to_string(),
            content_type: Some("audio/wav".to_string()),
            bytes,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// A speech-to-text backend.
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, audio: AudioClip) -> Result<String, TranscribeError>;
}
