//! Extraction and transcription errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Nothing to extract: input text is empty")]
    EmptyInput,

    #[error("Text generation service unavailable: {0}")]
    Unavailable(String),

    #[error("Text generation failed: {status} - {message}")]
    Generation { status: u16, message: String },

    #[error("Malformed timesheet response: {reason}")]
    MalformedResponse { reason: String, raw: String },
}

#[derive(Debug, Error)]
pub enum TranscribeError {
    #[error("Audio upload is empty")]
    EmptyAudio,

    #[error("Speech service unavailable: {0}")]
    Unavailable(String),

    #[error("Speech service error: {status} - {message}")]
    Service { status: u16, message: String },

    #[error("Could not understand audio: {0}")]
    Unrecognized(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_response_hides_raw_text() {
        let err = ExtractError::MalformedResponse {
            reason: "expected value at line 1".to_string(),
            raw: "Sure! Here is your timesheet".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("expected value"));
        assert!(!display.contains("Sure!"));
    }

    #[test]
    fn test_generation_error_display() {
        let err = ExtractError::Generation {
            status: 404,
            message: "model 'llama3' not found".to_string(),
        };
        assert!(err.to_string().contains("404"));
        assert!(err.to_string().contains("llama3"));
    }

    #[test]
    fn test_transcribe_errors_display() {
        let errors = vec![
            TranscribeError::EmptyAudio,
            TranscribeError::Unavailable("connection refused".to_string()),
            TranscribeError::Service {
                status: 500,
                message: "boom".to_string(),
            },
            TranscribeError::Unrecognized("silence".to_string()),
        ];
        for err in errors {
            assert!(!err.to_string().is_empty());
        }
    }
}
