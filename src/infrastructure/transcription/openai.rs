//! OpenAI speech-to-text adapter

use async_trait::async_trait;
use serde::Deserialize;

use crate::application::ports::{Transcriber, TranscriptionError};
use crate::domain::recording::AudioData;

/// OpenAI API base URL
const API_BASE_URL: &str = "https://api.openai.com/v1";
/// Transcription language hint
const LANGUAGE: &str = "en";
/// Sampling temperature for the transcription model
const TEMPERATURE: &str = "0.5";

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

/// OpenAI transcription client (`/audio/transcriptions`)
pub struct OpenAiTranscriber {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiTranscriber {
    /// Create a new transcriber with the given API key and model
    pub fn new(
        client: reqwest::Client,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            base_url: API_BASE_URL.to_string(),
        }
    }

    /// Override the API base URL (used by tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn api_url(&self) -> String {
        format!("{}/audio/transcriptions", self.base_url)
    }

    fn build_form(&self, audio: &AudioData) -> Result<reqwest::multipart::Form, TranscriptionError> {
        let file_name = format!("audio.{}", audio.mime_type().extension());
        let part = reqwest::multipart::Part::bytes(audio.data().to_vec())
            .file_name(file_name)
            .mime_str(audio.mime_type().as_str())
            .map_err(|e| TranscriptionError::RequestFailed(e.to_string()))?;

        Ok(reqwest::multipart::Form::new()
            .part("file", part)
            .text("model", self.model.clone())
            .text("language", LANGUAGE)
            .text("temperature", TEMPERATURE))
    }
}

#[async_trait]
impl Transcriber for OpenAiTranscriber {
    async fn transcribe(&self, audio: &AudioData) -> Result<String, TranscriptionError> {
        let form = self.build_form(audio)?;

        let response = self
            .client
            .post(self.api_url())
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TranscriptionError::RequestFailed(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(TranscriptionError::InvalidApiKey);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TranscriptionError::RateLimited);
        }

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(TranscriptionError::ApiError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let response: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::ParseError(e.to_string()))?;

        let trimmed = response.text.trim();
        if trimmed.is_empty() {
            return Err(TranscriptionError::EmptyTranscript);
        }

        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::recording::AudioMimeType;

    #[test]
    fn api_url_targets_transcriptions_endpoint() {
        let transcriber =
            OpenAiTranscriber::new(reqwest::Client::new(), "test-key", "whisper-1");
        assert_eq!(
            transcriber.api_url(),
            "https://api.openai.com/v1/audio/transcriptions"
        );
    }

    #[test]
    fn with_base_url_overrides_endpoint() {
        let transcriber = OpenAiTranscriber::new(reqwest::Client::new(), "key", "whisper-1")
            .with_base_url("http://localhost:9000/v1");
        assert_eq!(
            transcriber.api_url(),
            "http://localhost:9000/v1/audio/transcriptions"
        );
    }

    #[test]
    fn build_form_accepts_audio() {
        let transcriber =
            OpenAiTranscriber::new(reqwest::Client::new(), "test-key", "whisper-1");
        let audio = AudioData::new(vec![1, 2, 3], AudioMimeType::Wav);
        assert!(transcriber.build_form(&audio).is_ok());
    }

    #[test]
    fn transcription_response_parses() {
        let response: TranscriptionResponse =
            serde_json::from_str(r#"{"text":"Hello there"}"#).unwrap();
        assert_eq!(response.text, "Hello there");
    }
}
