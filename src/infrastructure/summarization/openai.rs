//! OpenAI chat-completion summarizer adapter

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::ports::{SummarizationError, Summarizer};
use crate::domain::transcript::{CallSummary, SummaryEnvelope, SummaryPrompt};

/// OpenAI API base URL
const API_BASE_URL: &str = "https://api.openai.com/v1";

// Request types for the chat completions API

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

// Response types for the chat completions API

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Option<Vec<ChatChoice>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// OpenAI summarization client (`/chat/completions`, JSON mode)
pub struct OpenAiSummarizer {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiSummarizer {
    /// Create a new summarizer with the given API key and model
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
        format!("{}/chat/completions", self.base_url)
    }

    /// Build the request body
    fn build_request(&self, transcript: &str) -> ChatRequest {
        let prompt = SummaryPrompt::build(transcript);
        ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SummaryPrompt::system().to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: prompt.into_user(),
                },
            ],
            response_format: ResponseFormat {
                format_type: "json_object",
            },
        }
    }

    /// Extract the message content from the response
    fn extract_content(response: &ChatResponse) -> Option<String> {
        response
            .choices
            .as_ref()?
            .first()?
            .message
            .as_ref()?
            .content
            .clone()
    }

    /// Parse and validate the model output as the expected summary shape
    fn parse_summary(content: &str) -> Result<CallSummary, SummarizationError> {
        let envelope: SummaryEnvelope = serde_json::from_str(content)
            .map_err(|e| SummarizationError::MalformedSummary(e.to_string()))?;
        Ok(envelope.dto.normalized())
    }
}

#[async_trait]
impl Summarizer for OpenAiSummarizer {
    async fn summarize(&self, transcript: &str) -> Result<CallSummary, SummarizationError> {
        let body = self.build_request(transcript);

        let response = self
            .client
            .post(self.api_url())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| SummarizationError::RequestFailed(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(SummarizationError::InvalidApiKey);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(SummarizationError::RateLimited);
        }

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SummarizationError::ApiError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let response: ChatResponse = response
            .json()
            .await
            .map_err(|e| SummarizationError::ApiError(e.to_string()))?;

        if let Some(error) = response.error {
            return Err(SummarizationError::ApiError(error.message));
        }

        let content =
            Self::extract_content(&response).ok_or(SummarizationError::EmptyResponse)?;

        Self::parse_summary(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summarizer() -> OpenAiSummarizer {
        OpenAiSummarizer::new(reqwest::Client::new(), "test-key", "gpt-4o-mini")
    }

    #[test]
    fn build_request_has_correct_structure() {
        let request = summarizer().build_request("Hello, I am interested in a 2BHK.");

        assert_eq!(request.model, "gpt-4o-mini");
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, "system");
        assert_eq!(request.messages[1].role, "user");
        assert!(request.messages[1]
            .content
            .contains("Hello, I am interested in a 2BHK."));
        assert_eq!(request.response_format.format_type, "json_object");
    }

    #[test]
    fn extract_content_from_response() {
        let response = ChatResponse {
            choices: Some(vec![ChatChoice {
                message: Some(ChoiceMessage {
                    content: Some("{\"dto\":{}}".to_string()),
                }),
            }]),
            error: None,
        };

        let content = OpenAiSummarizer::extract_content(&response);
        assert_eq!(content, Some("{\"dto\":{}}".to_string()));
    }

    #[test]
    fn extract_content_empty_response() {
        let response = ChatResponse {
            choices: None,
            error: None,
        };
        assert!(OpenAiSummarizer::extract_content(&response).is_none());
    }

    #[test]
    fn parse_summary_valid_envelope() {
        let content = r#"{"dto":{"Configuration":"2BHK","Size_Range":"","BSP":"","Total_Units":"","Units_available":"","Completion_Date":"","Additional_Notes":"","Notes":"Successful"}}"#;

        let summary = OpenAiSummarizer::parse_summary(content).unwrap();
        assert_eq!(summary.configuration.as_deref(), Some("2BHK"));
        assert_eq!(summary.notes.as_deref(), Some("Successful"));
        // Empty strings are normalized away
        assert!(summary.bsp.is_none());
    }

    #[test]
    fn parse_summary_rejects_non_envelope_output() {
        let result = OpenAiSummarizer::parse_summary("{\"Configuration\":\"2BHK\"}");
        assert!(matches!(
            result,
            Err(SummarizationError::MalformedSummary(_))
        ));

        let result = OpenAiSummarizer::parse_summary("not json at all");
        assert!(matches!(
            result,
            Err(SummarizationError::MalformedSummary(_))
        ));
    }
}
