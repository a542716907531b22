//! Summarization port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::transcript::CallSummary;

/// Summarization errors
#[derive(Debug, Clone, Error)]
pub enum SummarizationError {
    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Model returned no content")]
    EmptyResponse,

    #[error("Model output is not the expected summary shape: {0}")]
    MalformedSummary(String),
}

/// Port for transcript summarization
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Extract the structured call summary from a transcript.
    ///
    /// Implementations must validate that the model output parses as the
    /// expected shape before returning it.
    async fn summarize(&self, transcript: &str) -> Result<CallSummary, SummarizationError>;
}
