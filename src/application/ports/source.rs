//! Recording source port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::recording::{AudioData, RecordingDescriptor};

/// Recording source errors
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Failed to parse listing response: {0}")]
    ParseError(String),
}

/// Port for the remote recordings API
#[async_trait]
pub trait RecordingSource: Send + Sync {
    /// List the recordings currently announced by the source.
    ///
    /// The listing is unfiltered; the pipeline decides which entries are new.
    async fn list_recordings(&self) -> Result<Vec<RecordingDescriptor>, FetchError>;

    /// Download the raw audio bytes for a recording.
    async fn fetch_audio(
        &self,
        recording: &RecordingDescriptor,
    ) -> Result<AudioData, FetchError>;
}
