//! Callback notifier port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::record::CallbackPayload;

/// Callback errors
#[derive(Debug, Clone, Error)]
pub enum CallbackError {
    #[error("Callback request failed: {0}")]
    RequestFailed(String),

    #[error("Callback returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },
}

/// Port for the external results callback
#[async_trait]
pub trait CallbackNotifier: Send + Sync {
    /// POST the payload to the configured endpoint.
    ///
    /// # Returns
    /// The raw response body, stored verbatim in the record store
    async fn notify(&self, payload: &CallbackPayload) -> Result<String, CallbackError>;
}
