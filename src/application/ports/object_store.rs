//! Object storage port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::recording::AudioData;

/// Object storage errors
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("Storage credentials rejected")]
    Unauthorized,

    #[error("Storage request failed: {0}")]
    RequestFailed(String),

    #[error("Upload rejected: HTTP {status}: {body}")]
    UploadRejected { status: u16, body: String },

    #[error("Failed to create signed URL: {0}")]
    SignFailed(String),
}

/// Port for durable audio storage
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store the audio under a key derived from `file_id` and `extension`,
    /// overwriting any previous upload for the same key.
    ///
    /// # Returns
    /// An addressable reference URL for the stored object
    async fn upload(
        &self,
        file_id: &str,
        extension: &str,
        audio: &AudioData,
    ) -> Result<String, StorageError>;
}
