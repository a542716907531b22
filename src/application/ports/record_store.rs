//! Record store port interface

use std::collections::HashSet;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::record::RecordPatch;

/// Record store errors
#[derive(Debug, Clone, Error)]
pub enum PersistenceError {
    #[error("Record store credentials rejected")]
    Unauthorized,

    #[error("Record store request failed: {0}")]
    RequestFailed(String),

    #[error("Write rejected: HTTP {status}: {body}")]
    RejectedWrite { status: u16, body: String },

    #[error("Failed to parse record store response: {0}")]
    ParseError(String),
}

/// Port for the persistent per-recording results table
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// File ids that already have a row in the table.
    ///
    /// The pipeline filters the source listing against this set. A job that
    /// failed before its first write has no row and stays eligible for the
    /// next run; a job with a row is never re-attempted.
    async fn seen_file_ids(&self) -> Result<HashSet<String>, PersistenceError>;

    /// Total number of rows in the table, for the optional record cap.
    async fn record_count(&self) -> Result<usize, PersistenceError>;

    /// Merge the patch into the row for its `file_id`, creating the row if
    /// absent. Must be safe to call repeatedly with the same `file_id`.
    async fn upsert(&self, patch: &RecordPatch) -> Result<(), PersistenceError>;
}
