//! Application configuration value object

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

/// Default object storage bucket
const DEFAULT_BUCKET: &str = "call-recordings";
/// Default record store table
const DEFAULT_TABLE: &str = "call_recordings";
/// Default speech-to-text model
const DEFAULT_TRANSCRIPTION_MODEL: &str = "whisper-1";
/// Default summarization model
const DEFAULT_SUMMARY_MODEL: &str = "gpt-4o-mini";
/// Default per-request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub openai_api_key: Option<String>,
    pub supabase_url: Option<String>,
    pub supabase_key: Option<String>,
    pub source_base_url: Option<String>,
    pub source_token: Option<String>,
    pub callback_url: Option<String>,
    pub storage_bucket: Option<String>,
    pub table: Option<String>,
    pub transcription_model: Option<String>,
    pub summary_model: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub max_records: Option<u64>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            storage_bucket: Some(DEFAULT_BUCKET.to_string()),
            table: Some(DEFAULT_TABLE.to_string()),
            transcription_model: Some(DEFAULT_TRANSCRIPTION_MODEL.to_string()),
            summary_model: Some(DEFAULT_SUMMARY_MODEL.to_string()),
            request_timeout_secs: Some(DEFAULT_TIMEOUT_SECS),
            ..Default::default()
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            openai_api_key: other.openai_api_key.or(self.openai_api_key),
            supabase_url: other.supabase_url.or(self.supabase_url),
            supabase_key: other.supabase_key.or(self.supabase_key),
            source_base_url: other.source_base_url.or(self.source_base_url),
            source_token: other.source_token.or(self.source_token),
            callback_url: other.callback_url.or(self.callback_url),
            storage_bucket: other.storage_bucket.or(self.storage_bucket),
            table: other.table.or(self.table),
            transcription_model: other.transcription_model.or(self.transcription_model),
            summary_model: other.summary_model.or(self.summary_model),
            request_timeout_secs: other.request_timeout_secs.or(self.request_timeout_secs),
            max_records: other.max_records.or(self.max_records),
        }
    }

    /// Get a required setting or a `MissingRequired` error naming the
    /// environment variable that supplies it
    pub fn require(
        value: &Option<String>,
        key: &'static str,
        env_var: &'static str,
    ) -> Result<String, ConfigError> {
        value
            .as_ref()
            .filter(|s| !s.is_empty())
            .cloned()
            .ok_or(ConfigError::MissingRequired { key, env_var })
    }

    /// Get the storage bucket, or the default if not set
    pub fn storage_bucket_or_default(&self) -> &str {
        self.storage_bucket.as_deref().unwrap_or(DEFAULT_BUCKET)
    }

    /// Get the record store table, or the default if not set
    pub fn table_or_default(&self) -> &str {
        self.table.as_deref().unwrap_or(DEFAULT_TABLE)
    }

    /// Get the transcription model, or the default if not set
    pub fn transcription_model_or_default(&self) -> &str {
        self.transcription_model
            .as_deref()
            .unwrap_or(DEFAULT_TRANSCRIPTION_MODEL)
    }

    /// Get the summarization model, or the default if not set
    pub fn summary_model_or_default(&self) -> &str {
        self.summary_model
            .as_deref()
            .unwrap_or(DEFAULT_SUMMARY_MODEL)
    }

    /// Get the per-request timeout, or the default if not set
    pub fn request_timeout_or_default(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }
}
