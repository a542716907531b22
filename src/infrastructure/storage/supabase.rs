//! Supabase Storage adapter

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::ports::{ObjectStore, StorageError};
use crate::domain::recording::AudioData;

/// Signed URL lifetime in seconds (1 hour)
const SIGNED_URL_EXPIRY_SECS: u64 = 3600;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SignRequest {
    expires_in: u64,
}

#[derive(Debug, Deserialize)]
struct SignResponse {
    #[serde(rename = "signedURL")]
    signed_url: String,
}

/// Supabase Storage client.
///
/// Uploads are upserts: re-running a job overwrites the previous object
/// under the same key instead of failing.
pub struct SupabaseObjectStore {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    bucket: String,
}

impl SupabaseObjectStore {
    /// Create a new store for the given Supabase project
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        bucket: impl Into<String>,
    ) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            client,
            base_url,
            api_key: api_key.into(),
            bucket: bucket.into(),
        }
    }

    fn object_url(&self, key: &str) -> String {
        format!("{}/storage/v1/object/{}/{}", self.base_url, self.bucket, key)
    }

    fn sign_url(&self, key: &str) -> String {
        format!(
            "{}/storage/v1/object/sign/{}/{}",
            self.base_url, self.bucket, key
        )
    }

    async fn create_signed_url(&self, key: &str) -> Result<String, StorageError> {
        let response = self
            .client
            .post(self.sign_url(key))
            .bearer_auth(&self.api_key)
            .header("apikey", &self.api_key)
            .json(&SignRequest {
                expires_in: SIGNED_URL_EXPIRY_SECS,
            })
            .send()
            .await
            .map_err(|e| StorageError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::SignFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let signed: SignResponse = response
            .json()
            .await
            .map_err(|e| StorageError::SignFailed(e.to_string()))?;

        // The sign endpoint returns a path relative to /storage/v1
        Ok(format!("{}/storage/v1{}", self.base_url, signed.signed_url))
    }
}

#[async_trait]
impl ObjectStore for SupabaseObjectStore {
    async fn upload(
        &self,
        file_id: &str,
        extension: &str,
        audio: &AudioData,
    ) -> Result<String, StorageError> {
        let key = format!("{}.{}", file_id, extension);

        let response = self
            .client
            .post(self.object_url(&key))
            .bearer_auth(&self.api_key)
            .header("apikey", &self.api_key)
            .header("x-upsert", "true")
            .header(reqwest::header::CONTENT_TYPE, audio.mime_type().as_str())
            .body(audio.data().to_vec())
            .send()
            .await
            .map_err(|e| StorageError::RequestFailed(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(StorageError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::UploadRejected {
                status: status.as_u16(),
                body,
            });
        }

        self.create_signed_url(&key).await
    }
}
