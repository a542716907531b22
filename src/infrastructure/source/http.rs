//! HTTP recordings API adapter

use async_trait::async_trait;
use serde::Deserialize;

use crate::application::ports::{FetchError, RecordingSource};
use crate::domain::recording::{AudioData, AudioMimeType, RecordingDescriptor};

/// Listing endpoint path
const LIST_PATH: &str = "get-recordings";
/// Extension assumed when the listing omits one
const DEFAULT_EXTENSION: &str = "mp3";

/// One entry of the listing response.
/// Fields are optional because the source occasionally emits entries
/// without a usable file id; those are dropped during listing.
#[derive(Debug, Deserialize)]
struct ListedRecording {
    #[serde(rename = "fileId")]
    file_id: Option<String>,
    #[serde(rename = "projectID")]
    project_id: Option<String>,
    #[serde(rename = "fileExt")]
    file_extension: Option<String>,
}

impl ListedRecording {
    fn into_descriptor(self) -> Option<RecordingDescriptor> {
        let file_id = self.file_id.filter(|id| !id.is_empty())?;
        Some(RecordingDescriptor::new(
            file_id,
            self.project_id,
            self.file_extension
                .unwrap_or_else(|| DEFAULT_EXTENSION.to_string()),
        ))
    }
}

/// Recordings API client
pub struct HttpRecordingSource {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpRecordingSource {
    /// Create a new client for the given API base URL
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        token: Option<String>,
    ) -> Self {
        Self {
            client,
            base_url: trim_trailing_slash(base_url.into()),
            token,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn request(&self, url: &str) -> reqwest::RequestBuilder {
        let request = self.client.get(url);
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

fn trim_trailing_slash(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}

#[async_trait]
impl RecordingSource for HttpRecordingSource {
    async fn list_recordings(&self) -> Result<Vec<RecordingDescriptor>, FetchError> {
        let response = self
            .request(&self.url(LIST_PATH))
            .send()
            .await
            .map_err(|e| FetchError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let listing: Vec<ListedRecording> = response
            .json()
            .await
            .map_err(|e| FetchError::ParseError(e.to_string()))?;

        Ok(listing
            .into_iter()
            .filter_map(ListedRecording::into_descriptor)
            .collect())
    }

    async fn fetch_audio(
        &self,
        recording: &RecordingDescriptor,
    ) -> Result<AudioData, FetchError> {
        let response = self
            .request(&self.url(recording.file_id()))
            .send()
            .await
            .map_err(|e| FetchError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::RequestFailed(e.to_string()))?;

        Ok(AudioData::new(
            bytes.to_vec(),
            AudioMimeType::from_extension(recording.file_extension()),
        ))
    }
}
