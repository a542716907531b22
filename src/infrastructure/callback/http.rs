//! HTTP callback notifier adapter

use async_trait::async_trait;

use crate::application::ports::{CallbackError, CallbackNotifier};
use crate::domain::record::CallbackPayload;

/// Posts job results to the configured callback endpoint
pub struct HttpCallbackNotifier {
    client: reqwest::Client,
    url: String,
}

impl HttpCallbackNotifier {
    /// Create a notifier for the given endpoint URL
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl CallbackNotifier for HttpCallbackNotifier {
    async fn notify(&self, payload: &CallbackPayload) -> Result<String, CallbackError> {
        let response = self
            .client
            .post(&self.url)
            .json(payload)
            .send()
            .await
            .map_err(|e| CallbackError::RequestFailed(e.to_string()))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(CallbackError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}
