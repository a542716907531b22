//! Supabase (PostgREST) record store adapter

use std::collections::HashSet;

use async_trait::async_trait;
use serde::Deserialize;

use crate::application::ports::{PersistenceError, RecordStore};
use crate::domain::record::RecordPatch;

#[derive(Debug, Deserialize)]
struct FileIdRow {
    file_id: String,
}

/// PostgREST client for the per-recording results table.
///
/// Upserts use `on_conflict=file_id` with merge-duplicates resolution, so a
/// patch only touches the columns it carries.
pub struct SupabaseRecordStore {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    table: String,
}

impl SupabaseRecordStore {
    /// Create a new store for the given Supabase project and table
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            client,
            base_url,
            api_key: api_key.into(),
            table: table.into(),
        }
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .bearer_auth(&self.api_key)
            .header("apikey", &self.api_key)
    }

    async fn select_file_ids(&self) -> Result<Vec<String>, PersistenceError> {
        let response = self
            .authorized(
                self.client
                    .get(self.table_url())
                    .query(&[("select", "file_id")]),
            )
            .send()
            .await
            .map_err(|e| PersistenceError::RequestFailed(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(PersistenceError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PersistenceError::RejectedWrite {
                status: status.as_u16(),
                body,
            });
        }

        let rows: Vec<FileIdRow> = response
            .json()
            .await
            .map_err(|e| PersistenceError::ParseError(e.to_string()))?;

        Ok(rows.into_iter().map(|row| row.file_id).collect())
    }
}

#[async_trait]
impl RecordStore for SupabaseRecordStore {
    async fn seen_file_ids(&self) -> Result<HashSet<String>, PersistenceError> {
        let ids = self.select_file_ids().await?;
        Ok(ids.into_iter().collect())
    }

    async fn record_count(&self) -> Result<usize, PersistenceError> {
        Ok(self.select_file_ids().await?.len())
    }

    async fn upsert(&self, patch: &RecordPatch) -> Result<(), PersistenceError> {
        let response = self
            .authorized(
                self.client
                    .post(self.table_url())
                    .query(&[("on_conflict", "file_id")])
                    .header("Prefer", "resolution=merge-duplicates"),
            )
            .json(patch)
            .send()
            .await
            .map_err(|e| PersistenceError::RequestFailed(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(PersistenceError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PersistenceError::RejectedWrite {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}
