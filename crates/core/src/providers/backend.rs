use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use super::traits::DashboardApi;
use crate::errors::CoreError;
use crate::models::coin::{CoinRecord, CoinsResponse};
use crate::models::file::{FileRecord, SaveFileRequest};
use crate::models::history::{HistoryPoint, HistoryResponse};
use crate::models::settings::Settings;

/// REST client for the dashboard backend.
///
/// - `GET  /coins`         → `{ current: [CoinRecord] }`
/// - `POST /history/{id}`  → `[HistoryPoint]`
/// - `GET  /files`         → `[FileRecord]`
/// - `POST /files/save`    → `FileRecord`
///
/// No retries: a failed call surfaces immediately and the caller tries
/// again on its next scheduled cycle.
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(settings: &Settings) -> Self {
        let builder = Client::builder().timeout(settings.request_timeout());
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an endpoint path such as "/coins".
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn decode<T: DeserializeOwned>(endpoint: &str, resp: Response) -> Result<T, CoreError> {
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(CoreError::Api {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                message: truncate(&body, 200),
            });
        }
        serde_json::from_str(&body).map_err(|e| {
            CoreError::Deserialization(format!("Failed to parse response of {endpoint}: {e}"))
        })
    }
}

fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}…", &s[..idx]),
        None => s.to_string(),
    }
}

#[async_trait]
impl DashboardApi for BackendClient {
    async fn fetch_coins(&self) -> Result<Vec<CoinRecord>, CoreError> {
        let url = self.endpoint("/coins");
        tracing::debug!(%url, "fetching coin snapshot");
        let resp = self.client.get(&url).send().await?;
        let parsed: CoinsResponse = Self::decode("/coins", resp).await?;
        Ok(parsed.current)
    }

    async fn fetch_history(&self, coin_id: &str) -> Result<Vec<HistoryPoint>, CoreError> {
        if coin_id.trim().is_empty() {
            return Err(CoreError::ValidationError("coin id must not be empty".into()));
        }
        let path = format!("/history/{coin_id}");
        let url = self.endpoint(&path);
        tracing::debug!(%url, "fetching price history");
        let resp = self.client.post(&url).send().await?;
        let parsed: HistoryResponse = Self::decode(&path, resp).await?;
        Ok(parsed.0)
    }

    async fn list_files(&self) -> Result<Vec<FileRecord>, CoreError> {
        let url = self.endpoint("/files");
        tracing::debug!(%url, "listing stored files");
        let resp = self.client.get(&url).send().await?;
        Self::decode("/files", resp).await
    }

    async fn save_file(&self, request: &SaveFileRequest) -> Result<FileRecord, CoreError> {
        let url = self.endpoint("/files/save");
        tracing::debug!(%url, name = %request.name, "saving file record");
        let resp = self.client.post(&url).json(request).send().await?;
        Self::decode("/files/save", resp).await
    }
}
