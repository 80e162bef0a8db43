use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::coin::CoinRecord;
use crate::models::file::{FileRecord, SaveFileRequest, SelectedFile};
use crate::models::history::HistoryPoint;

/// The dashboard backend: coin snapshots, price history and file records.
///
/// `BackendClient` talks to the real REST API; tests plug in mocks.
#[async_trait]
pub trait DashboardApi: Send + Sync {
    /// Fetch the full coin snapshot (`GET /coins`).
    async fn fetch_coins(&self) -> Result<Vec<CoinRecord>, CoreError>;

    /// Fetch the 24h price history of one coin (`POST /history/{id}`).
    async fn fetch_history(&self, coin_id: &str) -> Result<Vec<HistoryPoint>, CoreError>;

    /// List stored files (`GET /files`).
    async fn list_files(&self) -> Result<Vec<FileRecord>, CoreError>;

    /// Persist metadata of an uploaded file (`POST /files/save`).
    async fn save_file(&self, request: &SaveFileRequest) -> Result<FileRecord, CoreError>;
}

/// A raw-file storage provider.
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Upload the file's raw bytes and return its public URL.
    async fn upload_raw(&self, file: &SelectedFile) -> Result<String, CoreError>;
}
