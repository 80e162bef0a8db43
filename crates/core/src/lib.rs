pub mod errors;
pub mod models;
pub mod providers;
pub mod router;
pub mod services;
pub mod state;

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;

use errors::CoreError;
use models::{
    chart::ChartData,
    coin::CoinRecord,
    file::{FileRecord, SelectedFile},
    history::HistoryPoint,
    settings::Settings,
};
use providers::{
    backend::BackendClient,
    cloud_storage::CloudStorageUploader,
    traits::{DashboardApi, FileStorage},
};
use services::{
    chart_service::ChartService, refresh::RefreshScheduler, upload_service::UploadService,
};
use state::coin_list::CoinListAction;

/// Main entry point for the Coin Dashboard core library.
/// Holds the configured clients and the services built on top of them.
///
/// Cheap to clone: clones share the same HTTP clients, so a frontend can
/// hand one to every background task it spawns.
#[must_use]
#[derive(Clone)]
pub struct CoinDashboard {
    settings: Settings,
    api: Arc<dyn DashboardApi>,
    chart_service: ChartService,
    upload_service: UploadService,
}

impl std::fmt::Debug for CoinDashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoinDashboard")
            .field("api_base_url", &self.settings.api_base_url)
            .field("upload_url", &self.settings.storage.upload_url)
            .field("refresh_interval_secs", &self.settings.refresh_interval_secs)
            .finish()
    }
}

impl CoinDashboard {
    /// Create a dashboard talking to the real backend and storage provider.
    pub fn new(settings: Settings) -> Self {
        let api: Arc<dyn DashboardApi> = Arc::new(BackendClient::new(&settings));
        let storage: Arc<dyn FileStorage> = Arc::new(CloudStorageUploader::new(&settings));
        Self::with_clients(settings, api, storage)
    }

    /// Create a dashboard configured from environment variables.
    pub fn from_env() -> Result<Self, CoreError> {
        Ok(Self::new(Settings::from_env()?))
    }

    /// Create a dashboard with custom clients (mocks in tests, alternative
    /// backends in production).
    pub fn with_clients(
        settings: Settings,
        api: Arc<dyn DashboardApi>,
        storage: Arc<dyn FileStorage>,
    ) -> Self {
        let upload_service = UploadService::new(Arc::clone(&api), storage);
        Self {
            settings,
            api,
            chart_service: ChartService::new(),
            upload_service,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // ── Coins ───────────────────────────────────────────────────────

    /// Fetch the full coin snapshot once.
    pub async fn fetch_coins(&self) -> Result<Vec<CoinRecord>, CoreError> {
        self.api.fetch_coins().await
    }

    /// Start the periodic snapshot fetch and the one-second countdown for
    /// an active coin list view. Keep the returned handle alive for as long
    /// as the view is shown; dropping it stops both timers.
    pub fn start_refresh(&self, actions: UnboundedSender<CoinListAction>) -> RefreshScheduler {
        RefreshScheduler::spawn(
            Arc::clone(&self.api),
            self.settings.refresh_interval(),
            actions,
        )
    }

    // ── Charts ──────────────────────────────────────────────────────

    /// Fetch the raw 24h history of one coin.
    pub async fn fetch_history(&self, coin_id: &str) -> Result<Vec<HistoryPoint>, CoreError> {
        self.api.fetch_history(coin_id).await
    }

    /// Fetch a coin's history and turn it into line-chart data.
    /// `Ok(None)` means the backend has no samples for this coin.
    pub async fn fetch_price_chart(&self, coin_id: &str) -> Result<Option<ChartData>, CoreError> {
        let history = self.fetch_history(coin_id).await?;
        Ok(self.chart_service.build_price_chart(&history))
    }

    // ── Files ───────────────────────────────────────────────────────

    /// List stored archives.
    pub async fn list_files(&self) -> Result<Vec<FileRecord>, CoreError> {
        self.upload_service.list_files().await
    }

    /// Validate, upload and persist one archive.
    pub async fn upload_file(&self, file: &SelectedFile) -> Result<FileRecord, CoreError> {
        self.upload_service.upload(Some(file)).await
    }
}
