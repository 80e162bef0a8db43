//! Chart modal / detail view state.

use crate::errors::CoreError;
use crate::models::chart::ChartData;
use crate::models::history::HistoryPoint;
use crate::services::chart_service::ChartService;

pub const MSG_NO_DATA: &str = "No data available for this coin.";

/// Identifies one history request. Only the latest ticket may land.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartRequest {
    pub ticket: u64,
    pub coin_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartPhase {
    /// No coin selected
    Closed,
    /// History request in flight
    Loading,
    /// At least one point came back
    Ready(ChartData),
    /// Empty history or a failed request
    NoData,
}

/// State of the single open chart (modal or detail page).
///
/// Every `open` bumps the ticket; responses carrying an older ticket are
/// dropped, so a slow answer for a previous coin can never overwrite the
/// current one.
#[derive(Debug, Clone)]
pub struct ChartState {
    coin_id: Option<String>,
    ticket: u64,
    phase: ChartPhase,
    service: ChartService,
}

impl Default for ChartState {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartState {
    pub fn new() -> Self {
        Self {
            coin_id: None,
            ticket: 0,
            phase: ChartPhase::Closed,
            service: ChartService::new(),
        }
    }

    /// Start showing `coin_id`. The caller must fetch the history and feed
    /// it back through [`apply`](Self::apply) with the returned ticket.
    pub fn open(&mut self, coin_id: impl Into<String>) -> ChartRequest {
        let coin_id = coin_id.into();
        self.ticket += 1;
        self.coin_id = Some(coin_id.clone());
        self.phase = ChartPhase::Loading;
        ChartRequest {
            ticket: self.ticket,
            coin_id,
        }
    }

    /// Detail-page variant: re-open only when the route parameter changed.
    pub fn sync_to(&mut self, coin_id: &str) -> Option<ChartRequest> {
        if self.coin_id.as_deref() == Some(coin_id) && self.phase != ChartPhase::Closed {
            return None;
        }
        Some(self.open(coin_id))
    }

    /// Dismiss the chart. Any request still in flight becomes stale.
    pub fn close(&mut self) {
        self.ticket += 1;
        self.coin_id = None;
        self.phase = ChartPhase::Closed;
    }

    /// Feed a history response back. Returns `false` if it was stale and
    /// got discarded.
    pub fn apply(&mut self, ticket: u64, result: Result<Vec<HistoryPoint>, CoreError>) -> bool {
        if ticket != self.ticket {
            tracing::debug!(ticket, current = self.ticket, "discarding stale history response");
            return false;
        }
        self.phase = match result {
            Ok(history) => match self.service.build_price_chart(&history) {
                Some(chart) => ChartPhase::Ready(chart),
                None => ChartPhase::NoData,
            },
            Err(e) => {
                tracing::error!(error = %e, coin = ?self.coin_id, "Error fetching history");
                ChartPhase::NoData
            }
        };
        true
    }

    pub fn coin_id(&self) -> Option<&str> {
        self.coin_id.as_deref()
    }

    pub fn ticket(&self) -> u64 {
        self.ticket
    }

    pub fn phase(&self) -> &ChartPhase {
        &self.phase
    }

    pub fn is_open(&self) -> bool {
        self.phase != ChartPhase::Closed
    }

    pub fn is_loading(&self) -> bool {
        self.phase == ChartPhase::Loading
    }
}
