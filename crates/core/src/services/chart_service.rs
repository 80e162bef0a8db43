use chrono::{Local, TimeZone};

use crate::models::chart::{ChartData, ChartDataset};
use crate::models::history::HistoryPoint;

pub const PRICE_DATASET_LABEL: &str = "Price (USD)";
pub const PRICE_LINE_COLOR: &str = "rgb(75, 192, 192)";
pub const LINE_TENSION: f64 = 0.3;

/// Label shown for a sample without a timestamp.
pub const MISSING_TIME_LABEL: &str = "?";

/// Turns price history into chart-ready line data.
///
/// Labels and values are computed here; frontends only render them.
#[derive(Debug, Clone, Default)]
pub struct ChartService;

impl ChartService {
    pub fn new() -> Self {
        Self
    }

    /// Build the 24h price chart with labels in the machine's local time.
    ///
    /// Returns `None` for an empty history so callers show the no-data
    /// message instead of an empty chart.
    pub fn build_price_chart(&self, history: &[HistoryPoint]) -> Option<ChartData> {
        self.build_price_chart_in(history, &Local)
    }

    /// Same as [`build_price_chart`](Self::build_price_chart) with an
    /// explicit time zone for the labels.
    pub fn build_price_chart_in<Tz: TimeZone>(
        &self,
        history: &[HistoryPoint],
        tz: &Tz,
    ) -> Option<ChartData>
    where
        Tz::Offset: std::fmt::Display,
    {
        if history.is_empty() {
            return None;
        }

        let labels = history
            .iter()
            .map(|p| match p.last_updated {
                Some(ts) => ts.with_timezone(tz).format("%H:%M:%S").to_string(),
                None => MISSING_TIME_LABEL.to_string(),
            })
            .collect();

        let data = history.iter().map(|p| p.current_price).collect();

        Some(ChartData {
            labels,
            datasets: vec![ChartDataset {
                label: PRICE_DATASET_LABEL.to_string(),
                data,
                border_color: PRICE_LINE_COLOR.to_string(),
                tension: LINE_TENSION,
                fill: false,
            }],
        })
    }
}

/// Title of the chart modal, e.g. "BITCOIN - 24h Chart".
pub fn modal_title(coin_id: &str) -> String {
    format!("{} - 24h Chart", coin_id.to_uppercase())
}

/// Title of the full-page detail view.
pub fn detail_title(coin_id: &str) -> String {
    format!("{} Price Trend (Past 24 Hours)", coin_id.to_uppercase())
}
