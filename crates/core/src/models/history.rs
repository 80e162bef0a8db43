use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A single price sample returned by `POST /history/{id}`.
///
/// The backend stores history as repeated coin snapshots, so only the two
/// fields the chart needs are decoded and the rest are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    /// Sample time. Missing or null timestamps are kept and rendered as "?".
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,

    /// Price in USD. Missing or null prices are plotted as 0.
    #[serde(default, deserialize_with = "null_as_zero")]
    pub current_price: f64,
}

impl HistoryPoint {
    pub fn new(last_updated: DateTime<Utc>, current_price: f64) -> Self {
        Self {
            last_updated: Some(last_updated),
            current_price,
        }
    }
}

fn null_as_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of `POST /history/{id}`.
///
/// `null` entries in the array decode as empty samples (no time, price 0)
/// instead of failing the whole series.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Vec<Option<HistoryPoint>>")]
pub struct HistoryResponse(pub Vec<HistoryPoint>);

impl From<Vec<Option<HistoryPoint>>> for HistoryResponse {
    fn from(entries: Vec<Option<HistoryPoint>>) -> Self {
        Self(entries.into_iter().map(Option::unwrap_or_default).collect())
    }
}
