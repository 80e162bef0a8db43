use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One cryptocurrency's market snapshot, as served by `GET /coins`.
///
/// Records are replaced wholesale on every refresh; nothing in the
/// dashboard edits them in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinRecord {
    /// Backend identifier, also used for `/history/{id}` (e.g. "bitcoin")
    pub id: String,

    /// Display name (e.g. "Bitcoin")
    pub name: String,

    /// Ticker symbol as sent by the backend, usually lowercase (e.g. "btc")
    pub symbol: String,

    /// Current price in USD
    pub current_price: f64,

    /// Market capitalization in USD
    pub market_cap: f64,

    /// Signed 24h price change in percent
    pub price_change_percentage_24h: f64,

    /// Logo URL
    #[serde(default)]
    pub image: String,

    /// When the backend last refreshed this record
    pub last_updated: DateTime<Utc>,
}

impl CoinRecord {
    /// A coin counts as a gainer when its 24h change is non-negative.
    pub fn is_gainer(&self) -> bool {
        self.price_change_percentage_24h >= 0.0
    }

    /// Case-insensitive substring match against name or symbol.
    /// `needle` must already be lowercased.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.symbol.to_lowercase().contains(needle)
    }
}

/// Envelope of the `GET /coins` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinsResponse {
    pub current: Vec<CoinRecord>,
}
