//! Coin list view state and its update function.

use chrono::{DateTime, Utc};

use super::countdown::Countdown;
use crate::errors::CoreError;
use crate::models::coin::CoinRecord;
use crate::models::notice::Notice;
use crate::models::query::{CoinFilter, CoinQuery, CoinSort};
use crate::models::settings::REFRESH_INTERVAL_SECS;
use crate::services::coin_query::derive_coins;

/// Number of skeleton cards shown while the first snapshot loads.
pub const PLACEHOLDER_CARDS: usize = 8;

pub const MSG_FETCHING: &str = "Fetching crypto data...";
pub const MSG_FETCH_OK: &str = "Success fetching data!";
pub const MSG_NO_RECORDS: &str = "No records found";
pub const MSG_FETCH_FAILED: &str = "Failed to fetch!";
pub const MSG_NO_RESULTS: &str = "No cryptocurrencies found.";

/// Everything that can happen to the coin list view.
#[derive(Debug)]
pub enum CoinListAction {
    /// The view became visible; the first fetch is under way.
    Activate,
    /// A snapshot fetch finished, successfully or not.
    FetchCompleted(Result<Vec<CoinRecord>, CoreError>),
    /// One second elapsed.
    Tick,
    SetSearch(String),
    SetFilter(CoinFilter),
    SetSort(CoinSort),
}

/// What the card grid should show right now.
#[derive(Debug, PartialEq)]
pub enum CoinListBody<'a> {
    /// First fetch pending: this many skeleton cards.
    Placeholders(usize),
    /// Nothing matches the current query.
    NoResults,
    Cards(Vec<&'a CoinRecord>),
}

/// State of the coin list view.
///
/// Only [`update`](Self::update) mutates it. The displayed list is derived
/// on every call to [`body`](Self::body) and never cached.
#[derive(Debug, Clone)]
pub struct CoinListState {
    coins: Vec<CoinRecord>,
    query: CoinQuery,
    loading: bool,
    last_updated: Option<DateTime<Utc>>,
    countdown: Countdown,
}

impl Default for CoinListState {
    fn default() -> Self {
        Self::new(REFRESH_INTERVAL_SECS)
    }
}

impl CoinListState {
    pub fn new(refresh_interval_secs: u64) -> Self {
        Self {
            coins: Vec::new(),
            query: CoinQuery::default(),
            loading: true,
            last_updated: None,
            countdown: Countdown::new(refresh_interval_secs),
        }
    }

    /// Apply one action. Returns the notice the user should see, if any.
    pub fn update(&mut self, action: CoinListAction) -> Option<Notice> {
        match action {
            CoinListAction::Activate => {
                self.loading = true;
                Some(Notice::info(MSG_FETCHING))
            }
            CoinListAction::FetchCompleted(result) => {
                self.loading = false;
                self.countdown.reset();
                match result {
                    Ok(coins) => {
                        let notice = match coins.first() {
                            Some(first) => {
                                self.last_updated = Some(first.last_updated);
                                Notice::success(MSG_FETCH_OK)
                            }
                            None => Notice::error(MSG_NO_RECORDS),
                        };
                        tracing::info!(count = coins.len(), "coin snapshot applied");
                        self.coins = coins;
                        Some(notice)
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Error fetching data");
                        Some(Notice::error(MSG_FETCH_FAILED))
                    }
                }
            }
            CoinListAction::Tick => {
                self.countdown.tick();
                None
            }
            CoinListAction::SetSearch(search) => {
                self.query.search = search;
                None
            }
            CoinListAction::SetFilter(filter) => {
                self.query.filter = filter;
                None
            }
            CoinListAction::SetSort(sort) => {
                self.query.sort = sort;
                None
            }
        }
    }

    /// Card grid content for the current state.
    pub fn body(&self) -> CoinListBody<'_> {
        if self.loading {
            return CoinListBody::Placeholders(PLACEHOLDER_CARDS);
        }
        let derived = self.visible_coins();
        if derived.is_empty() {
            CoinListBody::NoResults
        } else {
            CoinListBody::Cards(derived)
        }
    }

    /// The filtered and sorted list, ignoring the loading flag.
    pub fn visible_coins(&self) -> Vec<&CoinRecord> {
        derive_coins(&self.coins, &self.query)
    }

    pub fn coins(&self) -> &[CoinRecord] {
        &self.coins
    }

    pub fn query(&self) -> &CoinQuery {
        &self.query
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }
}
