use crate::models::coin::CoinRecord;
use crate::models::query::{CoinFilter, CoinQuery, CoinSort};

/// Derive the displayed coin list from the full snapshot.
///
/// Pure function of `(coins, query)`; the snapshot itself is never touched.
/// Steps, in order:
/// 1. case-insensitive substring search on name or symbol
/// 2. gainer/loser restriction
/// 3. stable sort of the remaining references (ties keep fetch order)
pub fn derive_coins<'a>(coins: &'a [CoinRecord], query: &CoinQuery) -> Vec<&'a CoinRecord> {
    let needle = query.search.to_lowercase();
    let mut derived: Vec<&CoinRecord> = coins
        .iter()
        .filter(|c| c.matches_lowercase(&needle))
        .filter(|c| passes_filter(c, query.filter))
        .collect();
    sort_coins(&mut derived, query.sort);
    derived
}

/// Whether one coin survives the gainer/loser restriction.
pub fn passes_filter(coin: &CoinRecord, filter: CoinFilter) -> bool {
    match filter {
        CoinFilter::All => true,
        CoinFilter::Gainers => coin.is_gainer(),
        CoinFilter::Losers => !coin.is_gainer(),
    }
}

/// Sort coin references in place. `CoinSort::None` leaves the order alone.
pub fn sort_coins(coins: &mut [&CoinRecord], sort: CoinSort) {
    match sort {
        CoinSort::None => {}
        CoinSort::PriceDesc => {
            coins.sort_by(|a, b| b.current_price.total_cmp(&a.current_price));
        }
        CoinSort::PriceAsc => {
            coins.sort_by(|a, b| a.current_price.total_cmp(&b.current_price));
        }
        CoinSort::MarketCap => {
            coins.sort_by(|a, b| b.market_cap.total_cmp(&a.market_cap));
        }
        CoinSort::PercentDesc => {
            coins.sort_by(|a, b| {
                b.price_change_percentage_24h
                    .total_cmp(&a.price_change_percentage_24h)
            });
        }
    }
}
