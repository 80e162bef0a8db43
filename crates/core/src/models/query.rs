use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Gainer/loser restriction applied after the text search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoinFilter {
    /// No restriction
    #[default]
    All,
    /// 24h change >= 0
    Gainers,
    /// 24h change < 0
    Losers,
}

impl CoinFilter {
    pub const ALL: [CoinFilter; 3] = [CoinFilter::All, CoinFilter::Gainers, CoinFilter::Losers];

    /// Option value used by the original select box.
    pub fn as_str(&self) -> &'static str {
        match self {
            CoinFilter::All => "",
            CoinFilter::Gainers => "gainers",
            CoinFilter::Losers => "losers",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CoinFilter::All => "All",
            CoinFilter::Gainers => "Gainers",
            CoinFilter::Losers => "Losers",
        }
    }

    /// Next filter in display order, wrapping around.
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl std::fmt::Display for CoinFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for CoinFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" => Ok(CoinFilter::All),
            "gainers" => Ok(CoinFilter::Gainers),
            "losers" => Ok(CoinFilter::Losers),
            other => Err(CoreError::ValidationError(format!("Unknown filter: {other}"))),
        }
    }
}

/// Ordering applied to the filtered list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoinSort {
    /// Keep fetch order
    #[default]
    None,
    /// Highest price first
    PriceDesc,
    /// Lowest price first
    PriceAsc,
    /// Largest market cap first
    MarketCap,
    /// Largest 24h gain first
    PercentDesc,
}

impl CoinSort {
    pub const ALL: [CoinSort; 5] = [
        CoinSort::None,
        CoinSort::PriceDesc,
        CoinSort::PriceAsc,
        CoinSort::MarketCap,
        CoinSort::PercentDesc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CoinSort::None => "",
            CoinSort::PriceDesc => "price-desc",
            CoinSort::PriceAsc => "price-asc",
            CoinSort::MarketCap => "marketcap",
            CoinSort::PercentDesc => "percent-desc",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CoinSort::None => "Sort By",
            CoinSort::PriceDesc => "Price: High → Low",
            CoinSort::PriceAsc => "Price: Low → High",
            CoinSort::MarketCap => "Market Cap",
            CoinSort::PercentDesc => "Top Gainers %",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl std::fmt::Display for CoinSort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for CoinSort {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" => Ok(CoinSort::None),
            "price-desc" => Ok(CoinSort::PriceDesc),
            "price-asc" => Ok(CoinSort::PriceAsc),
            "marketcap" => Ok(CoinSort::MarketCap),
            "percent-desc" => Ok(CoinSort::PercentDesc),
            other => Err(CoreError::ValidationError(format!("Unknown sort: {other}"))),
        }
    }
}

/// Everything the derived coin list depends on besides the coins themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinQuery {
    pub search: String,
    pub filter: CoinFilter,
    pub sort: CoinSort,
}

impl CoinQuery {
    pub fn new(search: impl Into<String>, filter: CoinFilter, sort: CoinSort) -> Self {
        Self {
            search: search.into(),
            filter,
            sort,
        }
    }
}
