use crate::models::coin::CoinRecord;

/// Display strings for one coin card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoinCard {
    pub id: String,
    pub name: String,
    /// Upper-cased symbol, e.g. "BTC"
    pub symbol: String,
    /// e.g. "$67,012.5"
    pub price: String,
    /// e.g. "$1,320,442,118,012"
    pub market_cap: String,
    /// e.g. "-1.27%"
    pub change: String,
    /// Non-negative change, rendered as a gain
    pub is_gain: bool,
    pub image: String,
}

impl From<&CoinRecord> for CoinCard {
    fn from(coin: &CoinRecord) -> Self {
        Self {
            id: coin.id.clone(),
            name: coin.name.clone(),
            symbol: coin.symbol.to_uppercase(),
            price: format!("${}", format_grouped(coin.current_price, 3)),
            market_cap: format!("${}", format_grouped(coin.market_cap, 3)),
            change: format!("{:.2}%", coin.price_change_percentage_24h),
            is_gain: coin.is_gainer(),
            image: coin.image.clone(),
        }
    }
}

/// Format a number with comma thousands separators and at most
/// `max_fraction` fraction digits, trailing zeros trimmed.
pub fn format_grouped(value: f64, max_fraction: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let fixed = format!("{:.*}", max_fraction, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, f.trim_end_matches('0')),
        None => (fixed.as_str(), ""),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let negative = value < 0.0 && (int_part != "0" || !frac_part.is_empty());
    let sign = if negative { "-" } else { "" };
    if frac_part.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac_part}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_grouped(1234567.0, 3), "1,234,567");
        assert_eq!(format_grouped(999.0, 3), "999");
        assert_eq!(format_grouped(1000.0, 3), "1,000");
    }

    #[test]
    fn trims_fraction() {
        assert_eq!(format_grouped(67012.5, 3), "67,012.5");
        assert_eq!(format_grouped(0.123456, 3), "0.123");
        assert_eq!(format_grouped(2.0, 3), "2");
    }

    #[test]
    fn negative_values() {
        assert_eq!(format_grouped(-1234.5, 3), "-1,234.5");
        assert_eq!(format_grouped(-0.0001, 3), "0");
    }
}
