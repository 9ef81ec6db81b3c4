use rust_decimal::Decimal;

/// A single price observation for one trading pair.
///
/// Only `price` is guaranteed; the rolling 24h fields are present when the
/// source endpoint reports them.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRecord {
    pub symbol: String,
    pub price: Decimal,
    pub price_change_24h: Option<Decimal>, // Absolute change over the window
    pub change_percent_24h: Option<Decimal>,
    pub high_24h: Option<Decimal>,
    pub low_24h: Option<Decimal>,
    pub volume_24h: Option<Decimal>,
}

impl PriceRecord {
    pub fn spot(symbol: impl Into<String>, price: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            price,
            price_change_24h: None,
            change_percent_24h: None,
            high_24h: None,
            low_24h: None,
            volume_24h: None,
        }
    }
}
