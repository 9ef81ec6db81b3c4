use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::record::PriceRecord;

/// Exchange status Binance reports for pairs open to trading
pub const STATUS_TRADING: &str = "TRADING";

/// Binance error code for a symbol the exchange does not know
pub const ERROR_INVALID_SYMBOL: i64 = -1121;

// Binance API Response structures

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeInfo {
    pub symbols: Vec<SymbolInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolInfo {
    pub symbol: String,
    pub status: String,
}

impl SymbolInfo {
    pub fn is_tradable(&self) -> bool {
        self.status == STATUS_TRADING
    }
}

/// Entry of `/ticker/price`. The price is kept as the exchange's string so
/// that callers can print it without re-rounding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickerPrice {
    pub symbol: String,
    pub price: String,
}

impl TickerPrice {
    pub fn to_record(&self) -> Result<PriceRecord, rust_decimal::Error> {
        Ok(PriceRecord::spot(self.symbol.clone(), parse_decimal(&self.price)?))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticker24h {
    pub symbol: String,
    #[serde(rename = "priceChange")]
    pub price_change: Decimal,
    #[serde(rename = "priceChangePercent")]
    pub price_change_percent: Decimal,
    #[serde(rename = "lastPrice")]
    pub last_price: Decimal,
    #[serde(rename = "highPrice")]
    pub high_price: Decimal,
    #[serde(rename = "lowPrice")]
    pub low_price: Decimal,
    pub volume: Decimal,
}

impl From<Ticker24h> for PriceRecord {
    fn from(ticker: Ticker24h) -> Self {
        PriceRecord {
            symbol: ticker.symbol,
            price: ticker.last_price,
            price_change_24h: Some(ticker.price_change),
            change_percent_24h: Some(ticker.price_change_percent),
            high_24h: Some(ticker.high_price),
            low_24h: Some(ticker.low_price),
            volume_24h: Some(ticker.volume),
        }
    }
}

/// Body Binance sends alongside a non-2xx status
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub code: i64,
    pub msg: String,
}

pub fn parse_decimal(raw: &str) -> Result<Decimal, rust_decimal::Error> {
    use std::str::FromStr;
    Decimal::from_str(raw).or_else(|_| Decimal::from_scientific(raw))
}

/// Symbols ending in `quote` with trading status, sorted and deduplicated.
pub fn tradable_pairs(info: ExchangeInfo, quote: &str) -> Vec<String> {
    let mut pairs: Vec<String> = info
        .symbols
        .into_iter()
        .filter(|s| s.symbol.ends_with(quote) && s.is_tradable())
        .map(|s| s.symbol)
        .collect();
    pairs.sort();
    pairs.dedup();
    pairs
}

/// Restricts a full price snapshot to the pairs quoted in `quote`.
pub fn prices_for_quote(
    tickers: Vec<TickerPrice>,
    quote: &str,
) -> std::collections::BTreeMap<String, String> {
    tickers
        .into_iter()
        .filter(|t| t.symbol.ends_with(quote))
        .map(|t| (t.symbol, t.price))
        .collect()
}
