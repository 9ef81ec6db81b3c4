use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::record::PriceRecord;

/// A coin followed by the report: CoinGecko id plus the ticker used in pair labels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackedCoin {
    pub id: &'static str,
    pub symbol: &'static str,
}

pub const TRACKED_COINS: [TrackedCoin; 10] = [
    TrackedCoin { id: "bitcoin", symbol: "BTC" },
    TrackedCoin { id: "ethereum", symbol: "ETH" },
    TrackedCoin { id: "binancecoin", symbol: "BNB" },
    TrackedCoin { id: "solana", symbol: "SOL" },
    TrackedCoin { id: "cardano", symbol: "ADA" },
    TrackedCoin { id: "dogecoin", symbol: "DOGE" },
    TrackedCoin { id: "ripple", symbol: "XRP" },
    TrackedCoin { id: "polkadot", symbol: "DOT" },
    TrackedCoin { id: "avalanche-2", symbol: "AVAX" },
    TrackedCoin { id: "chainlink", symbol: "LINK" },
];

impl TrackedCoin {
    pub fn pair_label(&self, quote: &str) -> String {
        format!("{}/{}", self.symbol, quote)
    }
}

/// One entry of `/simple/price` with `vs_currencies=usd`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimplePrice {
    #[serde(default)]
    pub usd: Option<Decimal>,
    #[serde(default)]
    pub usd_24h_change: Option<Decimal>,
    #[serde(default)]
    pub usd_24h_vol: Option<Decimal>,
}

pub type SimplePriceResponse = BTreeMap<String, SimplePrice>;

impl SimplePrice {
    /// Missing values count as zero, matching how the report treats them.
    pub fn to_record(&self, pair_label: &str) -> PriceRecord {
        PriceRecord {
            symbol: pair_label.to_string(),
            price: self.usd.unwrap_or(Decimal::ZERO),
            price_change_24h: None,
            change_percent_24h: Some(self.usd_24h_change.unwrap_or(Decimal::ZERO)),
            high_24h: None,
            low_24h: None,
            volume_24h: Some(self.usd_24h_vol.unwrap_or(Decimal::ZERO)),
        }
    }
}
