use chrono::Utc;
use reqwest::Client;
use std::collections::BTreeMap;
use tracing::{debug, info, instrument, warn};

use super::types::{SimplePrice, SimplePriceResponse, TrackedCoin, TRACKED_COINS};
use crate::config::Config;
use crate::error::FetchError;
use crate::record::PriceRecord;
use crate::report::Report;

pub const REPORT_SOURCE: &str = "CoinGecko API";

/// Pair label used for every report entry, independent of the Binance quote asset
pub const REPORT_QUOTE_LABEL: &str = "USDC";

#[derive(Debug, Clone)]
pub struct CoinGeckoClient {
    http_client: Client,
    base_url: String,
}

impl CoinGeckoClient {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let http_client = Client::builder().timeout(config.coingecko_timeout).build()?;

        Ok(Self {
            http_client,
            base_url: config.coingecko_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Simple USD prices with 24h change and volume, keyed by CoinGecko id
    #[instrument(skip(self, coins), fields(coin_count = coins.len(), on_close = true))]
    pub async fn fetch_simple_prices(
        &self,
        coins: &[TrackedCoin],
    ) -> Result<BTreeMap<String, SimplePrice>, FetchError> {
        let ids = coins.iter().map(|c| c.id).collect::<Vec<_>>().join(",");
        let url = format!("{}/simple/price", self.base_url);
        let params = [
            ("ids", ids.as_str()),
            ("vs_currencies", "usd"),
            ("include_24hr_change", "true"),
            ("include_24hr_vol", "true"),
        ];

        debug!(url = %url, ids = %ids, "Sending request to CoinGecko API");
        let response = self.http_client.get(&url).query(&params).send().await?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(FetchError::RateLimited { status });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status { status, body });
        }

        let body = response.bytes().await?;
        let prices: SimplePriceResponse = serde_json::from_slice(&body)?;
        Ok(prices)
    }

    /// Builds the report for the tracked basket. Coins absent from the
    /// response are left out of the report.
    #[instrument(skip(self), fields(on_close = true))]
    pub async fn fetch_report(&self) -> Result<Report, FetchError> {
        let prices = self.fetch_simple_prices(&TRACKED_COINS).await?;
        let report = build_report(&prices, &TRACKED_COINS, REPORT_QUOTE_LABEL);
        info!(pair_count = report.prices.len(), "CoinGecko prices collected");
        Ok(report)
    }
}

pub fn build_report(
    prices: &BTreeMap<String, SimplePrice>,
    coins: &[TrackedCoin],
    quote_label: &str,
) -> Report {
    let records: Vec<PriceRecord> = coins
        .iter()
        .filter_map(|coin| match prices.get(coin.id) {
            Some(entry) => Some(entry.to_record(&coin.pair_label(quote_label))),
            None => {
                warn!(coin_id = coin.id, "Coin missing from CoinGecko response");
                None
            }
        })
        .collect();

    Report::from_records(REPORT_SOURCE, Utc::now(), &records)
}
