use futures::stream::{self, StreamExt};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use tracing::{debug, error, instrument, warn};

use super::types::{
    self, ApiErrorBody, ExchangeInfo, Ticker24h, TickerPrice, ERROR_INVALID_SYMBOL,
};
use crate::config::Config;
use crate::error::FetchError;
use crate::record::PriceRecord;

/// Read-only client for Binance's public spot market endpoints.
///
/// Every public method reports failures through `tracing` and hands back an
/// empty value; only the private `try_*` methods return [`FetchError`].
#[derive(Debug, Clone)]
pub struct BinanceClient {
    http_client: Client,
    base_url: String,
    quote_asset: String,
    batch_concurrency: usize,
}

impl BinanceClient {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        Ok(Self {
            http_client,
            base_url: config.binance_base_url.trim_end_matches('/').to_string(),
            quote_asset: config.quote_asset.clone(),
            batch_concurrency: config.batch_concurrency.max(1),
        })
    }

    pub fn quote_asset(&self) -> &str {
        &self.quote_asset
    }

    /// All pairs quoted in the configured asset that are open for trading, sorted ascending
    #[instrument(skip(self), fields(on_close = true))]
    pub async fn list_tradable_pairs(&self) -> Vec<String> {
        match self.try_list_tradable_pairs().await {
            Ok(pairs) => {
                debug!(pair_count = pairs.len(), "Fetched tradable pairs");
                pairs
            }
            Err(e) => {
                error!(error = %e, "Error fetching trading pairs");
                Vec::new()
            }
        }
    }

    #[instrument(skip(self), fields(on_close = true))]
    pub async fn get_price(&self, symbol: &str) -> Option<PriceRecord> {
        match self.try_get_price(symbol).await {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(symbol = %symbol, error = %e, data_absent = e.is_data_absent(), "Error fetching price");
                None
            }
        }
    }

    #[instrument(skip(self), fields(on_close = true))]
    pub async fn get_24h_stats(&self, symbol: &str) -> Option<PriceRecord> {
        match self.try_get_24h_stats(symbol).await {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(symbol = %symbol, error = %e, data_absent = e.is_data_absent(), "Error fetching 24h ticker");
                None
            }
        }
    }

    /// Symbol to raw price string for every pair quoted in the configured asset
    #[instrument(skip(self), fields(on_close = true))]
    pub async fn get_all_prices(&self) -> BTreeMap<String, String> {
        match self.try_get_all_prices().await {
            Ok(prices) => prices,
            Err(e) => {
                error!(error = %e, "Error fetching all prices");
                BTreeMap::new()
            }
        }
    }

    /// Fetches each symbol's price with at most `batch_concurrency` requests in
    /// flight. The result has one entry per input symbol, in input order; a
    /// failed symbol maps to `None` without affecting the others.
    #[instrument(skip(self, symbols), fields(symbol_count = symbols.len(), on_close = true))]
    pub async fn get_multiple_prices(&self, symbols: &[String]) -> Vec<(String, Option<String>)> {
        let results: Vec<(String, Option<String>)> = stream::iter(symbols.iter().cloned())
            .map(|symbol| async move {
                let price = match self.try_get_ticker(&symbol).await {
                    Ok(ticker) => Some(ticker.price),
                    Err(e) => {
                        warn!(symbol = %symbol, error = %e, "Error fetching price");
                        None
                    }
                };
                (symbol, price)
            })
            .buffered(self.batch_concurrency)
            .collect()
            .await;

        let failed = results.iter().filter(|(_, price)| price.is_none()).count();
        debug!(fetched = results.len() - failed, failed, "Batch price fetch completed");
        results
    }

    async fn try_list_tradable_pairs(&self) -> Result<Vec<String>, FetchError> {
        let info: ExchangeInfo = self.get_json("/exchangeInfo", &[], None).await?;
        Ok(types::tradable_pairs(info, &self.quote_asset))
    }

    async fn try_get_ticker(&self, symbol: &str) -> Result<TickerPrice, FetchError> {
        self.get_json("/ticker/price", &[("symbol", symbol)], Some(symbol)).await
    }

    async fn try_get_price(&self, symbol: &str) -> Result<PriceRecord, FetchError> {
        self.try_get_ticker(symbol)
            .await?
            .to_record()
            .map_err(|e| FetchError::Decode(format!("price for {}: {}", symbol, e)))
    }

    async fn try_get_24h_stats(&self, symbol: &str) -> Result<PriceRecord, FetchError> {
        let ticker: Ticker24h = self
            .get_json("/ticker/24hr", &[("symbol", symbol)], Some(symbol))
            .await?;
        Ok(ticker.into())
    }

    async fn try_get_all_prices(&self) -> Result<BTreeMap<String, String>, FetchError> {
        let tickers: Vec<TickerPrice> = self.get_json("/ticker/price", &[], None).await?;
        if tickers.is_empty() {
            return Err(FetchError::Empty("/ticker/price"));
        }
        Ok(types::prices_for_quote(tickers, &self.quote_asset))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
        symbol: Option<&str>,
    ) -> Result<T, FetchError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, ?params, "Sending request to Binance API");

        let mut request = self.http_client.get(&url);
        if !params.is_empty() {
            request = request.query(params);
        }
        let response = check_status(request.send().await?, symbol).await?;

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

// Classifies a non-2xx response using Binance's `{code, msg}` error body when present
async fn check_status(response: Response, symbol: Option<&str>) -> Result<Response, FetchError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::TOO_MANY_REQUESTS || status == StatusCode::IM_A_TEAPOT {
        return Err(FetchError::RateLimited { status });
    }

    let body = response.text().await.unwrap_or_default();
    if let Ok(api_error) = serde_json::from_str::<ApiErrorBody>(&body) {
        if api_error.code == ERROR_INVALID_SYMBOL {
            return Err(FetchError::UnknownSymbol(symbol.unwrap_or_default().to_string()));
        }
        return Err(FetchError::Status { status, body: api_error.msg });
    }
    Err(FetchError::Status { status, body })
}
