use dotenvy::dotenv;
use eyre::{eyre, Result, WrapErr};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const BINANCE_BASE_URL: &str = "https://api.binance.com/api/v3";
pub const COINGECKO_BASE_URL: &str = "https://api.coingecko.com/api/v3";
pub const QUOTE_ASSET: &str = "USDC";
pub const REPORT_JSON_PATH: &str = "prices_data_coingecko.json";
pub const REPORT_MARKDOWN_PATH: &str = "PRICE_SUMMARY_COINGECKO.md";
pub const COINGECKO_TIMEOUT_SECS: u64 = 30;
pub const BATCH_CONCURRENCY: usize = 4;

#[derive(Debug, Clone)]
pub struct Config {
    pub binance_base_url: String,
    pub coingecko_base_url: String,
    pub quote_asset: String,
    /// Binance requests run without an explicit timeout unless one is set
    pub request_timeout: Option<Duration>,
    pub coingecko_timeout: Duration,
    pub batch_concurrency: usize,
    pub report_json_path: PathBuf,
    pub report_markdown_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            binance_base_url: BINANCE_BASE_URL.to_string(),
            coingecko_base_url: COINGECKO_BASE_URL.to_string(),
            quote_asset: QUOTE_ASSET.to_string(),
            request_timeout: None,
            coingecko_timeout: Duration::from_secs(COINGECKO_TIMEOUT_SECS),
            batch_concurrency: BATCH_CONCURRENCY,
            report_json_path: PathBuf::from(REPORT_JSON_PATH),
            report_markdown_path: PathBuf::from(REPORT_MARKDOWN_PATH),
        }
    }
}

impl Config {
    /// Loads the defaults, overridden by any variables present in the
    /// environment or an optional `.env` file.
    pub fn load() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Applies overrides from `lookup` (variable name to value) on top of the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut cfg = Config::default();

        if let Some(url) = lookup("BINANCE_API_URL") {
            cfg.binance_base_url = validate_base_url(&url).wrap_err("Invalid BINANCE_API_URL")?;
        }
        if let Some(url) = lookup("COINGECKO_API_URL") {
            cfg.coingecko_base_url = validate_base_url(&url).wrap_err("Invalid COINGECKO_API_URL")?;
        }
        if let Some(quote) = lookup("QUOTE_ASSET") {
            let quote = quote.trim().to_uppercase();
            if quote.is_empty() {
                return Err(eyre!("QUOTE_ASSET must not be empty"));
            }
            cfg.quote_asset = quote;
        }
        if let Some(secs) = lookup("REQUEST_TIMEOUT_SECS") {
            cfg.request_timeout = Some(Duration::from_secs(
                secs.trim().parse().wrap_err("REQUEST_TIMEOUT_SECS must be a whole number of seconds")?,
            ));
        }
        if let Some(secs) = lookup("COINGECKO_TIMEOUT_SECS") {
            cfg.coingecko_timeout = Duration::from_secs(
                secs.trim().parse().wrap_err("COINGECKO_TIMEOUT_SECS must be a whole number of seconds")?,
            );
        }
        if let Some(width) = lookup("BATCH_CONCURRENCY") {
            let width: usize = width.trim().parse().wrap_err("BATCH_CONCURRENCY must be a positive integer")?;
            cfg.batch_concurrency = width.max(1);
        }
        if let Some(path) = lookup("REPORT_JSON_PATH") {
            cfg.report_json_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("REPORT_MARKDOWN_PATH") {
            cfg.report_markdown_path = PathBuf::from(path);
        }

        Ok(cfg)
    }
}

// Trailing slashes are stripped so endpoint paths can be appended with a single '/'
fn validate_base_url(raw: &str) -> Result<String> {
    let parsed = Url::parse(raw.trim())?;
    if parsed.cannot_be_a_base() {
        return Err(eyre!("{} cannot be used as a base URL", raw));
    }
    Ok(parsed.as_str().trim_end_matches('/').to_string())
}
