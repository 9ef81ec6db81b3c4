use chrono::{DateTime, SecondsFormat, Utc};
use eyre::{Result, WrapErr};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use crate::config::Config;
use crate::format::{format_decimal, format_signed};
use crate::record::PriceRecord;

pub const REPORT_TITLE: &str = "Crypto Prices (CoinGecko)";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportQuote {
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub change_24h: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub volume_24h: Decimal,
}

impl From<&PriceRecord> for ReportQuote {
    fn from(record: &PriceRecord) -> Self {
        Self {
            price: record.price,
            change_24h: record.change_percent_24h.unwrap_or(Decimal::ZERO),
            volume_24h: record.volume_24h.unwrap_or(Decimal::ZERO),
        }
    }
}

/// Snapshot written once per aggregation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub timestamp: String,
    pub source: String,
    pub prices: BTreeMap<String, ReportQuote>, // Keyed by pair label, e.g. "BTC/USDC"
}

impl Report {
    /// Records are keyed by their `symbol`, which for reports is the pair label.
    pub fn from_records<'a>(
        source: &str,
        timestamp: DateTime<Utc>,
        records: impl IntoIterator<Item = &'a PriceRecord>,
    ) -> Self {
        Self {
            timestamp: report_timestamp(timestamp),
            source: source.to_string(),
            prices: records
                .into_iter()
                .map(|record| (record.symbol.clone(), ReportQuote::from(record)))
                .collect(),
        }
    }
}

/// ISO-8601 UTC with microseconds and a trailing `Z`
pub fn report_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn render_json(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).wrap_err("Failed to serialize report")
}

pub fn render_markdown(report: &Report) -> String {
    let mut out = format!(
        "# {}\n\n**Last Updated:** {}\n\n**Source:** {}\n\n",
        REPORT_TITLE, report.timestamp, report.source
    );

    for (pair, quote) in &report.prices {
        let indicator = if quote.change_24h >= Decimal::ZERO { "🟢" } else { "🔴" };
        out.push_str(&format!("### {} {}\n\n", indicator, pair));
        out.push_str(&format!("- **Price:** ${}\n", format_decimal(quote.price, 2)));
        out.push_str(&format!("- **24h Change:** {}%\n", format_signed(quote.change_24h, 2)));
        out.push_str(&format!("- **24h Volume:** ${}\n\n", format_decimal(quote.volume_24h, 0)));
    }
    out
}

#[derive(Debug, Clone)]
pub struct ReportWriter {
    json_path: PathBuf,
    markdown_path: PathBuf,
}

impl ReportWriter {
    pub fn new(json_path: impl Into<PathBuf>, markdown_path: impl Into<PathBuf>) -> Self {
        Self {
            json_path: json_path.into(),
            markdown_path: markdown_path.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.report_json_path, &config.report_markdown_path)
    }

    pub fn json_path(&self) -> &Path {
        &self.json_path
    }

    pub fn markdown_path(&self) -> &Path {
        &self.markdown_path
    }

    /// Overwrites both artifacts in full
    #[instrument(skip(self, report), fields(pair_count = report.prices.len(), on_close = true))]
    pub fn write(&self, report: &Report) -> Result<()> {
        let json = render_json(report)?;
        fs::write(&self.json_path, json)
            .wrap_err_with(|| format!("Failed to write {}", self.json_path.display()))?;

        fs::write(&self.markdown_path, render_markdown(report))
            .wrap_err_with(|| format!("Failed to write {}", self.markdown_path.display()))?;

        info!(
            json_path = %self.json_path.display(),
            markdown_path = %self.markdown_path.display(),
            "Report written"
        );
        Ok(())
    }
}
