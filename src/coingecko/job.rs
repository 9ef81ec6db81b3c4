use eyre::Result;
use std::io::Write;
use std::process::ExitCode;
use tracing::{error, info, instrument};

use super::client::CoinGeckoClient;
use crate::config::Config;
use crate::report::ReportWriter;

/// One aggregation run: fetch the basket, write both artifacts, report
/// progress to `out`. A failed fetch writes nothing and yields
/// `ExitCode::FAILURE`; write failures are returned as errors.
#[instrument(skip(config, out), fields(on_close = true))]
pub async fn run<W: Write>(config: &Config, out: &mut W) -> Result<ExitCode> {
    writeln!(out, "Fetching prices from CoinGecko...")?;

    let client = CoinGeckoClient::new(config)?;
    let report = match client.fetch_report().await {
        Ok(report) => report,
        Err(e) => {
            error!(error = %e, "Error fetching from CoinGecko");
            writeln!(out, "✗ Failed to fetch prices")?;
            return Ok(ExitCode::FAILURE);
        }
    };

    let writer = ReportWriter::from_config(config);
    writer.write(&report)?;
    info!(pair_count = report.prices.len(), "Aggregation run completed");

    writeln!(out, "✓ Successfully fetched {} prices", report.prices.len())?;
    writeln!(out, "✓ Saved to {}", writer.json_path().display())?;
    writeln!(out, "✓ Saved summary to {}", writer.markdown_path().display())?;

    Ok(ExitCode::SUCCESS)
}
