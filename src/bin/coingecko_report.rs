use dotenvy::dotenv;
use std::io::Write;
use std::process::ExitCode;
use tracing::{info, instrument};

use usdc_price_feeds::coingecko;
use usdc_price_feeds::config;
use usdc_price_feeds::logging;

#[instrument(name = "coingecko_report_main")]
#[tokio::main]
async fn main() -> eyre::Result<ExitCode> {
    // Load environment variables from .env file, if there is one
    dotenv().ok();

    // Initialize logging
    if let Err(e) = logging::init_logging(env!("CARGO_BIN_NAME").to_string()) {
        eprintln!("Failed to initialize logging: {}", e);
        return Err(e);
    }

    let cfg = config::Config::load()?;
    info!(base_url = %cfg.coingecko_base_url, "Configuration loaded");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let code = coingecko::run(&cfg, &mut out).await?;
    out.flush()?;

    Ok(code)
}
