use dotenvy::dotenv;
use std::io::Write;
use tracing::{debug, instrument};

use usdc_price_feeds::binance::BinanceClient;
use usdc_price_feeds::config;
use usdc_price_feeds::dispatch::{self, Command};
use usdc_price_feeds::logging;

#[instrument(name = "binance_prices_main")]
#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Load environment variables from .env file, if there is one
    dotenv().ok();

    // Initialize logging
    if let Err(e) = logging::init_logging(env!("CARGO_BIN_NAME").to_string()) {
        eprintln!("Failed to initialize logging: {}", e);
        return Err(e);
    }

    let cfg = config::Config::load()?;
    debug!(base_url = %cfg.binance_base_url, quote = %cfg.quote_asset, "Configuration loaded");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = Command::parse(&args[..], &cfg.quote_asset);

    // One client per invocation, dropped on exit
    let client = BinanceClient::new(&cfg)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    dispatch::run(&command, env!("CARGO_BIN_NAME"), &client, &mut out).await?;
    out.flush()?;

    Ok(())
}
