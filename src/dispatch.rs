use std::io::Write;
use tracing::{debug, instrument};

use crate::binance::BinanceClient;
use crate::format::{
    format_condensed, format_expanded, format_listing_line, format_table_line, RULE,
};

pub const FULL_FLAG: &str = "--full";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Usage,
    List,
    All,
    Price { symbol: String },
    Stats { symbol: String },
}

impl Command {
    /// Parses the arguments that follow the program name. The first token
    /// selects the mode; `--full` may appear anywhere after it.
    pub fn parse<S: AsRef<str>>(args: &[S], quote: &str) -> Self {
        let Some(first) = args.first().map(|a| a.as_ref().trim()) else {
            return Command::Usage;
        };
        if first.is_empty() || first.eq_ignore_ascii_case(FULL_FLAG) {
            return Command::Usage;
        }

        match first.to_uppercase().as_str() {
            "LIST" => Command::List,
            "ALL" => Command::All,
            _ => {
                let symbol = normalize_symbol(first, quote);
                let full = args[1..].iter().any(|a| a.as_ref().trim().eq_ignore_ascii_case(FULL_FLAG));
                if full {
                    Command::Stats { symbol }
                } else {
                    Command::Price { symbol }
                }
            }
        }
    }
}

/// Upper-cases `token` and appends the quote suffix when it is missing.
pub fn normalize_symbol(token: &str, quote: &str) -> String {
    let symbol = token.trim().to_uppercase();
    let quote = quote.to_uppercase();
    if symbol.ends_with(&quote) {
        symbol
    } else {
        format!("{}{}", symbol, quote)
    }
}

pub fn usage(program: &str, quote: &str) -> String {
    format!(
        "Binance {quote} Price Fetcher\n\
         {RULE}\n\
         \n\
         Usage:\n  \
         {program} list              - List all {quote} pairs\n  \
         {program} all               - Get all {quote} pair prices\n  \
         {program} <SYMBOL>          - Get price for specific pair\n  \
         {program} <SYMBOL> --full   - Get detailed 24h stats\n\
         \n\
         Examples:\n  \
         {program} BTC{quote}\n  \
         {program} ETH{quote} --full\n"
    )
}

/// Executes `command`, writing everything the CLI prints to `out`.
#[instrument(skip(client, out), fields(on_close = true))]
pub async fn run<W: Write>(
    command: &Command,
    program: &str,
    client: &BinanceClient,
    out: &mut W,
) -> std::io::Result<()> {
    let quote = client.quote_asset();
    debug!(?command, "Dispatching command");

    match command {
        Command::Usage => {
            write!(out, "{}", usage(program, quote))?;
        }
        Command::List => {
            writeln!(out, "Available {} Trading Pairs:", quote)?;
            writeln!(out, "{}", RULE)?;
            let pairs = client.list_tradable_pairs().await;
            for (i, pair) in pairs.iter().enumerate() {
                writeln!(out, "{}", format_listing_line(i + 1, pair))?;
            }
            writeln!(out, "\nTotal: {} pairs", pairs.len())?;
        }
        Command::All => {
            writeln!(out, "Fetching all {} pair prices...", quote)?;
            writeln!(out, "{}", RULE)?;
            let prices = client.get_all_prices().await;
            for (symbol, price) in &prices {
                writeln!(out, "{}", format_table_line(symbol, price, quote))?;
            }
            writeln!(out, "\nTotal: {} pairs", prices.len())?;
        }
        Command::Price { symbol } => {
            writeln!(out, "Fetching price for {}...", symbol)?;
            writeln!(out, "{}", RULE)?;
            let record = client.get_price(symbol).await;
            writeln!(out, "{}", format_condensed(symbol, quote, record.as_ref()))?;
        }
        Command::Stats { symbol } => {
            writeln!(out, "Fetching detailed statistics for {}...", symbol)?;
            writeln!(out, "{}", RULE)?;
            let record = client.get_24h_stats(symbol).await;
            writeln!(out, "{}", format_expanded(symbol, quote, record.as_ref()))?;
        }
    }
    Ok(())
}
