pub mod config;
pub mod logging;
pub mod error;
pub mod record;
pub mod format;
pub mod report;
pub mod dispatch;
pub mod binance;
pub mod coingecko;
