//! CoinGecko public API, used for the aggregated price report.

pub mod client;
pub mod job;
pub mod types;

pub use client::CoinGeckoClient;
pub use job::run;
