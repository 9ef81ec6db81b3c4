//! Binance public REST API (spot market data only).

pub mod client;
pub mod types;

pub use client::BinanceClient;
