#![allow(dead_code)]

use axum::{
    extract::Query,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::collections::HashMap;
use usdc_price_feeds::config::Config;

/// Serves `router` on an ephemeral localhost port and returns its base URL.
pub async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// A localhost URL nothing is listening on
pub fn dead_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/api/v3", addr)
}

pub fn binance_config(base_url: &str) -> Config {
    Config {
        binance_base_url: format!("{}/api/v3", base_url),
        ..Config::default()
    }
}

pub fn coingecko_config(base_url: &str) -> Config {
    Config {
        coingecko_base_url: format!("{}/api/v3", base_url),
        ..Config::default()
    }
}

// --- Binance stub ---

pub fn binance_router() -> Router {
    Router::new()
        .route("/api/v3/exchangeInfo", get(exchange_info))
        .route("/api/v3/ticker/price", get(ticker_price))
        .route("/api/v3/ticker/24hr", get(ticker_24h))
}

async fn exchange_info() -> Json<serde_json::Value> {
    Json(json!({
        "timezone": "UTC",
        "serverTime": 1714566600000u64,
        "symbols": [
            {"symbol": "SOLUSDC", "status": "TRADING", "baseAsset": "SOL", "quoteAsset": "USDC"},
            {"symbol": "ETHUSDC", "status": "TRADING", "baseAsset": "ETH", "quoteAsset": "USDC"},
            {"symbol": "LUNAUSDC", "status": "BREAK", "baseAsset": "LUNA", "quoteAsset": "USDC"},
            {"symbol": "ETHBTC", "status": "TRADING", "baseAsset": "ETH", "quoteAsset": "BTC"},
            {"symbol": "BTCUSDC", "status": "TRADING", "baseAsset": "BTC", "quoteAsset": "USDC"},
            {"symbol": "ETHUSDC", "status": "TRADING", "baseAsset": "ETH", "quoteAsset": "USDC"}
        ]
    }))
}

async fn ticker_price(Query(params): Query<HashMap<String, String>>) -> Response {
    match params.get("symbol").map(String::as_str) {
        None => Json(json!([
            {"symbol": "BTCUSDC", "price": "50000.12345678"},
            {"symbol": "ETHBTC", "price": "0.05"}
        ]))
        .into_response(),
        Some("BTCUSDC") => Json(json!({"symbol": "BTCUSDC", "price": "50000.12345678"})).into_response(),
        Some("ETHUSDC") => Json(json!({"symbol": "ETHUSDC", "price": "3000.50000000"})).into_response(),
        Some("SOLUSDC") => Json(json!({"symbol": "SOLUSDC", "price": "150.25000000"})).into_response(),
        Some("FAILUSDC") => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        Some("BUSYUSDC") => (StatusCode::TOO_MANY_REQUESTS, "Too many requests").into_response(),
        Some("GARBLEDUSDC") => Json(json!({"symbol": "GARBLEDUSDC"})).into_response(),
        Some(_) => invalid_symbol(),
    }
}

async fn ticker_24h(Query(params): Query<HashMap<String, String>>) -> Response {
    match params.get("symbol").map(String::as_str) {
        Some("ETHUSDC") => Json(json!({
            "symbol": "ETHUSDC",
            "priceChange": "-12.50000000",
            "priceChangePercent": "-0.412",
            "weightedAvgPrice": "3010.10000000",
            "lastPrice": "3000.50000000",
            "highPrice": "3100.00000000",
            "lowPrice": "2950.00000000",
            "volume": "1520.12340000",
            "quoteVolume": "4580000.50000000",
            "count": 10234
        }))
        .into_response(),
        _ => invalid_symbol(),
    }
}

fn invalid_symbol() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"code": -1121, "msg": "Invalid symbol."})),
    )
        .into_response()
}

// --- CoinGecko stub ---

pub fn coingecko_router() -> Router {
    Router::new().route("/api/v3/simple/price", get(simple_price))
}

async fn simple_price(Query(params): Query<HashMap<String, String>>) -> Response {
    let complete = params.get("vs_currencies").map(String::as_str) == Some("usd")
        && params.get("include_24hr_change").map(String::as_str) == Some("true")
        && params.get("include_24hr_vol").map(String::as_str) == Some("true")
        && params.get("ids").is_some_and(|ids| ids.split(',').count() == 10);
    if !complete {
        return (StatusCode::BAD_REQUEST, "missing parameters").into_response();
    }

    Json(json!({
        "bitcoin": {"usd": 50000.125, "usd_24h_change": 1.2345, "usd_24h_vol": 35000000000.0},
        "ethereum": {"usd": 3012.345, "usd_24h_change": -2.456, "usd_24h_vol": 9876543.21},
        "solana": {"usd": 150.25, "usd_24h_change": 0.0, "usd_24h_vol": 1234567.5}
    }))
    .into_response()
}

pub fn failing_coingecko_router() -> Router {
    Router::new().route(
        "/api/v3/simple/price",
        get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "maintenance") }),
    )
}
