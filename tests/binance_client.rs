mod common;

use rust_decimal::dec;
use usdc_price_feeds::binance::BinanceClient;
use usdc_price_feeds::config::Config;

use common::{binance_config, binance_router, dead_base_url, spawn_stub};

async fn stub_client() -> BinanceClient {
    let base = spawn_stub(binance_router()).await;
    BinanceClient::new(&binance_config(&base)).unwrap()
}

#[tokio::test]
async fn tradable_pairs_are_sorted_unique_and_active() {
    let client = stub_client().await;
    let pairs = client.list_tradable_pairs().await;

    assert_eq!(pairs, vec!["BTCUSDC", "ETHUSDC", "SOLUSDC"]);
    assert!(pairs.windows(2).all(|w| w[0] < w[1]));
}

#[tokio::test]
async fn all_prices_keeps_only_quote_pairs() {
    let client = stub_client().await;
    let prices = client.get_all_prices().await;

    assert_eq!(prices.len(), 1);
    assert_eq!(prices.get("BTCUSDC").map(String::as_str), Some("50000.12345678"));
}

#[tokio::test]
async fn single_price_and_24h_stats() {
    let client = stub_client().await;

    let record = client.get_price("BTCUSDC").await.unwrap();
    assert_eq!(record.symbol, "BTCUSDC");
    assert_eq!(record.price, dec!(50000.12345678));

    let stats = client.get_24h_stats("ETHUSDC").await.unwrap();
    assert_eq!(stats.price, dec!(3000.5));
    assert_eq!(stats.high_24h, Some(dec!(3100)));
    assert_eq!(stats.low_24h, Some(dec!(2950)));
    assert_eq!(stats.volume_24h, Some(dec!(1520.1234)));
    assert_eq!(stats.change_percent_24h, Some(dec!(-0.412)));
}

#[tokio::test]
async fn failures_become_none() {
    let client = stub_client().await;

    assert!(client.get_price("NOPEUSDC").await.is_none());
    assert!(client.get_price("FAILUSDC").await.is_none());
    assert!(client.get_price("BUSYUSDC").await.is_none());
    assert!(client.get_price("GARBLEDUSDC").await.is_none());
    assert!(client.get_24h_stats("NOPEUSDC").await.is_none());
}

#[tokio::test]
async fn transport_failure_returns_sentinels() {
    let cfg = Config {
        binance_base_url: dead_base_url(),
        ..Config::default()
    };
    let client = BinanceClient::new(&cfg).unwrap();

    assert!(client.get_price("BTCUSDC").await.is_none());
    assert!(client.get_24h_stats("BTCUSDC").await.is_none());
    assert!(client.list_tradable_pairs().await.is_empty());
    assert!(client.get_all_prices().await.is_empty());
}

#[tokio::test]
async fn batch_isolates_failures_and_keeps_order() {
    let client = stub_client().await;
    let symbols: Vec<String> = ["SOLUSDC", "BTCUSDC", "FAILUSDC", "ETHUSDC"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let prices = client.get_multiple_prices(&symbols).await;

    assert_eq!(prices.len(), symbols.len());
    let keys: Vec<&str> = prices.iter().map(|(s, _)| s.as_str()).collect();
    assert_eq!(keys, vec!["SOLUSDC", "BTCUSDC", "FAILUSDC", "ETHUSDC"]);
    assert_eq!(prices.iter().filter(|(_, p)| p.is_none()).count(), 1);
    assert_eq!(prices[2].1, None);
    assert_eq!(prices[1].1.as_deref(), Some("50000.12345678"));
    assert_eq!(prices[3].1.as_deref(), Some("3000.50000000"));
}

#[tokio::test]
async fn batch_with_width_one_matches_sequential() {
    let base = spawn_stub(binance_router()).await;
    let cfg = Config {
        batch_concurrency: 1,
        ..binance_config(&base)
    };
    let client = BinanceClient::new(&cfg).unwrap();
    let symbols = vec!["ETHUSDC".to_string(), "NOPEUSDC".to_string()];

    let prices = client.get_multiple_prices(&symbols).await;
    assert_eq!(
        prices,
        vec![
            ("ETHUSDC".to_string(), Some("3000.50000000".to_string())),
            ("NOPEUSDC".to_string(), None),
        ]
    );
}

#[tokio::test]
async fn empty_batch_returns_empty() {
    let client = stub_client().await;
    assert!(client.get_multiple_prices(&[]).await.is_empty());
}
