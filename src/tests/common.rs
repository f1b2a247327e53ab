//! Hand-written providers and fixtures shared by unit tests.

use crate::api::dexscreener::{BaseToken, Liquidity, PairInfo, TransactionCount, Transactions, Volume};
use crate::api::{DexDataProvider, DexPair, PriceDataProvider, RankingProvider};
use crate::error::{Error, Result};
use crate::models::{CmcMetrics, CoinSnapshot, PricePoint, PriceSeries};
use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, TimeZone, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub fn pair(symbol: &str, address: &str, chain: &str, liquidity: f64) -> DexPair {
    DexPair {
        chain_id: chain.to_string(),
        dex_id: "uniswap".to_string(),
        pair_address: format!("{}-pair", address),
        base_token: BaseToken {
            address: address.to_string(),
            name: format!("{} Token", symbol),
            symbol: symbol.to_string(),
        },
        price_usd: Some("1.50".to_string()),
        txns: Some(Transactions {
            h24: Some(TransactionCount { buys: 300, sells: 100 }),
        }),
        volume: Some(Volume {
            h24: Some(2_000_000.0),
            h6: Some(500_000.0),
            h1: Some(80_000.0),
        }),
        liquidity: Some(Liquidity { usd: Some(liquidity) }),
        market_cap: Some(150_000_000.0),
        fdv: Some(200_000_000.0),
        info: Some(PairInfo {
            image_url: Some(format!("https://img.example/{}.png", symbol.to_lowercase())),
        }),
        ..Default::default()
    }
}

pub fn snapshot(symbol: &str, price: f64, market_cap: f64) -> CoinSnapshot {
    CoinSnapshot {
        id: symbol.to_lowercase(),
        symbol: symbol.to_lowercase(),
        name: symbol.to_string(),
        current_price: price,
        market_cap,
        total_volume: 28e9,
        price_change_percentage_24h: 2.4,
        image: None,
    }
}

/// Daily closes starting 2024-01-01.
pub fn series(prices: &[f64]) -> PriceSeries {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    PriceSeries::new(
        prices
            .iter()
            .enumerate()
            .map(|(i, price)| PricePoint {
                timestamp: start + ChronoDuration::days(i as i64),
                price: *price,
            })
            .collect(),
    )
}

pub fn ranking(symbol: &str, rank: u32) -> CmcMetrics {
    let mut metrics = CmcMetrics {
        ticker: symbol.to_string(),
        name: symbol.to_string(),
        rank,
        percent_change_1h: 0.4,
        percent_change_24h: 2.0,
        percent_change_7d: 5.0,
        percent_change_30d: 12.0,
        tags: vec!["ai-big-data".to_string()],
        ..Default::default()
    };
    metrics.apply_tag_flags();
    metrics
}

#[derive(Default)]
pub struct StubDex {
    pub by_address: HashMap<String, Vec<DexPair>>,
    pub search: Vec<DexPair>,
    pub fail: bool,
    pub delay: Option<Duration>,
    pub calls: AtomicUsize,
}

impl StubDex {
    async fn respond(&self, pairs: Vec<DexPair>) -> Result<Vec<DexPair>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(Error::ApiError("dex stub failure".to_string()));
        }
        Ok(pairs)
    }
}

#[async_trait]
impl DexDataProvider for StubDex {
    async fn token_pairs(&self, address: &str) -> Result<Vec<DexPair>> {
        let pairs = self.by_address.get(address).cloned().unwrap_or_default();
        self.respond(pairs).await
    }

    async fn search_pairs(&self, _query: &str) -> Result<Vec<DexPair>> {
        self.respond(self.search.clone()).await
    }
}

#[derive(Default)]
pub struct StubPrices {
    pub snapshot: Option<CoinSnapshot>,
    pub history: Option<PriceSeries>,
}

#[async_trait]
impl PriceDataProvider for StubPrices {
    async fn snapshot(&self, symbol: &str) -> Result<CoinSnapshot> {
        self.snapshot
            .clone()
            .ok_or_else(|| Error::SourceUnavailable(format!("no snapshot for {}", symbol)))
    }

    async fn snapshots(&self, _symbols: &[&str]) -> Result<Vec<CoinSnapshot>> {
        Ok(self.snapshot.clone().into_iter().collect())
    }

    async fn price_history(&self, symbol: &str, _days: u32) -> Result<PriceSeries> {
        self.history
            .clone()
            .ok_or_else(|| Error::ApiError(format!("history unavailable for {}", symbol)))
    }
}

pub struct StubRanking(pub Option<CmcMetrics>);

#[async_trait]
impl RankingProvider for StubRanking {
    async fn ranking(&self, symbol: &str) -> Result<CmcMetrics> {
        self.0
            .clone()
            .ok_or_else(|| Error::RateLimitExceeded(format!("ranking for {}", symbol)))
    }
}
