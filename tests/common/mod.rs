#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use market_oracle::api::dexscreener::{BaseToken, Liquidity, TransactionCount, Transactions, Volume};
use market_oracle::api::{DexDataProvider, DexPair, PriceDataProvider, RankingProvider, Source};
use market_oracle::config::Config;
use market_oracle::error::{Error, Result};
use market_oracle::models::{CmcMetrics, CoinSnapshot, PricePoint, PriceSeries};
use market_oracle::oracle::{Oracle, Sources};
use std::collections::HashMap;
use std::sync::Arc;

// Helper to create a test config with short timeouts
pub fn create_test_config() -> Config {
    let mut config = Config::default();
    config.timeouts.upstream_ms = 500;
    config.timeouts.resolver_ms = 500;
    config.timeouts.narrative_ms = 500;
    config
}

pub fn create_test_pair(symbol: &str, address: &str, liquidity: f64, buys: u64, sells: u64) -> DexPair {
    DexPair {
        chain_id: "ethereum".to_string(),
        dex_id: "uniswap".to_string(),
        pair_address: format!("{}-weth", address),
        base_token: BaseToken {
            address: address.to_string(),
            name: format!("{} Coin", symbol),
            symbol: symbol.to_string(),
        },
        price_usd: Some("98500".to_string()),
        txns: Some(Transactions {
            h24: Some(TransactionCount { buys, sells }),
        }),
        volume: Some(Volume {
            h24: Some(1_200_000.0),
            h6: Some(300_000.0),
            h1: Some(50_000.0),
        }),
        liquidity: Some(Liquidity { usd: Some(liquidity) }),
        ..Default::default()
    }
}

pub fn create_test_snapshot(symbol: &str, price: f64, market_cap: f64) -> CoinSnapshot {
    CoinSnapshot {
        id: symbol.to_lowercase(),
        symbol: symbol.to_lowercase(),
        name: symbol.to_string(),
        current_price: price,
        market_cap,
        total_volume: 25e9,
        price_change_percentage_24h: 1.5,
        image: None,
    }
}

/// `len` closes that do not move: RSI 50, %b 0.5.
pub fn create_flat_series(price: f64, len: usize) -> PriceSeries {
    let start = Utc::now() - ChronoDuration::days(len as i64);
    PriceSeries::new(
        (0..len)
            .map(|i| PricePoint {
                timestamp: start + ChronoDuration::days(i as i64),
                price,
            })
            .collect(),
    )
}

pub fn create_test_ranking(symbol: &str, rank: u32, changes: [f64; 4]) -> CmcMetrics {
    CmcMetrics {
        ticker: symbol.to_string(),
        name: symbol.to_string(),
        rank,
        percent_change_1h: changes[0],
        percent_change_24h: changes[1],
        percent_change_7d: changes[2],
        percent_change_30d: changes[3],
        ..Default::default()
    }
}

/// In-memory stand-in for every upstream API.
#[derive(Default)]
pub struct InMemoryMarket {
    pub snapshots: HashMap<String, CoinSnapshot>,
    pub histories: HashMap<String, PriceSeries>,
    pub pairs_by_address: HashMap<String, Vec<DexPair>>,
    pub search_results: Vec<DexPair>,
    pub rankings: HashMap<String, CmcMetrics>,
}

#[async_trait]
impl PriceDataProvider for InMemoryMarket {
    async fn snapshot(&self, symbol: &str) -> Result<CoinSnapshot> {
        self.snapshots
            .get(symbol)
            .cloned()
            .ok_or_else(|| Error::SourceUnavailable(symbol.to_string()))
    }

    async fn snapshots(&self, symbols: &[&str]) -> Result<Vec<CoinSnapshot>> {
        Ok(symbols.iter().filter_map(|s| self.snapshots.get(*s).cloned()).collect())
    }

    async fn price_history(&self, symbol: &str, _days: u32) -> Result<PriceSeries> {
        self.histories
            .get(symbol)
            .cloned()
            .ok_or_else(|| Error::ApiError(format!("no history for {}", symbol)))
    }
}

#[async_trait]
impl DexDataProvider for InMemoryMarket {
    async fn token_pairs(&self, address: &str) -> Result<Vec<DexPair>> {
        Ok(self.pairs_by_address.get(address).cloned().unwrap_or_default())
    }

    async fn search_pairs(&self, _query: &str) -> Result<Vec<DexPair>> {
        Ok(self.search_results.clone())
    }
}

#[async_trait]
impl RankingProvider for InMemoryMarket {
    async fn ranking(&self, symbol: &str) -> Result<CmcMetrics> {
        self.rankings
            .get(symbol)
            .cloned()
            .ok_or_else(|| Error::ApiError(format!("no ranking for {}", symbol)))
    }
}

pub fn create_test_oracle(market: InMemoryMarket) -> Oracle {
    let market = Arc::new(market);
    let prices: Arc<dyn PriceDataProvider> = market.clone();
    let dex: Arc<dyn DexDataProvider> = market.clone();
    let ranking: Arc<dyn RankingProvider> = market;

    let sources = Sources {
        prices: Source::Live(prices),
        dex: Source::Live(dex),
        ranking: Source::Live(ranking),
        narrator: None,
    };
    Oracle::new(sources, &create_test_config())
}

/// BTC with a flat history, balanced DEX flow, flat momentum, rank 1 and a
/// $1T market cap.
pub fn create_btc_market() -> InMemoryMarket {
    let address = "0x2260FAC5E5542a773Aa44fBCfeDf7C193bc2C599";
    let mut market = InMemoryMarket::default();
    market
        .snapshots
        .insert("BTC".to_string(), create_test_snapshot("BTC", 98_500.0, 1e12));
    market
        .histories
        .insert("BTC".to_string(), create_flat_series(98_500.0, 30));
    market.pairs_by_address.insert(
        address.to_string(),
        vec![create_test_pair("WBTC", address, 250e6, 400, 400)],
    );
    market
        .rankings
        .insert("BTC".to_string(), create_test_ranking("BTC", 1, [0.0; 4]));
    market
}
