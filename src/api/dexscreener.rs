use crate::api::{fetch_json, DexDataProvider};
use crate::error::{Error, Result};
use crate::models::DexMetrics;
use crate::utils::cache::Cache;
use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const API_BASE_URL: &str = "https://api.dexscreener.com/latest";
const CACHE_TTL: Duration = Duration::from_secs(60);
const SOURCE: &str = "dexscreener";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DexScreenerResponse {
    #[serde(rename = "schemaVersion", default)]
    pub schema_version: Option<String>,
    #[serde(default)]
    pub pairs: Option<Vec<DexPair>>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DexPair {
    #[serde(default)]
    pub chain_id: String,
    #[serde(default)]
    pub dex_id: String,
    #[serde(default)]
    pub pair_address: String,
    pub base_token: BaseToken,
    #[serde(default)]
    pub price_usd: Option<String>,
    #[serde(default)]
    pub txns: Option<Transactions>,
    #[serde(default)]
    pub volume: Option<Volume>,
    #[serde(default)]
    pub price_change: Option<PriceChange>,
    #[serde(default)]
    pub liquidity: Option<Liquidity>,
    #[serde(default)]
    pub fdv: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub info: Option<PairInfo>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BaseToken {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Transactions {
    #[serde(default)]
    pub h24: Option<TransactionCount>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
pub struct TransactionCount {
    #[serde(default)]
    pub buys: u64,
    #[serde(default)]
    pub sells: u64,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
pub struct Volume {
    #[serde(default)]
    pub h24: Option<f64>,
    #[serde(default)]
    pub h6: Option<f64>,
    #[serde(default)]
    pub h1: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
pub struct PriceChange {
    #[serde(default)]
    pub h24: Option<f64>,
    #[serde(default)]
    pub h6: Option<f64>,
    #[serde(default)]
    pub h1: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
pub struct Liquidity {
    #[serde(default)]
    pub usd: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairInfo {
    #[serde(default)]
    pub image_url: Option<String>,
}

impl DexPair {
    pub fn liquidity_usd(&self) -> f64 {
        self.liquidity.and_then(|l| l.usd).unwrap_or(0.0)
    }

    pub fn price(&self) -> f64 {
        self.price_usd
            .as_deref()
            .and_then(|p| p.parse::<f64>().ok())
            .filter(|p| p.is_finite())
            .unwrap_or(0.0)
    }

    pub fn image_url(&self) -> Option<&str> {
        self.info
            .as_ref()
            .and_then(|i| i.image_url.as_deref())
            .filter(|url| !url.is_empty())
    }

    fn h24_txns(&self) -> TransactionCount {
        self.txns.as_ref().and_then(|t| t.h24).unwrap_or_default()
    }
}

/// Highest-liquidity pair; the first one seen wins ties.
pub fn select_top_pair(pairs: &[DexPair]) -> Option<&DexPair> {
    pairs.iter().fold(None, |best: Option<&DexPair>, current| match best {
        Some(b) if current.liquidity_usd() > b.liquidity_usd() => Some(current),
        Some(b) => Some(b),
        None => Some(current),
    })
}

/// Pairs whose base symbol equals `symbol` case-insensitively, or all pairs when none do.
pub fn exact_symbol_matches(pairs: Vec<DexPair>, symbol: &str) -> Vec<DexPair> {
    let matching: Vec<DexPair> = pairs
        .iter()
        .filter(|p| p.base_token.symbol.eq_ignore_ascii_case(symbol))
        .cloned()
        .collect();
    if matching.is_empty() {
        pairs
    } else {
        matching
    }
}

/// Folds a pair set into metrics: volumes and trade counts are summed, the
/// rest comes from the top pair.
pub fn aggregate_metrics(ticker: &str, pairs: &[DexPair], chain: Option<&str>) -> Option<DexMetrics> {
    let top = select_top_pair(pairs)?;

    let volume = |f: fn(&Volume) -> Option<f64>| -> f64 {
        pairs
            .iter()
            .filter_map(|p| p.volume.as_ref().and_then(f))
            .filter(|v| v.is_finite())
            .sum()
    };
    let buys: u64 = pairs.iter().map(|p| p.h24_txns().buys).sum();
    let sells: u64 = pairs.iter().map(|p| p.h24_txns().sells).sum();
    let change = top.price_change.unwrap_or_default();
    let ticker = ticker.to_uppercase();

    Some(DexMetrics {
        token_name: if top.base_token.name.is_empty() {
            ticker.clone()
        } else {
            top.base_token.name.clone()
        },
        ticker,
        price_usd: top.price(),
        volume_1h: volume(|v| v.h1),
        volume_6h: volume(|v| v.h6),
        volume_24h: volume(|v| v.h24),
        liquidity_usd: top.liquidity_usd(),
        fdv: top.fdv.unwrap_or(0.0),
        market_cap: top.market_cap.unwrap_or(0.0),
        price_change_1h: change.h1.unwrap_or(0.0),
        price_change_6h: change.h6.unwrap_or(0.0),
        price_change_24h: change.h24.unwrap_or(0.0),
        buys_24h: buys,
        sells_24h: sells,
        buys_sells_ratio: buy_sell_ratio(buys, sells),
        dex_id: top.dex_id.clone(),
        pair_address: top.pair_address.clone(),
        chain: chain.map(str::to_string).unwrap_or_else(|| top.chain_id.clone()),
        top_pairs_count: pairs.len(),
        image_url: top.image_url().map(str::to_string),
    })
}

/// buys / sells, or 1 when there were no sells.
pub fn buy_sell_ratio(buys: u64, sells: u64) -> f64 {
    if sells > 0 {
        buys as f64 / sells as f64
    } else {
        1.0
    }
}

#[derive(Debug, Clone)]
pub struct DexScreenerClient {
    client: Client,
    base_url: String,
    pair_cache: Cache<Vec<DexPair>>,
}

impl DexScreenerClient {
    pub fn new(base_url: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::ConfigError(format!("Failed to create DexScreener HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.unwrap_or_else(|| API_BASE_URL.to_string()),
            pair_cache: Cache::new(CACHE_TTL),
        })
    }

    async fn cached_pairs(&self, cache_key: String, url: String) -> Result<Vec<DexPair>> {
        if let Some(cached) = self.pair_cache.get(&cache_key).await {
            debug!("Using cached DexScreener pairs for: {}", cache_key);
            return Ok(cached);
        }

        let response: DexScreenerResponse = fetch_json(SOURCE, || {
            self.client.get(&url).header("Accept", "application/json")
        })
        .await?;

        let pairs = response.pairs.unwrap_or_default();
        info!("DexScreener returned {} pairs for {}", pairs.len(), cache_key);
        self.pair_cache.set(cache_key, pairs.clone()).await;
        Ok(pairs)
    }
}

#[async_trait]
impl DexDataProvider for DexScreenerClient {
    async fn token_pairs(&self, address: &str) -> Result<Vec<DexPair>> {
        let url = format!("{}/dex/tokens/{}", self.base_url, address);
        self.cached_pairs(format!("tokens:{}", address), url).await
    }

    async fn search_pairs(&self, query: &str) -> Result<Vec<DexPair>> {
        let url = reqwest::Url::parse_with_params(&format!("{}/dex/search", self.base_url), &[("q", query)])
            .map_err(|e| Error::InvalidInput(format!("Invalid search query: {}", e)))?;
        self.cached_pairs(format!("search:{}", query.to_uppercase()), url.to_string())
            .await
    }
}
