use crate::api::{fetch_json, PriceDataProvider};
use crate::error::{Error, Result};
use crate::models::{CoinSnapshot, PricePoint, PriceSeries};
use crate::resolver::catalog::COINGECKO_IDS;
use crate::utils::cache::Cache;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, info};
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const API_BASE_URL: &str = "https://api.coingecko.com/api/v3";
const SNAPSHOT_CACHE_TTL: Duration = Duration::from_secs(60);
const HISTORY_CACHE_TTL: Duration = Duration::from_secs(300);
const SOURCE: &str = "coingecko";

/// One row of `/coins/markets`.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct MarketRow {
    id: String,
    symbol: String,
    name: String,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    current_price: Option<f64>,
    #[serde(default)]
    market_cap: Option<f64>,
    #[serde(default)]
    total_volume: Option<f64>,
    #[serde(default)]
    price_change_percentage_24h: Option<f64>,
}

impl MarketRow {
    fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::ApiInvalidData("Empty coin ID".into()));
        }
        if self.symbol.trim().is_empty() {
            return Err(Error::ApiInvalidData("Empty coin symbol".into()));
        }
        if self.current_price.unwrap_or_default() < 0.0 {
            return Err(Error::ApiInvalidData("Negative coin price".into()));
        }
        if self.total_volume.unwrap_or_default() < 0.0 {
            return Err(Error::ApiInvalidData("Negative trading volume".into()));
        }
        if self.market_cap.unwrap_or_default() < 0.0 {
            return Err(Error::ApiInvalidData("Negative market cap".into()));
        }
        Ok(())
    }

    fn into_snapshot(self) -> Result<CoinSnapshot> {
        self.validate()?;
        Ok(CoinSnapshot {
            id: self.id,
            symbol: self.symbol.to_uppercase(),
            name: self.name,
            current_price: self.current_price.unwrap_or_default(),
            market_cap: self.market_cap.unwrap_or_default(),
            total_volume: self.total_volume.unwrap_or_default(),
            price_change_percentage_24h: self.price_change_percentage_24h.unwrap_or_default(),
            image: self.image,
        })
    }
}

/// Body of `/coins/{id}/market_chart`; each entry is `[unix_ms, value]`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MarketChart {
    #[serde(default)]
    pub prices: Vec<(f64, f64)>,
}

impl MarketChart {
    pub fn validate(&self) -> Result<()> {
        if self.prices.is_empty() {
            return Err(Error::ApiInvalidData("Empty price history data".into()));
        }

        if self.prices.windows(2).any(|w| w[1].0 <= w[0].0) {
            return Err(Error::ApiInvalidData("Timestamps not in ascending order".into()));
        }

        for (i, (_, price)) in self.prices.iter().enumerate() {
            if !price.is_finite() || *price < 0.0 {
                return Err(Error::ApiInvalidData(format!(
                    "Invalid price value at index {}: {}",
                    i, price
                )));
            }
        }

        Ok(())
    }

    pub fn into_series(self) -> Result<PriceSeries> {
        self.validate()?;

        let points = self
            .prices
            .into_iter()
            .map(|(millis, price)| {
                let timestamp = DateTime::<Utc>::from_timestamp_millis(millis as i64)
                    .ok_or_else(|| Error::ApiInvalidData(format!("Invalid timestamp: {}", millis)))?;
                Ok(PricePoint { timestamp, price })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(PriceSeries::new(points))
    }
}

/// CoinGecko id for an uppercase ticker.
fn coin_id(symbol: &str) -> Result<&'static str> {
    COINGECKO_IDS
        .get(symbol.to_uppercase().as_str())
        .copied()
        .ok_or_else(|| Error::SourceUnavailable(format!("No CoinGecko id for {}", symbol)))
}

#[derive(Debug, Clone)]
pub struct CoinGeckoClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    snapshot_cache: Cache<CoinSnapshot>,
    history_cache: Cache<PriceSeries>,
}

impl CoinGeckoClient {
    pub fn new(api_key: Option<String>, base_url: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::ConfigError(format!("Failed to create CoinGecko HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.unwrap_or_else(|| API_BASE_URL.to_string()),
            snapshot_cache: Cache::new(SNAPSHOT_CACHE_TTL),
            history_cache: Cache::new(HISTORY_CACHE_TTL),
        })
    }

    fn request(&self, url: &str) -> RequestBuilder {
        let mut request = self.client.get(url).header("Accept", "application/json");
        if let Some(key) = &self.api_key {
            request = request.header("X-CG-Pro-API-Key", key);
        }
        request
    }

    async fn markets(&self, ids: &[&str]) -> Result<Vec<CoinSnapshot>> {
        let url = format!(
            "{}/coins/markets?vs_currency=usd&ids={}",
            self.base_url,
            ids.join(",")
        );
        let rows: Vec<MarketRow> = fetch_json(SOURCE, || self.request(&url)).await?;

        let mut snapshots = Vec::with_capacity(rows.len());
        for row in rows {
            let snapshot = row.into_snapshot()?;
            self.snapshot_cache
                .set(snapshot.symbol.clone(), snapshot.clone())
                .await;
            snapshots.push(snapshot);
        }
        Ok(snapshots)
    }
}

#[async_trait]
impl PriceDataProvider for CoinGeckoClient {
    async fn snapshot(&self, symbol: &str) -> Result<CoinSnapshot> {
        let key = symbol.to_uppercase();
        if let Some(cached) = self.snapshot_cache.get(&key).await {
            debug!("Using cached CoinGecko snapshot for: {}", key);
            return Ok(cached);
        }

        let id = coin_id(&key)?;
        self.markets(&[id])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::ApiInvalidData(format!("CoinGecko returned no market data for {}", key)))
    }

    async fn snapshots(&self, symbols: &[&str]) -> Result<Vec<CoinSnapshot>> {
        let mut found = Vec::new();
        let mut missing = Vec::new();
        for symbol in symbols {
            let key = symbol.to_uppercase();
            match self.snapshot_cache.get(&key).await {
                Some(cached) => found.push(cached),
                None => {
                    if let Ok(id) = coin_id(&key) {
                        missing.push(id);
                    }
                }
            }
        }

        if !missing.is_empty() {
            found.extend(self.markets(&missing).await?);
        }
        info!("CoinGecko snapshots: {} of {} symbols", found.len(), symbols.len());
        Ok(found)
    }

    async fn price_history(&self, symbol: &str, days: u32) -> Result<PriceSeries> {
        let cache_key = format!("{}:{}", symbol.to_uppercase(), days);
        if let Some(cached) = self.history_cache.get(&cache_key).await {
            debug!("Using cached CoinGecko history for: {}", cache_key);
            return Ok(cached);
        }

        let id = coin_id(symbol)?;
        let url = format!(
            "{}/coins/{}/market_chart?vs_currency=usd&days={}",
            self.base_url, id, days
        );
        let chart: MarketChart = fetch_json(SOURCE, || self.request(&url)).await?;
        let series = chart.into_series()?;

        debug!("CoinGecko history for {}: {} points", cache_key, series.len());
        self.history_cache.set(cache_key, series.clone()).await;
        Ok(series)
    }
}
