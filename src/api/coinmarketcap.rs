use crate::api::{fetch_json, RankingProvider};
use crate::error::{Error, Result};
use crate::models::CmcMetrics;
use crate::resolver::catalog::CMC_IDS;
use crate::utils::cache::Cache;
use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

pub const API_BASE_URL: &str = "https://pro-api.coinmarketcap.com/v1";
const CACHE_TTL: Duration = Duration::from_secs(60);
const SOURCE: &str = "coinmarketcap";

#[derive(Debug, Deserialize)]
struct CMCResponse<T> {
    status: CMCStatus,
    data: Option<T>,
}

#[derive(Debug, Deserialize)]
struct CMCStatus {
    #[serde(default)]
    error_code: u32,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
struct CMCToken {
    name: String,
    symbol: String,
    cmc_rank: Option<u32>,
    #[serde(default)]
    num_market_pairs: Option<u32>,
    #[serde(default)]
    circulating_supply: Option<f64>,
    #[serde(default)]
    total_supply: Option<f64>,
    #[serde(default)]
    max_supply: Option<f64>,
    #[serde(default)]
    tags: Option<Vec<String>>,
    quote: CMCTokenQuote,
}

#[derive(Debug, Deserialize, Clone)]
struct CMCTokenQuote {
    #[serde(rename = "USD")]
    usd: Option<CMCTokenQuoteUSD>,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
struct CMCTokenQuoteUSD {
    price: Option<f64>,
    volume_24h: Option<f64>,
    volume_change_24h: Option<f64>,
    percent_change_1h: Option<f64>,
    percent_change_24h: Option<f64>,
    percent_change_7d: Option<f64>,
    percent_change_30d: Option<f64>,
    market_cap: Option<f64>,
    market_cap_dominance: Option<f64>,
    fully_diluted_market_cap: Option<f64>,
}

impl CMCToken {
    fn into_metrics(self) -> Result<CmcMetrics> {
        let usd = self
            .quote
            .usd
            .ok_or_else(|| Error::ApiInvalidData(format!("No USD quote for {}", self.symbol)))?;
        let rank = self
            .cmc_rank
            .filter(|rank| *rank >= 1)
            .ok_or_else(|| Error::ApiInvalidData(format!("No CMC rank for {}", self.symbol)))?;

        let mut metrics = CmcMetrics {
            ticker: self.symbol.to_uppercase(),
            name: self.name,
            rank,
            price: usd.price.unwrap_or_default(),
            volume_24h: usd.volume_24h.unwrap_or_default(),
            volume_change_24h: usd.volume_change_24h.unwrap_or_default(),
            percent_change_1h: usd.percent_change_1h.unwrap_or_default(),
            percent_change_24h: usd.percent_change_24h.unwrap_or_default(),
            percent_change_7d: usd.percent_change_7d.unwrap_or_default(),
            percent_change_30d: usd.percent_change_30d.unwrap_or_default(),
            market_cap: usd.market_cap.unwrap_or_default(),
            market_cap_dominance: usd.market_cap_dominance.unwrap_or_default(),
            fully_diluted_market_cap: usd.fully_diluted_market_cap.unwrap_or_default(),
            circulating_supply: self.circulating_supply.unwrap_or_default(),
            total_supply: self.total_supply.unwrap_or_default(),
            max_supply: self.max_supply,
            num_market_pairs: self.num_market_pairs.unwrap_or_default(),
            tags: self.tags.unwrap_or_default(),
            ..Default::default()
        };
        metrics.apply_tag_flags();
        Ok(metrics)
    }
}

#[derive(Debug, Clone)]
pub struct CoinMarketCapClient {
    client: Client,
    api_key: String,
    base_url: String,
    quote_cache: Cache<CmcMetrics>,
}

impl CoinMarketCapClient {
    pub fn new(api_key: String, base_url: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::ConfigError(format!("Failed to create CoinMarketCap HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.unwrap_or_else(|| API_BASE_URL.to_string()),
            quote_cache: Cache::new(CACHE_TTL),
        })
    }
}

#[async_trait]
impl RankingProvider for CoinMarketCapClient {
    async fn ranking(&self, symbol: &str) -> Result<CmcMetrics> {
        let ticker = symbol.to_uppercase();
        if let Some(cached) = self.quote_cache.get(&ticker).await {
            debug!("Using cached CMC quote for: {}", ticker);
            return Ok(cached);
        }

        let cmc_id = CMC_IDS
            .get(ticker.as_str())
            .ok_or_else(|| Error::SourceUnavailable(format!("No CMC id for {}", ticker)))?
            .to_string();

        let url = format!("{}/cryptocurrency/quotes/latest?id={}", self.base_url, cmc_id);
        let response: CMCResponse<HashMap<String, CMCToken>> = fetch_json(SOURCE, || {
            self.client
                .get(&url)
                .header("X-CMC_PRO_API_KEY", &self.api_key)
                .header("Accept", "application/json")
        })
        .await?;

        if response.status.error_code != 0 {
            return Err(Error::ApiError(format!(
                "CoinMarketCap error {}: {}",
                response.status.error_code,
                response.status.error_message.unwrap_or_default()
            )));
        }

        let token = response
            .data
            .and_then(|mut data| data.remove(&cmc_id))
            .ok_or_else(|| Error::ApiInvalidData(format!("CoinMarketCap returned no data for {}", ticker)))?;

        let metrics = token.into_metrics()?;
        info!("CMC rank for {}: #{}", ticker, metrics.rank);
        self.quote_cache.set(ticker, metrics.clone()).await;
        Ok(metrics)
    }
}
