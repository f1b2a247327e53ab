use crate::error::{Error, Result};
use crate::metrics;
use crate::models::{CmcMetrics, CoinSnapshot, PriceSeries};
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

pub mod coingecko;
pub mod coinmarketcap;
pub mod dexscreener;
pub mod fallback;

pub use coingecko::CoinGeckoClient;
pub use coinmarketcap::CoinMarketCapClient;
pub use dexscreener::{DexPair, DexScreenerClient};

const MAX_RETRIES: u32 = 3;
const RETRY_BASE_DELAY: Duration = Duration::from_millis(500);

/// Spot prices and price history.
#[async_trait]
pub trait PriceDataProvider: Send + Sync {
    async fn snapshot(&self, symbol: &str) -> Result<CoinSnapshot>;
    async fn snapshots(&self, symbols: &[&str]) -> Result<Vec<CoinSnapshot>>;
    async fn price_history(&self, symbol: &str, days: u32) -> Result<PriceSeries>;
}

/// On-chain trading pairs.
#[async_trait]
pub trait DexDataProvider: Send + Sync {
    async fn token_pairs(&self, address: &str) -> Result<Vec<DexPair>>;
    async fn search_pairs(&self, query: &str) -> Result<Vec<DexPair>>;
}

/// Market-cap rank and multi-timeframe changes.
#[async_trait]
pub trait RankingProvider: Send + Sync {
    async fn ranking(&self, symbol: &str) -> Result<CmcMetrics>;
}

/// Where a collaborator's data comes from. `Fallback` never touches the network.
pub enum Source<P: ?Sized> {
    Live(Arc<P>),
    Fallback,
}

impl<P: ?Sized> Clone for Source<P> {
    fn clone(&self) -> Self {
        match self {
            Source::Live(provider) => Source::Live(provider.clone()),
            Source::Fallback => Source::Fallback,
        }
    }
}

impl<P: ?Sized> Source<P> {
    pub fn live(&self) -> Option<&Arc<P>> {
        match self {
            Source::Live(provider) => Some(provider),
            Source::Fallback => None,
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Source::Live(_))
    }
}

impl<P: ?Sized> std::fmt::Debug for Source<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Live(_) => f.write_str("Live"),
            Source::Fallback => f.write_str("Fallback"),
        }
    }
}

/// Sends a request built by `build`, retrying rate limits and transport
/// failures with exponential backoff, and decodes the JSON body.
pub(crate) async fn fetch_json<T, F>(source: &'static str, build: F) -> Result<T>
where
    T: DeserializeOwned,
    F: Fn() -> RequestBuilder,
{
    let mut retry_count = 0;
    loop {
        metrics::UPSTREAM_CALLS.with_label_values(&[source]).inc();
        let backoff = RETRY_BASE_DELAY * 2u32.pow(retry_count);

        let response = match build().send().await {
            Ok(response) => response,
            Err(e) if retry_count < MAX_RETRIES && !e.is_timeout() => {
                warn!("{} request failed ({}), retrying in {}ms", source, e, backoff.as_millis());
                tokio::time::sleep(backoff).await;
                retry_count += 1;
                continue;
            }
            Err(e) => {
                metrics::UPSTREAM_FAILURES.with_label_values(&[source]).inc();
                return Err(e.into());
            }
        };

        let status = response.status();
        if status.is_success() {
            return response.json::<T>().await.map_err(|e| {
                metrics::UPSTREAM_FAILURES.with_label_values(&[source]).inc();
                Error::ApiInvalidFormat(format!("{} returned an unparseable body: {}", source, e))
            });
        }

        if status == StatusCode::TOO_MANY_REQUESTS && retry_count < MAX_RETRIES {
            warn!("{} rate limit exceeded, backing off for {}ms", source, backoff.as_millis());
            tokio::time::sleep(backoff).await;
            retry_count += 1;
            continue;
        }

        metrics::UPSTREAM_FAILURES.with_label_values(&[source]).inc();
        debug!("{} responded with status {}", source, status);
        return Err(match status.as_u16() {
            429 => Error::RateLimitExceeded(format!("{} rate limit exceeded", source)),
            401 => Error::ApiAuthFailed(format!("{} rejected the API key", source)),
            403 => Error::ApiQuotaExceeded(format!("{} quota exceeded", source)),
            503 => Error::ApiMaintenance(format!("{} is under maintenance", source)),
            _ => Error::ApiError(format!("{} request failed with status: {}", source, status)),
        });
    }
}
