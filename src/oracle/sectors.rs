//! Aggregated AI / RWA / MEME sector view used by the volume heatmap.

use super::{guarded, record_fallback, Oracle};
use crate::analysis::indicators::{self, IndicatorResult};
use crate::analysis::SectorSentiment;
use crate::api::fallback::{mock_dex_metrics, snapshot_from_dex};
use crate::models::{Category, CoinSnapshot};
use crate::resolver::catalog;
use chrono::{DateTime, Utc};
use futures::future::join_all;
use log::info;
use serde::{Deserialize, Serialize};

pub const SECTOR_HISTORY_DAYS: u32 = 14;
const SECTORS: [Category; 3] = [Category::Ai, Category::Rwa, Category::Meme];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OverallSentiment {
    Bullish,
    Bearish,
    Mixed,
}

impl OverallSentiment {
    /// Bullish with at least two bullish sectors, bearish with none.
    pub fn from_sectors(sentiments: &[SectorSentiment]) -> Self {
        match sentiments.iter().filter(|s| **s == SectorSentiment::Bullish).count() {
            0 => OverallSentiment::Bearish,
            1 => OverallSentiment::Mixed,
            _ => OverallSentiment::Bullish,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorCoin {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub volume: f64,
    #[serde(rename = "change24h")]
    pub change_24h: f64,
    pub rsi: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorSummary {
    pub sector: Category,
    pub total_volume: f64,
    pub avg_change: f64,
    #[serde(rename = "avgRSI")]
    pub avg_rsi: f64,
    pub sentiment: SectorSentiment,
    pub relative_size: f64,
    pub coins: Vec<SectorCoin>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorMap {
    pub ai: SectorSummary,
    pub rwa: SectorSummary,
    pub meme: SectorSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorOverview {
    pub sectors: SectorMap,
    pub total_volume: f64,
    pub overall_sentiment: OverallSentiment,
    pub timestamp: DateTime<Utc>,
}

fn mean(values: impl ExactSizeIterator<Item = f64>) -> f64 {
    let n = values.len();
    if n == 0 {
        return 0.0;
    }
    values.sum::<f64>() / n as f64
}

/// Sector totals before relative sizes are known.
pub fn summarize(sector: Category, coins: &[(CoinSnapshot, IndicatorResult)]) -> SectorSummary {
    let indicators: Vec<IndicatorResult> = coins.iter().map(|(_, i)| *i).collect();

    SectorSummary {
        sector,
        total_volume: coins.iter().map(|(s, _)| s.total_volume).sum(),
        avg_change: mean(coins.iter().map(|(s, _)| s.price_change_percentage_24h)),
        avg_rsi: if indicators.is_empty() {
            50.0
        } else {
            mean(indicators.iter().map(|i| i.rsi))
        },
        sentiment: indicators::sector_sentiment(&indicators),
        relative_size: 0.0,
        coins: coins
            .iter()
            .map(|(snapshot, indicator)| SectorCoin {
                symbol: snapshot.symbol.to_uppercase(),
                name: snapshot.name.clone(),
                price: snapshot.current_price,
                volume: snapshot.total_volume,
                change_24h: snapshot.price_change_percentage_24h,
                rsi: indicator.rsi,
            })
            .collect(),
    }
}

/// Fills in each sector's share of the combined volume and the overall label.
pub fn combine(mut summaries: Vec<SectorSummary>) -> (Vec<SectorSummary>, f64, OverallSentiment) {
    let total_volume: f64 = summaries.iter().map(|s| s.total_volume).sum();
    for summary in summaries.iter_mut() {
        summary.relative_size = if total_volume > 0.0 {
            summary.total_volume / total_volume * 100.0
        } else {
            0.0
        };
    }
    let sentiments: Vec<SectorSentiment> = summaries.iter().map(|s| s.sentiment).collect();
    (summaries, total_volume, OverallSentiment::from_sectors(&sentiments))
}

fn fallback_snapshot(symbol: &str) -> CoinSnapshot {
    let mut snapshot = snapshot_from_dex(&mock_dex_metrics(symbol));
    snapshot.name = catalog::display_name(symbol);
    snapshot
}

impl Oracle {
    pub async fn sector_overview(&self) -> SectorOverview {
        let summaries = join_all(SECTORS.iter().map(|sector| self.sector_summary(*sector))).await;
        let (summaries, total_volume, overall_sentiment) = combine(summaries);
        info!(
            "Sector overview: total volume {:.0}, overall {:?}",
            total_volume, overall_sentiment
        );

        let mut summaries = summaries.into_iter();
        let mut next = |sector: Category| {
            summaries
                .next()
                .unwrap_or_else(|| summarize(sector, &[]))
        };
        let sectors = SectorMap {
            ai: next(Category::Ai),
            rwa: next(Category::Rwa),
            meme: next(Category::Meme),
        };

        SectorOverview {
            sectors,
            total_volume,
            overall_sentiment,
            timestamp: Utc::now(),
        }
    }

    async fn sector_snapshots(&self, symbols: &[&str]) -> Vec<CoinSnapshot> {
        let live = match self.sources.prices.live() {
            Some(provider) => {
                guarded("coingecko", "sector snapshots", self.upstream_timeout, provider.snapshots(symbols))
                    .await
                    .unwrap_or_default()
            }
            None => Vec::new(),
        };

        symbols
            .iter()
            .map(|symbol| {
                live.iter()
                    .find(|s| s.symbol.eq_ignore_ascii_case(symbol))
                    .cloned()
                    .unwrap_or_else(|| {
                        record_fallback("coingecko", symbol);
                        fallback_snapshot(symbol)
                    })
            })
            .collect()
    }

    async fn sector_summary(&self, sector: Category) -> SectorSummary {
        let symbols = catalog::watchlist(sector);
        let snapshots = self.sector_snapshots(symbols).await;

        let indicators = join_all(snapshots.iter().map(|snapshot| async move {
            let symbol = snapshot.symbol.to_uppercase();
            let series = self
                .price_series(&symbol, SECTOR_HISTORY_DAYS, snapshot.current_price)
                .await;
            indicators::analyze(&series.prices())
        }))
        .await;

        let coins: Vec<(CoinSnapshot, IndicatorResult)> = snapshots.into_iter().zip(indicators).collect();
        summarize(sector, &coins)
    }
}
