//! Wire shape of `/api/oracle` responses.

use crate::analysis::dex_sentiment::DexSentiment;
use crate::analysis::{
    CompositeResult, DexSignal, IndicatorResult, Momentum, Outlook, RankTier, SixMonthPrediction,
    TechnicalSignal, TierInfo, Trend,
};
use crate::models::{Category, CmcMetrics, DexMetrics};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OracleReport {
    pub ticker: String,
    pub name: String,
    pub image: String,
    pub address: Option<String>,
    pub chain: Option<String>,
    pub price: f64,
    pub volume_24h: f64,
    pub price_change_24h: f64,
    pub market_cap: f64,
    pub prediction_6m: SixMonthReport,
    pub technical: TechnicalReport,
    pub dex: DexReport,
    pub cmc: CmcReport,
    pub prediction: PredictionReport,
    /// Static sector table membership only.
    pub sector: Category,
    /// Sector including name heuristics.
    pub category: Category,
    pub data_sources: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SixMonthReport {
    pub market_cap_low: u64,
    pub market_cap_mid: u64,
    pub market_cap_high: u64,
    pub growth_percent: i64,
    pub confidence: u32,
    pub reasoning: String,
}

impl From<&SixMonthPrediction> for SixMonthReport {
    fn from(p: &SixMonthPrediction) -> Self {
        Self {
            market_cap_low: p.low_estimate,
            market_cap_mid: p.mid_estimate,
            market_cap_high: p.high_estimate,
            growth_percent: p.growth_percent,
            confidence: p.confidence,
            reasoning: p.reasoning.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalReport {
    pub rsi: f64,
    pub bollinger_position: f64,
    pub bollinger_upper: f64,
    pub bollinger_lower: f64,
    pub signal: TechnicalSignal,
}

impl From<&IndicatorResult> for TechnicalReport {
    fn from(i: &IndicatorResult) -> Self {
        Self {
            rsi: i.rsi,
            bollinger_position: i.bollinger.percent_b,
            bollinger_upper: i.bollinger.upper,
            bollinger_lower: i.bollinger.lower,
            signal: i.signal,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DexReport {
    pub liquidity_usd: f64,
    pub volume_24h: f64,
    pub volume_6h: f64,
    pub volume_1h: f64,
    pub buys_24h: u64,
    pub sells_24h: u64,
    pub buys_sells_ratio: f64,
    pub sentiment: DexSignal,
    pub sentiment_strength: f64,
    pub top_pairs_count: usize,
    pub dex_id: String,
}

impl DexReport {
    pub fn new(metrics: &DexMetrics, sentiment: &DexSentiment) -> Self {
        Self {
            liquidity_usd: metrics.liquidity_usd,
            volume_24h: metrics.volume_24h,
            volume_6h: metrics.volume_6h,
            volume_1h: metrics.volume_1h,
            buys_24h: metrics.buys_24h,
            sells_24h: metrics.sells_24h,
            buys_sells_ratio: metrics.buys_sells_ratio,
            sentiment: sentiment.signal,
            sentiment_strength: sentiment.strength,
            top_pairs_count: metrics.top_pairs_count,
            dex_id: metrics.dex_id.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MomentumReport {
    pub trend: Trend,
    pub score: f64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CmcReport {
    pub rank: u32,
    pub ranking_tier: RankTier,
    pub ranking_description: String,
    pub percent_change_1h: f64,
    pub percent_change_7d: f64,
    pub percent_change_30d: f64,
    pub volume_change_24h: f64,
    pub market_cap_dominance: f64,
    pub fdv: f64,
    pub circulating_supply: f64,
    pub total_supply: f64,
    pub max_supply: Option<f64>,
    pub num_market_pairs: u32,
    pub momentum: MomentumReport,
    pub tags: Vec<String>,
    pub is_ai_token: bool,
    pub is_rwa_token: bool,
    pub is_meme_token: bool,
}

impl CmcReport {
    pub fn new(cmc: &CmcMetrics, momentum: &Momentum, tier: &TierInfo) -> Self {
        Self {
            rank: cmc.rank,
            ranking_tier: tier.tier,
            ranking_description: tier.description.clone(),
            percent_change_1h: cmc.percent_change_1h,
            percent_change_7d: cmc.percent_change_7d,
            percent_change_30d: cmc.percent_change_30d,
            volume_change_24h: cmc.volume_change_24h,
            market_cap_dominance: cmc.market_cap_dominance,
            fdv: cmc.fully_diluted_market_cap,
            circulating_supply: cmc.circulating_supply,
            total_supply: cmc.total_supply,
            max_supply: cmc.max_supply,
            num_market_pairs: cmc.num_market_pairs,
            momentum: MomentumReport {
                trend: momentum.trend,
                score: momentum.score,
                description: momentum.description.clone(),
            },
            tags: cmc.tags.clone(),
            is_ai_token: cmc.is_ai_token,
            is_rwa_token: cmc.is_rwa_token,
            is_meme_token: cmc.is_meme_token,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionReport {
    pub outlook: Outlook,
    pub prophecy: String,
    pub target_cap: String,
    pub confidence: u32,
    pub signals_bullish: Vec<String>,
    pub signals_bearish: Vec<String>,
}

impl PredictionReport {
    pub fn new(composite: &CompositeResult, prophecy: String, target_cap: String) -> Self {
        Self {
            outlook: composite.outlook,
            prophecy,
            target_cap,
            confidence: composite.confidence,
            signals_bullish: composite.bullish_signals.clone(),
            signals_bearish: composite.bearish_signals.clone(),
        }
    }
}
