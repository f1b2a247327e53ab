//! Composite confidence, outlook and six-month projection.
//!
//! Sub-scores use the "extremes" policy: RSI and Bollinger readings far from
//! the middle of their range score higher than readings near it.

use crate::analysis::dex_sentiment::{DexSentiment, DexSignal};
use crate::analysis::indicators::{IndicatorResult, TechnicalSignal};
use crate::analysis::momentum::Momentum;
use crate::utils::round_half_up;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub rsi_weight: f64,
    pub bollinger_weight: f64,
    pub dex_weight: f64,
    pub momentum_weight: f64,
    pub rsi_extreme_score: f64,
    pub rsi_normal_score: f64,
    pub bollinger_extreme_score: f64,
    pub bollinger_normal_score: f64,
    pub top_50_bonus: f64,
    pub top_100_bonus: f64,
    pub base_growth_rate: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            rsi_weight: 0.25,
            bollinger_weight: 0.20,
            dex_weight: 0.30,
            momentum_weight: 0.25,
            rsi_extreme_score: 85.0,
            rsi_normal_score: 60.0,
            bollinger_extreme_score: 80.0,
            bollinger_normal_score: 55.0,
            top_50_bonus: 10.0,
            top_100_bonus: 5.0,
            base_growth_rate: 0.15,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outlook {
    Bullish,
    Bearish,
}

impl Outlook {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outlook::Bullish => "Bullish",
            Outlook::Bearish => "Bearish",
        }
    }
}

/// Everything the scoring engine reads. All numbers must be finite.
#[derive(Debug, Clone, Copy)]
pub struct ScoringInputs<'a> {
    pub indicator: &'a IndicatorResult,
    pub dex: &'a DexSentiment,
    pub buys_sells_ratio: f64,
    pub momentum: &'a Momentum,
    pub rank: u32,
    pub market_cap: f64,
    pub price_change_30d: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SixMonthPrediction {
    pub low_estimate: u64,
    pub mid_estimate: u64,
    pub high_estimate: u64,
    pub growth_percent: i64,
    pub confidence: u32,
    pub reasoning: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeResult {
    pub confidence: u32,
    pub outlook: Outlook,
    pub bullish_signals: Vec<String>,
    pub bearish_signals: Vec<String>,
    pub six_month: SixMonthPrediction,
}

pub struct CompositeScorer {
    weights: ScoringWeights,
}

impl Default for CompositeScorer {
    fn default() -> Self {
        Self::new(ScoringWeights::default())
    }
}

impl CompositeScorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn score(&self, inputs: &ScoringInputs<'_>) -> CompositeResult {
        let confidence = self.confidence(inputs);
        let (bullish_signals, bearish_signals) = collect_signals(inputs);
        let outlook = if bullish_signals.len() >= bearish_signals.len() {
            Outlook::Bullish
        } else {
            Outlook::Bearish
        };
        let six_month = self.six_month(inputs, outlook);

        CompositeResult {
            confidence,
            outlook,
            bullish_signals,
            bearish_signals,
            six_month,
        }
    }

    /// Weighted blend of the sub-scores plus a rank bonus, in [0, 99].
    pub fn confidence(&self, inputs: &ScoringInputs<'_>) -> u32 {
        let w = &self.weights;
        let rsi = inputs.indicator.rsi;
        let percent_b = inputs.indicator.bollinger.percent_b;

        let rsi_score = if rsi < 30.0 || rsi > 70.0 {
            w.rsi_extreme_score
        } else {
            w.rsi_normal_score
        };
        let bb_score = if percent_b < 0.2 || percent_b > 0.8 {
            w.bollinger_extreme_score
        } else {
            w.bollinger_normal_score
        };
        let dex_score = (50.0 + (inputs.buys_sells_ratio - 1.0) * 30.0).clamp(40.0, 100.0);
        let momentum_score = (50.0 + inputs.momentum.score * 2.0).clamp(40.0, 100.0);

        let rank_bonus = if inputs.rank <= 50 {
            w.top_50_bonus
        } else if inputs.rank <= 100 {
            w.top_100_bonus
        } else {
            0.0
        };

        let weighted = rsi_score * w.rsi_weight
            + bb_score * w.bollinger_weight
            + dex_score * w.dex_weight
            + momentum_score * w.momentum_weight;

        round_half_up((weighted + rank_bonus).min(99.0)).clamp(0.0, 99.0) as u32
    }

    pub fn six_month(&self, inputs: &ScoringInputs<'_>, outlook: Outlook) -> SixMonthPrediction {
        let momentum_score = inputs.momentum.score;
        let rsi = inputs.indicator.rsi;
        let strength = inputs.dex.strength;

        let momentum_factor = 1.0 + momentum_score / 100.0;
        let rsi_factor = if rsi < 30.0 {
            1.3
        } else if rsi > 70.0 {
            0.7
        } else {
            1.0
        };
        let sentiment_factor = 1.0 + (strength - 50.0) / 200.0;
        let recent_factor = 1.0 + inputs.price_change_30d / 200.0;

        let growth = momentum_factor
            * rsi_factor
            * sentiment_factor
            * recent_factor
            * self.weights.base_growth_rate;

        let mid_growth = match outlook {
            Outlook::Bullish => (growth * 1.5).max(0.1),
            Outlook::Bearish => (growth * 0.5).max(-0.2),
        };
        let low_growth = mid_growth * 0.5;
        let high_growth = mid_growth * 2.5;

        let estimate = |g: f64| round_half_up(inputs.market_cap * (1.0 + g)).max(0.0) as u64;
        let confidence = round_half_up((50.0 + momentum_score.abs() / 2.0 + strength / 4.0).min(85.0));

        SixMonthPrediction {
            low_estimate: estimate(low_growth),
            mid_estimate: estimate(mid_growth),
            high_estimate: estimate(high_growth),
            growth_percent: round_half_up(mid_growth * 100.0) as i64,
            confidence: confidence.max(0.0) as u32,
            reasoning: reasoning(outlook, mid_growth).to_string(),
        }
    }
}

fn collect_signals(inputs: &ScoringInputs<'_>) -> (Vec<String>, Vec<String>) {
    let mut bullish = Vec::new();
    let mut bearish = Vec::new();

    match inputs.indicator.signal {
        TechnicalSignal::Oversold => bullish.push("RSI oversold - accumulation zone".to_string()),
        TechnicalSignal::Overbought => bearish.push("RSI overbought - distribution zone".to_string()),
        TechnicalSignal::Neutral => {}
    }

    match inputs.dex.signal {
        DexSignal::Accumulating => {
            bullish.push("DEX showing accumulation (high buy/sell ratio)".to_string())
        }
        DexSignal::Distributing => {
            bearish.push("DEX showing distribution (high sell pressure)".to_string())
        }
        DexSignal::Neutral => {}
    }

    let trend = inputs.momentum.trend;
    if trend.is_up() {
        bullish.push(format!("Multi-timeframe momentum: {}", trend.as_str()));
    } else if trend.is_down() {
        bearish.push(format!("Multi-timeframe momentum: {}", trend.as_str()));
    }

    let rsi = inputs.indicator.rsi;
    if rsi < 40.0 {
        bullish.push("RSI indicates potential reversal zone".to_string());
    } else if rsi > 60.0 {
        bearish.push("RSI indicates extended conditions".to_string());
    }

    (bullish, bearish)
}

fn reasoning(outlook: Outlook, mid_growth: f64) -> &'static str {
    match outlook {
        Outlook::Bullish if mid_growth > 0.5 => {
            "Strong bullish indicators suggest significant upside potential. Multiple signals confirm accumulation phase."
        }
        Outlook::Bullish if mid_growth > 0.2 => {
            "Moderate bullish outlook with healthy momentum. Market conditions favor gradual appreciation."
        }
        Outlook::Bullish => {
            "Cautiously bullish. Some positive signals but limited near-term catalysts."
        }
        Outlook::Bearish if mid_growth < -0.1 => {
            "Bearish pressure detected. Consider waiting for better entry points."
        }
        Outlook::Bearish => {
            "Neutral to slightly bearish. Consolidation phase expected before next major move."
        }
    }
}
