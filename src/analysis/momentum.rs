use crate::models::CmcMetrics;
use crate::utils::round_to;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Trend {
    StrongUp,
    Up,
    Neutral,
    Down,
    StrongDown,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::StrongUp => "STRONG_UP",
            Trend::Up => "UP",
            Trend::Neutral => "NEUTRAL",
            Trend::Down => "DOWN",
            Trend::StrongDown => "STRONG_DOWN",
        }
    }

    pub fn is_up(&self) -> bool {
        matches!(self, Trend::StrongUp | Trend::Up)
    }

    pub fn is_down(&self) -> bool {
        matches!(self, Trend::StrongDown | Trend::Down)
    }

    pub fn description(&self) -> &'static str {
        match self {
            Trend::StrongUp => "Explosive momentum across all timeframes. Caution advised at these levels.",
            Trend::Up => "Positive momentum building. Smart money accumulating.",
            Trend::StrongDown => "Heavy selling pressure. Potential capitulation zone.",
            Trend::Down => "Bearish pressure mounting. Watch for reversal signals.",
            Trend::Neutral => "Consolidation phase. Awaiting breakout direction.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RankTier {
    MegaCap,
    LargeCap,
    MidCap,
    SmallCap,
    MicroCap,
}

impl RankTier {
    pub fn from_rank(rank: u32) -> Self {
        match rank {
            0..=10 => RankTier::MegaCap,
            11..=50 => RankTier::LargeCap,
            51..=100 => RankTier::MidCap,
            101..=300 => RankTier::SmallCap,
            _ => RankTier::MicroCap,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RankTier::MegaCap => "Top 10 - Elite institutional grade",
            RankTier::LargeCap => "Top 50 - Proven market leaders",
            RankTier::MidCap => "Top 100 - Established projects",
            RankTier::SmallCap => "Top 300 - Growth potential",
            RankTier::MicroCap => "Micro-cap - High risk/reward",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Momentum {
    pub trend: Trend,
    /// Weighted score rounded to one decimal.
    pub score: f64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierInfo {
    pub tier: RankTier,
    pub description: String,
}

pub fn weighted_score(changes: [f64; 4]) -> f64 {
    let [h1, h24, d7, d30] = changes;
    h1 * 0.10 + h24 * 0.30 + d7 * 0.35 + d30 * 0.25
}

/// Trend buckets in priority order. Every input lands in exactly one bucket.
pub fn classify(score: f64, positive_count: usize) -> Trend {
    if score > 15.0 && positive_count >= 3 {
        Trend::StrongUp
    } else if score > 5.0 && positive_count >= 2 {
        Trend::Up
    } else if score < -15.0 && positive_count <= 1 {
        Trend::StrongDown
    } else if score < -5.0 && positive_count <= 2 {
        Trend::Down
    } else {
        Trend::Neutral
    }
}

pub fn momentum(metrics: &CmcMetrics) -> Momentum {
    let changes = [
        metrics.percent_change_1h,
        metrics.percent_change_24h,
        metrics.percent_change_7d,
        metrics.percent_change_30d,
    ];
    let score = weighted_score(changes);
    let positive_count = changes.iter().filter(|&&c| c > 0.0).count();
    let trend = classify(score, positive_count);

    Momentum {
        trend,
        score: round_to(score, 1),
        description: trend.description().to_string(),
    }
}

pub fn rank_tier(rank: u32) -> TierInfo {
    let tier = RankTier::from_rank(rank);
    TierInfo {
        tier,
        description: tier.description().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmc(changes: [f64; 4]) -> CmcMetrics {
        CmcMetrics {
            percent_change_1h: changes[0],
            percent_change_24h: changes[1],
            percent_change_7d: changes[2],
            percent_change_30d: changes[3],
            ..Default::default()
        }
    }

    #[test]
    fn test_weighted_score() {
        let result = momentum(&cmc([2.0, 5.0, 12.0, 30.0]));
        // 0.2 + 1.5 + 4.2 + 7.5
        assert_eq!(result.score, 13.4);
        assert_eq!(result.trend, Trend::Up);
        assert_eq!(result.description, "Positive momentum building. Smart money accumulating.");
    }

    #[test]
    fn test_trend_buckets() {
        assert_eq!(momentum(&cmc([5.0, 20.0, 25.0, 30.0])).trend, Trend::StrongUp);
        assert_eq!(momentum(&cmc([-5.0, -20.0, -25.0, -30.0])).trend, Trend::StrongDown);
        assert_eq!(momentum(&cmc([1.0, -10.0, -10.0, -10.0])).trend, Trend::Down);
        assert_eq!(momentum(&cmc([0.0, 0.0, 0.0, 0.0])).trend, Trend::Neutral);
        // Strong score but only one positive timeframe
        assert_eq!(momentum(&cmc([-1.0, -1.0, -1.0, 100.0])).trend, Trend::Neutral);
    }

    #[test]
    fn test_classification_is_total() {
        let scores = [-100.0, -15.5, -15.0, -10.0, -5.0, -4.9, 0.0, 5.0, 5.1, 15.0, 15.1, 100.0];
        for &score in &scores {
            for positive in 0..=4 {
                let conditions = [
                    score > 15.0 && positive >= 3,
                    score > 5.0 && positive >= 2,
                    score < -15.0 && positive <= 1,
                    score < -5.0 && positive <= 2,
                ];
                let expected = match conditions.iter().position(|&c| c) {
                    Some(0) => Trend::StrongUp,
                    Some(1) => Trend::Up,
                    Some(2) => Trend::StrongDown,
                    Some(3) => Trend::Down,
                    _ => Trend::Neutral,
                };
                assert_eq!(classify(score, positive), expected, "score {} positive {}", score, positive);
            }
        }
    }

    #[test]
    fn test_rank_tiers() {
        assert_eq!(rank_tier(1).tier, RankTier::MegaCap);
        assert_eq!(rank_tier(10).tier, RankTier::MegaCap);
        assert_eq!(rank_tier(11).tier, RankTier::LargeCap);
        assert_eq!(rank_tier(50).tier, RankTier::LargeCap);
        assert_eq!(rank_tier(100).tier, RankTier::MidCap);
        assert_eq!(rank_tier(300).tier, RankTier::SmallCap);
        assert_eq!(rank_tier(301).description, "Micro-cap - High risk/reward");
    }
}
