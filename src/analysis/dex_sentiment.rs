use crate::models::DexMetrics;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DexSignal {
    Accumulating,
    Distributing,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DexSentiment {
    pub signal: DexSignal,
    pub strength: f64,
}

/// Average hourly volume over the last 6h relative to the last hour.
pub fn volume_trend(metrics: &DexMetrics) -> f64 {
    if metrics.volume_1h > 0.0 {
        (metrics.volume_6h / 6.0) / metrics.volume_1h
    } else {
        1.0
    }
}

pub fn sentiment(metrics: &DexMetrics) -> DexSentiment {
    let ratio = metrics.buys_sells_ratio;
    let trend = volume_trend(metrics);

    if ratio > 1.5 && trend > 0.8 {
        DexSentiment {
            signal: DexSignal::Accumulating,
            strength: (ratio * 40.0).min(100.0),
        }
    } else if ratio < 0.7 {
        // Zero ratio means sells only
        let strength = if ratio > 0.0 {
            ((1.0 / ratio) * 40.0).min(100.0)
        } else {
            100.0
        };
        DexSentiment {
            signal: DexSignal::Distributing,
            strength,
        }
    } else {
        DexSentiment {
            signal: DexSignal::Neutral,
            strength: 50.0,
        }
    }
}
