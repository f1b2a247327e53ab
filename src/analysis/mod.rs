pub mod dex_sentiment;
pub mod indicators;
pub mod momentum;
pub mod scoring;

pub use dex_sentiment::{DexSentiment, DexSignal};
pub use indicators::{IndicatorResult, SectorSentiment, TechnicalSignal};
pub use momentum::{Momentum, RankTier, TierInfo, Trend};
pub use scoring::{CompositeResult, CompositeScorer, Outlook, ScoringInputs, ScoringWeights, SixMonthPrediction};
