use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Majors,
    Ai,
    Rwa,
    Meme,
    Defi,
    L2,
    Gaming,
    #[default]
    Altcoin,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Majors => "MAJORS",
            Category::Ai => "AI",
            Category::Rwa => "RWA",
            Category::Meme => "MEME",
            Category::Defi => "DEFI",
            Category::L2 => "L2",
            Category::Gaming => "GAMING",
            Category::Altcoin => "ALTCOIN",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResolutionSource {
    AddressLookup,
    Search,
    Catalog,
}

/// Canonical identity of the token a query refers to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenIdentity {
    pub symbol: String,
    pub name: String,
    pub chain: Option<String>,
    pub address: Option<String>,
    pub category: Category,
    pub image: String,
    pub source: ResolutionSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}

/// Chronological price history. `synthetic` marks generated fallback data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    pub points: Vec<PricePoint>,
    #[serde(skip)]
    pub synthetic: bool,
}

impl PriceSeries {
    pub fn new(points: Vec<PricePoint>) -> Self {
        Self {
            points,
            synthetic: false,
        }
    }

    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last_price(&self) -> Option<f64> {
        self.points.last().map(|p| p.price)
    }
}

/// Spot market data from the price provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoinSnapshot {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub current_price: f64,
    pub market_cap: f64,
    pub total_volume: f64,
    pub price_change_percentage_24h: f64,
    pub image: Option<String>,
}

/// On-chain trading activity aggregated over a token's DEX pairs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DexMetrics {
    pub ticker: String,
    pub token_name: String,
    pub price_usd: f64,
    pub volume_1h: f64,
    pub volume_6h: f64,
    pub volume_24h: f64,
    pub liquidity_usd: f64,
    pub fdv: f64,
    pub market_cap: f64,
    pub price_change_1h: f64,
    pub price_change_6h: f64,
    pub price_change_24h: f64,
    pub buys_24h: u64,
    pub sells_24h: u64,
    pub buys_sells_ratio: f64,
    pub dex_id: String,
    pub pair_address: String,
    pub chain: String,
    pub top_pairs_count: usize,
    pub image_url: Option<String>,
}

/// Ranking and multi-timeframe momentum data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CmcMetrics {
    pub ticker: String,
    pub name: String,
    pub rank: u32,
    pub price: f64,
    pub volume_24h: f64,
    pub volume_change_24h: f64,
    pub percent_change_1h: f64,
    pub percent_change_24h: f64,
    pub percent_change_7d: f64,
    pub percent_change_30d: f64,
    pub market_cap: f64,
    pub market_cap_dominance: f64,
    pub fully_diluted_market_cap: f64,
    pub circulating_supply: f64,
    pub total_supply: f64,
    pub max_supply: Option<f64>,
    pub num_market_pairs: u32,
    pub tags: Vec<String>,
    pub is_ai_token: bool,
    pub is_rwa_token: bool,
    pub is_meme_token: bool,
}

impl CmcMetrics {
    /// Derives the sector flags from `tags`.
    pub fn apply_tag_flags(&mut self) {
        let tags: Vec<String> = self.tags.iter().map(|t| t.to_lowercase()).collect();
        // "ai" only as a whole tag segment, so "chain" tags don't match
        self.is_ai_token = tags.iter().any(|t| {
            t.contains("artificial-intelligence") || t.split(|c: char| !c.is_ascii_alphanumeric()).any(|seg| seg == "ai")
        });
        self.is_rwa_token = tags
            .iter()
            .any(|t| t.contains("rwa") || t.contains("real-world-assets"));
        self.is_meme_token = tags.iter().any(|t| t.contains("meme"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Category::Ai).unwrap(), "\"AI\"");
        assert_eq!(serde_json::to_string(&Category::L2).unwrap(), "\"L2\"");
        assert_eq!(Category::default().to_string(), "ALTCOIN");
    }

    #[test]
    fn test_tag_flags() {
        let mut metrics = CmcMetrics {
            tags: vec!["Artificial-Intelligence".into(), "memes".into()],
            ..Default::default()
        };
        metrics.apply_tag_flags();
        assert!(metrics.is_ai_token);
        assert!(metrics.is_meme_token);
        assert!(!metrics.is_rwa_token);

        let mut chain = CmcMetrics {
            tags: vec!["binance-chain".into(), "real-world-assets".into()],
            ..Default::default()
        };
        chain.apply_tag_flags();
        assert!(!chain.is_ai_token);
        assert!(chain.is_rwa_token);

        let mut segment = CmcMetrics {
            tags: vec!["decentralized-ai".into()],
            ..Default::default()
        };
        segment.apply_tag_flags();
        assert!(segment.is_ai_token);
    }
}
