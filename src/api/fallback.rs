//! Offline stand-ins for the upstream providers: fixed market profiles for
//! well-known tokens, neutral defaults for everything else, and synthetic
//! price history.

use crate::models::{CmcMetrics, CoinSnapshot, DexMetrics, PricePoint, PriceSeries};
use chrono::{Duration as ChronoDuration, Utc};
use rand::Rng;

pub const SYNTHETIC_POINTS: usize = 30;
pub const SYNTHETIC_JITTER: f64 = 0.05;

struct DexProfile {
    price: f64,
    volume_24h: f64,
    liquidity: f64,
    market_cap: f64,
    change_24h: f64,
    buys: u64,
    sells: u64,
}

const fn dex(price: f64, volume_24h: f64, liquidity: f64, market_cap: f64, change_24h: f64, buys: u64, sells: u64) -> DexProfile {
    DexProfile {
        price,
        volume_24h,
        liquidity,
        market_cap,
        change_24h,
        buys,
        sells,
    }
}

fn dex_profile(symbol: &str) -> DexProfile {
    match symbol {
        "BTC" => dex(98_500.0, 28e9, 2.5e9, 1.94e12, 2.4, 450_000, 380_000),
        "ETH" => dex(3_450.0, 12e9, 1.8e9, 415e9, 3.1, 320_000, 280_000),
        "FET" => dex(2.45, 125e6, 45e6, 2.1e9, 8.5, 15_420, 12_340),
        "TAO" => dex(485.20, 89e6, 32e6, 3.2e9, 5.2, 8_900, 7_200),
        "PEPE" => dex(0.0000234, 580e6, 125e6, 9.8e9, 15.7, 89_000, 45_000),
        "SHIB" => dex(0.0000245, 420e6, 95e6, 14.5e9, 6.8, 68_000, 52_000),
        "DOGE" => dex(0.42, 2.8e9, 450e6, 62e9, 8.2, 185_000, 142_000),
        "BONK" => dex(0.0000345, 380e6, 65e6, 2.4e9, 12.4, 45_000, 28_000),
        "WIF" => dex(2.85, 650e6, 85e6, 2.85e9, 18.5, 52_000, 32_000),
        "SOL" => dex(198.50, 4.5e9, 890e6, 92e9, 4.2, 245_000, 198_000),
        _ => dex(1.0, 10_000_000.0, 5_000_000.0, 100_000_000.0, 0.0, 5_000, 4_000),
    }
}

/// DEX metrics used when DexScreener is unavailable or has no pairs.
pub fn mock_dex_metrics(symbol: &str) -> DexMetrics {
    let ticker = symbol.to_uppercase();
    let base = dex_profile(&ticker);

    DexMetrics {
        token_name: ticker.clone(),
        ticker,
        price_usd: base.price,
        volume_1h: base.volume_24h * 0.04,
        volume_6h: base.volume_24h * 0.25,
        volume_24h: base.volume_24h,
        liquidity_usd: base.liquidity,
        fdv: base.market_cap,
        market_cap: base.market_cap,
        price_change_1h: base.change_24h * 0.1,
        price_change_6h: base.change_24h * 0.4,
        price_change_24h: base.change_24h,
        buys_24h: base.buys,
        sells_24h: base.sells,
        buys_sells_ratio: base.buys as f64 / base.sells as f64,
        dex_id: "uniswap".to_string(),
        pair_address: "0x...".to_string(),
        chain: "ethereum".to_string(),
        top_pairs_count: 5,
        image_url: None,
    }
}

struct RankingProfile {
    name: &'static str,
    rank: u32,
    price: f64,
    volume_24h: f64,
    changes: [f64; 4],
    market_cap: f64,
    dominance: f64,
    fdv: f64,
    supply: (f64, f64, Option<f64>),
    pairs: u32,
    tags: &'static [&'static str],
}

fn ranking_profile(symbol: &str) -> Option<RankingProfile> {
    let profile = match symbol {
        "FET" => RankingProfile {
            name: "Fetch.ai",
            rank: 45,
            price: 2.45,
            volume_24h: 450e6,
            changes: [1.2, 8.5, 22.4, 45.2],
            market_cap: 2.1e9,
            dominance: 0.075,
            fdv: 2.8e9,
            supply: (857e6, 1_152_997_575.0, Some(1_152_997_575.0)),
            pairs: 156,
            tags: &["ai", "artificial-intelligence", "smart-contracts", "platform"],
        },
        "TAO" => RankingProfile {
            name: "Bittensor",
            rank: 28,
            price: 485.20,
            volume_24h: 89e6,
            changes: [0.8, 5.2, 15.6, 38.9],
            market_cap: 3.2e9,
            dominance: 0.114,
            fdv: 10.2e9,
            supply: (6.6e6, 21e6, Some(21e6)),
            pairs: 45,
            tags: &["ai", "machine-learning", "decentralized-ai"],
        },
        "ONDO" => RankingProfile {
            name: "Ondo Finance",
            rank: 52,
            price: 1.85,
            volume_24h: 180e6,
            changes: [2.1, 12.4, 28.7, 65.2],
            market_cap: 2.8e9,
            dominance: 0.1,
            fdv: 18.5e9,
            supply: (1.5e9, 10e9, Some(10e9)),
            pairs: 78,
            tags: &["rwa", "real-world-assets", "defi", "treasury"],
        },
        "PEPE" => RankingProfile {
            name: "Pepe",
            rank: 18,
            price: 0.0000234,
            volume_24h: 2.1e9,
            changes: [3.5, 15.7, 42.1, 89.5],
            market_cap: 9.8e9,
            dominance: 0.35,
            fdv: 9.8e9,
            supply: (420.69e12, 420.69e12, Some(420.69e12)),
            pairs: 324,
            tags: &["meme", "ethereum", "community"],
        },
        "SOL" => RankingProfile {
            name: "Solana",
            rank: 5,
            price: 198.50,
            volume_24h: 4.5e9,
            changes: [0.5, 4.2, 12.8, 35.6],
            market_cap: 92e9,
            dominance: 3.28,
            fdv: 116e9,
            supply: (463e6, 584e6, None),
            pairs: 892,
            tags: &["smart-contracts", "layer-1", "defi", "nft"],
        },
        "BTC" => RankingProfile {
            name: "Bitcoin",
            rank: 1,
            price: 98_500.0,
            volume_24h: 48e9,
            changes: [0.3, 2.4, 8.5, 25.2],
            market_cap: 1.94e12,
            dominance: 52.3,
            fdv: 2.07e12,
            supply: (19.6e6, 21e6, Some(21e6)),
            pairs: 11_245,
            tags: &["store-of-value", "pow", "bitcoin-ecosystem"],
        },
        "ETH" => RankingProfile {
            name: "Ethereum",
            rank: 2,
            price: 3_450.0,
            volume_24h: 18e9,
            changes: [0.5, 3.1, 12.4, 28.6],
            market_cap: 415e9,
            dominance: 17.8,
            fdv: 415e9,
            supply: (120e6, 120e6, None),
            pairs: 8_234,
            tags: &["smart-contracts", "layer-1", "defi", "nft", "pos"],
        },
        "DOGE" => RankingProfile {
            name: "Dogecoin",
            rank: 8,
            price: 0.42,
            volume_24h: 3.2e9,
            changes: [1.8, 8.2, 28.5, 65.8],
            market_cap: 62e9,
            dominance: 2.21,
            fdv: 62e9,
            supply: (147e9, 147e9, None),
            pairs: 892,
            tags: &["meme", "pow", "payments"],
        },
        "SHIB" => RankingProfile {
            name: "Shiba Inu",
            rank: 12,
            price: 0.0000245,
            volume_24h: 890e6,
            changes: [2.1, 6.8, 18.5, 42.3],
            market_cap: 14.5e9,
            dominance: 0.52,
            fdv: 14.5e9,
            supply: (589e12, 589e12, None),
            pairs: 456,
            tags: &["meme", "ethereum", "dog"],
        },
        "BONK" => RankingProfile {
            name: "Bonk",
            rank: 58,
            price: 0.0000345,
            volume_24h: 580e6,
            changes: [3.5, 12.4, 35.8, 85.2],
            market_cap: 2.4e9,
            dominance: 0.086,
            fdv: 3.4e9,
            supply: (69e12, 100e12, Some(100e12)),
            pairs: 124,
            tags: &["meme", "solana", "dog"],
        },
        _ => return None,
    };
    Some(profile)
}

/// Ranking metrics used when CoinMarketCap is unavailable or unconfigured.
///
/// Unknown symbols get a neutral profile (rank 100, flat changes) rather than
/// borrowing another token's numbers.
pub fn mock_ranking(symbol: &str) -> CmcMetrics {
    let ticker = symbol.to_uppercase();

    let mut metrics = match ranking_profile(&ticker) {
        Some(p) => CmcMetrics {
            ticker,
            name: p.name.to_string(),
            rank: p.rank,
            price: p.price,
            volume_24h: p.volume_24h,
            percent_change_1h: p.changes[0],
            percent_change_24h: p.changes[1],
            percent_change_7d: p.changes[2],
            percent_change_30d: p.changes[3],
            market_cap: p.market_cap,
            market_cap_dominance: p.dominance,
            fully_diluted_market_cap: p.fdv,
            circulating_supply: p.supply.0,
            total_supply: p.supply.1,
            max_supply: p.supply.2,
            num_market_pairs: p.pairs,
            tags: p.tags.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        },
        None => CmcMetrics {
            name: ticker.clone(),
            ticker,
            rank: 100,
            price: 1.0,
            volume_24h: 10_000_000.0,
            market_cap: 100_000_000.0,
            market_cap_dominance: 0.01,
            fully_diluted_market_cap: 150_000_000.0,
            circulating_supply: 100_000_000.0,
            total_supply: 150_000_000.0,
            num_market_pairs: 20,
            ..Default::default()
        },
    };
    metrics.apply_tag_flags();
    metrics
}

/// Spot snapshot derived from DEX metrics when the price provider has nothing.
pub fn snapshot_from_dex(dex: &DexMetrics) -> CoinSnapshot {
    CoinSnapshot {
        id: dex.ticker.to_lowercase(),
        symbol: dex.ticker.to_lowercase(),
        name: dex.token_name.clone(),
        current_price: dex.price_usd,
        market_cap: dex.market_cap,
        total_volume: dex.volume_24h,
        price_change_percentage_24h: dex.price_change_24h,
        image: dex.image_url.clone(),
    }
}

/// Synthetic hourly history: each point is `price × (1 + u)`, `u` uniform in ±5%.
pub fn synthetic_series<R: Rng + ?Sized>(price: f64, rng: &mut R) -> PriceSeries {
    let now = Utc::now();
    let points = (0..SYNTHETIC_POINTS)
        .map(|i| {
            let jitter = rng.gen_range(-SYNTHETIC_JITTER..=SYNTHETIC_JITTER);
            PricePoint {
                timestamp: now - ChronoDuration::hours((SYNTHETIC_POINTS - 1 - i) as i64),
                price: price * (1.0 + jitter),
            }
        })
        .collect();

    PriceSeries {
        points,
        synthetic: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_synthetic_series_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let series = synthetic_series(200.0, &mut rng);

        assert!(series.synthetic);
        assert_eq!(series.len(), SYNTHETIC_POINTS);
        for point in &series.points {
            assert!(point.price >= 190.0 - 1e-9 && point.price <= 210.0 + 1e-9);
        }
        assert!(series.points.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
    }

    #[test]
    fn test_mock_dex_derivations() {
        let fet = mock_dex_metrics("fet");
        assert_eq!(fet.ticker, "FET");
        assert_eq!(fet.volume_6h, 125e6 * 0.25);
        assert_eq!(fet.volume_1h, 125e6 * 0.04);
        assert!((fet.price_change_6h - 8.5 * 0.4).abs() < 1e-12);
        assert!((fet.buys_sells_ratio - 15_420.0 / 12_340.0).abs() < 1e-12);
        assert_eq!(fet.top_pairs_count, 5);

        let unknown = mock_dex_metrics("ZZZ");
        assert_eq!(unknown.price_usd, 1.0);
        assert_eq!(unknown.buys_sells_ratio, 1.25);
    }

    #[test]
    fn test_mock_ranking() {
        let fet = mock_ranking("FET");
        assert_eq!(fet.rank, 45);
        assert!(fet.is_ai_token);

        let unknown = mock_ranking("ZZZ");
        assert_eq!(unknown.rank, 100);
        assert_eq!(unknown.percent_change_30d, 0.0);
        assert!(unknown.tags.is_empty());
        assert_eq!(unknown.name, "ZZZ");
    }

    #[test]
    fn test_snapshot_from_dex() {
        let snapshot = snapshot_from_dex(&mock_dex_metrics("SOL"));
        assert_eq!(snapshot.current_price, 198.50);
        assert_eq!(snapshot.market_cap, 92e9);
        assert_eq!(snapshot.symbol, "sol");
    }
}
