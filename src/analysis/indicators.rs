use serde::{Deserialize, Serialize};

pub const RSI_PERIOD: usize = 14;
pub const BOLLINGER_PERIOD: usize = 20;
pub const BOLLINGER_STD_DEV: f64 = 2.0;

const NEUTRAL_RSI: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TechnicalSignal {
    Overbought,
    Oversold,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SectorSentiment {
    Bullish,
    Bearish,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
    pub percent_b: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorResult {
    pub rsi: f64,
    pub bollinger: BollingerBands,
    pub signal: TechnicalSignal,
}

impl Default for IndicatorResult {
    fn default() -> Self {
        Self {
            rsi: NEUTRAL_RSI,
            bollinger: BollingerBands {
                upper: 0.0,
                middle: 0.0,
                lower: 0.0,
                percent_b: 0.5,
            },
            signal: TechnicalSignal::Neutral,
        }
    }
}

/// Relative Strength Index with Wilder's smoothing.
///
/// The first average gain/loss is the simple mean of the first `period`
/// changes; every later change is folded in with factor `1/period`.
/// Returns 50 when there are fewer than `period + 1` prices.
pub fn rsi(prices: &[f64], period: usize) -> f64 {
    if period == 0 || prices.len() < period + 1 {
        return NEUTRAL_RSI;
    }

    let changes: Vec<f64> = prices.windows(2).map(|w| w[1] - w[0]).collect();
    let period_f = period as f64;

    let mut avg_gain = changes[..period].iter().map(|&c| c.max(0.0)).sum::<f64>() / period_f;
    let mut avg_loss = changes[..period].iter().map(|&c| (-c).max(0.0)).sum::<f64>() / period_f;

    for &c in &changes[period..] {
        avg_gain = (avg_gain * (period_f - 1.0) + c.max(0.0)) / period_f;
        avg_loss = (avg_loss * (period_f - 1.0) + (-c).max(0.0)) / period_f;
    }

    if avg_loss == 0.0 {
        // Flat series has no direction
        return if avg_gain == 0.0 { NEUTRAL_RSI } else { 100.0 };
    }

    let rs = avg_gain / avg_loss;
    100.0 - 100.0 / (1.0 + rs)
}

/// Bollinger Bands over the trailing `period` prices (population standard deviation).
///
/// With fewer than `period` prices the bands are synthesized as
/// last × {1.1, 1.0, 0.9} and percent B is 0.5.
pub fn bollinger_bands(prices: &[f64], period: usize, std_dev: f64) -> BollingerBands {
    let last = prices.last().copied().unwrap_or(0.0);

    if period == 0 || prices.len() < period {
        return BollingerBands {
            upper: last * 1.1,
            middle: last,
            lower: last * 0.9,
            percent_b: 0.5,
        };
    }

    let window = &prices[prices.len() - period..];
    let mean = window.iter().sum::<f64>() / period as f64;
    let variance = window.iter().map(|p| (p - mean).powi(2)).sum::<f64>() / period as f64;
    let sd = variance.sqrt();

    let upper = mean + std_dev * sd;
    let lower = mean - std_dev * sd;

    BollingerBands {
        upper,
        middle: mean,
        lower,
        percent_b: percent_b(last, upper, lower),
    }
}

fn percent_b(price: f64, upper: f64, lower: f64) -> f64 {
    let width = upper - lower;
    if width == 0.0 || !width.is_finite() {
        return 0.5;
    }
    ((price - lower) / width).clamp(0.0, 1.0)
}

pub fn classify(rsi: f64, percent_b: f64) -> TechnicalSignal {
    if rsi > 70.0 || percent_b > 0.95 {
        TechnicalSignal::Overbought
    } else if rsi < 30.0 || percent_b < 0.05 {
        TechnicalSignal::Oversold
    } else {
        TechnicalSignal::Neutral
    }
}

/// RSI(14), Bollinger(20, 2) and the combined signal for a price series.
pub fn analyze(prices: &[f64]) -> IndicatorResult {
    let rsi = rsi(prices, RSI_PERIOD);
    let bollinger = bollinger_bands(prices, BOLLINGER_PERIOD, BOLLINGER_STD_DEV);
    let signal = classify(rsi, bollinger.percent_b);

    IndicatorResult {
        rsi,
        bollinger,
        signal,
    }
}

/// Aggregate sentiment across a group of tokens' indicators.
pub fn sector_sentiment(results: &[IndicatorResult]) -> SectorSentiment {
    if results.is_empty() {
        return SectorSentiment::Neutral;
    }

    let n = results.len() as f64;
    let avg_rsi = results.iter().map(|r| r.rsi).sum::<f64>() / n;
    let oversold = results
        .iter()
        .filter(|r| r.signal == TechnicalSignal::Oversold)
        .count() as f64;
    let overbought = results
        .iter()
        .filter(|r| r.signal == TechnicalSignal::Overbought)
        .count() as f64;

    if avg_rsi < 40.0 || oversold > n / 2.0 {
        SectorSentiment::Bullish
    } else if avg_rsi > 60.0 || overbought > n / 2.0 {
        SectorSentiment::Bearish
    } else {
        SectorSentiment::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(start: f64, step: f64, len: usize) -> Vec<f64> {
        (0..len).map(|i| start + step * i as f64).collect()
    }

    #[test]
    fn test_constant_series_is_neutral() {
        let prices = vec![42.0; 30];
        let result = analyze(&prices);
        assert_eq!(result.rsi, 50.0);
        assert_eq!(result.bollinger.percent_b, 0.5);
        assert_eq!(result.bollinger.upper, result.bollinger.lower);
        assert_eq!(result.signal, TechnicalSignal::Neutral);
    }

    #[test]
    fn test_short_series_falls_back() {
        for len in 1..15 {
            let prices = ramp(10.0, 1.0, len);
            assert_eq!(rsi(&prices, RSI_PERIOD), 50.0, "len {}", len);
        }

        let prices = ramp(100.0, 1.0, 10);
        let bands = bollinger_bands(&prices, BOLLINGER_PERIOD, BOLLINGER_STD_DEV);
        assert!((bands.upper - 109.0 * 1.1).abs() < 1e-9);
        assert_eq!(bands.middle, 109.0);
        assert!((bands.lower - 109.0 * 0.9).abs() < 1e-9);
        assert_eq!(bands.percent_b, 0.5);
    }

    #[test]
    fn test_monotonic_series_saturates_rsi() {
        let rising = ramp(1.0, 1.0, 30);
        assert_eq!(rsi(&rising, RSI_PERIOD), 100.0);
        assert_eq!(analyze(&rising).signal, TechnicalSignal::Overbought);

        let falling = ramp(100.0, -1.0, 30);
        assert_eq!(rsi(&falling, RSI_PERIOD), 0.0);
        assert_eq!(analyze(&falling).signal, TechnicalSignal::Oversold);
    }

    #[test]
    fn test_wilder_smoothing_matches_hand_computation() {
        // 14 alternating changes of +1/-1 seed gain = loss = 0.5, then one +2 change.
        let mut prices = vec![10.0];
        for i in 0..14 {
            let last = *prices.last().unwrap();
            prices.push(if i % 2 == 0 { last + 1.0 } else { last - 1.0 });
        }
        let last = *prices.last().unwrap();
        prices.push(last + 2.0);

        let avg_gain = (0.5 * 13.0 + 2.0) / 14.0;
        let avg_loss = (0.5 * 13.0) / 14.0;
        let expected = 100.0 - 100.0 / (1.0 + avg_gain / avg_loss);
        assert!((rsi(&prices, RSI_PERIOD) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_percent_b_is_clamped() {
        let mut prices = vec![100.0; 19];
        prices.push(1000.0);
        let bands = bollinger_bands(&prices, BOLLINGER_PERIOD, BOLLINGER_STD_DEV);
        assert!(bands.percent_b <= 1.0);
        assert!(bands.percent_b >= 0.0);
    }

    #[test]
    fn test_classify_branches() {
        assert_eq!(classify(75.0, 0.5), TechnicalSignal::Overbought);
        assert_eq!(classify(50.0, 0.96), TechnicalSignal::Overbought);
        assert_eq!(classify(25.0, 0.5), TechnicalSignal::Oversold);
        assert_eq!(classify(50.0, 0.04), TechnicalSignal::Oversold);
        assert_eq!(classify(50.0, 0.5), TechnicalSignal::Neutral);
        // Overbought is checked first
        assert_eq!(classify(75.0, 0.01), TechnicalSignal::Overbought);
    }

    #[test]
    fn test_sector_sentiment() {
        let mk = |rsi: f64, signal| IndicatorResult {
            rsi,
            signal,
            ..Default::default()
        };

        assert_eq!(sector_sentiment(&[]), SectorSentiment::Neutral);
        assert_eq!(
            sector_sentiment(&[mk(35.0, TechnicalSignal::Neutral), mk(38.0, TechnicalSignal::Neutral)]),
            SectorSentiment::Bullish
        );
        assert_eq!(
            sector_sentiment(&[mk(65.0, TechnicalSignal::Neutral), mk(62.0, TechnicalSignal::Neutral)]),
            SectorSentiment::Bearish
        );
        assert_eq!(
            sector_sentiment(&[
                mk(50.0, TechnicalSignal::Overbought),
                mk(50.0, TechnicalSignal::Overbought),
                mk(50.0, TechnicalSignal::Neutral),
            ]),
            SectorSentiment::Bearish
        );
        assert_eq!(
            sector_sentiment(&[mk(50.0, TechnicalSignal::Neutral), mk(55.0, TechnicalSignal::Oversold)]),
            SectorSentiment::Neutral
        );
    }
}
