pub mod cache;

pub use cache::Cache;

/// Half-up rounding (`floor(x + 0.5)`), so 63.5 becomes 64 and -2.5 becomes -2.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Half-up rounding to a fixed number of decimals.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    round_half_up(value * factor) / factor
}

/// Compact dollar formatting used for market caps: `$1.23T`, `$4.56B`, `$7.89M`, `$1.00K`.
pub fn format_market_cap(value: f64) -> String {
    if value >= 1e12 {
        format!("${:.2}T", value / 1e12)
    } else if value >= 1e9 {
        format!("${:.2}B", value / 1e9)
    } else if value >= 1e6 {
        format!("${:.2}M", value / 1e6)
    } else if value >= 1e3 {
        format!("${:.2}K", value / 1e3)
    } else {
        format!("${:.2}", value)
    }
}
