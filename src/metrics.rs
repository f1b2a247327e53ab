use crate::error::Result;
use lazy_static::lazy_static;
use prometheus::{Encoder, Histogram, HistogramOpts, IntCounterVec, Opts, Registry, TextEncoder};

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();

    pub static ref REQUESTS: IntCounterVec = IntCounterVec::new(
        Opts::new("oracle_requests_total", "Oracle requests by outcome"),
        &["outcome"]
    ).unwrap();

    pub static ref UPSTREAM_CALLS: IntCounterVec = IntCounterVec::new(
        Opts::new("upstream_calls_total", "Upstream API calls by source"),
        &["source"]
    ).unwrap();

    pub static ref UPSTREAM_FAILURES: IntCounterVec = IntCounterVec::new(
        Opts::new("upstream_failures_total", "Failed upstream API calls by source"),
        &["source"]
    ).unwrap();

    pub static ref FALLBACKS: IntCounterVec = IntCounterVec::new(
        Opts::new("fallbacks_total", "Fallback data substituted, by source"),
        &["source"]
    ).unwrap();

    pub static ref REQUEST_LATENCY: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "oracle_request_latency_seconds",
            "Oracle report latency in seconds"
        ).buckets(vec![0.1, 0.5, 1.0, 2.0, 5.0, 10.0])
    ).unwrap();
}

pub fn init() -> Result<()> {
    REGISTRY.register(Box::new(REQUESTS.clone()))?;
    REGISTRY.register(Box::new(UPSTREAM_CALLS.clone()))?;
    REGISTRY.register(Box::new(UPSTREAM_FAILURES.clone()))?;
    REGISTRY.register(Box::new(FALLBACKS.clone()))?;
    REGISTRY.register(Box::new(REQUEST_LATENCY.clone()))?;
    Ok(())
}

/// Prometheus text exposition of everything in `REGISTRY`.
pub fn encode() -> Result<String> {
    let mut buffer = Vec::new();
    TextEncoder::new().encode(&REGISTRY.gather(), &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| crate::error::Error::InternalError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_after_init() {
        // Registration is global; a second init in the same process fails with AlreadyReg.
        let _ = init();
        FALLBACKS.with_label_values(&["coingecko"]).inc();

        let text = encode().unwrap();
        assert!(text.contains("fallbacks_total"));
        assert!(text.contains("source=\"coingecko\""));
    }
}
