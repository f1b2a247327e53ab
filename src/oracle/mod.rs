//! Request orchestration: resolve the input, fan out to the data sources,
//! run the analyzers and assemble an [`OracleReport`].

pub mod report;
pub mod sectors;

use crate::analysis::dex_sentiment;
use crate::analysis::indicators;
use crate::analysis::momentum::{momentum, rank_tier};
use crate::analysis::{CompositeScorer, Outlook, ScoringInputs};
use crate::api::dexscreener::{aggregate_metrics, exact_symbol_matches};
use crate::api::fallback::{mock_dex_metrics, mock_ranking, snapshot_from_dex, synthetic_series};
use crate::api::{
    CoinGeckoClient, CoinMarketCapClient, DexDataProvider, DexScreenerClient, PriceDataProvider,
    RankingProvider, Source,
};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::metrics;
use crate::models::{CoinSnapshot, DexMetrics, PriceSeries, TokenIdentity};
use crate::narrative::{GeminiNarrator, NarrativeContext, NarrativeGenerator, TemplateNarrator};
use crate::resolver::{catalog, classify_input, TokenResolver};
use crate::utils::format_market_cap;
use crate::validation::normalize_ticker_input;
use chrono::Utc;
use log::{debug, error, info, warn};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

pub use report::OracleReport;
pub use sectors::{SectorOverview, SectorSummary};

pub const HISTORY_DAYS: u32 = 30;

/// The collaborators an [`Oracle`] draws data from.
#[derive(Clone)]
pub struct Sources {
    pub prices: Source<dyn PriceDataProvider>,
    pub dex: Source<dyn DexDataProvider>,
    pub ranking: Source<dyn RankingProvider>,
    /// Remote narrator; the template narrator is used when absent.
    pub narrator: Option<Arc<dyn NarrativeGenerator>>,
}

impl Sources {
    pub fn offline() -> Self {
        Self {
            prices: Source::Fallback,
            dex: Source::Fallback,
            ranking: Source::Fallback,
            narrator: None,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        if config.sources.offline {
            info!("Offline mode: all data sources use fallback data");
            return Ok(Self::offline());
        }

        let timeout = config.timeouts.upstream();
        let api = &config.api;

        let prices: Arc<dyn PriceDataProvider> = Arc::new(CoinGeckoClient::new(
            api.coingecko_api_key.clone(),
            api.coingecko_base_url.clone(),
            timeout,
        )?);
        let dex: Arc<dyn DexDataProvider> =
            Arc::new(DexScreenerClient::new(api.dexscreener_base_url.clone(), timeout)?);

        let ranking = match &api.coinmarketcap_api_key {
            Some(key) => {
                let client: Arc<dyn RankingProvider> = Arc::new(CoinMarketCapClient::new(
                    key.clone(),
                    api.coinmarketcap_base_url.clone(),
                    timeout,
                )?);
                Source::Live(client)
            }
            None => {
                info!("No CoinMarketCap API key configured, using fallback ranking data");
                Source::Fallback
            }
        };

        let narrator = match &api.gemini_api_key {
            Some(key) => {
                let narrator: Arc<dyn NarrativeGenerator> = Arc::new(GeminiNarrator::new(
                    key.clone(),
                    api.gemini_base_url.clone(),
                    config.timeouts.narrative(),
                )?);
                Some(narrator)
            }
            None => {
                info!("No Gemini API key configured, using template narratives");
                None
            }
        };

        Ok(Self {
            prices: Source::Live(prices),
            dex: Source::Live(dex),
            ranking,
            narrator,
        })
    }
}

/// Where DEX metrics for a resolved token are fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DexTarget {
    Address { address: String, chain: Option<String> },
    Search(String),
}

impl DexTarget {
    /// An address typed by the user wins, then the catalog address, then the
    /// address found during resolution, then a text search.
    pub fn for_identity(input_address: Option<&str>, identity: &TokenIdentity) -> Self {
        if let Some(address) = input_address {
            return DexTarget::Address {
                address: address.to_string(),
                chain: identity.chain.clone(),
            };
        }
        if let Some(known) = catalog::KNOWN_ADDRESSES.get(identity.symbol.as_str()) {
            return DexTarget::Address {
                address: known.address.to_string(),
                chain: Some(known.chain.to_string()),
            };
        }
        match &identity.address {
            Some(address) => DexTarget::Address {
                address: address.clone(),
                chain: identity.chain.clone(),
            },
            None => DexTarget::Search(identity.symbol.clone()),
        }
    }
}

/// Runs `call` under `limit`; failures and timeouts are logged and become `None`.
async fn guarded<T, F>(source: &'static str, what: &str, limit: Duration, call: F) -> Option<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(Ok(value)) => Some(value),
        Ok(Err(e)) if e.is_upstream() => {
            warn!("{} {} failed, falling back: {}", source, what, e);
            None
        }
        Ok(Err(e)) => {
            error!("{} {} failed unexpectedly, falling back: {}", source, what, e);
            None
        }
        Err(_) => {
            warn!("{} {} timed out after {}ms, falling back", source, what, limit.as_millis());
            None
        }
    }
}

fn record_fallback(source: &'static str, ticker: &str) {
    debug!("Using fallback {} data for {}", source, ticker);
    metrics::FALLBACKS.with_label_values(&[source]).inc();
}

pub struct Oracle {
    resolver: TokenResolver,
    sources: Sources,
    template: TemplateNarrator,
    scorer: CompositeScorer,
    upstream_timeout: Duration,
    narrative_timeout: Duration,
}

impl Oracle {
    pub fn new(sources: Sources, config: &Config) -> Self {
        Self {
            resolver: TokenResolver::new(sources.dex.clone(), config.timeouts.resolver()),
            sources,
            template: TemplateNarrator::new(),
            scorer: CompositeScorer::new(config.scoring.clone()),
            upstream_timeout: config.timeouts.upstream(),
            narrative_timeout: config.timeouts.narrative(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(Sources::from_config(config)?, config))
    }

    /// Full report for a ticker or contract address. Records request metrics.
    pub async fn predict(&self, raw_input: &str) -> Result<OracleReport> {
        let timer = metrics::REQUEST_LATENCY.start_timer();
        let result = self.build_report(raw_input).await;
        timer.observe_duration();

        let outcome = match &result {
            Ok(_) => "ok",
            Err(Error::InvalidInput(_)) => "invalid",
            Err(Error::NotFound { .. }) => "not_found",
            Err(_) => "error",
        };
        metrics::REQUESTS.with_label_values(&[outcome]).inc();
        result
    }

    async fn build_report(&self, raw_input: &str) -> Result<OracleReport> {
        let input = normalize_ticker_input(raw_input)?;
        let input_address = classify_input(&input).is_address().then(|| input.as_str());

        let identity = self.resolver.resolve(&input).await?;
        let ticker = identity.symbol.clone();
        info!("Building oracle report for {}", ticker);

        let dex_target = DexTarget::for_identity(input_address, &identity);
        let (snapshot, history, dex, ranking) = tokio::join!(
            self.fetch_snapshot(&ticker),
            self.fetch_history(&ticker, HISTORY_DAYS),
            self.fetch_dex(&ticker, &dex_target),
            self.fetch_ranking(&ticker),
        );

        let mut data_sources = Vec::new();
        if snapshot.is_some() || history.is_some() {
            data_sources.push("coingecko".to_string());
        }
        if dex.is_some() {
            data_sources.push("dexscreener".to_string());
        }
        if ranking.is_some() {
            data_sources.push("coinmarketcap".to_string());
        }

        let dex_live = dex.is_some();
        let dex = dex.unwrap_or_else(|| {
            record_fallback("dexscreener", &ticker);
            mock_dex_metrics(&ticker)
        });
        let cmc = ranking.unwrap_or_else(|| {
            record_fallback("coinmarketcap", &ticker);
            mock_ranking(&ticker)
        });
        let snapshot = snapshot.unwrap_or_else(|| {
            record_fallback("coingecko", &ticker);
            snapshot_from_dex(&dex)
        });
        let series = history.unwrap_or_else(|| self.synthetic_history(&ticker, snapshot.current_price));

        let indicator = indicators::analyze(&series.prices());
        let dex_sentiment = dex_sentiment::sentiment(&dex);
        let momentum = momentum(&cmc);
        let tier = rank_tier(cmc.rank);
        let market_cap = if snapshot.market_cap > 0.0 {
            snapshot.market_cap
        } else {
            dex.market_cap
        };
        debug!(
            "{}: rsi={:.2} %b={:.3} dex={:?} momentum={:?}",
            ticker, indicator.rsi, indicator.bollinger.percent_b, dex_sentiment.signal, momentum.trend
        );

        let composite = self.scorer.score(&ScoringInputs {
            indicator: &indicator,
            dex: &dex_sentiment,
            buys_sells_ratio: dex.buys_sells_ratio,
            momentum: &momentum,
            rank: cmc.rank,
            market_cap,
            price_change_30d: cmc.percent_change_30d,
        });

        let context = NarrativeContext {
            ticker: ticker.clone(),
            name: identity.name.clone(),
            category: identity.category,
            outlook: composite.outlook,
            confidence: composite.confidence,
            price: snapshot.current_price,
            volume_24h: snapshot.total_volume,
            price_change_24h: snapshot.price_change_percentage_24h,
            rsi: indicator.rsi,
            percent_b: indicator.bollinger.percent_b,
        };
        let prophecy = self.narrate(&context).await;
        let target_cap = target_cap(composite.six_month.mid_estimate, composite.outlook);

        info!(
            "{}: {} with confidence {} ({} bullish / {} bearish signals)",
            ticker,
            composite.outlook.as_str(),
            composite.confidence,
            composite.bullish_signals.len(),
            composite.bearish_signals.len()
        );

        Ok(OracleReport {
            image: dex.image_url.clone().unwrap_or_else(|| identity.image.clone()),
            chain: if dex_live {
                Some(dex.chain.clone())
            } else {
                identity.chain.clone()
            },
            address: identity.address.clone(),
            name: identity.name.clone(),
            price: snapshot.current_price,
            volume_24h: snapshot.total_volume,
            price_change_24h: snapshot.price_change_percentage_24h,
            market_cap,
            prediction_6m: (&composite.six_month).into(),
            technical: (&indicator).into(),
            dex: report::DexReport::new(&dex, &dex_sentiment),
            cmc: report::CmcReport::new(&cmc, &momentum, &tier),
            prediction: report::PredictionReport::new(&composite, prophecy, target_cap),
            sector: catalog::category_for(&ticker).unwrap_or_default(),
            category: identity.category,
            data_sources,
            timestamp: Utc::now(),
            ticker,
        })
    }

    async fn fetch_snapshot(&self, ticker: &str) -> Option<CoinSnapshot> {
        let provider = self.sources.prices.live()?;
        guarded("coingecko", "snapshot", self.upstream_timeout, provider.snapshot(ticker)).await
    }

    async fn fetch_history(&self, ticker: &str, days: u32) -> Option<PriceSeries> {
        let provider = self.sources.prices.live()?;
        guarded(
            "coingecko",
            "price history",
            self.upstream_timeout,
            provider.price_history(ticker, days),
        )
        .await
        .filter(|series| !series.is_empty())
    }

    async fn fetch_ranking(&self, ticker: &str) -> Option<crate::models::CmcMetrics> {
        let provider = self.sources.ranking.live()?;
        guarded("coinmarketcap", "ranking", self.upstream_timeout, provider.ranking(ticker)).await
    }

    async fn fetch_dex(&self, ticker: &str, target: &DexTarget) -> Option<DexMetrics> {
        let provider = self.sources.dex.live()?;
        let call = async {
            let metrics = match target {
                DexTarget::Address { address, chain } => {
                    let pairs = provider.token_pairs(address).await?;
                    aggregate_metrics(ticker, &pairs, chain.as_deref())
                }
                DexTarget::Search(symbol) => {
                    let pairs = exact_symbol_matches(provider.search_pairs(symbol).await?, symbol);
                    aggregate_metrics(ticker, &pairs, None)
                }
            };
            Ok::<_, Error>(metrics)
        };

        let metrics = guarded("dexscreener", "metrics", self.upstream_timeout, call)
            .await
            .flatten();
        if metrics.is_none() {
            debug!("No DEX pairs for {} ({:?})", ticker, target);
        }
        metrics
    }

    /// Price history for `ticker`, or a synthetic series around `current_price`
    /// when the price source has none.
    pub async fn price_series(&self, ticker: &str, days: u32, current_price: f64) -> PriceSeries {
        match self.fetch_history(ticker, days).await {
            Some(series) => series,
            None => self.synthetic_history(ticker, current_price),
        }
    }

    fn synthetic_history(&self, ticker: &str, current_price: f64) -> PriceSeries {
        record_fallback("coingecko_history", ticker);
        warn!("No price history for {}, using a synthetic series", ticker);
        synthetic_series(current_price, &mut rand::thread_rng())
    }

    async fn narrate(&self, context: &NarrativeContext) -> String {
        if let Some(narrator) = &self.sources.narrator {
            if let Some(text) =
                guarded("gemini", "narrative", self.narrative_timeout, narrator.generate(context)).await
            {
                return text;
            }
            record_fallback("gemini", &context.ticker);
        }
        self.template.render(context)
    }
}

/// Compact mid-estimate market cap, with a trailing `+` for a bullish outlook.
pub fn target_cap(mid_estimate: u64, outlook: Outlook) -> String {
    let formatted = format_market_cap(mid_estimate as f64);
    match outlook {
        Outlook::Bullish => format!("{}+", formatted),
        Outlook::Bearish => formatted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, CmcMetrics, ResolutionSource};
    use crate::narrative::MockNarrativeGenerator;
    use crate::tests::common::{pair, ranking, series, snapshot, StubDex, StubPrices, StubRanking};

    fn identity(symbol: &str, address: Option<&str>) -> TokenIdentity {
        TokenIdentity {
            symbol: symbol.to_string(),
            name: symbol.to_string(),
            chain: Some("base".to_string()),
            address: address.map(str::to_string),
            category: Category::Altcoin,
            image: String::new(),
            source: ResolutionSource::Search,
        }
    }

    #[test]
    fn test_dex_target_priority() {
        let typed = DexTarget::for_identity(Some("0xabc"), &identity("FET", Some("0xdef")));
        assert_eq!(
            typed,
            DexTarget::Address {
                address: "0xabc".to_string(),
                chain: Some("base".to_string())
            }
        );

        match DexTarget::for_identity(None, &identity("FET", Some("0xdef"))) {
            DexTarget::Address { address, chain } => {
                assert_eq!(address, catalog::KNOWN_ADDRESSES["FET"].address);
                assert_eq!(chain.as_deref(), Some("ethereum"));
            }
            other => panic!("unexpected target {:?}", other),
        }

        let resolved = DexTarget::for_identity(None, &identity("NEWCOIN", Some("0xdef")));
        assert!(matches!(resolved, DexTarget::Address { ref address, .. } if address == "0xdef"));

        assert_eq!(
            DexTarget::for_identity(None, &identity("NEWCOIN", None)),
            DexTarget::Search("NEWCOIN".to_string())
        );
    }

    #[test]
    fn test_target_cap() {
        assert_eq!(target_cap(1_234_000_000_000, Outlook::Bullish), "$1.23T+");
        assert_eq!(target_cap(2_500_000_000, Outlook::Bearish), "$2.50B");
        assert_eq!(target_cap(999, Outlook::Bearish), "$999.00");
    }

    #[tokio::test]
    async fn test_offline_report() {
        let oracle = Oracle::new(Sources::offline(), &Config::default());
        let report = oracle.predict("$fet").await.unwrap();

        assert_eq!(report.ticker, "FET");
        assert_eq!(report.category, Category::Ai);
        assert_eq!(report.sector, Category::Ai);
        assert!(report.data_sources.is_empty());
        assert_eq!(report.cmc.rank, 45);
        assert_eq!(report.price, 2.45);
        assert!(report.prediction.confidence <= 99);
        assert!(report.technical.bollinger_position >= 0.0 && report.technical.bollinger_position <= 1.0);
        assert!(!report.prediction.prophecy.is_empty());
    }

    fn live_sources(
        dex: StubDex,
        prices: StubPrices,
        ranking: Option<CmcMetrics>,
        narrator: Option<Arc<dyn NarrativeGenerator>>,
    ) -> Sources {
        Sources {
            prices: Source::Live(Arc::new(prices)),
            dex: Source::Live(Arc::new(dex)),
            ranking: Source::Live(Arc::new(StubRanking(ranking))),
            narrator,
        }
    }

    fn fet_dex() -> StubDex {
        let address = catalog::KNOWN_ADDRESSES["FET"].address;
        let mut dex = StubDex::default();
        dex.by_address
            .insert(address.to_string(), vec![pair("FET", address, "ethereum", 5_000_000.0)]);
        dex
    }

    fn rising(len: usize) -> Vec<f64> {
        (0..len).map(|i| 2.0 + i as f64 * 0.01 + if i % 2 == 0 { 0.02 } else { 0.0 }).collect()
    }

    #[tokio::test]
    async fn test_live_report_uses_upstream_data() -> Result<()> {
        let mut narrator = MockNarrativeGenerator::new();
        narrator
            .expect_generate()
            .withf(|ctx| ctx.ticker == "FET" && ctx.category == Category::Ai)
            .times(1)
            .returning(|_| Ok("The oracle sees FET.".to_string()));

        let prices = StubPrices {
            snapshot: Some(snapshot("FET", 2.5, 2e9)),
            history: Some(series(&rising(30))),
        };
        let sources = live_sources(fet_dex(), prices, Some(ranking("FET", 45)), Some(Arc::new(narrator)));
        let report = Oracle::new(sources, &Config::default()).predict("fet").await?;

        assert_eq!(report.data_sources, vec!["coingecko", "dexscreener", "coinmarketcap"]);
        assert_eq!(report.prediction.prophecy, "The oracle sees FET.");
        assert_eq!(report.price, 2.5);
        assert_eq!(report.market_cap, 2e9);
        assert_eq!(report.dex.buys_sells_ratio, 3.0);
        assert_eq!(report.dex.sentiment, crate::analysis::DexSignal::Accumulating);
        assert_eq!(report.dex.sentiment_strength, 100.0);
        assert_eq!(report.image, "https://img.example/fet.png");
        assert_eq!(report.chain.as_deref(), Some("ethereum"));
        assert_eq!(report.cmc.rank, 45);
        assert!(report.cmc.is_ai_token);
        assert!(report
            .prediction
            .signals_bullish
            .contains(&"DEX showing accumulation (high buy/sell ratio)".to_string()));
        Ok(())
    }

    #[test_log::test(tokio::test)]
    async fn test_failed_history_uses_synthetic_series() -> Result<()> {
        let prices = StubPrices {
            snapshot: Some(snapshot("FET", 100.0, 2e9)),
            history: None,
        };
        let oracle = Oracle::new(live_sources(fet_dex(), prices, None, None), &Config::default());

        let series = oracle.price_series("FET", HISTORY_DAYS, 100.0).await;
        assert!(series.synthetic);
        assert_eq!(series.len(), 30);
        assert!(series.prices().iter().all(|p| (95.0..=105.0).contains(p)));

        let report = oracle.predict("FET").await?;
        assert!(report.technical.rsi >= 0.0 && report.technical.rsi <= 100.0);
        assert_eq!(report.data_sources, vec!["coingecko", "dexscreener"]);
        Ok(())
    }

    #[test_log::test(tokio::test)]
    async fn test_narrator_failure_keeps_outlook_and_confidence() -> Result<()> {
        let sources = |narrator: Option<Arc<dyn NarrativeGenerator>>| {
            let prices = StubPrices {
                snapshot: Some(snapshot("FET", 2.5, 2e9)),
                history: Some(series(&rising(30))),
            };
            live_sources(fet_dex(), prices, Some(ranking("FET", 45)), narrator)
        };

        let mut failing = MockNarrativeGenerator::new();
        failing
            .expect_generate()
            .returning(|_| Err(Error::Timeout("gemini".to_string())));

        let with_failure = Oracle::new(sources(Some(Arc::new(failing))), &Config::default())
            .predict("FET")
            .await?;
        let templated = Oracle::new(sources(None), &Config::default()).predict("FET").await?;

        assert_eq!(with_failure.prediction.outlook, templated.prediction.outlook);
        assert_eq!(with_failure.prediction.confidence, templated.prediction.confidence);
        assert_eq!(with_failure.prediction.prophecy, templated.prediction.prophecy);
        assert!(with_failure.prediction.prophecy.contains("FET"));
        Ok(())
    }

    #[tokio::test]
    async fn test_address_input_without_pairs_is_not_found() {
        let sources = live_sources(StubDex::default(), StubPrices::default(), None, None);
        let oracle = Oracle::new(sources, &Config::default());
        assert!(matches!(
            oracle.predict("0x1111111111111111111111111111111111111111").await,
            Err(Error::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_offline_errors() {
        let oracle = Oracle::new(Sources::offline(), &Config::default());
        assert!(matches!(oracle.predict("  ").await, Err(Error::InvalidInput(_))));
        assert!(matches!(oracle.predict("NOTACOIN").await, Err(Error::NotFound { .. })));
    }
}
