//! Turns free-form user input (a ticker or a contract address) into a
//! canonical [`TokenIdentity`].

pub mod catalog;

use crate::api::dexscreener::{exact_symbol_matches, select_top_pair, DexPair};
use crate::api::{DexDataProvider, Source};
use crate::error::{Error, Result};
use crate::models::{Category, ResolutionSource, TokenIdentity};
use lazy_static::lazy_static;
use log::{debug, info, warn};
use regex::Regex;
use std::time::Duration;

lazy_static! {
    static ref EVM_ADDRESS: Regex = Regex::new(r"^0x[a-fA-F0-9]{40}$").unwrap();
    static ref SOLANA_ADDRESS: Regex = Regex::new(r"^[1-9A-HJ-NP-Za-km-z]{32,44}$").unwrap();
}

const ADDRESS_HINT: &str = "Make sure the address is correct and has trading activity on DEX.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    EvmAddress,
    SolanaAddress,
    Symbol,
}

impl InputKind {
    pub fn is_address(&self) -> bool {
        !matches!(self, InputKind::Symbol)
    }
}

pub fn classify_input(input: &str) -> InputKind {
    let input = input.trim();
    if EVM_ADDRESS.is_match(input) {
        InputKind::EvmAddress
    } else if !input.starts_with("0x") && SOLANA_ADDRESS.is_match(input) {
        InputKind::SolanaAddress
    } else {
        InputKind::Symbol
    }
}

/// Sector for a token: the static tables first, then name and symbol heuristics.
pub fn infer_category(symbol: &str, name: &str) -> Category {
    let symbol = symbol.to_uppercase();
    if let Some(category) = catalog::category_for(&symbol) {
        return category;
    }

    let name = name.to_lowercase();
    let lower_symbol = symbol.to_lowercase();
    if catalog::MEME_KEYWORDS
        .iter()
        .any(|kw| name.contains(kw) || lower_symbol.contains(kw))
    {
        return Category::Meme;
    }
    if ["swap", "finance", "protocol"].iter().any(|kw| name.contains(kw)) {
        return Category::Defi;
    }
    if ["game", "play"].iter().any(|kw| name.contains(kw)) {
        return Category::Gaming;
    }
    if ["layer", "l2", "rollup"].iter().any(|kw| name.contains(kw)) {
        return Category::L2;
    }
    if ["ai", "artificial", "neural"].iter().any(|kw| name.contains(kw)) {
        return Category::Ai;
    }
    Category::Altcoin
}

/// `https://ui-avatars.com` letter avatar, colored by the symbol's first character.
pub fn placeholder_image(symbol: &str) -> String {
    let first = symbol.chars().next().unwrap_or('?');
    let color = catalog::PLACEHOLDER_COLORS[first as usize % catalog::PLACEHOLDER_COLORS.len()];
    format!(
        "https://ui-avatars.com/api/?name={}&background={}&color=fff&size=128&bold=true",
        first.to_uppercase(),
        color
    )
}

/// Upstream image, else the static logo, else a placeholder.
pub fn token_image(symbol: &str, upstream: Option<&str>) -> String {
    if let Some(url) = upstream.filter(|url| !url.is_empty()) {
        return url.to_string();
    }
    catalog::TOKEN_LOGOS
        .get(symbol.to_uppercase().as_str())
        .cloned()
        .unwrap_or_else(|| placeholder_image(symbol))
}

fn identity_from_pair(pair: &DexPair, source: ResolutionSource) -> TokenIdentity {
    let symbol = pair.base_token.symbol.to_uppercase();
    let name = if pair.base_token.name.is_empty() {
        symbol.clone()
    } else {
        pair.base_token.name.clone()
    };

    TokenIdentity {
        category: infer_category(&symbol, &name),
        image: token_image(&symbol, pair.image_url()),
        chain: Some(pair.chain_id.clone()).filter(|c| !c.is_empty()),
        address: Some(pair.base_token.address.clone()).filter(|a| !a.is_empty()),
        symbol,
        name,
        source,
    }
}

/// Identity built from the static tables alone.
pub fn catalog_identity(symbol: &str) -> Option<TokenIdentity> {
    let symbol = symbol.to_uppercase();
    if !catalog::is_known(&symbol) {
        return None;
    }
    let name = catalog::display_name(&symbol);
    let known = catalog::KNOWN_ADDRESSES.get(symbol.as_str());

    Some(TokenIdentity {
        category: infer_category(&symbol, &name),
        image: token_image(&symbol, None),
        chain: known.map(|k| k.chain.to_string()),
        address: known.map(|k| k.address.to_string()),
        symbol,
        name,
        source: ResolutionSource::Catalog,
    })
}

/// Catalog symbol whose known contract address matches, case-insensitively.
fn catalog_symbol_for_address(address: &str) -> Option<&'static str> {
    catalog::KNOWN_ADDRESSES
        .iter()
        .find(|(_, known)| known.address.eq_ignore_ascii_case(address))
        .map(|(symbol, _)| *symbol)
}

pub struct TokenResolver {
    dex: Source<dyn DexDataProvider>,
    timeout: Duration,
}

impl TokenResolver {
    pub fn new(dex: Source<dyn DexDataProvider>, timeout: Duration) -> Self {
        Self { dex, timeout }
    }

    /// Resolves `input` or fails with `Error::NotFound`. Upstream failures
    /// never escape as anything else.
    pub async fn resolve(&self, input: &str) -> Result<TokenIdentity> {
        let input = input.trim();
        let kind = classify_input(input);
        debug!("Resolving {:?} input: {}", kind, input);

        let identity = if kind.is_address() {
            self.resolve_address(input).await
        } else {
            self.resolve_symbol(input).await
        };

        match &identity {
            Some(identity) => info!(
                "Resolved {} to {} ({}, {:?})",
                input, identity.symbol, identity.category, identity.source
            ),
            None => info!("Could not resolve {}", input),
        }

        identity.ok_or_else(|| {
            if kind.is_address() {
                Error::not_found("Could not find token for this address.", ADDRESS_HINT)
            } else {
                Error::not_found(
                    format!("Could not find data for {}. Try a different ticker.", input.to_uppercase()),
                    format!("Supported tickers include {}, and 60+ more.", catalog::supported_examples()),
                )
            }
        })
    }

    async fn lookup(&self, kind: &str, call: impl std::future::Future<Output = Result<Vec<DexPair>>>) -> Vec<DexPair> {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(pairs)) => pairs,
            Ok(Err(e)) => {
                warn!("DexScreener {} lookup failed: {}", kind, e);
                Vec::new()
            }
            Err(_) => {
                warn!("DexScreener {} lookup timed out after {}ms", kind, self.timeout.as_millis());
                Vec::new()
            }
        }
    }

    async fn resolve_address(&self, address: &str) -> Option<TokenIdentity> {
        let provider = match self.dex.live() {
            Some(provider) => provider,
            None => return catalog_symbol_for_address(address).and_then(catalog_identity),
        };

        let pairs = self.lookup("address", provider.token_pairs(address)).await;
        select_top_pair(&pairs).map(|pair| identity_from_pair(pair, ResolutionSource::AddressLookup))
    }

    async fn resolve_symbol(&self, symbol: &str) -> Option<TokenIdentity> {
        if let Some(provider) = self.dex.live() {
            let pairs = self.lookup("search", provider.search_pairs(symbol)).await;
            let candidates = exact_symbol_matches(pairs, symbol);
            if let Some(pair) = select_top_pair(&candidates) {
                return Some(identity_from_pair(pair, ResolutionSource::Search));
            }
        }
        catalog_identity(symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::common::{pair, StubDex};
    use std::sync::Arc;

    #[test]
    fn test_classify_input() {
        assert_eq!(
            classify_input("0x2260FAC5E5542a773Aa44fBCfeDf7C193bc2C599"),
            InputKind::EvmAddress
        );
        assert_eq!(
            classify_input("DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263"),
            InputKind::SolanaAddress
        );
        assert_eq!(classify_input("BTC"), InputKind::Symbol);
        // Too short for an EVM address and starts with 0x
        assert_eq!(classify_input("0x1234"), InputKind::Symbol);
        // 'l' and '0' are outside base58
        assert_eq!(
            classify_input("l0l0l0l0l0l0l0l0l0l0l0l0l0l0l0l0l0"),
            InputKind::Symbol
        );
    }

    #[test]
    fn test_infer_category() {
        assert_eq!(infer_category("fet", "Fetch.ai"), Category::Ai);
        assert_eq!(infer_category("XYZDOG", "Something"), Category::Meme);
        assert_eq!(infer_category("ABC", "Moon Rocket"), Category::Meme);
        assert_eq!(infer_category("QSW", "QuickSwap"), Category::Defi);
        assert_eq!(infer_category("PLY", "Player Token"), Category::Gaming);
        assert_eq!(infer_category("ZKR", "Rollup Network"), Category::L2);
        assert_eq!(infer_category("XAI", "Super AI Agent"), Category::Ai);
        assert_eq!(infer_category("NRL", "Neural Grid"), Category::Ai);
        assert_eq!(infer_category("RNE", "Rainmaker"), Category::Ai);
        assert_eq!(infer_category("XYZ", "OpenAIToken"), Category::Ai);
        // Earlier rules win over the AI substring
        assert_eq!(infer_category("CSW", "ChainSwap"), Category::Defi);
        assert_eq!(infer_category("ZZZ", "Quiet Harbor"), Category::Altcoin);
    }

    #[test]
    fn test_placeholder_image() {
        // 'Z' is 90, 90 % 10 = 0
        assert_eq!(
            placeholder_image("ZZZ"),
            "https://ui-avatars.com/api/?name=Z&background=6366f1&color=fff&size=128&bold=true"
        );
        // 'a' is 97, the letter is uppercased but the color follows the raw char
        assert!(placeholder_image("abc").contains("name=A&background=14b8a6"));
    }

    #[test]
    fn test_token_image_priority() {
        assert_eq!(token_image("BTC", Some("https://x/y.png")), "https://x/y.png");
        assert_eq!(token_image("BTC", Some("")), catalog::TOKEN_LOGOS["BTC"]);
        assert!(token_image("QQQQ", None).starts_with("https://ui-avatars.com/"));
    }

    #[test]
    fn test_catalog_identity() {
        let bonk = catalog_identity("bonk").unwrap();
        assert_eq!(bonk.symbol, "BONK");
        assert_eq!(bonk.category, Category::Meme);
        assert_eq!(bonk.chain.as_deref(), Some("solana"));
        assert_eq!(bonk.source, ResolutionSource::Catalog);
        assert!(catalog_identity("NOTACOIN").is_none());
    }

    #[tokio::test]
    async fn test_fallback_source_uses_catalog() {
        let resolver = TokenResolver::new(Source::Fallback, Duration::from_millis(100));

        let fet = resolver.resolve("FET").await.unwrap();
        assert_eq!(fet.source, ResolutionSource::Catalog);

        let address = catalog::KNOWN_ADDRESSES["BTC"].address.to_lowercase();
        let btc = resolver.resolve(&address).await.unwrap();
        assert_eq!(btc.symbol, "BTC");

        match resolver.resolve("NOTACOIN").await {
            Err(Error::NotFound { hint, .. }) => assert!(hint.unwrap().contains("BTC, ETH")),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_live_search_prefers_exact_symbol() {
        let dex = StubDex {
            search: vec![
                pair("FOOX", "0xbar", "base", 9_000_000.0),
                pair("foo", "0xfoo", "base", 1_000_000.0),
            ],
            ..Default::default()
        };
        let resolver = TokenResolver::new(Source::Live(Arc::new(dex)), Duration::from_millis(500));

        let foo = resolver.resolve("FOO").await.unwrap();
        assert_eq!(foo.symbol, "FOO");
        assert_eq!(foo.name, "foo Token");
        assert_eq!(foo.address.as_deref(), Some("0xfoo"));
        assert_eq!(foo.chain.as_deref(), Some("base"));
        assert_eq!(foo.image, "https://img.example/foo.png");
        assert_eq!(foo.source, ResolutionSource::Search);
    }

    #[tokio::test]
    async fn test_address_without_pairs_is_not_found() {
        let resolver = TokenResolver::new(
            Source::Live(Arc::new(StubDex::default())),
            Duration::from_millis(500),
        );

        match resolver.resolve("0x1111111111111111111111111111111111111111").await {
            Err(Error::NotFound { message, hint }) => {
                assert_eq!(message, "Could not find token for this address.");
                assert_eq!(hint.as_deref(), Some(ADDRESS_HINT));
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_failing_or_slow_search_falls_back_to_catalog() {
        let failing = StubDex {
            fail: true,
            ..Default::default()
        };
        let resolver = TokenResolver::new(Source::Live(Arc::new(failing)), Duration::from_millis(500));
        assert_eq!(resolver.resolve("pepe").await.unwrap().source, ResolutionSource::Catalog);

        let slow = Arc::new(StubDex {
            search: vec![pair("TAO", "0xtao", "base", 1.0)],
            delay: Some(Duration::from_millis(200)),
            ..Default::default()
        });
        let resolver = TokenResolver::new(Source::Live(slow.clone()), Duration::from_millis(20));
        let tao = resolver.resolve("TAO").await.unwrap();
        assert_eq!(tao.source, ResolutionSource::Catalog);
        assert_eq!(tao.name, "Bittensor");
        assert_eq!(slow.calls.load(std::sync::atomic::Ordering::SeqCst), 1);
    }
}
