use crate::analysis::ScoringWeights;
use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CONFIG_PATH: &str = "config/config.toml";

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub api: ApiConfig,
    pub sources: SourcesConfig,
    pub timeouts: TimeoutConfig,
    pub scoring: ScoringWeights,
    pub logging: LoggingConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    pub coingecko_api_key: Option<String>,
    pub coinmarketcap_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub coingecko_base_url: Option<String>,
    pub coinmarketcap_base_url: Option<String>,
    pub dexscreener_base_url: Option<String>,
    pub gemini_base_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct SourcesConfig {
    /// Never touch the network; every collaborator uses fallback data.
    pub offline: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TimeoutConfig {
    pub upstream_ms: u64,
    pub resolver_ms: u64,
    pub narrative_ms: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            upstream_ms: 8_000,
            resolver_ms: 5_000,
            narrative_ms: 10_000,
        }
    }
}

impl TimeoutConfig {
    pub fn upstream(&self) -> Duration {
        Duration::from_millis(self.upstream_ms)
    }

    pub fn resolver(&self) -> Duration {
        Duration::from_millis(self.resolver_ms)
    }

    pub fn narrative(&self) -> Duration {
        Duration::from_millis(self.narrative_ms)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// When set, logs are appended here instead of going to stderr.
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Loads `path`, or returns defaults when the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            info!("No config file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let config_str = toml::to_string_pretty(self)?;
        fs::write(path, config_str)?;
        Ok(())
    }

    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Environment-style overrides; empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(key) = get("COINGECKO_API_KEY") {
            self.api.coingecko_api_key = Some(key);
        }
        if let Some(key) = get("CMC_API_KEY") {
            self.api.coinmarketcap_api_key = Some(key);
        }
        if let Some(key) = get("GEMINI_API_KEY") {
            self.api.gemini_api_key = Some(key);
        }
        if let Some(host) = get("ORACLE_HOST") {
            self.server.host = host;
        }
        if let Some(port) = get("ORACLE_PORT") {
            self.server.port = port
                .parse()
                .with_context(|| format!("ORACLE_PORT is not a valid port: {}", port))?;
        }
        Ok(())
    }
}
