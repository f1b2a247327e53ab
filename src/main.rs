use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::path::PathBuf;
use std::sync::Arc;

use market_oracle::cli::{Cli, Command};
use market_oracle::config::{Config, DEFAULT_CONFIG_PATH};
use market_oracle::oracle::Oracle;
use market_oracle::web::WebServer;
use market_oracle::{logging, metrics};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    // Load configuration
    let config_path = cli.config.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(&config_path)?,
    };
    config.apply_env()?;
    if cli.offline {
        config.sources.offline = true;
    }

    logging::init(&config.logging, cli.debug)?;
    metrics::init().context("Failed to register metrics")?;
    info!("Configuration loaded from {}", config_path.display());

    let oracle = Arc::new(Oracle::from_config(&config).context("Failed to initialize data sources")?);

    match cli.command() {
        Command::Serve { port } => {
            let port = port.unwrap_or(config.server.port);
            WebServer::new(oracle).start(&config.server.host, port).await?;
        }
        Command::Predict { ticker } => {
            let report = oracle.predict(&ticker).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Sectors => {
            let overview = oracle.sector_overview().await;
            println!("{}", serde_json::to_string_pretty(&overview)?);
        }
    }

    Ok(())
}
