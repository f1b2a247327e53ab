use crate::config::LoggingConfig;
use anyhow::{Context, Result};
use chrono::Local;
use log::{LevelFilter, Metadata, Record};
use std::fs::OpenOptions;
use std::io::Write;
use std::str::FromStr;
use std::sync::Mutex;

/// Appends formatted records to a file.
pub struct Logger {
    file: Mutex<std::fs::File>,
    level: LevelFilter,
}

impl Logger {
    pub fn new(log_file: &str, level: LevelFilter) -> std::io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file)?;

        Ok(Self {
            file: Mutex::new(file),
            level,
        })
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Ok(mut file) = self.file.lock() {
            let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
            // A failed write has nowhere else to be reported
            let _ = writeln!(
                file,
                "{} [{}] {}: {}",
                timestamp,
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

/// `debug` forces debug output; otherwise the configured level applies.
pub fn level_filter(config: &LoggingConfig, debug: bool) -> Result<LevelFilter> {
    if debug {
        return Ok(LevelFilter::Debug);
    }
    LevelFilter::from_str(&config.level)
        .with_context(|| format!("Invalid log level: {}", config.level))
}

/// Installs the file logger when a log file is configured, `env_logger` on
/// stderr otherwise. `RUST_LOG` still refines the stderr logger.
pub fn init(config: &LoggingConfig, debug: bool) -> Result<()> {
    let level = level_filter(config, debug)?;

    match &config.file {
        Some(path) => {
            let logger = Logger::new(path, level)
                .with_context(|| format!("Failed to open log file {}", path))?;
            log::set_boxed_logger(Box::new(logger)).context("Logger already initialized")?;
            log::set_max_level(level);
        }
        None => {
            env_logger::Builder::new()
                .filter_level(level)
                .parse_default_env()
                .try_init()
                .context("Logger already initialized")?;
        }
    }
    Ok(())
}
