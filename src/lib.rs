pub mod analysis;
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod narrative;
pub mod oracle;
pub mod resolver;
pub mod utils;
pub mod validation;
pub mod web;

pub use error::{Error, Result};
pub use oracle::{Oracle, OracleReport, Sources};

// Declare tests module only when testing
#[cfg(test)]
pub mod tests;
