use std::io;
use std::result::Result as StdResult;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("API error: {0}")]
    ApiError(String),
    #[error("API invalid data: {0}")]
    ApiInvalidData(String),
    #[error("API invalid format: {0}")]
    ApiInvalidFormat(String),
    #[error("API authentication failed: {0}")]
    ApiAuthFailed(String),
    #[error("API quota exceeded: {0}")]
    ApiQuotaExceeded(String),
    #[error("API maintenance: {0}")]
    ApiMaintenance(String),
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),
    #[error("Upstream timeout: {0}")]
    Timeout(String),
    #[error("Source unavailable: {0}")]
    SourceUnavailable(String),
    #[error("{message}")]
    NotFound { message: String, hint: Option<String> },
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Internal error: {0}")]
    InternalError(String),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
}

impl Error {
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Error::NotFound {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    /// Upstream failures are recovered from with fallback data; everything
    /// else crosses the request boundary.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Error::ApiError(_)
                | Error::ApiInvalidData(_)
                | Error::ApiInvalidFormat(_)
                | Error::ApiAuthFailed(_)
                | Error::ApiQuotaExceeded(_)
                | Error::ApiMaintenance(_)
                | Error::RateLimitExceeded(_)
                | Error::Timeout(_)
                | Error::SourceUnavailable(_)
                | Error::HttpError(_)
        )
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ApiInvalidFormat(err.to_string())
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::InternalError(err.to_string())
    }
}

impl From<prometheus::Error> for Error {
    fn from(err: prometheus::Error) -> Self {
        Error::InternalError(err.to_string())
    }
}

impl From<tokio::time::error::Elapsed> for Error {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        Error::Timeout(err.to_string())
    }
}

pub type Result<T> = StdResult<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_classification() {
        assert!(Error::RateLimitExceeded("cmc".to_string()).is_upstream());
        assert!(Error::Timeout("dex".to_string()).is_upstream());
        assert!(!Error::InvalidInput("".to_string()).is_upstream());
        assert!(!Error::not_found("gone", "hint").is_upstream());
        assert!(!Error::InternalError("bug".to_string()).is_upstream());
    }

    #[test]
    fn test_not_found_display() {
        let err = Error::not_found("Could not find data for XYZ.", "Try BTC");
        assert_eq!(err.to_string(), "Could not find data for XYZ.");
        match err {
            Error::NotFound { hint, .. } => assert_eq!(hint.as_deref(), Some("Try BTC")),
            _ => unreachable!(),
        }
    }
}
