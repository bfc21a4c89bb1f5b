//! Error types for data operations.

use std::time::Duration;
use thiserror::Error;

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Failures while retrieving a resource from EDGAR.
///
/// Any of these aborts the request that raised it. Nothing is retried.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure (DNS, connect, TLS, ...)
    #[error("Network error fetching {url}: {source}")]
    Network {
        /// URL that was requested
        url: String,
        /// Underlying client error
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a non-success status
    #[error("HTTP {status} fetching {url}")]
    Status {
        /// URL that was requested
        url: String,
        /// Status code returned by the server
        status: reqwest::StatusCode,
    },

    /// Response body could not be read to completion
    #[error("Failed to read response body from {url}: {source}")]
    Body {
        /// URL that was requested
        url: String,
        /// Underlying client error
        #[source]
        source: reqwest::Error,
    },

    /// Request did not complete in time
    #[error("Timed out after {after:?} fetching {url}")]
    Timeout {
        /// URL that was requested
        url: String,
        /// Time budget that expired
        after: Duration,
    },
}

impl FetchError {
    /// URL of the request that failed.
    pub fn url(&self) -> &str {
        match self {
            Self::Network { url, .. }
            | Self::Status { url, .. }
            | Self::Body { url, .. }
            | Self::Timeout { url, .. } => url,
        }
    }
}

/// Errors that can occur during data operations.
#[derive(Debug, Error)]
pub enum DataError {
    /// Document or index retrieval failed
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Document could not be interpreted as HTML
    #[error("Document parsing error: {0}")]
    Parse(String),

    /// HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Client(#[source] reqwest::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Invalid symbol or identifier
    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    /// CIK not found for ticker
    #[error("CIK not found for ticker: {0}")]
    CikNotFound(String),
}

impl DataError {
    /// Whether this error came from the fetch step.
    pub const fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch(_))
    }

    /// Whether this error came from interpreting a document.
    pub const fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_url() {
        let err = FetchError::Timeout {
            url: "https://www.sec.gov/x".to_string(),
            after: Duration::from_secs(5),
        };
        assert_eq!(err.url(), "https://www.sec.gov/x");
        assert!(err.to_string().contains("Timed out after 5s"));
    }

    #[test]
    fn test_fetch_converts_into_data_error() {
        let err: DataError = FetchError::Status {
            url: "https://www.sec.gov/y".to_string(),
            status: reqwest::StatusCode::FORBIDDEN,
        }
        .into();
        assert!(err.is_fetch());
        assert!(!err.is_parse());
        assert_eq!(err.to_string(), "HTTP 403 Forbidden fetching https://www.sec.gov/y");
    }
}
