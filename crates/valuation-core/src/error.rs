//! Error types for market-data retrieval and input validation.
//!
//! This module defines [`ValuationError`]. The valuation formulas themselves
//! never fail; every variant here belongs to the data-client boundary or to
//! validation of caller-supplied assumptions.

use thiserror::Error;

/// Errors that can occur while retrieving data or validating inputs.
#[derive(Error, Debug)]
pub enum ValuationError {
    /// Network-related errors (connection failures, timeouts, HTTP errors).
    #[error("Network error: {0}")]
    Network(String),

    /// Rate limit exceeded by a provider.
    #[error("Rate limited by {provider}: retry after {retry_after:?}")]
    RateLimited {
        /// The provider that rate limited the request.
        provider: String,
        /// Suggested time to wait before retrying.
        retry_after: Option<std::time::Duration>,
    },

    /// The requested symbol was not found.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// Error parsing data from a provider.
    #[error("Parse error: {0}")]
    Parse(String),

    /// No data client is configured.
    #[error("Provider not configured: {0}")]
    ProviderNotConfigured(String),

    /// An assumption or parameter is outside its allowed range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Any other error.
    #[error("{0}")]
    Other(String),
}

/// Result type alias using [`ValuationError`].
pub type Result<T> = std::result::Result<T, ValuationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ValuationError::SymbolNotFound("ZZZZ".to_string());
        assert_eq!(err.to_string(), "Symbol not found: ZZZZ");

        let err = ValuationError::RateLimited {
            provider: "FMP".to_string(),
            retry_after: None,
        };
        assert!(err.to_string().starts_with("Rate limited by FMP"));
    }
}
