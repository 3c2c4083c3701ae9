//! Error types for the market data crate.
//!
//! This module provides [`MarketDataError`], the single error enum returned by
//! every provider in this crate, together with the classification the
//! pipelines rely on to tell recoverable per-item failures apart from faults
//! that must surface to the caller.

use thiserror::Error;

/// Errors that can occur during market data operations.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The requested symbol was not found by the provider.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// No data available for the requested date range.
    /// The symbol exists but has no quotes in the specified period.
    #[error("No data for date range")]
    NoDataForRange,

    /// The provider rejected the request arguments (unknown series, malformed
    /// date, ...). The message is the provider's own explanation and is
    /// rendered verbatim.
    #[error("{message}")]
    InvalidInput {
        /// The provider that rejected the input
        provider: String,
        /// The provider's explanation
        message: String,
    },

    /// The provider needs an API key and none was configured.
    #[error("Missing API key for provider {provider}")]
    MissingApiKey {
        /// The provider that requires a key
        provider: String,
    },

    /// The provider rate limited the request (HTTP 429).
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// A provider-specific error occurred.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The provider returned a payload we could not make sense of.
    #[error("Validation failed: {message}")]
    ValidationFailed {
        /// Description of the validation failure
        message: String,
    },

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MarketDataError {
    /// Returns true when the provider refused the request because of its
    /// arguments.
    ///
    /// Pipelines record these against the offending identifier and keep going;
    /// every other variant is a fault of the provider or the process.
    ///
    /// # Examples
    ///
    /// ```
    /// use chumpstreet_market_data::errors::MarketDataError;
    ///
    /// let error = MarketDataError::InvalidInput {
    ///     provider: "FRED".to_string(),
    ///     message: "Bad Request.  The series does not exist.".to_string(),
    /// };
    /// assert!(error.is_invalid_input());
    ///
    /// let error = MarketDataError::Timeout { provider: "FRED".to_string() };
    /// assert!(!error.is_invalid_input());
    /// ```
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }

    /// Returns true when the provider simply has nothing for the identifier.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::SymbolNotFound(_) | Self::NoDataForRange)
    }
}
