//! Core error types for ChumpStreet.
//!
//! Only failures that are not converted into structured per-item errors end
//! up here; the transport reports them as faults of the whole tool call.

use thiserror::Error;

use crate::market_data::MarketDataError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the pipelines.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error(transparent)]
    MarketData(#[from] MarketDataError),
}

impl Error {
    pub fn invalid_date(value: impl Into<String>) -> Self {
        Self::InvalidDate {
            value: value.into(),
        }
    }
}
