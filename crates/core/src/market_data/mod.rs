//! Market data module - OHLCV records, the batch pipeline, and its trait.

mod market_data_constants;
mod market_data_errors;
mod market_data_model;
mod market_data_service;
mod market_data_traits;

#[cfg(test)]
mod service_tests;

// Re-export the public interface
pub use market_data_constants::*;
pub use market_data_errors::RowParseError;
pub use market_data_model::{MarketDataResponse, PriceRecord};
pub use market_data_service::MarketDataService;
pub use market_data_traits::MarketDataServiceTrait;

// Re-export provider types
pub use chumpstreet_market_data::{MarketDataError, PriceFrame, PriceHistoryProvider, PriceRow};
