//! ChumpStreet Market Data Crate
//!
//! This crate wraps the third-party data sources used by ChumpStreet behind
//! two narrow provider traits.
//!
//! # Overview
//!
//! - Daily OHLCV bars for batches of ticker symbols (Yahoo Finance)
//! - Macroeconomic series observations (FRED)
//!
//! # Architecture
//!
//! ```text
//! +------------------+         +----------------------+
//! |  Market pipeline | ------> | PriceHistoryProvider |  (Yahoo)
//! +------------------+         +----------------------+
//!          |                              |
//!          v                              v
//!  PriceFrame::rows_for  <-----------  PriceFrame       (per-symbol rows, NaN sentinel)
//!
//! +------------------+         +----------------------+
//! |  Macro pipeline  | ------> | MacroSeriesProvider  |  (FRED)
//! +------------------+         +----------------------+
//!                                         |
//!                                         v
//!                                   SeriesPoint          (date, value, NaN sentinel)
//! ```
//!
//! # Core Types
//!
//! - [`PriceRow`] - One provider-native daily bar
//! - [`PriceFrame`] - Batch download result keyed by symbol
//! - [`SeriesPoint`] - One provider-native series observation
//! - [`MarketDataError`] - Error type shared by all providers

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::MarketDataError;
pub use models::{PriceFrame, PriceRow, SeriesPoint};

pub use provider::fred::FredProvider;
pub use provider::yahoo::YahooProvider;
pub use provider::{MacroSeriesProvider, PriceHistoryProvider};
