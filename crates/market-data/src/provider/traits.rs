//! Provider trait definitions.
//!
//! This module defines the two provider seams the pipelines depend on:
//! [`PriceHistoryProvider`] for daily OHLCV bars and [`MacroSeriesProvider`]
//! for macroeconomic series.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::MarketDataError;
use crate::models::{PriceFrame, SeriesPoint};

/// Trait for historical price providers.
///
/// Implementations must be safe to share between concurrent requests: each
/// call is a self-contained request/response without session state.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use chumpstreet_market_data::provider::PriceHistoryProvider;
///
/// struct FixtureProvider {
///     frame: PriceFrame,
/// }
///
/// #[async_trait]
/// impl PriceHistoryProvider for FixtureProvider {
///     fn id(&self) -> &'static str {
///         "FIXTURE"
///     }
///
///     async fn download(
///         &self,
///         _symbols: &[String],
///         _start: NaiveDate,
///         _end: NaiveDate,
///     ) -> Result<PriceFrame, MarketDataError> {
///         Ok(self.frame.clone())
///     }
/// }
/// ```
#[async_trait]
pub trait PriceHistoryProvider: Send + Sync {
    /// Unique identifier for this provider, e.g. "YAHOO".
    fn id(&self) -> &'static str;

    /// Download daily bars for every symbol in one batch.
    ///
    /// # Arguments
    ///
    /// * `symbols` - Raw ticker symbols, forwarded as given
    /// * `start` - Start of the date range (inclusive)
    /// * `end` - End of the date range (exclusive)
    ///
    /// # Returns
    ///
    /// A frame keyed by symbol. Symbols the provider does not know are missing
    /// from the frame rather than failing the batch. An `Err` means the batch
    /// as a whole could not be fetched.
    async fn download(
        &self,
        symbols: &[String],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceFrame, MarketDataError>;
}

/// Trait for macroeconomic series providers.
#[async_trait]
pub trait MacroSeriesProvider: Send + Sync {
    /// Unique identifier for this provider, e.g. "FRED".
    fn id(&self) -> &'static str;

    /// Fetch one series' observations.
    ///
    /// # Arguments
    ///
    /// * `series_id` - The series code, e.g. "GDP"
    /// * `start` - First observation date (inclusive)
    /// * `end` - Last observation date (inclusive)
    ///
    /// # Returns
    ///
    /// Observations in chronological order. Unknown series and other rejected
    /// arguments yield [`MarketDataError::InvalidInput`].
    async fn get_series(
        &self,
        series_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<SeriesPoint>, MarketDataError>;
}
