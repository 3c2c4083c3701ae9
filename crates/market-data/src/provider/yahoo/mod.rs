//! Yahoo Finance price history provider.
//!
//! This provider uses the Yahoo Finance chart API to download daily bars for:
//! - Equities/ETFs (e.g., SPY, SHOP.TO)
//! - Futures (e.g., CL=F)
//! - Cryptocurrencies and FX pairs (e.g., BTC-USD, EURUSD=X)

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use futures::future::join_all;
use time::OffsetDateTime;
use tracing::{debug, warn};
use yahoo_finance_api as yahoo;

use crate::errors::MarketDataError;
use crate::models::{PriceFrame, PriceRow};
use crate::provider::PriceHistoryProvider;

mod models;

use models::{ChartEnvelope, QuoteColumns};

const PROVIDER_ID: &str = "YAHOO";
const SECONDS_PER_DAY: i64 = 86_400;

// ============================================================================
// Yahoo Provider
// ============================================================================

/// Yahoo Finance price history provider.
///
/// One [`download`](PriceHistoryProvider::download) call fans out a chart
/// request per distinct symbol and gathers the results into a single frame.
pub struct YahooProvider {
    connector: yahoo::YahooConnector,
}

impl YahooProvider {
    /// Create a new Yahoo Finance provider.
    pub fn new() -> Result<Self, MarketDataError> {
        let connector =
            yahoo::YahooConnector::new().map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to initialize Yahoo connector: {}", e),
            })?;
        Ok(Self { connector })
    }

    /// Unix timestamp of midnight UTC at the start of `date`.
    fn day_start(date: NaiveDate) -> i64 {
        Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
            .timestamp()
    }

    /// Convert a day boundary to time::OffsetDateTime for the Yahoo API.
    fn to_offset_datetime(timestamp: i64) -> Result<OffsetDateTime, MarketDataError> {
        OffsetDateTime::from_unix_timestamp(timestamp).map_err(|e| {
            MarketDataError::ValidationFailed {
                message: format!("Invalid date boundary {}: {}", timestamp, e),
            }
        })
    }

    /// Fetch one symbol's bars whose exchange-local date is within
    /// `[start, end)` (unix seconds of UTC midnights).
    async fn fetch_history(
        &self,
        symbol: &str,
        start: i64,
        end: i64,
    ) -> Result<Vec<PriceRow>, MarketDataError> {
        debug!("Fetching history for {} from Yahoo", symbol);

        // Padded by a day each side; trimmed to exchange-local dates below.
        let response = self
            .connector
            .get_quote_history(
                symbol,
                Self::to_offset_datetime(start - SECONDS_PER_DAY)?,
                Self::to_offset_datetime(end + SECONDS_PER_DAY)?,
            )
            .await
            .map_err(|e| map_yahoo_error(symbol, e))?;

        let chart = read_chart(symbol, &response)?;
        Ok(within_range(chart.rows, chart.gmtoffset, start, end))
    }
}

// ============================================================================
// PriceHistoryProvider Implementation
// ============================================================================

#[async_trait]
impl PriceHistoryProvider for YahooProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn download(
        &self,
        symbols: &[String],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceFrame, MarketDataError> {
        let start_ts = Self::day_start(start);
        let end_ts = Self::day_start(end);
        let distinct = distinct_symbols(symbols);

        debug!(
            "Downloading {} symbols from {} to {} from Yahoo",
            distinct.len(),
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d")
        );

        let fetches = distinct.iter().map(|symbol| async move {
            let result = self.fetch_history(symbol, start_ts, end_ts).await;
            (symbol.to_string(), result)
        });

        let frame = assemble_frame(join_all(fetches).await)?;
        debug!(
            "Yahoo returned rows for {} of {} symbols",
            frame.symbol_count(),
            distinct.len()
        );
        Ok(frame)
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Unknown tickers come back as a chart error with code "Not Found", or as a
/// 404 from the fetch itself.
fn map_yahoo_error(symbol: &str, error: yahoo::YahooError) -> MarketDataError {
    let not_found = match &error {
        yahoo::YahooError::NoQuotes | yahoo::YahooError::NoResult => true,
        yahoo::YahooError::ApiError(message) => message
            .code
            .as_deref()
            .is_some_and(|code| code.eq_ignore_ascii_case("Not Found")),
        yahoo::YahooError::FetchFailed(message) => {
            message.to_ascii_lowercase().contains("not found")
        }
        _ => false,
    };

    if not_found {
        return MarketDataError::SymbolNotFound(symbol.to_string());
    }

    match error {
        yahoo::YahooError::TooManyRequests(_) => MarketDataError::RateLimited {
            provider: PROVIDER_ID.to_string(),
        },
        other => MarketDataError::ProviderError {
            provider: PROVIDER_ID.to_string(),
            message: other.to_string(),
        },
    }
}

/// Rows of one chart response together with the exchange's UTC offset.
struct ChartRows {
    gmtoffset: i64,
    rows: Vec<PriceRow>,
}

/// Read the raw indicator columns of a chart response.
///
/// Null entries become NaN and bars without a close are kept.
fn read_chart(symbol: &str, response: &yahoo::YResponse) -> Result<ChartRows, MarketDataError> {
    let envelope: ChartEnvelope = serde_json::to_value(response)
        .and_then(serde_json::from_value)
        .map_err(|e| MarketDataError::ValidationFailed {
            message: format!("Unexpected Yahoo chart payload for {}: {}", symbol, e),
        })?;

    let Some(result) = envelope.chart.result.and_then(|r| r.into_iter().next()) else {
        return Err(MarketDataError::SymbolNotFound(symbol.to_string()));
    };

    let timestamps = result.timestamp.unwrap_or_default();
    if timestamps.is_empty() {
        warn!("No historical quotes returned for '{}'", symbol);
        return Err(MarketDataError::NoDataForRange);
    }

    let columns = result
        .indicators
        .quote
        .and_then(|quotes| quotes.into_iter().next())
        .unwrap_or_default();

    let rows = timestamps
        .iter()
        .enumerate()
        .map(|(i, &timestamp)| PriceRow {
            timestamp,
            open: QuoteColumns::value(&columns.open, i),
            high: QuoteColumns::value(&columns.high, i),
            low: QuoteColumns::value(&columns.low, i),
            close: QuoteColumns::value(&columns.close, i),
            volume: QuoteColumns::value(&columns.volume, i),
        })
        .collect();

    Ok(ChartRows {
        gmtoffset: result.meta.map_or(0, |meta| i64::from(meta.gmtoffset)),
        rows,
    })
}

/// Keep rows whose exchange-local timestamp falls within `[start, end)`.
fn within_range(rows: Vec<PriceRow>, gmtoffset: i64, start: i64, end: i64) -> Vec<PriceRow> {
    rows.into_iter()
        .filter(|row| {
            let local = row.timestamp + gmtoffset;
            local >= start && local < end
        })
        .collect()
}

/// Requested symbols with duplicates removed, first occurrence wins.
fn distinct_symbols(symbols: &[String]) -> Vec<&str> {
    let mut seen = HashSet::new();
    symbols
        .iter()
        .map(String::as_str)
        .filter(|symbol| seen.insert(*symbol))
        .collect()
}

/// Fold per-symbol results into one frame.
///
/// Unknown symbols are simply left out. Other failures are logged and also
/// left out, unless every symbol failed that way, in which case the batch
/// itself is considered failed.
fn assemble_frame(
    results: Vec<(String, Result<Vec<PriceRow>, MarketDataError>)>,
) -> Result<PriceFrame, MarketDataError> {
    let requested = results.len();
    let mut frame = PriceFrame::new();
    let mut failures = 0;
    let mut first_failure = None;

    for (symbol, result) in results {
        match result {
            Ok(rows) => frame.insert(symbol, rows),
            Err(e) if e.is_not_found() => {
                debug!("Yahoo has no data for {}: {}", symbol, e);
            }
            Err(e) => {
                warn!("Yahoo download failed for {}: {}", symbol, e);
                failures += 1;
                first_failure.get_or_insert(e);
            }
        }
    }

    match first_failure {
        Some(e) if failures == requested => Err(e),
        _ => Ok(frame),
    }
}

// ============================================================================
// Tests
// ============================================================================
