//! Market data domain models.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::market_data_errors::RowParseError;
use crate::batch::{BatchAccumulator, ItemError};
use chumpstreet_market_data::PriceRow;

/// One daily OHLCV bar for one symbol.
///
/// Fields the provider reported as unavailable are `None`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub trade_date: DateTime<Utc>,
    pub symbol: String,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<u64>,
}

impl PriceRecord {
    /// Normalize one provider row belonging to `symbol`.
    pub fn from_row(row: &PriceRow, symbol: &str) -> Result<Self, RowParseError> {
        let trade_date = Utc
            .timestamp_opt(row.timestamp, 0)
            .single()
            .ok_or(RowParseError::InvalidTimestamp(row.timestamp))?;

        Ok(Self {
            trade_date,
            symbol: symbol.to_string(),
            open: price("open", row.open)?,
            high: price("high", row.high)?,
            low: price("low", row.low)?,
            close: price("close", row.close)?,
            volume: volume(row.volume)?,
        })
    }
}

fn price(field: &'static str, value: f64) -> Result<Option<f64>, RowParseError> {
    if value.is_nan() {
        Ok(None)
    } else if value.is_infinite() {
        Err(RowParseError::NonFinite { field, value })
    } else {
        Ok(Some(value))
    }
}

fn volume(value: f64) -> Result<Option<u64>, RowParseError> {
    if value.is_nan() {
        return Ok(None);
    }
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value > u64::MAX as f64 {
        return Err(RowParseError::InvalidVolume(value));
    }
    Ok(Some(value as u64))
}

/// Response of the `get_market_data` tool.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarketDataResponse {
    pub start_date: String,
    pub end_date: String,
    pub data: Vec<PriceRecord>,
    #[serde(default)]
    pub errors: Vec<ItemError>,
}

impl MarketDataResponse {
    /// A response without data and exactly one context-less error.
    pub fn error(
        start_date: impl Into<String>,
        end_date: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            start_date: start_date.into(),
            end_date: end_date.into(),
            data: Vec::new(),
            errors: vec![ItemError::request(message)],
        }
    }

    /// Assemble the response from a finished batch.
    pub fn from_batch(
        start_date: impl Into<String>,
        end_date: impl Into<String>,
        batch: BatchAccumulator<PriceRecord>,
    ) -> Self {
        let (data, errors) = batch.into_parts();
        Self {
            start_date: start_date.into(),
            end_date: end_date.into(),
            data,
            errors,
        }
    }

    /// True when the request failed as a whole.
    pub fn is_total_failure(&self) -> bool {
        self.data.is_empty() && !self.errors.is_empty()
    }
}
