use async_trait::async_trait;
use log::{debug, error, warn};
use std::sync::Arc;

use super::market_data_constants::*;
use super::market_data_model::{MarketDataResponse, PriceRecord};
use super::market_data_traits::MarketDataServiceTrait;
use crate::batch::BatchAccumulator;
use crate::errors::Result;
use crate::utils::time_utils::parse_date;
use chumpstreet_market_data::{PriceFrame, PriceHistoryProvider};

/// Market data pipeline: validate, download one batch, split it per symbol,
/// normalize each row, and collect per-item errors along the way.
pub struct MarketDataService {
    provider: Arc<dyn PriceHistoryProvider>,
}

impl MarketDataService {
    pub fn new(provider: Arc<dyn PriceHistoryProvider>) -> Self {
        Self { provider }
    }

    async fn download(
        &self,
        symbols: &[String],
        start_date: &str,
        end_date: &str,
    ) -> Result<PriceFrame> {
        let start = parse_date(start_date)?;
        let end = parse_date(end_date)?;
        Ok(self.provider.download(symbols, start, end).await?)
    }
}

#[async_trait]
impl MarketDataServiceTrait for MarketDataService {
    async fn get_market_data(
        &self,
        symbols: &[String],
        start_date: &str,
        end_date: &str,
    ) -> MarketDataResponse {
        if symbols.is_empty() {
            warn!("get_market_data called without tickers");
            return MarketDataResponse::error(start_date, end_date, TICKERS_REQUIRED_MESSAGE);
        }

        debug!(
            "Fetching market data for {} tickers from {} ({} to {})",
            symbols.len(),
            self.provider.id(),
            start_date,
            end_date
        );

        let frame = match self.download(symbols, start_date, end_date).await {
            Ok(frame) => frame,
            Err(e) => {
                error!("{} download failed: {}", self.provider.id(), e);
                return MarketDataResponse::error(
                    start_date,
                    end_date,
                    format!("{}: {}", DOWNLOAD_FAILED_PREFIX, e),
                );
            }
        };

        if frame.is_empty() {
            return MarketDataResponse::error(
                start_date,
                end_date,
                format!("{}: {}", NO_DATA_RETURNED_PREFIX, render_symbol_list(symbols)),
            );
        }

        let mut batch = BatchAccumulator::new();
        for symbol in symbols {
            collect_symbol(&frame, symbol, &mut batch);
        }
        debug!(
            "Collected {} records and {} ticker errors",
            batch.records().len(),
            batch.errors().len()
        );

        let response = MarketDataResponse::from_batch(start_date, end_date, batch);
        if response.is_total_failure() {
            warn!("No usable rows for {}", render_symbol_list(symbols));
        }
        response
    }
}

/// Normalize one symbol's slice of the frame into `batch`.
///
/// A missing slice and each unparseable row are recorded against the symbol;
/// rows that do parse are kept.
fn collect_symbol(frame: &PriceFrame, symbol: &str, batch: &mut BatchAccumulator<PriceRecord>) {
    let Some(rows) = frame.rows_for(symbol) else {
        warn!("No data found for ticker {}", symbol);
        batch.push_error(symbol, NO_DATA_FOR_TICKER_MESSAGE);
        return;
    };

    for row in rows {
        match PriceRecord::from_row(row, symbol) {
            Ok(record) => batch.push_record(record),
            Err(e) => {
                error!("Failed to parse row for ticker {}: {}", symbol, e);
                batch.push_error(symbol, format!("{}: {}", ROW_PARSE_FAILED_PREFIX, e));
            }
        }
    }
}

/// Render symbols the way they were listed in the request, e.g. `['SPY', 'TLT']`.
pub(crate) fn render_symbol_list(symbols: &[String]) -> String {
    let items: Vec<String> = symbols.iter().map(|s| quote_symbol(s)).collect();
    format!("[{}]", items.join(", "))
}

fn quote_symbol(symbol: &str) -> String {
    let escaped = symbol.replace('\\', "\\\\");
    if symbol.contains('\'') && !symbol.contains('"') {
        format!("\"{}\"", escaped)
    } else {
        format!("'{}'", escaped.replace('\'', "\\'"))
    }
}
