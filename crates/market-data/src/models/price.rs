use std::collections::HashMap;

/// One daily OHLCV bar as reported by a price provider.
///
/// Unavailable numeric values are `f64::NAN`. Callers convert them to explicit
/// optionals when building their own records.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PriceRow {
    /// Bar timestamp, unix seconds
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl PriceRow {
    /// A row with every numeric column unavailable.
    pub fn empty(timestamp: i64) -> Self {
        Self {
            timestamp,
            open: f64::NAN,
            high: f64::NAN,
            low: f64::NAN,
            close: f64::NAN,
            volume: f64::NAN,
        }
    }
}

/// Result of one batch price download, keyed by symbol.
///
/// Symbols the provider could not resolve are absent. Rows are kept in the
/// order the provider returned them (chronological).
#[derive(Clone, Debug, Default)]
pub struct PriceFrame {
    rows: HashMap<String, Vec<PriceRow>>,
}

impl PriceFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the rows for a symbol, replacing anything stored before.
    pub fn insert(&mut self, symbol: impl Into<String>, rows: Vec<PriceRow>) {
        self.rows.insert(symbol.into(), rows);
    }

    /// Builder-style variant of [`insert`](Self::insert).
    pub fn with_rows(mut self, symbol: impl Into<String>, rows: Vec<PriceRow>) -> Self {
        self.insert(symbol, rows);
        self
    }

    /// Isolate one symbol's slice of the batch.
    ///
    /// Returns `None` when the symbol is missing from the frame or the provider
    /// returned no rows for it; both mean "no data for this ticker".
    pub fn rows_for(&self, symbol: &str) -> Option<&[PriceRow]> {
        self.rows
            .get(symbol)
            .map(Vec::as_slice)
            .filter(|rows| !rows.is_empty())
    }

    /// True when no symbol has a single row.
    pub fn is_empty(&self) -> bool {
        self.rows.values().all(Vec::is_empty)
    }

    /// Number of symbols with at least one row.
    pub fn symbol_count(&self) -> usize {
        self.rows.values().filter(|rows| !rows.is_empty()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(timestamp: i64, close: f64) -> PriceRow {
        PriceRow {
            timestamp,
            open: close,
            high: close,
            low: close,
            close,
            volume: 100.0,
        }
    }

    #[test]
    fn test_rows_for_known_symbol() {
        let frame = PriceFrame::new().with_rows("SPY", vec![row(1, 320.0), row(2, 321.5)]);

        let rows = frame.rows_for("SPY").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].close, 321.5);
    }

    #[test]
    fn test_rows_for_missing_or_empty_symbol() {
        let frame = PriceFrame::new().with_rows("EMPTY", vec![]);

        assert!(frame.rows_for("ABC").is_none());
        assert!(frame.rows_for("EMPTY").is_none());
        assert!(frame.is_empty());
        assert_eq!(frame.symbol_count(), 0);
    }

    #[test]
    fn test_frame_with_one_populated_symbol_is_not_empty() {
        let frame = PriceFrame::new()
            .with_rows("EMPTY", vec![])
            .with_rows("TLT", vec![row(1, 140.0)]);

        assert!(!frame.is_empty());
        assert_eq!(frame.symbol_count(), 1);
    }

    #[test]
    fn test_empty_row_is_all_nan() {
        let row = PriceRow::empty(42);
        assert_eq!(row.timestamp, 42);
        assert!(row.open.is_nan());
        assert!(row.close.is_nan());
        assert!(row.volume.is_nan());
    }
}
