//! Raw chart payload as Yahoo sends it.
//!
//! `YResponse::quotes()` zero-fills missing prices and drops bars without a
//! close, so rows are read from these columns instead.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ChartEnvelope {
    pub chart: Chart,
}

#[derive(Debug, Deserialize)]
pub struct Chart {
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
}

#[derive(Debug, Deserialize)]
pub struct ChartResult {
    #[serde(default)]
    pub meta: Option<ChartMeta>,
    #[serde(default)]
    pub timestamp: Option<Vec<i64>>,
    pub indicators: Indicators,
}

/// Exchange metadata; only the UTC offset of the exchange is used.
#[derive(Debug, Deserialize)]
pub struct ChartMeta {
    #[serde(default)]
    pub gmtoffset: i32,
}

#[derive(Debug, Deserialize)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Option<Vec<QuoteColumns>>,
}

/// One value per timestamp; `null` entries are bars the provider left blank.
#[derive(Debug, Default, Deserialize)]
pub struct QuoteColumns {
    #[serde(default)]
    pub open: Option<Vec<Option<f64>>>,
    #[serde(default)]
    pub high: Option<Vec<Option<f64>>>,
    #[serde(default)]
    pub low: Option<Vec<Option<f64>>>,
    #[serde(default)]
    pub close: Option<Vec<Option<f64>>>,
    #[serde(default)]
    pub volume: Option<Vec<Option<f64>>>,
}

impl QuoteColumns {
    /// Value of `column` at `index`, NaN when absent or null.
    pub fn value(column: &Option<Vec<Option<f64>>>, index: usize) -> f64 {
        column
            .as_ref()
            .and_then(|values| values.get(index).copied().flatten())
            .unwrap_or(f64::NAN)
    }
}
