use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::batch::{BatchAccumulator, ItemError};
use chumpstreet_market_data::SeriesPoint;

/// One observation of a macroeconomic series.
///
/// Observations from every requested series share one flat list and do not
/// carry their series id.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MacroObservation {
    pub observation_date: NaiveDate,
    pub value: Option<f64>,
}

impl MacroObservation {
    pub fn from_point(point: &SeriesPoint) -> Self {
        Self {
            observation_date: point.date,
            value: if point.value.is_nan() {
                None
            } else {
                Some(point.value)
            },
        }
    }
}

/// Response of the `get_macro_data` tool.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MacroData {
    pub series: Vec<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub data: Vec<MacroObservation>,
    #[serde(default)]
    pub errors: Vec<ItemError>,
}

impl MacroData {
    pub fn from_batch(
        series: &[String],
        start_date: NaiveDate,
        end_date: NaiveDate,
        batch: BatchAccumulator<MacroObservation>,
    ) -> Self {
        let (data, errors) = batch.into_parts();
        Self {
            series: series.to_vec(),
            start_date,
            end_date,
            data,
            errors,
        }
    }
}
