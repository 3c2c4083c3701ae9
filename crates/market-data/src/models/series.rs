use chrono::NaiveDate;

/// One observation of a macroeconomic series.
///
/// `value` is `f64::NAN` when the provider marks the observation as missing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
}

impl SeriesPoint {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}
