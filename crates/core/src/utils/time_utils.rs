use chrono::NaiveDate;

use crate::constants::DATE_FORMAT;
use crate::errors::{Error, Result};

/// Parses a `YYYY-MM-DD` date argument.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| Error::invalid_date(value))
}
