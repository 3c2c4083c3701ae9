//! FRED API response models.

use serde::Deserialize;

/// Response from the fred/series/observations endpoint
#[derive(Debug, Deserialize)]
pub struct ObservationsResponse {
    #[serde(default)]
    pub observations: Vec<Observation>,
    // Note: realtime_start, units, count, offset, limit exist but are not used
}

/// Individual observation. FRED sends values as strings and uses "." for
/// missing observations.
#[derive(Debug, Deserialize)]
pub struct Observation {
    pub date: String,
    pub value: String,
}

/// Error body returned with non-2xx responses
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error_message: Option<String>,
}
