use thiserror::Error;

/// Why a provider row could not be turned into a [`PriceRecord`](super::PriceRecord).
///
/// Not-a-number values are never an error; they become `None`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RowParseError {
    #[error("invalid trade timestamp {0}")]
    InvalidTimestamp(i64),

    #[error("{field} is not finite: {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("volume must be a non-negative whole number, got {0}")]
    InvalidVolume(f64),
}
