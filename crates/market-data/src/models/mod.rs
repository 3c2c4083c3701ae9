//! Provider-native data models
//!
//! These types carry data exactly as the providers report it, including the
//! not-a-number sentinel for unavailable values:
//! - `price` - Daily OHLCV rows and the per-symbol batch result (PriceRow, PriceFrame)
//! - `series` - Macroeconomic series observations (SeriesPoint)

mod price;
mod series;

pub use price::{PriceFrame, PriceRow};
pub use series::SeriesPoint;
