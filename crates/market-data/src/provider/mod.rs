//! Data provider abstractions and implementations.
//!
//! This module contains:
//! - The `PriceHistoryProvider` and `MacroSeriesProvider` traits
//! - Concrete implementations for Yahoo Finance and FRED
//!
//! Providers forward identifiers untouched and report whatever the upstream
//! service returns. They do not cache, retry or rate-limit.

mod traits;

pub mod fred;
pub mod yahoo;

pub use traits::{MacroSeriesProvider, PriceHistoryProvider};
