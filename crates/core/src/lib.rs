//! ChumpStreet Core - canonical records, partial-result bookkeeping, and the
//! two data pipelines.
//!
//! Providers are reached only through the traits of `chumpstreet-market-data`
//! and are injected into the services as `Arc<dyn ...>` handles.

pub mod batch;
pub mod constants;
pub mod errors;
pub mod macro_data;
pub mod market_data;
pub mod utils;

pub use batch::{BatchAccumulator, ItemError};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
