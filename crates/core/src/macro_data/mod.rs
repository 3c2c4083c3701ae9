//! Macro data module - FRED series observations and the per-series pipeline.

mod macro_data_model;
mod macro_data_service;
mod macro_data_traits;


pub use macro_data_model::{MacroData, MacroObservation};
pub use macro_data_service::MacroDataService;
pub use macro_data_traits::MacroDataServiceTrait;

pub use chumpstreet_market_data::{MacroSeriesProvider, SeriesPoint};
