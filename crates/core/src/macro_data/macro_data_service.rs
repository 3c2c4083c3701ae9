use async_trait::async_trait;
use log::{debug, warn};
use std::sync::Arc;

use super::macro_data_model::{MacroData, MacroObservation};
use super::macro_data_traits::MacroDataServiceTrait;
use crate::batch::BatchAccumulator;
use crate::errors::Result;
use crate::utils::time_utils::parse_date;
use chumpstreet_market_data::MacroSeriesProvider;

pub struct MacroDataService {
    provider: Arc<dyn MacroSeriesProvider>,
}

impl MacroDataService {
    pub fn new(provider: Arc<dyn MacroSeriesProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl MacroDataServiceTrait for MacroDataService {
    async fn get_macro_data(
        &self,
        series_ids: &[String],
        start_date: &str,
        end_date: &str,
    ) -> Result<MacroData> {
        let start = parse_date(start_date)?;
        let end = parse_date(end_date)?;

        debug!(
            "Fetching {} macro series from {} ({} to {})",
            series_ids.len(),
            self.provider.id(),
            start,
            end
        );

        let mut batch = BatchAccumulator::new();
        for series_id in series_ids {
            match self.provider.get_series(series_id, start, end).await {
                Ok(points) => {
                    batch.extend_records(points.iter().map(MacroObservation::from_point));
                }
                Err(e) if e.is_invalid_input() => {
                    warn!("Series {} rejected by {}: {}", series_id, self.provider.id(), e);
                    batch.push_error(series_id.as_str(), e.to_string());
                }
                Err(e) => return Err(e.into()),
            }
        }
        debug!(
            "Collected {} observations and {} series errors",
            batch.records().len(),
            batch.errors().len()
        );

        Ok(MacroData::from_batch(series_ids, start, end, batch))
    }
}
