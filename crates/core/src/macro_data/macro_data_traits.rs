use async_trait::async_trait;

use super::macro_data_model::MacroData;
use crate::errors::Result;

#[async_trait]
pub trait MacroDataServiceTrait: Send + Sync {
    /// Fetch observations for each series over `[start_date, end_date]`.
    ///
    /// Unknown series are reported in `errors`. Bad dates and any other
    /// provider failure are returned as `Err`.
    async fn get_macro_data(
        &self,
        series_ids: &[String],
        start_date: &str,
        end_date: &str,
    ) -> Result<MacroData>;
}
