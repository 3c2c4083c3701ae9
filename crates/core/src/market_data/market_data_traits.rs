use async_trait::async_trait;

use super::market_data_model::MarketDataResponse;

#[async_trait]
pub trait MarketDataServiceTrait: Send + Sync {
    /// Fetch daily bars for `symbols` over `[start_date, end_date)`.
    ///
    /// Never fails: validation, provider and per-item failures all end up in
    /// the response's `errors`.
    async fn get_market_data(
        &self,
        symbols: &[String],
        start_date: &str,
        end_date: &str,
    ) -> MarketDataResponse;
}
