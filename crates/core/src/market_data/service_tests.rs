//! Tests for the MarketDataService pipeline.
//!
//! # Contract Points
//!
//! 1. Validation: an empty ticker list never reaches the provider
//! 2. Batch failures: provider errors and empty frames become one context-less error
//! 3. Per-symbol isolation: a missing ticker is reported without affecting the others
//! 4. Per-row isolation: an unparseable row is reported, sibling rows are kept
//! 5. Ordering: records follow request order, then provider row order

#[cfg(test)]
mod tests {
    use crate::batch::ItemError;
    use crate::market_data::market_data_service::render_symbol_list;
    use crate::market_data::{
        MarketDataError, MarketDataResponse, MarketDataService, MarketDataServiceTrait,
        PriceFrame, PriceHistoryProvider, PriceRow,
    };
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::{Arc, Mutex};

    // =========================================================================
    // Mock PriceHistoryProvider
    // =========================================================================

    #[derive(Default)]
    struct MockPriceProvider {
        frame: PriceFrame,
        failure: Option<String>,
        calls: Mutex<Vec<(Vec<String>, NaiveDate, NaiveDate)>>,
    }

    impl MockPriceProvider {
        fn with_frame(frame: PriceFrame) -> Self {
            Self {
                frame,
                ..Default::default()
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                failure: Some(message.to_string()),
                ..Default::default()
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl PriceHistoryProvider for MockPriceProvider {
        fn id(&self) -> &'static str {
            "MOCK"
        }

        async fn download(
            &self,
            symbols: &[String],
            start: NaiveDate,
            end: NaiveDate,
        ) -> Result<PriceFrame, MarketDataError> {
            self.calls
                .lock()
                .unwrap()
                .push((symbols.to_vec(), start, end));

            match &self.failure {
                Some(message) => Err(MarketDataError::ProviderError {
                    provider: "MOCK".to_string(),
                    message: message.clone(),
                }),
                None => Ok(self.frame.clone()),
            }
        }
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    // 2020-01-02 and 2020-01-03, 14:30 UTC
    const JAN_2: i64 = 1_577_975_400;
    const JAN_3: i64 = 1_578_061_800;

    fn bar(timestamp: i64, close: f64) -> PriceRow {
        PriceRow {
            timestamp,
            open: close - 1.0,
            high: close + 1.0,
            low: close - 2.0,
            close,
            volume: 1_000_000.0,
        }
    }

    fn symbols(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn service(provider: Arc<MockPriceProvider>) -> MarketDataService {
        MarketDataService::new(provider)
    }

    async fn fetch(provider: Arc<MockPriceProvider>, tickers: &[&str]) -> MarketDataResponse {
        service(provider)
            .get_market_data(&symbols(tickers), "2020-01-01", "2020-01-05")
            .await
    }

    // =========================================================================
    // Validation
    // =========================================================================

    #[tokio::test]
    async fn test_empty_ticker_list_is_rejected_before_download() {
        let provider = Arc::new(MockPriceProvider::default());

        let response = fetch(provider.clone(), &[]).await;

        assert_eq!(response.start_date, "2020-01-01");
        assert_eq!(response.end_date, "2020-01-05");
        assert!(response.data.is_empty());
        assert_eq!(
            response.errors,
            vec![ItemError::request("Tickers must be a non-empty list of strings")]
        );
        assert_eq!(provider.call_count(), 0);
    }

    // =========================================================================
    // Batch failures
    // =========================================================================

    #[tokio::test]
    async fn test_provider_failure_becomes_download_failed() {
        let provider = Arc::new(MockPriceProvider::failing("connection refused"));

        let response = fetch(provider, &["SPY"]).await;

        assert!(response.data.is_empty());
        assert_eq!(response.errors.len(), 1);
        assert!(response.errors[0].context.is_none());
        assert_eq!(
            response.errors[0].message,
            "Download failed: Provider error: MOCK - connection refused"
        );
    }

    #[tokio::test]
    async fn test_bad_date_becomes_download_failed() {
        let provider = Arc::new(MockPriceProvider::default());

        let response = service(provider.clone())
            .get_market_data(&symbols(&["SPY"]), "yesterday", "2020-01-05")
            .await;

        assert_eq!(response.start_date, "yesterday");
        assert_eq!(
            response.errors,
            vec![ItemError::request(
                "Download failed: Invalid date 'yesterday': expected YYYY-MM-DD"
            )]
        );
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_frame_reports_literal_ticker_list() {
        let provider = Arc::new(MockPriceProvider::with_frame(PriceFrame::new()));

        let response = fetch(provider, &["ABC"]).await;

        assert!(response.data.is_empty());
        assert_eq!(
            response.errors,
            vec![ItemError::request("No data returned for tickers: ['ABC']")]
        );
    }

    #[tokio::test]
    async fn test_download_receives_parsed_dates_and_raw_symbols() {
        let provider = Arc::new(MockPriceProvider::with_frame(
            PriceFrame::new().with_rows("CL=F", vec![bar(JAN_2, 61.18)]),
        ));

        fetch(provider.clone(), &["CL=F", "spy"]).await;

        let calls = provider.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, symbols(&["CL=F", "spy"]));
        assert_eq!(calls[0].1, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert_eq!(calls[0].2, NaiveDate::from_ymd_opt(2020, 1, 5).unwrap());
    }

    // =========================================================================
    // Per-item isolation
    // =========================================================================

    #[tokio::test]
    async fn test_single_ticker_success() {
        let provider = Arc::new(MockPriceProvider::with_frame(
            PriceFrame::new().with_rows("SPY", vec![bar(JAN_2, 324.87), bar(JAN_3, 322.41)]),
        ));

        let response = fetch(provider, &["SPY"]).await;

        assert_eq!(response.data.len(), 2);
        assert!(response.errors.is_empty());
        assert!(response.data.iter().all(|r| r.symbol == "SPY"));
        assert_eq!(response.data[0].close, Some(324.87));
        assert_eq!(response.data[1].close, Some(322.41));
    }

    #[tokio::test]
    async fn test_unresolvable_ticker_does_not_abort_batch() {
        let provider = Arc::new(MockPriceProvider::with_frame(
            PriceFrame::new().with_rows("SPY", vec![bar(JAN_2, 324.87), bar(JAN_3, 322.41)]),
        ));

        let response = fetch(provider, &["SPY", "ABC"]).await;

        assert_eq!(response.data.len(), 2);
        assert!(response.data.iter().all(|r| r.symbol == "SPY"));
        assert_eq!(
            response.errors,
            vec![ItemError::for_item("ABC", "No data found for ticker")]
        );
        assert!(!response.is_total_failure());
    }

    #[tokio::test]
    async fn test_empty_slice_counts_as_missing() {
        let provider = Arc::new(MockPriceProvider::with_frame(
            PriceFrame::new()
                .with_rows("SPY", vec![bar(JAN_2, 324.87)])
                .with_rows("DXY", vec![]),
        ));

        let response = fetch(provider, &["DXY", "SPY"]).await;

        assert_eq!(response.data.len(), 1);
        assert_eq!(response.errors.len(), 1);
        assert_eq!(response.errors[0].context.as_deref(), Some("DXY"));
    }

    #[tokio::test]
    async fn test_bad_row_is_reported_and_siblings_kept() {
        let mut broken = bar(JAN_3, 140.0);
        broken.volume = -1.0;
        let provider = Arc::new(MockPriceProvider::with_frame(
            PriceFrame::new().with_rows("TLT", vec![bar(JAN_2, 138.0), broken]),
        ));

        let response = fetch(provider, &["TLT"]).await;

        assert_eq!(response.data.len(), 1);
        assert_eq!(response.data[0].close, Some(138.0));
        assert_eq!(response.errors.len(), 1);
        assert_eq!(response.errors[0].context.as_deref(), Some("TLT"));
        assert_eq!(
            response.errors[0].message,
            "Row parse failed: volume must be a non-negative whole number, got -1"
        );
    }

    #[tokio::test]
    async fn test_every_row_unparseable_is_total_failure() {
        let mut broken = bar(JAN_2, 140.0);
        broken.volume = 1.5;
        let provider = Arc::new(MockPriceProvider::with_frame(
            PriceFrame::new().with_rows("TLT", vec![broken]),
        ));

        let response = fetch(provider, &["TLT", "ABC"]).await;

        assert!(response.is_total_failure());
        assert_eq!(response.errors.len(), 2);
        assert_eq!(response.errors[0].context.as_deref(), Some("TLT"));
        assert_eq!(
            response.errors[1],
            ItemError::for_item("ABC", "No data found for ticker")
        );
    }

    #[tokio::test]
    async fn test_nan_fields_are_none_not_errors() {
        let mut partial = bar(JAN_2, 1500.0);
        partial.open = f64::NAN;
        partial.volume = f64::NAN;
        let provider = Arc::new(MockPriceProvider::with_frame(
            PriceFrame::new().with_rows("GLD", vec![partial]),
        ));

        let response = fetch(provider, &["GLD"]).await;

        assert!(response.errors.is_empty());
        assert_eq!(response.data[0].open, None);
        assert_eq!(response.data[0].volume, None);
        assert_eq!(response.data[0].close, Some(1500.0));
    }

    // =========================================================================
    // Ordering and idempotence
    // =========================================================================

    #[tokio::test]
    async fn test_records_follow_request_order_then_row_order() {
        let provider = Arc::new(MockPriceProvider::with_frame(
            PriceFrame::new()
                .with_rows("SPY", vec![bar(JAN_2, 324.87), bar(JAN_3, 322.41)])
                .with_rows("TLT", vec![bar(JAN_2, 138.0), bar(JAN_3, 139.5)]),
        ));

        let response = fetch(provider, &["TLT", "ABC", "SPY"]).await;

        let order: Vec<(&str, i64)> = response
            .data
            .iter()
            .map(|r| (r.symbol.as_str(), r.trade_date.timestamp()))
            .collect();
        assert_eq!(
            order,
            vec![("TLT", JAN_2), ("TLT", JAN_3), ("SPY", JAN_2), ("SPY", JAN_3)]
        );
        assert_eq!(response.errors[0].context.as_deref(), Some("ABC"));
    }

    #[tokio::test]
    async fn test_repeated_calls_are_structurally_equal() {
        let provider = Arc::new(MockPriceProvider::with_frame(
            PriceFrame::new().with_rows("SPY", vec![bar(JAN_2, 324.87)]),
        ));
        let service = service(provider);
        let tickers = symbols(&["SPY", "ABC"]);

        let first = service
            .get_market_data(&tickers, "2020-01-01", "2020-01-05")
            .await;
        let second = service
            .get_market_data(&tickers, "2020-01-01", "2020-01-05")
            .await;

        assert_eq!(first, second);
    }

    #[test]
    fn test_render_symbol_list() {
        assert_eq!(render_symbol_list(&symbols(&["ABC"])), "['ABC']");
        assert_eq!(
            render_symbol_list(&symbols(&["ABC", "CL=F"])),
            "['ABC', 'CL=F']"
        );
        assert_eq!(render_symbol_list(&symbols(&["O'NEIL"])), "[\"O'NEIL\"]");
    }

    #[test]
    fn test_render_symbol_list_escapes_backslashes() {
        assert_eq!(render_symbol_list(&symbols(&["a\\b"])), "['a\\\\b']");
        assert_eq!(render_symbol_list(&symbols(&["a'\\b"])), "[\"a'\\\\b\"]");
        assert_eq!(
            render_symbol_list(&symbols(&["a'\"\\b"])),
            "['a\\'\"\\\\b']"
        );
    }
}
