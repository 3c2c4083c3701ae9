#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use chumpstreet_market_data::{
    MacroSeriesProvider, MarketDataError, PriceFrame, PriceHistoryProvider, PriceRow,
    SeriesPoint,
};
use chumpstreet_server::{api::app_router, build_state_with, config::Config, AppState};
use serde_json::Value;
use tower::ServiceExt;

/// Knows SPY (two sessions) and nothing else.
pub struct FakePrices;

#[async_trait]
impl PriceHistoryProvider for FakePrices {
    fn id(&self) -> &'static str {
        "FAKE"
    }

    async fn download(
        &self,
        symbols: &[String],
        _start: NaiveDate,
        _end: NaiveDate,
    ) -> Result<PriceFrame, MarketDataError> {
        let mut frame = PriceFrame::new();
        if symbols.iter().any(|s| s == "SPY") {
            frame.insert(
                "SPY",
                vec![
                    PriceRow {
                        timestamp: 1_577_975_400,
                        open: 323.54,
                        high: 324.89,
                        low: 322.53,
                        close: 324.87,
                        volume: 59_151_200.0,
                    },
                    PriceRow {
                        timestamp: 1_578_061_800,
                        open: 321.16,
                        high: 323.64,
                        low: 321.1,
                        close: 322.41,
                        volume: 77_709_700.0,
                    },
                ],
            );
        }
        Ok(frame)
    }
}

/// Knows GDP; `DOWN` simulates an outage; every other id is unknown.
pub struct FakeSeries;

#[async_trait]
impl MacroSeriesProvider for FakeSeries {
    fn id(&self) -> &'static str {
        "FAKE"
    }

    async fn get_series(
        &self,
        series_id: &str,
        _start: NaiveDate,
        _end: NaiveDate,
    ) -> Result<Vec<SeriesPoint>, MarketDataError> {
        match series_id {
            "GDP" => Ok(vec![
                SeriesPoint::new(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(), 21_481.4),
                SeriesPoint::new(NaiveDate::from_ymd_opt(2020, 4, 1).unwrap(), 19_477.4),
            ]),
            "DOWN" => Err(MarketDataError::MissingApiKey {
                provider: "FRED".to_string(),
            }),
            _ => Err(MarketDataError::InvalidInput {
                provider: "FRED".to_string(),
                message: "Bad Request.  The series does not exist.".to_string(),
            }),
        }
    }
}

pub fn test_state() -> Arc<AppState> {
    build_state_with(Arc::new(FakePrices), Arc::new(FakeSeries))
}

pub fn test_app() -> Router {
    app_router(test_state(), &Config::default())
}

/// POST a raw body to `/mcp`; returns the status and the parsed body (`Null` when empty).
pub async fn post_mcp(app: Router, body: impl Into<String>) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/mcp")
                .header("content-type", "application/json")
                .body(Body::from(body.into()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}
