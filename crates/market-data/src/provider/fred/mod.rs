//! FRED (Federal Reserve Economic Data) series provider.
//!
//! Fetches observations for a single series through the
//! `fred/series/observations` endpoint.
//! API documentation: https://fred.stlouisfed.org/docs/api/fred/series_observations.html

mod models;

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use crate::errors::MarketDataError;
use crate::models::SeriesPoint;
use crate::provider::MacroSeriesProvider;

use models::{ErrorResponse, ObservationsResponse};

pub const DEFAULT_BASE_URL: &str = "https://api.stlouisfed.org/fred";
const PROVIDER_ID: &str = "FRED";

// ============================================================================
// FredProvider
// ============================================================================

/// FRED macroeconomic series provider.
///
/// The API key is optional at construction time; a missing key is reported
/// by the first call that needs it.
pub struct FredProvider {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl FredProvider {
    /// Create a new FRED provider against the public API.
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a provider against a different FRED-compatible endpoint.
    pub fn with_base_url(api_key: Option<String>, base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Make a GET request to the FRED API and return the raw body.
    async fn fetch(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<String, MarketDataError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| MarketDataError::MissingApiKey {
                provider: PROVIDER_ID.to_string(),
            })?;

        let url = format!("{}{}", self.base_url, endpoint);

        debug!("FRED request: {} with {} params", endpoint, params.len());

        let response = self
            .client
            .get(&url)
            .query(&[("api_key", api_key), ("file_type", "json")])
            .query(params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MarketDataError::Timeout {
                        provider: PROVIDER_ID.to_string(),
                    }
                } else {
                    MarketDataError::ProviderError {
                        provider: PROVIDER_ID.to_string(),
                        message: format!("Request failed: {}", e),
                    }
                }
            })?;

        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            return Ok(body);
        }

        Err(classify_failure(status, &body))
    }
}

// ============================================================================
// MacroSeriesProvider Implementation
// ============================================================================

#[async_trait]
impl MacroSeriesProvider for FredProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn get_series(
        &self,
        series_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<SeriesPoint>, MarketDataError> {
        let start = start.format("%Y-%m-%d").to_string();
        let end = end.format("%Y-%m-%d").to_string();

        let body = self
            .fetch(
                "/series/observations",
                &[
                    ("series_id", series_id),
                    ("observation_start", start.as_str()),
                    ("observation_end", end.as_str()),
                ],
            )
            .await?;

        parse_observations(&body)
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Map a non-success response to an error.
///
/// FRED answers bad arguments (unknown series, malformed dates, missing key)
/// with HTTP 400 and an explanation in `error_message`.
fn classify_failure(status: StatusCode, body: &str) -> MarketDataError {
    let message = serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(|e| e.error_message);

    match (status, message) {
        (StatusCode::TOO_MANY_REQUESTS, _) => MarketDataError::RateLimited {
            provider: PROVIDER_ID.to_string(),
        },
        (StatusCode::BAD_REQUEST, Some(message)) => MarketDataError::InvalidInput {
            provider: PROVIDER_ID.to_string(),
            message,
        },
        (status, message) => MarketDataError::ProviderError {
            provider: PROVIDER_ID.to_string(),
            message: message.unwrap_or_else(|| format!("HTTP {}", status)),
        },
    }
}

/// Parse an observations body into points, in the order FRED sent them.
fn parse_observations(body: &str) -> Result<Vec<SeriesPoint>, MarketDataError> {
    let response: ObservationsResponse =
        serde_json::from_str(body).map_err(|e| MarketDataError::ValidationFailed {
            message: format!("Failed to parse FRED observations: {}", e),
        })?;

    response
        .observations
        .into_iter()
        .map(|observation| {
            let date = NaiveDate::parse_from_str(&observation.date, "%Y-%m-%d").map_err(|e| {
                MarketDataError::ValidationFailed {
                    message: format!("Invalid observation date '{}': {}", observation.date, e),
                }
            })?;
            Ok::<_, MarketDataError>(SeriesPoint::new(date, parse_value(&observation.value)))
        })
        .collect()
}

/// FRED uses "." for missing observations.
fn parse_value(raw: &str) -> f64 {
    match raw.trim() {
        "." | "" => f64::NAN,
        value => value.parse().unwrap_or_else(|_| {
            warn!("Unparseable FRED value '{}', treating as missing", value);
            f64::NAN
        }),
    }
}

// ============================================================================
// Tests
// ============================================================================
