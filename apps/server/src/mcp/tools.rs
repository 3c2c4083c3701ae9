//! Tool registry: definitions advertised by `tools/list` and the dispatch
//! behind `tools/call`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};
use tracing::{debug, warn};

use super::protocol::CallToolResult;
use crate::error::{ApiError, ApiResult};
use crate::main_lib::AppState;

pub const GET_MARKET_DATA: &str = "get_market_data";
pub const GET_MACRO_DATA: &str = "get_macro_data";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

/// Arguments for the get_market_data tool.
#[derive(Debug, Deserialize)]
pub struct GetMarketDataArgs {
    /// Anything other than a list of strings decodes as an empty list so the
    /// pipeline answers with its validation error.
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub tickers: Vec<String>,
    pub start_date: String,
    pub end_date: String,
}

/// Arguments for the get_macro_data tool.
#[derive(Debug, Deserialize)]
pub struct GetMacroDataArgs {
    pub series_list: Vec<String>,
    pub start_date: String,
    pub end_date: String,
}

fn lenient_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: GET_MARKET_DATA.to_string(),
            description: "Return OHLCV market data for a given ticker and date range.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "tickers": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Ticker symbols, e.g. [\"SPY\", \"CL=F\"]"
                    },
                    "start_date": {
                        "type": "string",
                        "description": "First trading day in YYYY-MM-DD format (inclusive)"
                    },
                    "end_date": {
                        "type": "string",
                        "description": "Last day in YYYY-MM-DD format (exclusive)"
                    }
                },
                "required": ["tickers", "start_date", "end_date"]
            }),
        },
        ToolDefinition {
            name: GET_MACRO_DATA.to_string(),
            description:
                "Return macroeconomic data from FRED for a given list of series and date range."
                    .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "series_list": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "FRED series ids, e.g. [\"GDP\", \"CPIAUCSL\"]"
                    },
                    "start_date": {
                        "type": "string",
                        "description": "Observation start in YYYY-MM-DD format (inclusive)"
                    },
                    "end_date": {
                        "type": "string",
                        "description": "Observation end in YYYY-MM-DD format (inclusive)"
                    }
                },
                "required": ["series_list", "start_date", "end_date"]
            }),
        },
    ]
}

/// Run one tool.
///
/// Only an unknown tool name is a protocol error. Bad arguments and pipeline
/// failures come back as a tool result with `is_error` set.
pub async fn call_tool(state: &AppState, name: &str, arguments: Value) -> ApiResult<CallToolResult> {
    debug!("tools/call {}", name);
    let outcome = match name {
        GET_MARKET_DATA => get_market_data(state, arguments).await,
        GET_MACRO_DATA => get_macro_data(state, arguments).await,
        other => return Err(ApiError::InvalidParams(format!("Unknown tool: {}", other))),
    };

    match outcome {
        Ok(structured) => Ok(CallToolResult::structured(structured)),
        Err(ToolFailure::Arguments(e)) => {
            warn!("{}: invalid arguments: {}", name, e);
            Ok(CallToolResult::error(format!(
                "Invalid arguments for {}: {}",
                name, e
            )))
        }
        Err(ToolFailure::Execution(message)) => {
            warn!("{} failed: {}", name, message);
            Ok(CallToolResult::error(message))
        }
        Err(ToolFailure::Serialize(e)) => Err(ApiError::Internal(e.to_string())),
    }
}

enum ToolFailure {
    Arguments(serde_json::Error),
    Execution(String),
    Serialize(serde_json::Error),
}

async fn get_market_data(state: &AppState, arguments: Value) -> Result<Value, ToolFailure> {
    let args: GetMarketDataArgs =
        serde_json::from_value(arguments).map_err(ToolFailure::Arguments)?;
    let response = state
        .market_data_service
        .get_market_data(&args.tickers, &args.start_date, &args.end_date)
        .await;
    serde_json::to_value(response).map_err(ToolFailure::Serialize)
}

async fn get_macro_data(state: &AppState, arguments: Value) -> Result<Value, ToolFailure> {
    let args: GetMacroDataArgs =
        serde_json::from_value(arguments).map_err(ToolFailure::Arguments)?;
    let data = state
        .macro_data_service
        .get_macro_data(&args.series_list, &args.start_date, &args.end_date)
        .await
        .map_err(|e| ToolFailure::Execution(e.to_string()))?;
    serde_json::to_value(data).map_err(ToolFailure::Serialize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definitions() {
        let names: Vec<String> = definitions().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["get_market_data", "get_macro_data"]);

        let market = &definitions()[0];
        assert_eq!(
            market.input_schema["required"],
            json!(["tickers", "start_date", "end_date"])
        );
        assert_eq!(market.input_schema["properties"]["tickers"]["type"], "array");
    }

    #[test]
    fn test_market_args_tolerate_malformed_tickers() {
        let args: GetMarketDataArgs = serde_json::from_value(json!({
            "tickers": "SPY",
            "start_date": "2020-01-01",
            "end_date": "2020-01-05"
        }))
        .unwrap();
        assert!(args.tickers.is_empty());

        let args: GetMarketDataArgs = serde_json::from_value(json!({
            "tickers": ["SPY", 7],
            "start_date": "2020-01-01",
            "end_date": "2020-01-05"
        }))
        .unwrap();
        assert!(args.tickers.is_empty());

        let args: GetMarketDataArgs = serde_json::from_value(json!({
            "start_date": "2020-01-01",
            "end_date": "2020-01-05"
        }))
        .unwrap();
        assert!(args.tickers.is_empty());
    }

    #[test]
    fn test_macro_args_require_series_list() {
        let result = serde_json::from_value::<GetMacroDataArgs>(json!({
            "start_date": "2020-01-01",
            "end_date": "2020-12-31"
        }));
        assert!(result.is_err());
    }
}
