//! MCP over HTTP: one JSON-RPC message per `POST /mcp`.

pub mod protocol;
pub mod tools;

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::error::{ApiError, ApiResult};
use crate::main_lib::AppState;
use protocol::{CallToolParams, RpcRequest, RpcResponse, JSONRPC_VERSION};

pub async fn mcp_endpoint(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let message: Value = match serde_json::from_slice(&body) {
        Ok(message) => message,
        Err(e) => return ApiError::Parse(e.to_string()).into_response(),
    };
    let request: RpcRequest = match serde_json::from_value(message) {
        Ok(request) => request,
        Err(e) => return ApiError::InvalidRequest(e.to_string()).into_response(),
    };

    if request.jsonrpc != JSONRPC_VERSION {
        let error = ApiError::InvalidRequest(format!(
            "unsupported jsonrpc version '{}'",
            request.jsonrpc
        ));
        let id = request.id.unwrap_or(Value::Null);
        return Json(RpcResponse::failure(id, &error)).into_response();
    }

    if request.is_notification() {
        debug!("Notification {}", request.method);
        return StatusCode::ACCEPTED.into_response();
    }
    let id = request.id.unwrap_or(Value::Null);

    let response = match dispatch(&state, &request.method, request.params).await {
        Ok(result) => RpcResponse::success(id, result),
        Err(e) => {
            warn!("{} failed: {}", request.method, e);
            RpcResponse::failure(id, &e)
        }
    };
    Json(response).into_response()
}

async fn dispatch(state: &AppState, method: &str, params: Value) -> ApiResult<Value> {
    match method {
        "initialize" => Ok(protocol::initialize_result(&params)),
        "ping" => Ok(json!({})),
        "tools/list" => Ok(json!({ "tools": tools::definitions() })),
        "tools/call" => {
            let call: CallToolParams = serde_json::from_value(params)
                .map_err(|e| ApiError::InvalidParams(e.to_string()))?;
            let result = tools::call_tool(state, &call.name, call.arguments).await?;
            serde_json::to_value(result).map_err(|e| ApiError::Internal(e.to_string()))
        }
        other => Err(ApiError::MethodNotFound(other.to_string())),
    }
}
