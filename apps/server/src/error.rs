use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Failures reported as a JSON-RPC `error` object.
///
/// Tool failures are not `ApiError`s; they are returned as a successful
/// `tools/call` result with `isError` set.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Method not found: {0}")]
    MethodNotFound(String),
    #[error("{0}")]
    InvalidParams(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn code(&self) -> i64 {
        match self {
            ApiError::Parse(_) => -32700,
            ApiError::InvalidRequest(_) => -32600,
            ApiError::MethodNotFound(_) => -32601,
            ApiError::InvalidParams(_) => -32602,
            ApiError::Internal(_) => -32603,
        }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            code: self.code(),
            message: self.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: i64,
    pub message: String,
}

#[derive(Serialize)]
struct Envelope {
    jsonrpc: &'static str,
    id: Value,
    error: ErrorBody,
}

// Used before a request id is known, so the id is always null.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(Envelope {
            jsonrpc: "2.0",
            id: Value::Null,
            error: self.body(),
        });
        (StatusCode::OK, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
