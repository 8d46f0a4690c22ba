use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Upload relay failure.
/// Implements `IntoResponse` so handlers can return `Result<T, ProxyError>`;
/// the body is always `{"error": ..., "details": ...}`.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// The scoring backend answered with a non-2xx status. Its status is relayed.
    #[error("Upstream error (status {status}): {details}")]
    Upstream { status: u16, details: String },

    /// The backend could not be reached or its success body was not JSON.
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let (status, error, details) = match self {
            ProxyError::Upstream { status, details } => {
                tracing::error!("Backend error: {status} {details}");
                (
                    StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                    "Error connecting to backend service",
                    details,
                )
            }
            ProxyError::Internal(msg) => {
                tracing::error!("Upload route error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    msg,
                )
            }
        };

        let body = Json(json!({
            "error": error,
            "details": details
        }));

        (status, body).into_response()
    }
}

impl From<reqwest::Error> for ProxyError {
    fn from(err: reqwest::Error) -> Self {
        ProxyError::Internal(err.to_string())
    }
}
