//! The upload relay. Forwards the browser's multipart body to the scoring
//! backend byte-for-byte and hands the backend's answer back.

use axum::{
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    Json,
};
use bytes::Bytes;
use serde_json::Value;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::ProxyError;
use crate::state::AppState;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// POST /api/upload
///
/// - upstream 2xx with JSON → same status, same JSON
/// - upstream non-2xx → same status, `{error, details}` with the upstream text
/// - upstream unreachable, or 2xx that is not JSON → 500 `{error, details}`
pub async fn handle_upload(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<Value>), ProxyError> {
    let request_id = Uuid::new_v4();
    let upstream_url = &state.config.upstream_url;

    info!(%request_id, bytes = body.len(), upstream = %upstream_url, "relaying upload");

    let mut request = state
        .http
        .post(upstream_url)
        .header(REQUEST_ID_HEADER, request_id.to_string())
        .body(body);

    if let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) {
        request = request.header(reqwest::header::CONTENT_TYPE, content_type);
    }

    let upstream = request.send().await?;
    let status = upstream.status();

    if !status.is_success() {
        let details = upstream.text().await.unwrap_or_default();
        return Err(ProxyError::Upstream {
            status: status.as_u16(),
            details,
        });
    }

    let data: Value = upstream.json().await?;
    debug!(%request_id, status = status.as_u16(), "upstream responded");

    let status = StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::OK);
    Ok((status, Json(data)))
}
