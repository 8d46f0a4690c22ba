//! Transport Client — the single point where ranking requests leave the client.
//!
//! One attempt per submission. No retries, no backoff: every failure is
//! returned to the caller as a [`TransportError`].

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::errors::TransportError;
use crate::models::RankingResponse;
use crate::submission::MultipartPayload;

/// Sends one ranking request. Implemented over HTTP by [`HttpTransport`];
/// the view-model only sees this trait.
#[async_trait]
pub trait RankingTransport: Send + Sync {
    async fn submit(&self, payload: MultipartPayload) -> Result<RankingResponse, TransportError>;
}

/// `{error, details}` as returned by the proxy on failure. Either field may be missing.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<Value>,
    details: Option<Value>,
}

#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint_url: String,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self {
            client,
            endpoint_url: config.endpoint_url.clone(),
        })
    }

    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }
}

#[async_trait]
impl RankingTransport for HttpTransport {
    async fn submit(&self, payload: MultipartPayload) -> Result<RankingResponse, TransportError> {
        let resume_count = payload.resumes.len();
        let form = payload.into_form()?;

        info!(
            endpoint = %self.endpoint_url,
            resumes = resume_count,
            "submitting resumes for ranking"
        );

        let response = self
            .client
            .post(&self.endpoint_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                warn!("ranking request failed to send: {e}");
                TransportError::from(e)
            })?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = upstream_detail(&body);
            warn!(status = status.as_u16(), %detail, "ranking service returned an error");
            return Err(TransportError::UpstreamError {
                status: status.as_u16(),
                detail,
            });
        }

        let body = response.text().await?;
        let ranking = decode_ranking(&body).map_err(|e| {
            warn!("rejecting ranking response: {e}");
            e
        })?;

        debug!(ranked = ranking.ranked.len(), "ranking response accepted");
        Ok(ranking)
    }
}

/// Decodes and checks a 2xx body.
///
/// - not JSON → `NetworkError`
/// - JSON without `ranked_resumes` (including the backend's bare `{"error": ...}`
///   reply), wrong shape, or failed integrity checks → `MalformedResponse`
pub fn decode_ranking(body: &str) -> Result<RankingResponse, TransportError> {
    let value: Value = serde_json::from_str(body).map_err(|e| TransportError::NetworkError {
        message: format!("response is not valid JSON: {e}"),
    })?;

    if value.get("ranked_resumes").is_none() {
        let reason = match value.get("error") {
            Some(err) => format!("backend reported: {}", value_text(err)),
            None => "missing field `ranked_resumes`".to_string(),
        };
        return Err(TransportError::malformed(reason));
    }

    let ranking: RankingResponse =
        serde_json::from_value(value).map_err(|e| TransportError::malformed(e.to_string()))?;
    ranking.validate()?;
    Ok(ranking)
}

/// Best human-readable detail from a non-2xx body: `details`, then `error`, then the raw text.
fn upstream_detail(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            details: Some(details),
            ..
        }) => value_text(&details),
        Ok(ErrorBody {
            error: Some(error), ..
        }) => value_text(&error),
        _ => body.trim().to_string(),
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
