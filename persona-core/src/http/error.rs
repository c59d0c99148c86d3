//! HTTP status mapping utilities

use crate::providers::error::BackendError;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use uuid::Uuid;

/// Map a non-success HTTP status to a [`BackendError`].
///
/// Classification is by status code alone: 429 is the throttling signal,
/// 401/403 are credential failures, everything else is a fatal API error.
pub fn map_status_error(
    status: StatusCode,
    headers: &HeaderMap,
    body: Option<String>,
    request_id: Uuid,
) -> BackendError {
    match status {
        StatusCode::TOO_MANY_REQUESTS => BackendError::RateLimited {
            retry_after: retry_after_from_headers(headers),
        },
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => BackendError::Auth,
        _ => {
            let message = body
                .as_deref()
                .and_then(extract_error_message)
                .or(body)
                .unwrap_or_else(|| format!("HTTP error {}", status.as_u16()));
            BackendError::Api {
                status: status.as_u16(),
                message: format!("{message} [request_id: {request_id}]"),
            }
        }
    }
}

/// Parse the `Retry-After` header when the backend sent one. Only the
/// delta-seconds form is handled; an HTTP-date value is ignored.
fn retry_after_from_headers(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

/// Extract a human-readable message from a JSON error body.
///
/// Both backends use the OpenAI-style `{"error": {"message": ...}}` shape;
/// a bare `{"message": ...}` is accepted as well.
fn extract_error_message(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;

    if let Some(message) = json
        .get("error")
        .and_then(|e| e.get("message"))
        .and_then(|m| m.as_str())
    {
        return Some(message.to_string());
    }

    json.get("message")
        .and_then(|m| m.as_str())
        .map(str::to_string)
}
