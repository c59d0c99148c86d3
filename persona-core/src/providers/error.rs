//! Backend error classification
//!
//! Failures are classified from structured signals (HTTP status codes and
//! transport error kinds), never by matching substrings of error text. The
//! gateway consults exactly one question: is this a rate-limit signal?

use std::time::Duration;
use thiserror::Error;

/// Errors produced by a single completion backend call
#[derive(Debug, Clone, Error)]
pub enum BackendError {
    /// The backend signalled throttling (HTTP 429). The only class that
    /// makes the gateway escalate to the secondary backend.
    #[error("rate limited by backend")]
    RateLimited { retry_after: Option<Duration> },

    /// The backend could not be reached: connection failure or timeout
    #[error("backend unavailable: {message}")]
    Unavailable { message: String },

    /// Credential rejected (HTTP 401/403)
    #[error("backend authentication failed")]
    Auth,

    /// The request was rejected or could not be formed
    #[error("invalid request: {message}")]
    InvalidRequest { message: String },

    /// Any other non-success status from the backend
    #[error("backend error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The backend answered 2xx but the payload was undecodable or empty
    #[error("invalid backend response: {message}")]
    InvalidResponse { message: String },
}

impl BackendError {
    /// Whether this error is a recognized throttling signal. Only these
    /// failures escalate to the secondary backend; everything else is fatal.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }

    /// Suggested wait reported by the backend, when it sent one
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after } => *retry_after,
            _ => None,
        }
    }
}
