//! HTTP layer for talking to completion backends
//!
//! This module wraps a shared `reqwest` client and handles:
//! - Connection pooling and bounded per-call timeouts
//! - Mapping transport failures and status codes to `BackendError`
//! - Request ID generation for log correlation
//!
//! One outbound POST per call, no retries: resilience policy lives in the
//! gateway, not here.

pub mod client;
pub mod error;

pub use client::HttpClient;
