//! Credential handling for configuration
//!
//! API keys are wrapped in [`SecretString`] so they never leak through
//! `Debug`/`Display` output or logs. Callers must go through
//! `expose_secret` to read the value.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A wrapper type for sensitive strings like API keys
#[derive(Clone, Deserialize, Serialize)]
#[serde(transparent)]
pub struct SecretString {
    value: String,
}

impl SecretString {
    /// Create a new secret string
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Get the actual value (use with caution)
    pub fn expose_secret(&self) -> &str {
        &self.value
    }

    /// Check if the secret is empty
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// A partially redacted form for diagnostics: first and last two
    /// characters of sufficiently long secrets, fully redacted otherwise.
    pub fn partial_redact(&self) -> String {
        let len = self.value.chars().count();
        if self.value.is_empty() {
            "[EMPTY]".to_string()
        } else if len <= 8 {
            "[REDACTED]".to_string()
        } else {
            let head: String = self.value.chars().take(2).collect();
            let tail: String = self.value.chars().skip(len - 2).collect();
            format!("{head}...{tail}")
        }
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl PartialEq for SecretString {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl From<String> for SecretString {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for SecretString {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
