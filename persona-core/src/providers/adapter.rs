//! Backend abstraction
//!
//! A backend turns an assembled message list into one completion. Each
//! implementation owns its endpoint, credential, model identifier, and
//! sampling constants; the gateway only sees this trait.

use crate::protocol::types::{Completion, Message};
use crate::providers::error::BackendError;
use async_trait::async_trait;

/// A completion-generating service reachable over a network API
#[async_trait]
pub trait Backend: Send + Sync {
    /// Stable identifier for this backend, used as the provider tag on
    /// completions and in logs
    fn name(&self) -> &str;

    /// Obtain one completion for the ordered message list
    /// (system first, newest user turn last)
    async fn complete(&self, messages: &[Message]) -> Result<Completion, BackendError>;
}
