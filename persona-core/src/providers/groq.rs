//! Groq backend implementation
//!
//! Primary chat-completion backend, speaking the OpenAI-compatible
//! `/chat/completions` API. Sampling constants are fixed per deployment.

use crate::config::GroqSettings;
use crate::http::HttpClient;
use crate::protocol::types::{ChatRequest, ChatResponse, Completion, Message};
use crate::providers::adapter::Backend;
use crate::providers::error::BackendError;
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::debug;

/// Sampling temperature, fixed per deployment
const TEMPERATURE: f32 = 0.4;

/// Maximum completion length in tokens, fixed per deployment
const MAX_TOKENS: u32 = 2048;

/// Groq chat-completion backend
pub struct GroqBackend {
    settings: GroqSettings,
    client: HttpClient,
}

impl GroqBackend {
    /// Create a backend from validated settings and a shared HTTP client
    pub fn new(settings: GroqSettings, client: HttpClient) -> Self {
        Self { settings, client }
    }

    fn url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.settings.base_url.trim_end_matches('/')
        )
    }

    fn headers(&self) -> HashMap<String, String> {
        let mut headers = HashMap::new();
        headers.insert(
            "Authorization".to_string(),
            format!("Bearer {}", self.settings.api_key.expose_secret()),
        );
        headers
    }
}

#[async_trait]
impl Backend for GroqBackend {
    fn name(&self) -> &str {
        "groq"
    }

    async fn complete(&self, messages: &[Message]) -> Result<Completion, BackendError> {
        let request = ChatRequest::new(&self.settings.model, messages.to_vec())
            .with_temperature(TEMPERATURE)
            .with_max_tokens(MAX_TOKENS);

        debug!(model = %self.settings.model, turns = messages.len(), "groq completion");

        let response: ChatResponse = self
            .client
            .post_json(&self.url(), &self.headers(), &request)
            .await?;

        let text = response
            .completion_text()
            .ok_or_else(|| BackendError::InvalidResponse {
                message: "empty response from groq".to_string(),
            })?
            .to_string();

        Ok(Completion {
            text,
            provider: self.name().to_string(),
            usage: response.usage,
        })
    }
}
