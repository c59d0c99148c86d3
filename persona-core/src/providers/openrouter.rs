//! OpenRouter backend implementation
//!
//! Secondary chat-completion backend. Same wire shape as the primary, with
//! OpenRouter's attribution headers when configured.

use crate::config::OpenRouterSettings;
use crate::http::HttpClient;
use crate::protocol::types::{ChatRequest, ChatResponse, Completion, Message};
use crate::providers::adapter::Backend;
use crate::providers::error::BackendError;
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::debug;

const TEMPERATURE: f32 = 0.4;
const MAX_TOKENS: u32 = 2048;

/// OpenRouter chat-completion backend
pub struct OpenRouterBackend {
    settings: OpenRouterSettings,
    client: HttpClient,
}

impl OpenRouterBackend {
    /// Create a backend from validated settings and a shared HTTP client
    pub fn new(settings: OpenRouterSettings, client: HttpClient) -> Self {
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
        if let Some(site_url) = &self.settings.site_url {
            headers.insert("HTTP-Referer".to_string(), site_url.clone());
        }
        if let Some(site_name) = &self.settings.site_name {
            headers.insert("X-Title".to_string(), site_name.clone());
        }
        headers
    }
}

#[async_trait]
impl Backend for OpenRouterBackend {
    fn name(&self) -> &str {
        "openrouter"
    }

    async fn complete(&self, messages: &[Message]) -> Result<Completion, BackendError> {
        let request = ChatRequest::new(&self.settings.model, messages.to_vec())
            .with_temperature(TEMPERATURE)
            .with_max_tokens(MAX_TOKENS);

        debug!(model = %self.settings.model, turns = messages.len(), "openrouter completion");

        let response: ChatResponse = self
            .client
            .post_json(&self.url(), &self.headers(), &request)
            .await?;

        let text = response
            .completion_text()
            .ok_or_else(|| BackendError::InvalidResponse {
                message: "empty response from openrouter".to_string(),
            })?
            .to_string();

        Ok(Completion {
            text,
            provider: self.name().to_string(),
            usage: response.usage,
        })
    }
}
