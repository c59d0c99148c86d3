//! Delegated-answer backend implementation
//!
//! Instead of calling a model directly, this backend forwards the newest
//! user turn to an external question-answering service that does its own
//! retrieval and generation. The service's answer text becomes the
//! completion; retrieval metadata rides along in logs only.

use crate::config::AnswerApiSettings;
use crate::http::HttpClient;
use crate::protocol::types::{Completion, Message, MessageRole};
use crate::providers::adapter::Backend;
use crate::providers::error::BackendError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

/// Request body for the answer service
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AnswerRequest<'a> {
    question: &'a str,
    top_k: u32,
    min_similarity: f64,
    #[serde(rename = "useLLM")]
    use_llm: bool,
    include_sources: bool,
}

/// Response body from the answer service
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnswerResponse {
    answer: String,
    #[serde(default)]
    confidence_score: f64,
    #[serde(default)]
    latency_ms: u64,
    #[serde(default)]
    metadata: AnswerMetadata,
}

/// Retrieval metadata reported by the answer service
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnswerMetadata {
    #[serde(default)]
    chunks_retrieved: u32,
    #[serde(default)]
    model: String,
}

/// Backend that delegates to an external question-answering service
pub struct AnswerApiBackend {
    settings: AnswerApiSettings,
    client: HttpClient,
}

impl AnswerApiBackend {
    /// Create a backend from validated settings and a shared HTTP client
    pub fn new(settings: AnswerApiSettings, client: HttpClient) -> Self {
        Self { settings, client }
    }

    fn headers(&self) -> HashMap<String, String> {
        let mut headers = HashMap::new();
        if let Some(api_key) = &self.settings.api_key {
            headers.insert(
                "Authorization".to_string(),
                format!("Bearer {}", api_key.expose_secret()),
            );
        }
        headers
    }

    /// The delegated service answers single questions; the question is the
    /// newest user turn of the assembled request.
    fn question<'a>(messages: &'a [Message]) -> Result<&'a str, BackendError> {
        messages
            .iter()
            .rev()
            .find(|m| m.role == MessageRole::User)
            .map(|m| m.content.as_str())
            .ok_or_else(|| BackendError::InvalidRequest {
                message: "no user turn to delegate".to_string(),
            })
    }
}

#[async_trait]
impl Backend for AnswerApiBackend {
    fn name(&self) -> &str {
        "answer-api"
    }

    async fn complete(&self, messages: &[Message]) -> Result<Completion, BackendError> {
        let question = Self::question(messages)?;

        let request = AnswerRequest {
            question,
            top_k: self.settings.top_k,
            min_similarity: self.settings.min_similarity,
            use_llm: true,
            include_sources: self.settings.include_sources,
        };

        debug!(endpoint = %self.settings.endpoint, "delegating question to answer service");

        let response: AnswerResponse = self
            .client
            .post_json(&self.settings.endpoint, &self.headers(), &request)
            .await?;

        if response.answer.is_empty() {
            return Err(BackendError::InvalidResponse {
                message: "empty answer from answer service".to_string(),
            });
        }

        info!(
            confidence = response.confidence_score,
            latency_ms = response.latency_ms,
            chunks = response.metadata.chunks_retrieved,
            model = %response.metadata.model,
            "answer service responded"
        );

        Ok(Completion {
            text: response.answer,
            provider: self.name().to_string(),
            usage: None,
        })
    }
}
