//! Core protocol types for chat completion
//!
//! The request/response shapes follow the OpenAI-compatible chat completion
//! API that both configured backends speak. The assembled message list is the
//! contract that matters: exactly one system message first, prior turns in
//! chronological order, the newest user turn last.

use serde::{Deserialize, Serialize};

/// Role of a message in the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System instructions that establish the persona
    System,
    /// User input message
    User,
    /// Assistant (model) response
    Assistant,
}

/// A single message in the conversation. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message sender
    pub role: MessageRole,

    /// Text content of the message
    pub content: String,
}

impl Message {
    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Chat completion request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Model identifier to use
    pub model: String,

    /// Messages in the conversation, system first
    pub messages: Vec<Message>,

    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Maximum tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl ChatRequest {
    /// Create a new chat request with model and messages
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
            temperature: None,
            max_tokens: None,
        }
    }

    /// Set temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set max tokens
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Chat completion response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Response choices; the completion text is the first choice's message
    pub choices: Vec<ResponseChoice>,

    /// Token usage information
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<CompletionUsage>,
}

impl ChatResponse {
    /// Extract the completion text: the first choice's message content.
    /// Returns None when the backend sent no choices or an empty message.
    pub fn completion_text(&self) -> Option<&str> {
        self.choices
            .first()
            .map(|c| c.message.content.as_str())
            .filter(|text| !text.is_empty())
    }
}

/// A single response choice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseChoice {
    /// Generated message
    pub message: Message,

    /// Finish reason reported by the backend
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Token usage information
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionUsage {
    /// Tokens in the prompt
    pub prompt_tokens: u32,

    /// Tokens in the completion
    pub completion_tokens: u32,
}

/// Result of a completed gateway call. Transient, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    /// The generated text
    pub text: String,

    /// Name of the backend that produced it
    pub provider: String,

    /// Token usage, when the backend reported it
    pub usage: Option<CompletionUsage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_roles_serialize_lowercase() {
        let msg = Message::system("be helpful");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "system");
        assert_eq!(json["content"], "be helpful");

        let user = serde_json::to_value(Message::user("hi")).unwrap();
        assert_eq!(user["role"], "user");

        let assistant = serde_json::to_value(Message::assistant("hello")).unwrap();
        assert_eq!(assistant["role"], "assistant");
    }

    #[test]
    fn request_omits_unset_sampling_params() {
        let request = ChatRequest::new("test-model", vec![Message::user("hi")]);
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("temperature").is_none());
        assert!(json.get("max_tokens").is_none());

        let tuned = ChatRequest::new("test-model", vec![])
            .with_temperature(0.4)
            .with_max_tokens(2048);
        let json = serde_json::to_value(&tuned).unwrap();
        assert_eq!(json["max_tokens"], 2048);
    }

    #[test]
    fn completion_text_is_first_choice() {
        let response: ChatResponse = serde_json::from_value(serde_json::json!({
            "choices": [
                {"message": {"role": "assistant", "content": "first"}},
                {"message": {"role": "assistant", "content": "second"}}
            ],
            "usage": {"prompt_tokens": 10, "completion_tokens": 5}
        }))
        .unwrap();

        assert_eq!(response.completion_text(), Some("first"));
        assert_eq!(response.usage.unwrap().completion_tokens, 5);
    }

    #[test]
    fn completion_text_rejects_empty() {
        let no_choices = ChatResponse {
            choices: vec![],
            usage: None,
        };
        assert_eq!(no_choices.completion_text(), None);

        let empty_content: ChatResponse = serde_json::from_value(serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": ""}}]
        }))
        .unwrap();
        assert_eq!(empty_content.completion_text(), None);
    }
}
