//! Configuration schema structures with serde support

use super::error::ConfigError;
use super::secrets::SecretString;
use serde::{Deserialize, Serialize};

/// Root configuration: the profile document plus the backend descriptors.
/// Loaded once at startup and static for the process lifetime.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PersonaConfig {
    /// Path to the profile document, relative to the working directory
    #[serde(default = "default_profile_path")]
    pub profile: String,

    /// Backend descriptors. Presence of a section enables that backend.
    #[serde(default)]
    pub backends: BackendsConfig,
}

/// The set of configured backends. All sections are optional; the gateway
/// reports a configuration-missing error when none is present.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BackendsConfig {
    /// Primary chat-completion backend
    #[serde(default)]
    pub groq: Option<GroqSettings>,

    /// Secondary chat-completion backend, used only on a rate-limit signal
    /// from the primary
    #[serde(default)]
    pub openrouter: Option<OpenRouterSettings>,

    /// Delegated question-answering backend
    #[serde(default)]
    pub answer_api: Option<AnswerApiSettings>,
}

impl BackendsConfig {
    /// Whether any backend is configured
    pub fn any_configured(&self) -> bool {
        self.groq.is_some() || self.openrouter.is_some() || self.answer_api.is_some()
    }
}

/// Groq chat-completion backend settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GroqSettings {
    /// API key (supports `${ENV_VAR}` interpolation)
    pub api_key: SecretString,

    /// Model identifier
    #[serde(default = "default_groq_model")]
    pub model: String,

    /// Base URL of the OpenAI-compatible API
    #[serde(default = "default_groq_base_url")]
    pub base_url: String,
}

/// OpenRouter chat-completion backend settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OpenRouterSettings {
    /// API key (supports `${ENV_VAR}` interpolation)
    pub api_key: SecretString,

    /// Model identifier
    #[serde(default = "default_openrouter_model")]
    pub model: String,

    /// Base URL of the OpenAI-compatible API
    #[serde(default = "default_openrouter_base_url")]
    pub base_url: String,

    /// Attribution URL sent as `HTTP-Referer`
    #[serde(default)]
    pub site_url: Option<String>,

    /// Attribution name sent as `X-Title`
    #[serde(default)]
    pub site_name: Option<String>,
}

/// Delegated question-answering backend settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AnswerApiSettings {
    /// Full endpoint URL of the answer service
    pub endpoint: String,

    /// Optional bearer credential
    #[serde(default)]
    pub api_key: Option<SecretString>,

    /// Number of knowledge chunks the service should retrieve
    #[serde(default = "default_top_k")]
    pub top_k: u32,

    /// Minimum similarity for retrieved chunks
    #[serde(default = "default_min_similarity")]
    pub min_similarity: f64,

    /// Whether the service should include source snippets in its response
    #[serde(default = "default_true")]
    pub include_sources: bool,
}

// Default value functions for serde
fn default_profile_path() -> String {
    "profile.yaml".to_string()
}
fn default_groq_model() -> String {
    "llama-3.3-70b-versatile".to_string()
}
fn default_groq_base_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}
fn default_openrouter_model() -> String {
    "meta-llama/llama-3.3-70b-instruct:free".to_string()
}
fn default_openrouter_base_url() -> String {
    "https://openrouter.ai/api/v1".to_string()
}
fn default_top_k() -> u32 {
    5
}
fn default_min_similarity() -> f64 {
    0.3
}
fn default_true() -> bool {
    true
}

fn validate_http_url(field_path: &str, value: &str) -> Result<(), ConfigError> {
    match url::Url::parse(value) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => Ok(()),
        Ok(url) => Err(ConfigError::validation(
            field_path,
            format!("URL scheme must be http or https, got: {}", url.scheme()),
        )),
        Err(e) => Err(ConfigError::validation(field_path, e.to_string())),
    }
}

impl PersonaConfig {
    /// Validate the configuration. A configuration with zero backends is
    /// valid to load; the gateway surfaces the missing configuration when
    /// a completion is requested.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.profile.is_empty() {
            return Err(ConfigError::validation("profile", "path must not be empty"));
        }

        if let Some(groq) = &self.backends.groq {
            groq.validate("backends.groq")?;
        }
        if let Some(openrouter) = &self.backends.openrouter {
            openrouter.validate("backends.openrouter")?;
        }
        if let Some(answer_api) = &self.backends.answer_api {
            answer_api.validate("backends.answer_api")?;
        }

        Ok(())
    }
}

impl GroqSettings {
    fn validate(&self, path: &str) -> Result<(), ConfigError> {
        if self.api_key.is_empty() {
            return Err(ConfigError::validation(
                format!("{path}.api_key"),
                "required field is empty",
            ));
        }
        if self.model.is_empty() {
            return Err(ConfigError::validation(
                format!("{path}.model"),
                "required field is empty",
            ));
        }
        validate_http_url(&format!("{path}.base_url"), &self.base_url)
    }
}

impl OpenRouterSettings {
    fn validate(&self, path: &str) -> Result<(), ConfigError> {
        if self.api_key.is_empty() {
            return Err(ConfigError::validation(
                format!("{path}.api_key"),
                "required field is empty",
            ));
        }
        if self.model.is_empty() {
            return Err(ConfigError::validation(
                format!("{path}.model"),
                "required field is empty",
            ));
        }
        validate_http_url(&format!("{path}.base_url"), &self.base_url)
    }
}

impl AnswerApiSettings {
    fn validate(&self, path: &str) -> Result<(), ConfigError> {
        validate_http_url(&format!("{path}.endpoint"), &self.endpoint)?;

        if self.top_k == 0 {
            return Err(ConfigError::validation(
                format!("{path}.top_k"),
                "must be greater than 0",
            ));
        }
        if !(0.0..=1.0).contains(&self.min_similarity) {
            return Err(ConfigError::validation(
                format!("{path}.min_similarity"),
                "must be between 0.0 and 1.0",
            ));
        }
        Ok(())
    }
}
