//! Completion gateway with rate-limit fallback
//!
//! One policy lives here: try the primary backend, and only when it
//! signals throttling (and a secondary is configured) make exactly one
//! more attempt against the secondary. Every other failure is surfaced
//! immediately. There is no retry loop and no state machine beyond this
//! linear sequence.

use crate::config::BackendsConfig;
use crate::http::HttpClient;
use crate::protocol::types::{Completion, Message};
use crate::providers::adapter::Backend;
use crate::providers::answer_api::AnswerApiBackend;
use crate::providers::error::BackendError;
use crate::providers::groq::GroqBackend;
use crate::providers::openrouter::OpenRouterBackend;
use thiserror::Error;
use tracing::{info, warn};

/// Errors surfaced by the gateway to its caller
#[derive(Debug, Error)]
pub enum GatewayError {
    /// No backend is configured; reported before any network attempt
    #[error("no completion backend configured")]
    ConfigurationMissing,

    /// The attempt that decided the outcome failed
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Gateway over up to two configured completion backends
pub struct CompletionGateway {
    primary: Option<Box<dyn Backend>>,
    secondary: Option<Box<dyn Backend>>,
}

impl CompletionGateway {
    /// Start building a gateway
    pub fn builder() -> GatewayBuilder {
        GatewayBuilder::default()
    }

    /// Assemble a gateway from configuration. The Groq section fills the
    /// primary slot, or the delegated answer service when Groq is absent;
    /// OpenRouter only ever fills the secondary slot, and is promoted to
    /// primary when nothing else is configured.
    pub fn from_config(config: &BackendsConfig, client: HttpClient) -> Self {
        let mut builder = Self::builder();

        if let Some(groq) = &config.groq {
            builder = builder.primary(Box::new(GroqBackend::new(groq.clone(), client.clone())));
            if config.answer_api.is_some() {
                warn!("answer_api is configured but unused while groq is present");
            }
        } else if let Some(answer_api) = &config.answer_api {
            builder = builder.primary(Box::new(AnswerApiBackend::new(
                answer_api.clone(),
                client.clone(),
            )));
        }

        if let Some(openrouter) = &config.openrouter {
            builder = builder.secondary(Box::new(OpenRouterBackend::new(
                openrouter.clone(),
                client,
            )));
        }

        builder.build()
    }

    /// Names of the configured backends, primary first
    pub fn backends(&self) -> Vec<&str> {
        self.primary
            .iter()
            .chain(self.secondary.iter())
            .map(|b| b.name())
            .collect()
    }

    /// Obtain one completion for the assembled message list.
    ///
    /// 1. No backend configured: `ConfigurationMissing`, no network call.
    /// 2. Invoke the primary; success returns its completion.
    /// 3. A rate-limit signal with a secondary configured: invoke the
    ///    secondary once with the same message list.
    /// 4. Anything else is fatal; the secondary is never invoked.
    pub async fn complete(&self, messages: &[Message]) -> Result<Completion, GatewayError> {
        let primary = self
            .primary
            .as_ref()
            .ok_or(GatewayError::ConfigurationMissing)?;

        match primary.complete(messages).await {
            Ok(completion) => {
                info!(provider = %completion.provider, "completion from primary");
                Ok(completion)
            }
            Err(error) if error.is_rate_limited() => match &self.secondary {
                Some(secondary) => {
                    warn!(
                        primary = primary.name(),
                        secondary = secondary.name(),
                        retry_after = ?error.retry_after(),
                        "primary rate limited, trying secondary"
                    );
                    let completion = secondary.complete(messages).await?;
                    info!(provider = %completion.provider, "completion from secondary");
                    Ok(completion)
                }
                None => {
                    warn!(
                        primary = primary.name(),
                        "primary rate limited, no secondary configured"
                    );
                    Err(error.into())
                }
            },
            Err(error) => {
                warn!(primary = primary.name(), %error, "primary failed");
                Err(error.into())
            }
        }
    }
}

/// Builder for [`CompletionGateway`]
#[derive(Default)]
pub struct GatewayBuilder {
    primary: Option<Box<dyn Backend>>,
    secondary: Option<Box<dyn Backend>>,
}

impl GatewayBuilder {
    /// Set the primary backend
    pub fn primary(mut self, backend: Box<dyn Backend>) -> Self {
        self.primary = Some(backend);
        self
    }

    /// Set the secondary backend, used only on a rate-limit signal
    pub fn secondary(mut self, backend: Box<dyn Backend>) -> Self {
        self.secondary = Some(backend);
        self
    }

    /// Build the gateway. A secondary with no primary is promoted, so a
    /// single configured backend always serves as the primary.
    pub fn build(mut self) -> CompletionGateway {
        if self.primary.is_none() {
            self.primary = self.secondary.take();
        }
        CompletionGateway {
            primary: self.primary,
            secondary: self.secondary,
        }
    }
}
