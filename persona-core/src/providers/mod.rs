//! Completion backends and the fallback gateway
//!
//! The [`adapter::Backend`] trait is the seam: concrete backends turn an
//! assembled message list into one completion, and
//! [`gateway::CompletionGateway`] owns the single routing policy of
//! escalating to the secondary backend only on a recognized rate-limit
//! signal from the primary.

pub mod adapter;
pub mod answer_api;
pub mod error;
pub mod gateway;
pub mod groq;
pub mod openrouter;

pub use adapter::Backend;
pub use answer_api::AnswerApiBackend;
pub use error::BackendError;
pub use gateway::{CompletionGateway, GatewayBuilder, GatewayError};
pub use groq::GroqBackend;
pub use openrouter::OpenRouterBackend;
