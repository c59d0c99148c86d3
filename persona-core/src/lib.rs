//! Persona Core Library
//!
//! This crate presents a fixed personal/professional profile through a
//! conversational interface backed by LLM completion backends.
//!
//! Two components do the work, connected only by one call per turn:
//! [`session::Session`] keeps the ordered transcript and assembles each
//! request (system prompt, prior turns, newest user turn), and
//! [`providers::CompletionGateway`] obtains one completion from up to two
//! configured backends, falling back to the secondary only on a
//! recognized rate-limit signal from the primary.
//!
//! A turn flows one way: user text is recorded into the session, the
//! assembled message list goes to the gateway, the completion text is
//! recorded back and surfaced to the caller. The consumer owns one
//! session per connection; transcripts are never shared.

pub mod config;
pub mod http;
pub mod profile;
pub mod protocol;
pub mod providers;
pub mod session;

pub use config::{ConfigError, PersonaConfig};
pub use http::HttpClient;
pub use profile::Profile;
pub use protocol::{Completion, Message, MessageRole};
pub use providers::{Backend, BackendError, CompletionGateway, GatewayError};
pub use session::{Session, SessionError, Transcript};

/// Returns the version of the persona-core library
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
