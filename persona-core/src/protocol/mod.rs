//! Protocol module for chat request/response structures
//!
//! This module defines the canonical data models exchanged with completion
//! backends. These structures are designed to be:
//! - Backend-agnostic (both chat backends accept the same wire shape)
//! - Type-safe and serializable
//! - Minimal: one turn is a role plus text, nothing more

pub mod types;

pub use types::{
    ChatRequest, ChatResponse, Completion, CompletionUsage, Message, MessageRole, ResponseChoice,
};
