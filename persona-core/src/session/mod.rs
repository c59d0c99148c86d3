//! Session state and conversation assembly
//!
//! A `Session` owns the transcript for one user connection. Whatever serves
//! the connection holds the session and passes it into the gateway on each
//! turn; there is no ambient shared state, and transcripts are never shared
//! across sessions.

use crate::protocol::types::Message;
use thiserror::Error;

/// Maximum accepted length of a single user turn, in characters.
pub const MAX_INPUT_CHARS: usize = 2000;

/// Errors raised while recording user input
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("user input is empty")]
    EmptyInput,

    #[error("user input exceeds {MAX_INPUT_CHARS} characters (got {len})")]
    InputTooLong { len: usize },
}

/// Ordered, append-only history of user/assistant turns for one session.
///
/// Ordering is significant: chronological order is both presentation order
/// and model-context order.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    turns: Vec<Message>,
}

impl Transcript {
    /// Create an empty transcript
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a user turn. Empty or whitespace-only input is rejected
    /// without mutating the transcript, as is over-length input.
    pub fn record_user_turn(&mut self, text: &str) -> Result<(), SessionError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(SessionError::EmptyInput);
        }
        let len = trimmed.chars().count();
        if len > MAX_INPUT_CHARS {
            return Err(SessionError::InputTooLong { len });
        }
        self.turns.push(Message::user(trimmed));
        Ok(())
    }

    /// Record an assistant turn
    pub fn record_assistant_turn(&mut self, text: &str) {
        self.turns.push(Message::assistant(text));
    }

    /// Assemble the ordered message list for a backend request: the system
    /// prompt, then every recorded turn in chronological order. When the
    /// caller has just recorded the new user turn, it is the final element.
    pub fn build_request(&self, system_prompt: &str) -> Vec<Message> {
        let mut messages = Vec::with_capacity(self.turns.len() + 1);
        messages.push(Message::system(system_prompt));
        messages.extend(self.turns.iter().cloned());
        messages
    }

    /// Discard all history. Idempotent on an empty transcript.
    pub fn reset(&mut self) {
        self.turns.clear();
    }

    /// Number of recorded turns (both roles)
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether no turns have been recorded
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Recorded turns in chronological order
    pub fn turns(&self) -> &[Message] {
        &self.turns
    }
}

/// One user connection's conversational state: the transcript plus the
/// system prompt the profile rendered at startup.
#[derive(Debug, Clone)]
pub struct Session {
    system_prompt: String,
    transcript: Transcript,
}

impl Session {
    /// Create a session with the given system prompt and an empty transcript
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            transcript: Transcript::new(),
        }
    }

    /// The system prompt this session was created with
    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Record a user turn; see [`Transcript::record_user_turn`]
    pub fn record_user_turn(&mut self, text: &str) -> Result<(), SessionError> {
        self.transcript.record_user_turn(text)
    }

    /// Record an assistant turn
    pub fn record_assistant_turn(&mut self, text: &str) {
        self.transcript.record_assistant_turn(text)
    }

    /// Assemble the message list for the next backend call
    pub fn build_request(&self) -> Vec<Message> {
        self.transcript.build_request(&self.system_prompt)
    }

    /// Clear the conversation history
    pub fn reset(&mut self) {
        self.transcript.reset()
    }

    /// Access the transcript
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }
}
