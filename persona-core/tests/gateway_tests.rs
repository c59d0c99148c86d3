//! Tests for the gateway fallback policy
//!
//! The one policy decision in the library: escalate to the secondary
//! backend only on a recognized rate-limit signal from the primary.
//! Scripted backends with call counters verify every branch without
//! touching the network.

use async_trait::async_trait;
use persona_core::protocol::types::{Completion, Message};
use persona_core::providers::{Backend, BackendError, CompletionGateway, GatewayError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A backend that returns a scripted outcome and records what it was sent
struct ScriptedBackend {
    name: &'static str,
    outcome: Outcome,
    calls: Arc<AtomicUsize>,
    seen: Arc<Mutex<Vec<Vec<Message>>>>,
}

#[derive(Clone)]
enum Outcome {
    Succeed(&'static str),
    Fail(BackendError),
}

impl ScriptedBackend {
    fn new(name: &'static str, outcome: Outcome) -> (Self, Arc<AtomicUsize>, Arc<Mutex<Vec<Vec<Message>>>>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                name,
                outcome,
                calls: calls.clone(),
                seen: seen.clone(),
            },
            calls,
            seen,
        )
    }
}

#[async_trait]
impl Backend for ScriptedBackend {
    fn name(&self) -> &str {
        self.name
    }

    async fn complete(&self, messages: &[Message]) -> Result<Completion, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(messages.to_vec());
        match &self.outcome {
            Outcome::Succeed(text) => Ok(Completion {
                text: text.to_string(),
                provider: self.name.to_string(),
                usage: None,
            }),
            Outcome::Fail(error) => Err(error.clone()),
        }
    }
}

fn rate_limited() -> BackendError {
    BackendError::RateLimited {
        retry_after: Some(Duration::from_secs(20)),
    }
}

fn request() -> Vec<Message> {
    vec![
        Message::system("persona"),
        Message::user("What do you work on?"),
    ]
}

#[tokio::test]
async fn primary_success_never_touches_secondary() {
    let (primary, primary_calls, _) = ScriptedBackend::new("groq", Outcome::Succeed("answer"));
    let (secondary, secondary_calls, _) =
        ScriptedBackend::new("openrouter", Outcome::Succeed("unused"));

    let gateway = CompletionGateway::builder()
        .primary(Box::new(primary))
        .secondary(Box::new(secondary))
        .build();

    let completion = gateway.complete(&request()).await.unwrap();
    assert_eq!(completion.provider, "groq");
    assert_eq!(completion.text, "answer");
    assert_eq!(primary_calls.load(Ordering::SeqCst), 1);
    assert_eq!(secondary_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn rate_limit_escalates_to_secondary_exactly_once() {
    let (primary, primary_calls, _) = ScriptedBackend::new("groq", Outcome::Fail(rate_limited()));
    let (secondary, secondary_calls, secondary_seen) =
        ScriptedBackend::new("openrouter", Outcome::Succeed("fallback answer"));

    let gateway = CompletionGateway::builder()
        .primary(Box::new(primary))
        .secondary(Box::new(secondary))
        .build();

    let messages = request();
    let completion = gateway.complete(&messages).await.unwrap();

    assert_eq!(completion.provider, "openrouter");
    assert_eq!(completion.text, "fallback answer");
    assert_eq!(primary_calls.load(Ordering::SeqCst), 1);
    assert_eq!(secondary_calls.load(Ordering::SeqCst), 1);

    // the secondary received an equivalent message list
    let seen = secondary_seen.lock().unwrap();
    assert_eq!(seen.as_slice(), &[messages]);
}

#[tokio::test]
async fn fatal_primary_error_never_invokes_secondary() {
    let fatal_errors = [
        BackendError::Api {
            status: 500,
            message: "internal".into(),
        },
        BackendError::Auth,
        BackendError::Unavailable {
            message: "connection refused".into(),
        },
        BackendError::InvalidResponse {
            message: "no choices".into(),
        },
    ];

    for error in fatal_errors {
        let (primary, _, _) = ScriptedBackend::new("groq", Outcome::Fail(error.clone()));
        let (secondary, secondary_calls, _) =
            ScriptedBackend::new("openrouter", Outcome::Succeed("unused"));

        let gateway = CompletionGateway::builder()
            .primary(Box::new(primary))
            .secondary(Box::new(secondary))
            .build();

        let result = gateway.complete(&request()).await;
        assert!(
            matches!(result, Err(GatewayError::Backend(ref e)) if !e.is_rate_limited()),
            "error {error:?} must surface unchanged"
        );
        assert_eq!(
            secondary_calls.load(Ordering::SeqCst),
            0,
            "secondary must not run after {error:?}"
        );
    }
}

#[tokio::test]
async fn rate_limit_without_secondary_is_surfaced() {
    let (primary, primary_calls, _) = ScriptedBackend::new("groq", Outcome::Fail(rate_limited()));

    let gateway = CompletionGateway::builder()
        .primary(Box::new(primary))
        .build();

    let result = gateway.complete(&request()).await;
    match result {
        Err(GatewayError::Backend(e)) => assert!(e.is_rate_limited()),
        other => panic!("expected rate-limit error, got {other:?}"),
    }
    // one attempt, no internal retry
    assert_eq!(primary_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn secondary_failure_after_fallback_is_wrapped() {
    let (primary, _, _) = ScriptedBackend::new("groq", Outcome::Fail(rate_limited()));
    let (secondary, secondary_calls, _) = ScriptedBackend::new(
        "openrouter",
        Outcome::Fail(BackendError::Api {
            status: 502,
            message: "bad gateway".into(),
        }),
    );

    let gateway = CompletionGateway::builder()
        .primary(Box::new(primary))
        .secondary(Box::new(secondary))
        .build();

    let result = gateway.complete(&request()).await;
    match result {
        Err(GatewayError::Backend(BackendError::Api { status, .. })) => assert_eq!(status, 502),
        other => panic!("expected the secondary's error, got {other:?}"),
    }
    assert_eq!(secondary_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn no_backends_fails_without_any_attempt() {
    let gateway = CompletionGateway::builder().build();
    assert!(gateway.backends().is_empty());

    let result = gateway.complete(&request()).await;
    assert!(matches!(result, Err(GatewayError::ConfigurationMissing)));
}

#[tokio::test]
async fn rate_limited_secondary_is_not_retried() {
    // both backends throttled: the fallback hop is the last attempt
    let (primary, primary_calls, _) = ScriptedBackend::new("groq", Outcome::Fail(rate_limited()));
    let (secondary, secondary_calls, _) =
        ScriptedBackend::new("openrouter", Outcome::Fail(rate_limited()));

    let gateway = CompletionGateway::builder()
        .primary(Box::new(primary))
        .secondary(Box::new(secondary))
        .build();

    let result = gateway.complete(&request()).await;
    match result {
        Err(GatewayError::Backend(e)) => assert!(e.is_rate_limited()),
        other => panic!("expected rate-limit error, got {other:?}"),
    }
    assert_eq!(primary_calls.load(Ordering::SeqCst), 1);
    assert_eq!(secondary_calls.load(Ordering::SeqCst), 1);
}
