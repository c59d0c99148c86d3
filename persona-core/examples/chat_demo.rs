//! Chat demo - one session against the configured backends
//!
//! Loads `persona.yaml` and the profile document it points to, then runs
//! a short scripted conversation through the gateway.
//!
//! Run with: cargo run --example chat_demo
//! Requires GROQ_API_KEY (and optionally OPENROUTER_API_KEY) to be set.

use persona_core::config;
use persona_core::http::HttpClient;
use persona_core::profile::Profile;
use persona_core::providers::CompletionGateway;
use persona_core::session::Session;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "persona_core=debug".into()),
        )
        .init();

    let config = match config::load_from_yaml("persona.yaml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("failed to load persona.yaml: {e}");
            return;
        }
    };

    let profile = match Profile::load_from_yaml(&config.profile) {
        Ok(profile) => profile,
        Err(e) => {
            eprintln!("failed to load profile '{}': {e}", config.profile);
            return;
        }
    };

    let client = HttpClient::new().expect("default client configuration is valid");
    let gateway = CompletionGateway::from_config(&config.backends, client);
    println!("backends: {:?}", gateway.backends());

    let mut session = Session::new(profile.system_prompt());

    let questions = if profile.example_questions.is_empty() {
        vec!["Who are you?".to_string()]
    } else {
        profile.example_questions.clone()
    };

    for question in questions.iter().take(3) {
        println!("\n> {question}");

        if let Err(e) = session.record_user_turn(question) {
            eprintln!("rejected: {e}");
            continue;
        }

        match gateway.complete(&session.build_request()).await {
            Ok(completion) => {
                println!("[{}] {}", completion.provider, completion.text);
                session.record_assistant_turn(&completion.text);
            }
            Err(e) => {
                eprintln!("turn failed: {e}");
                break;
            }
        }
    }
}
