//! End-to-end turn flow: profile → session → gateway → transcript
//!
//! Mirrors how a consumer serves one connection: render the system prompt
//! once, then per turn record the user text, complete, and record the
//! assistant text back.

use persona_core::config::{BackendsConfig, GroqSettings, SecretString};
use persona_core::http::HttpClient;
use persona_core::profile::Profile;
use persona_core::providers::CompletionGateway;
use persona_core::session::Session;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PROFILE_YAML: &str = r#"
person:
  name: Sevil Aydin
  title: Software Engineer
  company: CTECH
skills:
  languages: ["C#", ".NET 8"]
example_questions:
  - "Who are you?"
"#;

fn gateway_for(server: &MockServer) -> CompletionGateway {
    let config = BackendsConfig {
        groq: Some(GroqSettings {
            api_key: SecretString::new("gsk-test"),
            model: "llama-3.3-70b-versatile".into(),
            base_url: server.uri(),
        }),
        openrouter: None,
        answer_api: None,
    };
    CompletionGateway::from_config(&config, HttpClient::new().unwrap())
}

#[tokio::test]
async fn two_turns_accumulate_history_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "I work at CTECH."}}]
        })))
        .expect(2)
        .mount(&server)
        .await;

    let profile: Profile = serde_yaml::from_str(PROFILE_YAML).unwrap();
    let mut session = Session::new(profile.system_prompt());
    let gateway = gateway_for(&server);

    // first turn
    session.record_user_turn("Where do you work?").unwrap();
    let completion = gateway.complete(&session.build_request()).await.unwrap();
    session.record_assistant_turn(&completion.text);

    // second turn: the request now carries the full history
    session.record_user_turn("And what do you build there?").unwrap();
    let messages = session.build_request();
    assert_eq!(messages.len(), 4);
    let completion = gateway.complete(&messages).await.unwrap();
    session.record_assistant_turn(&completion.text);

    assert_eq!(session.transcript().len(), 4);
}

#[tokio::test]
async fn second_turn_request_carries_first_exchange() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "answer"}}]
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    let mut session = Session::new("persona");
    let gateway = gateway_for(&server);

    session.record_user_turn("first question").unwrap();
    let completion = gateway.complete(&session.build_request()).await.unwrap();
    session.record_assistant_turn(&completion.text);

    session.record_user_turn("second question").unwrap();

    // the assembled second request must include the whole first exchange
    let expected = json!({
        "messages": [
            {"role": "system", "content": "persona"},
            {"role": "user", "content": "first question"},
            {"role": "assistant", "content": "answer"},
            {"role": "user", "content": "second question"}
        ]
    });
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(expected))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "second answer"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let completion = gateway.complete(&session.build_request()).await.unwrap();
    assert_eq!(completion.text, "second answer");
}

#[tokio::test]
async fn failed_turn_preserves_the_transcript_for_retry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut session = Session::new("persona");
    let gateway = gateway_for(&server);

    session.record_user_turn("doomed question").unwrap();
    let result = gateway.complete(&session.build_request()).await;
    assert!(result.is_err());

    // the caller keeps the transcript so the user may retry
    assert_eq!(session.transcript().len(), 1);
}
