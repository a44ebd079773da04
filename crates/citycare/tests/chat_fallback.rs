//! Scenarios for the two-tier assistant: a live upstream, a failing
//! upstream, and an upstream that answers with garbage. The observable
//! contract is that anything short of a well-formed 2xx reply leaves the
//! citizen talking to the local intent classifier.

use std::sync::Arc;
use std::time::Duration;

use citycare::assistant::{classify, AssistantGateway, ChatPrompt, RemoteChatBackend};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn remote_gateway(uri: &str) -> AssistantGateway<RemoteChatBackend> {
    let backend = RemoteChatBackend::new(
        format!("{uri}/v1/chat"),
        Duration::from_secs(2),
    )
    .expect("client builds");
    AssistantGateway::new(Arc::new(backend))
}

#[tokio::test]
async fn upstream_reply_text_wins_but_actions_stay_local() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "reply": "Crews are on it." })),
        )
        .mount(&mock_server)
        .await;

    let gateway = remote_gateway(&mock_server.uri());
    let prompt = ChatPrompt::new("I want to report a pothole", "en");

    let reply = gateway.respond(&prompt).await;
    let local = classify(&prompt.message);

    assert_eq!(reply.response, "Crews are on it.");
    assert_eq!(reply.category, local.category);
    assert_eq!(reply.actions, local.actions);
}

#[tokio::test]
async fn non_success_status_degrades_to_the_classifier() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&mock_server)
        .await;

    let gateway = remote_gateway(&mock_server.uri());
    let prompt = ChatPrompt::new("track my complaint status", "en");

    let reply = gateway.respond(&prompt).await;

    assert_eq!(reply, classify(&prompt.message));
}

#[tokio::test]
async fn malformed_body_degrades_to_the_classifier() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&mock_server)
        .await;

    let gateway = remote_gateway(&mock_server.uri());
    let prompt = ChatPrompt::new("garbage was not collected", "hi");

    let reply = gateway.respond(&prompt).await;

    assert_eq!(reply, classify(&prompt.message));
}

#[tokio::test]
async fn unreachable_upstream_degrades_to_the_classifier() {
    // Nothing listens here; the connection itself fails.
    let gateway = remote_gateway("http://127.0.0.1:9");
    let prompt = ChatPrompt::new("is there a map of issues?", "en");

    let reply = gateway.respond(&prompt).await;

    assert_eq!(reply, classify(&prompt.message));
}
