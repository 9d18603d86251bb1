//! HTTP-level tests for `MistralProvider` against a mock chat-completion server

use casefile_domain::LlmProvider;
use casefile_llm::{LlmError, MistralProvider};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn completion(content: &str) -> serde_json::Value {
    json!({
        "id": "cmpl-1",
        "object": "chat.completion",
        "choices": [
            {"index": 0, "message": {"role": "assistant", "content": content}, "finish_reason": "stop"}
        ]
    })
}

async fn provider_for(server: &MockServer) -> MistralProvider {
    MistralProvider::new("test-key", server.uri(), "mistral-large-latest").unwrap()
}

#[tokio::test]
async fn returns_first_choice_content() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "model": "mistral-large-latest",
            "messages": [{"role": "user", "content": "extract this"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("{\"Clients\": null}")))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server).await;
    let reply = provider.generate("extract this").await.unwrap();

    assert_eq!(reply, "{\"Clients\": null}");
}

#[tokio::test]
async fn maps_429_to_rate_limit() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server).await;
    let err = provider.generate("x").await.unwrap_err();

    assert!(matches!(err, LlmError::RateLimitExceeded));
}

#[tokio::test]
async fn maps_404_to_model_not_available() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let provider = provider_for(&server).await;
    match provider.generate("x").await {
        Err(LlmError::ModelNotAvailable(model)) => assert_eq!(model, "mistral-large-latest"),
        other => panic!("Expected ModelNotAvailable, got {:?}", other),
    }
}

#[tokio::test]
async fn server_error_is_communication_and_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server).await;
    match provider.generate("x").await {
        Err(LlmError::Communication(msg)) => {
            assert!(msg.contains("500"));
            assert!(msg.contains("upstream exploded"));
        }
        other => panic!("Expected Communication error, got {:?}", other),
    }
}

#[tokio::test]
async fn empty_choices_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let provider = provider_for(&server).await;
    let err = provider.generate("x").await.unwrap_err();

    assert!(matches!(err, LlmError::InvalidResponse(_)));
}

#[tokio::test]
async fn malformed_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&server)
        .await;

    let provider = provider_for(&server).await;
    let err = provider.generate("x").await.unwrap_err();

    assert!(matches!(err, LlmError::InvalidResponse(_)));
}
