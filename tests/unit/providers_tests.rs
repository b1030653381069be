/*!
 * Tests for chat-completion wire types and the mock provider
 */

use serde_json::Value;

use srtrans::providers::{ChatRequest, ChatResponse, Provider};
use crate::common::mock_providers::{MockErrorType, MockProvider};

/// Test the request builder assembles the expected payload
#[test]
fn test_chat_request_builder_shouldSerializeExpectedShape() {
    let request = ChatRequest::new("gpt-4o-mini", 1024)
        .temperature(0.3)
        .add_message("system", "Translate this into es: [1] Hello");

    let json: Value = serde_json::to_value(&request).unwrap();

    assert_eq!(json["model"], "gpt-4o-mini");
    assert_eq!(json["max_tokens"], 1024);
    assert_eq!(json["messages"][0]["role"], "system");
    assert_eq!(json["messages"][0]["content"], "Translate this into es: [1] Hello");
    assert!((json["temperature"].as_f64().unwrap() - 0.3).abs() < 1e-6);
}

/// Test an unset temperature is omitted from the payload
#[test]
fn test_chat_request_withoutTemperature_shouldOmitField() {
    let request = ChatRequest::new("gpt-4o-mini", 256).add_message("system", "hi");
    let json: Value = serde_json::to_value(&request).unwrap();

    assert!(json.get("temperature").is_none());
}

/// Test response deserialization from a service-shaped body
#[test]
fn test_chat_response_deserialization_shouldExposeFirstContent() {
    let body = r#"{
        "choices": [
            { "message": { "role": "assistant", "content": "[1] Hola" } }
        ],
        "usage": { "prompt_tokens": 12, "completion_tokens": 4, "total_tokens": 16 }
    }"#;

    let response: ChatResponse = serde_json::from_str(body).unwrap();

    assert_eq!(response.first_content(), Some("[1] Hola"));
    assert_eq!(response.usage.as_ref().unwrap().total_tokens, 16);
}

/// Test a response without choices yields no content
#[test]
fn test_chat_response_withNoChoices_shouldReturnNone() {
    let response: ChatResponse = serde_json::from_str(r#"{ "choices": [] }"#).unwrap();
    assert!(response.first_content().is_none());
}

/// Test the mock provider records calls and returns scripted text
#[tokio::test]
async fn test_mock_provider_withScriptedResponses_shouldReplayInOrder() {
    let provider = MockProvider::with_responses(vec![
        "first reply".to_string(),
        "second reply".to_string(),
    ]);
    let tracker = provider.tracker();

    let request = ChatRequest::new("mock", 10).add_message("system", "one");
    let response = provider.complete(request).await.unwrap();
    assert_eq!(response.first_content(), Some("first reply"));

    let request = ChatRequest::new("mock", 10).add_message("system", "two");
    let response = provider.complete(request).await.unwrap();
    assert_eq!(response.first_content(), Some("second reply"));

    let tracker = tracker.lock().unwrap();
    assert_eq!(tracker.call_count, 2);
    assert_eq!(tracker.last_prompt.as_deref(), Some("two"));
}

/// Test the mock provider simulates each failure mode
#[tokio::test]
async fn test_mock_provider_withFailureConfigured_shouldReturnError() {
    let provider = MockProvider::new();

    provider.fail_next_call(MockErrorType::Auth);
    let request = ChatRequest::new("mock", 10).add_message("system", "hello");
    assert!(provider.complete(request).await.is_err());

    // The failure flag resets after one call
    let request = ChatRequest::new("mock", 10).add_message("system", "hello");
    assert!(provider.complete(request).await.is_ok());
}
