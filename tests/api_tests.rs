//! Integration tests for the HTTP API.
//!
//! The router is wired with a scripted LLM client so requests exercise the
//! full handler + agent path without any network.

mod common;

use axum_test::TestServer;
use common::mocks::{MockLLMClient, call, text_turn, tool_turn};
use sage::utils::config::{Config, LlmConfig, RetrievalConfig, ServerConfig};
use sage::{Agent, AppState, LLMClient, tools};
use serde_json::{Value, json};
use std::sync::Arc;

fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        llm: LlmConfig {
            openai_api_key: "test-key".to_string(),
            api_base: "https://api.openai.example/v1".to_string(),
            model: "test-model".to_string(),
        },
        retrieval: RetrievalConfig {
            api_key: "test-key".to_string(),
            org_id: "org".to_string(),
            pipeline_id: "pipe".to_string(),
            base_url: "https://retrieval.example/v1".to_string(),
        },
    }
}

fn create_test_server(llm: impl LLMClient + 'static) -> TestServer {
    let config = Arc::new(test_config());
    let registry = Arc::new(tools::default_registry(&config.retrieval));
    let agent = Arc::new(Agent::new(Box::new(llm), registry));

    let state = AppState { config, agent };
    let app = sage::api::create_router().with_state(state);
    TestServer::new(app).expect("Failed to create test server")
}

#[tokio::test]
async fn test_health_endpoint() {
    let server = create_test_server(MockLLMClient::new("hi"));

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_list_tools() {
    let server = create_test_server(MockLLMClient::new("hi"));

    let response = server.get("/api/tools").await;

    response.assert_status_ok();
    let tools: Value = response.json();
    let names: Vec<&str> = tools
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"vectorize_retrieval"));
    assert!(names.contains(&"web_search"));

    // Each definition carries a JSON schema for the model request.
    for tool in tools.as_array().unwrap() {
        assert_eq!(tool["parameters"]["type"], "object");
    }
}

#[tokio::test]
async fn test_chat_returns_answer() {
    let server = create_test_server(MockLLMClient::new("Hello from the agent."));

    let response = server
        .post("/api/chat")
        .json(&json!({"message": "Hello"}))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["response"], "Hello from the agent.");
    assert_eq!(body["finish_reason"], "stop");
    assert_eq!(body["round_trips"], 1);
    assert!(body["tool_calls"].as_array().unwrap().is_empty());
    // A context id is assigned when the caller sends none.
    assert!(!body["context_id"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_chat_preserves_context_id() {
    let server = create_test_server(MockLLMClient::new("ok"));

    let response = server
        .post("/api/chat")
        .json(&json!({"message": "Hello", "context_id": "ctx-42"}))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["context_id"], "ctx-42");
}

#[tokio::test]
async fn test_chat_rejects_empty_message() {
    let server = create_test_server(MockLLMClient::new("unused"));

    let response = server
        .post("/api/chat")
        .json(&json!({"message": "   "}))
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("empty"));
}

#[tokio::test]
async fn test_chat_reports_tool_calls() {
    // The model asks for an unknown tool once, then answers; the record of
    // the failed call must surface in the response body.
    let llm = MockLLMClient::scripted(vec![
        tool_turn(vec![call("call_1", "no_such_tool", json!({}))]),
        text_turn("Answered anyway."),
    ]);
    let server = create_test_server(llm);

    let response = server
        .post("/api/chat")
        .json(&json!({"message": "Go"}))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["response"], "Answered anyway.");
    assert_eq!(body["round_trips"], 2);

    let records = body["tool_calls"].as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["name"], "no_such_tool");
    assert_eq!(records[0]["outcome"]["success"], false);
    assert_eq!(records[0]["outcome"]["error"], "Unknown tool: no_such_tool");
}

#[tokio::test]
async fn test_chat_uses_request_history() {
    let server = create_test_server(MockLLMClient::new("As I said, Paris."));

    let response = server
        .post("/api/chat")
        .json(&json!({
            "message": "Repeat that.",
            "history": [
                {"role": "user", "content": "Capital of France?"},
                {"role": "assistant", "content": "Paris."}
            ]
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["response"], "As I said, Paris.");
}

#[tokio::test]
async fn test_chat_stream_rejects_empty_message() {
    let server = create_test_server(MockLLMClient::new("unused"));

    let response = server
        .post("/api/chat/stream")
        .json(&json!({"message": ""}))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_chat_stream_emits_answer_event() {
    let server = create_test_server(MockLLMClient::new("Streamed answer."));

    let response = server
        .post("/api/chat/stream")
        .json(&json!({"message": "Hello"}))
        .await;

    response.assert_status_ok();
    let body = response.text();
    assert!(body.contains("\"event\":\"answer\""));
    assert!(body.contains("Streamed answer."));
}

#[tokio::test]
async fn test_openapi_document_served() {
    let server = create_test_server(MockLLMClient::new("hi"));

    let response = server.get("/api/openapi.json").await;

    response.assert_status_ok();
    let doc: Value = response.json();
    assert!(doc["paths"]["/api/chat"]["post"].is_object());
    assert!(doc["paths"]["/api/tools"]["get"].is_object());
}
