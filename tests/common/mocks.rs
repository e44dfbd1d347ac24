//! Mock implementations for testing.
//!
//! Provides a scripted LLM client usable across test files without
//! duplication: each call to `complete` consumes the next scripted turn,
//! allowing multi-round tool-calling conversations without a network.

use async_trait::async_trait;
use sage::llm::{LLMClient, LLMResponse};
use sage::types::{AppError, ChatMessage, Result, ToolCall, ToolDefinition};
use std::collections::VecDeque;
use std::sync::Mutex;

enum MockTurn {
    Respond(LLMResponse),
    Fail(String),
}

/// Scripted LLM client.
///
/// Turns are consumed in order. When the script runs dry, the last turn's
/// behavior repeats, so a single tool-calling turn simulates a model that
/// would chain tools forever.
pub struct MockLLMClient {
    script: Mutex<VecDeque<MockTurn>>,
    exhausted: Mutex<Option<MockTurn>>,
    /// Every message sequence this client has been called with.
    pub requests: Mutex<Vec<Vec<ChatMessage>>>,
}

impl MockLLMClient {
    /// A client that answers every call with the given text.
    pub fn new(response: &str) -> Self {
        Self::scripted(vec![text_turn(response)])
    }

    /// A client that plays the given turns in order, repeating the last one.
    pub fn scripted(turns: Vec<LLMResponse>) -> Self {
        Self {
            script: Mutex::new(turns.into_iter().map(MockTurn::Respond).collect()),
            exhausted: Mutex::new(None),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A client whose every call fails.
    pub fn failing(message: &str) -> Self {
        Self {
            script: Mutex::new(VecDeque::from([MockTurn::Fail(message.to_string())])),
            exhausted: Mutex::new(None),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Number of completion calls made so far.
    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

/// A plain-text assistant turn.
pub fn text_turn(content: &str) -> LLMResponse {
    LLMResponse {
        content: content.to_string(),
        tool_calls: vec![],
        finish_reason: "stop".to_string(),
    }
}

/// An assistant turn requesting the given tool calls.
pub fn tool_turn(calls: Vec<ToolCall>) -> LLMResponse {
    LLMResponse {
        content: String::new(),
        tool_calls: calls,
        finish_reason: "tool_calls".to_string(),
    }
}

/// Convenience constructor for a tool call.
pub fn call(id: &str, name: &str, arguments: serde_json::Value) -> ToolCall {
    ToolCall {
        id: id.to_string(),
        name: name.to_string(),
        arguments,
    }
}

#[async_trait]
impl LLMClient for MockLLMClient {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        _tools: &[ToolDefinition],
    ) -> Result<LLMResponse> {
        self.requests.lock().unwrap().push(messages.to_vec());

        let mut script = self.script.lock().unwrap();
        let turn = match script.pop_front() {
            Some(turn) => turn,
            None => {
                // Replay the last turn forever.
                let exhausted = self.exhausted.lock().unwrap();
                return match exhausted.as_ref() {
                    Some(MockTurn::Respond(response)) => Ok(response.clone()),
                    Some(MockTurn::Fail(message)) => Err(AppError::Llm(message.clone())),
                    None => Err(AppError::Llm("mock script is empty".to_string())),
                };
            }
        };

        let result = match &turn {
            MockTurn::Respond(response) => Ok(response.clone()),
            MockTurn::Fail(message) => Err(AppError::Llm(message.clone())),
        };
        *self.exhausted.lock().unwrap() = Some(turn);
        result
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}
