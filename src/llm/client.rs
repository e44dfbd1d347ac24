//! LLM client abstraction
//!
//! A single trait sits between the orchestration loop and the completion
//! endpoint, so tests can substitute a scripted client and the loop never
//! needs to know which provider is behind it.

use crate::types::{ChatMessage, Result, ToolCall, ToolDefinition};
use async_trait::async_trait;

/// A chat-completion client capable of tool calling.
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Send the full message sequence plus tool descriptors to the model and
    /// return its next assistant turn.
    async fn complete(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolDefinition],
    ) -> Result<LLMResponse>;

    /// The model identifier this client talks to.
    fn model_name(&self) -> &str;
}

/// Response from one completion round-trip.
#[derive(Debug, Clone)]
pub struct LLMResponse {
    /// The text content of the response (may be empty on a pure tool turn).
    pub content: String,
    /// Tool calls requested by the model, in the order issued.
    pub tool_calls: Vec<ToolCall>,
    /// The reason generation stopped (e.g. "stop", "tool_calls", "length").
    pub finish_reason: String,
}

impl LLMResponse {
    /// Whether the model asked for tools instead of answering.
    pub fn wants_tools(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}
