//! Agent orchestration loop
//!
//! Drives the conversation between the completion model and the tool
//! registry: send the running message sequence plus tool schemas to the
//! model; if it requests tool calls, execute them, append their results as
//! tool-role messages, and re-invoke the model; otherwise the response text
//! is the final answer. The automatic cycle is bounded by
//! [`MAX_ROUND_TRIPS`] so a model cannot chain tool calls indefinitely.
//!
//! Failure semantics: errors contacting the completion endpoint are caught at
//! the loop boundary and converted into an apologetic answer; tool failures
//! and unknown tool names become failed tool-role messages and the loop
//! continues. The message sequence is append-only throughout.

use crate::llm::LLMClient;
use crate::tools::ToolRegistry;
use crate::types::{ChatMessage, MessageRole, ToolCall, ToolCallRecord, ToolOutcome};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

/// Maximum model round-trips per chat turn.
pub const MAX_ROUND_TRIPS: usize = 5;

const SYSTEM_PROMPT: &str = "You are a helpful AI assistant with access to two powerful tools:

1. vectorize_retrieval: Search and retrieve relevant documents from a knowledge base using semantic search
2. web_search: Search the internet for current information and news

Use these tools strategically:
- Use vectorize_retrieval for finding information that might be in your knowledge base
- Use web_search for current events, recent information, or when the knowledge base doesn't have relevant results
- You can use both tools in sequence for comprehensive answers
- Always explain your reasoning and cite your sources

Be conversational, helpful, and thorough in your responses.";

const EMPTY_ANSWER: &str = "I apologize, but I couldn't generate a response.";

/// Why a chat turn ended.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// Model produced a plain-text answer.
    Stop,
    /// Hit the round-trip bound; the reply carries whatever partial answer exists.
    MaxRoundTrips,
    /// The completion endpoint failed; the reply is an apology carrying the error.
    Error(String),
}

impl std::fmt::Display for FinishReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FinishReason::Stop => write!(f, "stop"),
            FinishReason::MaxRoundTrips => write!(f, "max_round_trips"),
            FinishReason::Error(e) => write!(f, "error: {}", e),
        }
    }
}

/// Result of one complete chat turn.
#[derive(Debug, Clone)]
pub struct AgentReply {
    /// Final answer text. Never empty.
    pub content: String,
    pub finish_reason: FinishReason,
    /// Model round-trips performed (1..=MAX_ROUND_TRIPS).
    pub round_trips: usize,
    /// All tool calls executed, in the order the model issued them.
    pub tool_calls: Vec<ToolCallRecord>,
    /// The full message sequence after the turn, for callers keeping history.
    pub messages: Vec<ChatMessage>,
}

/// Progress event emitted by [`Agent::chat_stream`].
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AgentEvent {
    ToolCallStarted {
        id: String,
        name: String,
        arguments: serde_json::Value,
    },
    ToolCallFinished {
        #[serde(flatten)]
        record: ToolCallRecord,
    },
    Answer {
        content: String,
        finish_reason: String,
        round_trips: usize,
    },
}

/// The tool-calling chat agent.
pub struct Agent {
    llm: Box<dyn LLMClient>,
    tools: Arc<ToolRegistry>,
    system_prompt: String,
    max_round_trips: usize,
}

impl Agent {
    pub fn new(llm: Box<dyn LLMClient>, tools: Arc<ToolRegistry>) -> Self {
        Self {
            llm,
            tools,
            system_prompt: SYSTEM_PROMPT.to_string(),
            max_round_trips: MAX_ROUND_TRIPS,
        }
    }

    /// Override the system prompt (the default describes the two standard tools).
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    pub fn tools(&self) -> &Arc<ToolRegistry> {
        &self.tools
    }

    pub fn model_name(&self) -> &str {
        self.llm.model_name()
    }

    /// Run one chat turn to completion.
    ///
    /// Infallible by design: every runtime failure degrades to a reported
    /// answer so the conversation stays alive.
    pub async fn chat(&self, input: &str, history: &[ChatMessage]) -> AgentReply {
        self.run(input, history, None).await
    }

    /// Run one chat turn, yielding progress events (tool call lifecycle and
    /// the final answer) as they happen.
    pub fn chat_stream(
        self: Arc<Self>,
        input: String,
        history: Vec<ChatMessage>,
    ) -> impl futures::Stream<Item = AgentEvent> {
        let (tx, mut rx) = mpsc::channel(16);
        tokio::spawn(async move {
            self.run(&input, &history, Some(&tx)).await;
        });

        async_stream::stream! {
            while let Some(event) = rx.recv().await {
                yield event;
            }
        }
    }

    async fn run(
        &self,
        input: &str,
        history: &[ChatMessage],
        events: Option<&mpsc::Sender<AgentEvent>>,
    ) -> AgentReply {
        let tools = self.tools.definitions();

        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(ChatMessage::system(&self.system_prompt));
        messages.extend_from_slice(history);
        messages.push(ChatMessage::user(input));

        let mut records: Vec<ToolCallRecord> = Vec::new();

        for round in 0..self.max_round_trips {
            let response = match self.llm.complete(&messages, &tools).await {
                Ok(response) => response,
                Err(e) => {
                    tracing::warn!(error = %e, round, "completion endpoint failed");
                    let content = format!("I encountered an error: {}. Please try again.", e);
                    return self
                        .finish(
                            content,
                            FinishReason::Error(e.to_string()),
                            round + 1,
                            records,
                            messages,
                            events,
                        )
                        .await;
                }
            };

            messages.push(ChatMessage::assistant(
                &response.content,
                response.tool_calls.clone(),
            ));

            if !response.wants_tools() {
                let content = if response.content.trim().is_empty() {
                    EMPTY_ANSWER.to_string()
                } else {
                    response.content
                };
                return self
                    .finish(
                        content,
                        FinishReason::Stop,
                        round + 1,
                        records,
                        messages,
                        events,
                    )
                    .await;
            }

            tracing::info!(
                round,
                calls = response.tool_calls.len(),
                "executing tool calls"
            );

            // Independent read-only calls run concurrently; join_all hands
            // results back in request order so each tool-role message stays
            // correlated with its call id.
            let round_records = join_all(
                response
                    .tool_calls
                    .iter()
                    .map(|call| self.execute_one(call, events)),
            )
            .await;

            for record in round_records {
                messages.push(ChatMessage::tool_result(
                    &record.id,
                    self.tool_message_content(&record),
                ));
                records.push(record);
            }
        }

        // Round-trip bound hit; surface whatever partial answer exists.
        let content = messages
            .iter()
            .rev()
            .find(|m| m.role == MessageRole::Assistant && !m.content.trim().is_empty())
            .map(|m| m.content.clone())
            .unwrap_or_else(|| EMPTY_ANSWER.to_string());

        self.finish(
            content,
            FinishReason::MaxRoundTrips,
            self.max_round_trips,
            records,
            messages,
            events,
        )
        .await
    }

    async fn finish(
        &self,
        content: String,
        finish_reason: FinishReason,
        round_trips: usize,
        tool_calls: Vec<ToolCallRecord>,
        messages: Vec<ChatMessage>,
        events: Option<&mpsc::Sender<AgentEvent>>,
    ) -> AgentReply {
        if let Some(tx) = events {
            let _ = tx
                .send(AgentEvent::Answer {
                    content: content.clone(),
                    finish_reason: finish_reason.to_string(),
                    round_trips,
                })
                .await;
        }

        AgentReply {
            content,
            finish_reason,
            round_trips,
            tool_calls,
            messages,
        }
    }

    async fn execute_one(
        &self,
        call: &ToolCall,
        events: Option<&mpsc::Sender<AgentEvent>>,
    ) -> ToolCallRecord {
        if let Some(tx) = events {
            let _ = tx
                .send(AgentEvent::ToolCallStarted {
                    id: call.id.clone(),
                    name: call.name.clone(),
                    arguments: call.arguments.clone(),
                })
                .await;
        }

        let start = Instant::now();
        let outcome = match self.tools.get(&call.name) {
            Some(tool) => tool.execute(call.arguments.clone()).await,
            None => {
                tracing::warn!(tool = %call.name, "model requested unknown tool");
                ToolOutcome::fail(format!("Unknown tool: {}", call.name))
            }
        };

        let record = ToolCallRecord {
            id: call.id.clone(),
            name: call.name.clone(),
            arguments: call.arguments.clone(),
            outcome,
            duration_ms: start.elapsed().as_millis() as u64,
        };

        tracing::debug!(
            tool = %record.name,
            success = record.outcome.success,
            duration_ms = record.duration_ms,
            "tool call finished"
        );

        if let Some(tx) = events {
            let _ = tx
                .send(AgentEvent::ToolCallFinished {
                    record: record.clone(),
                })
                .await;
        }

        record
    }

    /// Content of the tool-role message sent back to the model for one result.
    fn tool_message_content(&self, record: &ToolCallRecord) -> String {
        if record.outcome.success {
            return record
                .outcome
                .data
                .as_ref()
                .map(|data| serde_json::to_string(data).unwrap_or_else(|_| "{}".to_string()))
                .unwrap_or_else(|| "{}".to_string());
        }

        let error = record.outcome.error.as_deref().unwrap_or("unknown error");
        if self.tools.has_tool(&record.name) {
            format!("Tool {} error: {}", record.name, error)
        } else {
            // Reads exactly "Unknown tool: {name}"
            error.to_string()
        }
    }
}
