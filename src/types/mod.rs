use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ============= API Request/Response Types =============

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChatRequest {
    pub message: String,
    /// Prior conversation turns, oldest first. Empty for a fresh conversation.
    #[serde(default)]
    pub history: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChatResponse {
    pub response: String,
    pub context_id: String,
    pub finish_reason: String,
    pub round_trips: usize,
    pub tool_calls: Vec<ToolCallRecord>,
    pub created_at: DateTime<Utc>,
}

// ============= Conversation Types =============

/// A single message in a tool-calling conversation.
///
/// Conversations are append-only sequences of these; the orchestration loop
/// never mutates messages once they are in the history.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
    /// Tool calls requested by the assistant (Assistant role only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,
    /// Identifier correlating a tool result to its call (Tool role only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
    Tool,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }

    /// An assistant message, optionally carrying tool-call requests.
    pub fn assistant(content: impl Into<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
            tool_calls,
            tool_call_id: None,
        }
    }

    /// A tool-role message carrying one result, correlated by call id.
    pub fn tool_result(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Tool,
            content: content.into(),
            tool_calls: Vec::new(),
            tool_call_id: Some(tool_call_id.into()),
        }
    }
}

// ============= Tool Types =============

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// A model-issued request to execute a specific tool with specific arguments.
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub arguments: serde_json::Value,
}

/// Outcome of one tool invocation.
///
/// A `ToolOutcome` is never both successful and carrying an error message;
/// construct values through [`ToolOutcome::ok`] and [`ToolOutcome::fail`] to
/// keep that invariant.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ToolOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolOutcome {
    pub fn ok(data: serde_json::Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Record of a single tool call execution, kept for the API response and logs.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ToolCallRecord {
    /// Identifier assigned by the model.
    pub id: String,
    pub name: String,
    pub arguments: serde_json::Value,
    pub outcome: ToolOutcome,
    pub duration_ms: u64,
}

// ============= Retrieval Types =============

/// A ranked snippet returned by the retrieval pipeline.
///
/// Upstream payloads are tolerant-parsed once at the tool boundary: content
/// falls back `content` -> `text` -> `document`, score falls back `score` ->
/// `similarity` -> 0, and a missing id becomes `doc_{index}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedDocument {
    pub id: String,
    pub content: String,
    /// Relevance score, higher is more relevant. Never negative.
    pub score: f32,
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

/// One shaped result from the web search endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WebSearchHit {
    pub title: String,
    pub content: String,
    pub url: String,
    /// Provenance label, e.g. the abstract's attributed source.
    pub source: String,
    #[serde(rename = "type")]
    pub kind: String,
}

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Tool error: {0}")]
    Tool(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::Config(msg) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::Llm(msg) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::Tool(msg) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::NotFound(msg) => (axum::http::StatusCode::NOT_FOUND, msg),
            AppError::InvalidInput(msg) => (axum::http::StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = serde_json::json!({
            "error": message
        });

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
