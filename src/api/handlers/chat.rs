use crate::{
    AppState,
    agent::AgentEvent,
    types::{AppError, ChatRequest, ChatResponse, Result},
};
use axum::{
    Json,
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use chrono::Utc;
use futures::{Stream, StreamExt};
use uuid::Uuid;

/// Chat with the AI assistant
#[utoipa::path(
    post,
    path = "/api/chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Chat response", body = ChatResponse),
        (status = 400, description = "Invalid input")
    ),
    tag = "chat"
)]
pub async fn chat(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>> {
    if payload.message.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "message cannot be empty".to_string(),
        ));
    }

    let context_id = payload
        .context_id
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let reply = state.agent.chat(&payload.message, &payload.history).await;

    Ok(Json(ChatResponse {
        response: reply.content,
        context_id,
        finish_reason: reply.finish_reason.to_string(),
        round_trips: reply.round_trips,
        tool_calls: reply.tool_calls,
        created_at: Utc::now(),
    }))
}

/// Chat with the AI assistant, streaming progress events over SSE
///
/// Emits `tool_call_started` and `tool_call_finished` events while the loop
/// runs, then a final `answer` event.
#[utoipa::path(
    post,
    path = "/api/chat/stream",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "SSE stream of agent events"),
        (status = 400, description = "Invalid input")
    ),
    tag = "chat"
)]
pub async fn chat_stream(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Sse<impl Stream<Item = std::result::Result<Event, axum::Error>>>> {
    if payload.message.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "message cannot be empty".to_string(),
        ));
    }

    let stream = state
        .agent
        .clone()
        .chat_stream(payload.message, payload.history)
        .map(|event: AgentEvent| Event::default().json_data(&event));

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}
