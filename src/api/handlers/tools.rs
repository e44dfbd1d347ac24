use crate::{AppState, types::ToolDefinition};
use axum::{Json, extract::State};

/// List the tools available to the agent
#[utoipa::path(
    get,
    path = "/api/tools",
    responses(
        (status = 200, description = "Tool descriptors", body = [ToolDefinition])
    ),
    tag = "tools"
)]
pub async fn list_tools(State(state): State<AppState>) -> Json<Vec<ToolDefinition>> {
    Json(state.agent.tools().definitions())
}

/// Liveness check
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up")),
    tag = "health"
)]
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
