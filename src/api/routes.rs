use crate::AppState;
use axum::{
    Json, Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::handlers::chat::chat,
        crate::api::handlers::chat::chat_stream,
        crate::api::handlers::tools::list_tools,
        crate::api::handlers::tools::health,
    ),
    components(schemas(
        crate::types::ChatRequest,
        crate::types::ChatResponse,
        crate::types::ChatMessage,
        crate::types::ToolDefinition,
        crate::types::ToolCall,
        crate::types::ToolCallRecord,
        crate::types::ToolOutcome,
    )),
    tags(
        (name = "chat", description = "Conversational endpoints"),
        (name = "tools", description = "Tool discovery"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

pub fn create_router() -> Router<AppState> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(crate::api::handlers::tools::health))
        .route("/api/tools", get(crate::api::handlers::tools::list_tools))
        .route("/api/chat", post(crate::api::handlers::chat::chat))
        .route(
            "/api/chat/stream",
            post(crate::api::handlers::chat::chat_stream),
        )
        .route(
            "/api/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
