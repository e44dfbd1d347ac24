//! HTTP API Handlers and Routes
//!
//! This module provides the REST API layer for S.A.G.E, built on the Axum
//! web framework.
//!
//! # API Endpoints
//!
//! - `GET /health` - Liveness check
//! - `GET /api/tools` - Descriptors for the tools available to the agent
//! - `POST /api/chat` - Run one chat turn, unary response
//! - `POST /api/chat/stream` - Run one chat turn, SSE stream of agent events
//! - `GET /api/openapi.json` - OpenAPI document

/// Request and response handlers for all API endpoints.
pub mod handlers;
/// Router configuration and route definitions.
pub mod routes;

pub use routes::create_router;
