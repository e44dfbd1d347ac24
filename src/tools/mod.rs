//! Built-in tools for agent capabilities
//!
//! This module provides the tool infrastructure that lets the agent go beyond
//! text generation: semantic retrieval from a hosted pipeline and public web
//! search.
//!
//! # Module Structure
//!
//! - [`registry`](crate::tools::registry) - Tool trait, registration and discovery
//! - [`retrieval`](crate::tools::retrieval) - Semantic retrieval pipeline integration
//! - [`web_search`](crate::tools::web_search) - DuckDuckGo Instant Answer search
//!
//! # Example
//!
//! ```ignore
//! let registry = tools::default_registry(&config.retrieval);
//! let definitions = registry.definitions(); // schemas for the model request
//! ```

/// Tool registry for managing available tools.
pub mod registry;
/// Semantic retrieval against the hosted pipeline.
pub mod retrieval;
/// Web search via the DuckDuckGo Instant Answer API.
pub mod web_search;

pub use registry::{Tool, ToolRegistry};
pub use retrieval::RetrievalTool;
pub use web_search::WebSearchTool;

use crate::utils::config::RetrievalConfig;
use std::sync::Arc;

/// Build the registry with the two standard tools.
pub fn default_registry(retrieval: &RetrievalConfig) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(RetrievalTool::new(retrieval)));
    registry.register(Arc::new(WebSearchTool::new()));
    registry
}
