//! # S.A.G.E - Search Augmented Generation Engine
//!
//! A tool-calling chat agent that glues a chat-completion model to two
//! retrieval tools: a hosted semantic-search pipeline and a public web-search
//! endpoint. The model decides per turn whether to call zero, one, or both
//! tools before producing its final answer.
//!
//! ## Overview
//!
//! S.A.G.E can be used in two ways:
//!
//! 1. **As a standalone binary** - `sage-agent serve` (HTTP API),
//!    `sage-agent chat` (interactive), or `sage-agent demo`
//! 2. **As a library** - Import the agent and tools into your own project
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,ignore
//! use sage::{Agent, OpenAIClient, tools};
//! use std::sync::Arc;
//!
//! let config = sage::Config::from_env()?;
//! let llm = OpenAIClient::new(
//!     config.llm.openai_api_key.clone(),
//!     config.llm.api_base.clone(),
//!     config.llm.model.clone(),
//! );
//! let registry = Arc::new(tools::default_registry(&config.retrieval));
//! let agent = Agent::new(Box::new(llm), registry);
//!
//! let reply = agent.chat("How to call the API?", &[]).await;
//! println!("{}", reply.content);
//! ```
//!
//! ## Modules
//!
//! - [`agent`] - The bounded tool-calling orchestration loop
//! - [`api`] - REST API handlers and routes
//! - [`llm`] - Completion endpoint client abstraction
//! - [`tools`] - Tool registry, semantic retrieval, and web search
//! - [`types`] - Common types and error handling
//! - [`utils`] - Environment-driven configuration

/// The tool-calling orchestration loop.
pub mod agent;
/// HTTP API handlers and routes.
pub mod api;
/// Command-line interface.
pub mod cli;
/// Completion endpoint clients and abstractions.
pub mod llm;
/// Built-in tools (semantic retrieval, web search) and their registry.
pub mod tools;
/// Core types (requests, responses, errors).
pub mod types;
/// Configuration utilities.
pub mod utils;

// Re-export commonly used types
pub use agent::{Agent, AgentEvent, AgentReply, FinishReason, MAX_ROUND_TRIPS};
pub use llm::{LLMClient, LLMResponse, OpenAIClient};
pub use tools::{Tool, ToolRegistry};
pub use types::{AppError, Result};
pub use utils::Config;

use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration
    pub config: Arc<Config>,
    /// The chat agent (LLM client plus tool registry)
    pub agent: Arc<Agent>,
}
