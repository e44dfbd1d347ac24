//! Completion endpoint clients.
//!
//! [`LLMClient`] is the seam between the orchestration loop and the model
//! provider; [`openai`] holds the async-openai implementation used in
//! production. Tests substitute their own scripted implementations.

/// Core LLM client trait and response types.
pub mod client;
/// OpenAI-compatible chat-completion client.
pub mod openai;

pub use client::{LLMClient, LLMResponse};
pub use openai::OpenAIClient;
