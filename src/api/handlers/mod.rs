//! API request handlers.
//!
//! This module contains all HTTP request handlers organized by functionality.

/// Chat and streaming handlers.
pub mod chat;
/// Tool discovery and health handlers.
pub mod tools;
