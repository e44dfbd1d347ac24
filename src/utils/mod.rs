//! Configuration utilities.

/// Environment-driven configuration loading.
pub mod config;

pub use config::Config;
