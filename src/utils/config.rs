use crate::types::{AppError, Result};
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub retrieval: RetrievalConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    pub openai_api_key: String,
    pub api_base: String,
    pub model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RetrievalConfig {
    pub api_key: String,
    pub org_id: String,
    pub pipeline_id: String,
    pub base_url: String,
}

impl Config {
    /// Load configuration from the environment (and a `.env` file if present).
    ///
    /// Missing required credentials are a startup-time fatal condition: the
    /// returned error names the variable so the operator can fix it. Nothing
    /// here panics.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
                port: env::var("PORT")
                    .unwrap_or_else(|_| "3000".to_string())
                    .parse()
                    .map_err(|_| AppError::Config("PORT must be a number".to_string()))?,
            },
            llm: LlmConfig {
                openai_api_key: required("OPENAI_API_KEY")?,
                api_base: env::var("OPENAI_API_BASE")
                    .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
                model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            },
            retrieval: RetrievalConfig {
                api_key: required("VECTORIZE_API_KEY")?,
                org_id: required("VECTORIZE_ORG_ID")?,
                pipeline_id: required("VECTORIZE_PIPELINE_ID")?,
                base_url: env::var("VECTORIZE_API_BASE")
                    .unwrap_or_else(|_| "https://api.vectorize.io/v1".to_string()),
            },
        })
    }
}

fn required(name: &str) -> Result<String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AppError::Config(format!(
            "required environment variable {} is not set",
            name
        ))),
    }
}
