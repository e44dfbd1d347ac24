//! Semantic retrieval tool
//!
//! Sends a natural-language question to the hosted retrieval pipeline and
//! returns ranked text snippets. Upstream field variance (`content` vs `text`
//! vs `document`, `score` vs `similarity`) is resolved once here, at the
//! boundary, into [`RetrievedDocument`] values.

use crate::tools::registry::Tool;
use crate::types::{RetrievedDocument, ToolOutcome};
use crate::utils::config::RetrievalConfig;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;

const RETRIEVAL_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_TOP_K: usize = 5;

pub struct RetrievalTool {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl RetrievalTool {
    pub fn new(config: &RetrievalConfig) -> Self {
        let endpoint = format!(
            "{}/org/{}/pipelines/{}/retrieval",
            config.base_url.trim_end_matches('/'),
            config.org_id,
            config.pipeline_id
        );

        Self {
            client: reqwest::Client::builder()
                .timeout(RETRIEVAL_TIMEOUT)
                .build()
                .unwrap_or_default(),
            endpoint,
            api_key: config.api_key.clone(),
        }
    }
}

/// Wire shape of the pipeline response. Both list keys have been observed
/// upstream; `documents` wins when both are present.
#[derive(Debug, Deserialize)]
struct PipelineResponse {
    documents: Option<Vec<RawDocument>>,
    results: Option<Vec<RawDocument>>,
}

#[derive(Debug, Deserialize)]
struct RawDocument {
    id: Option<String>,
    content: Option<String>,
    text: Option<String>,
    document: Option<String>,
    score: Option<f32>,
    similarity: Option<f32>,
    metadata: Option<serde_json::Map<String, Value>>,
}

impl RawDocument {
    fn resolve(self, index: usize) -> RetrievedDocument {
        RetrievedDocument {
            id: self.id.unwrap_or_else(|| format!("doc_{}", index)),
            content: self
                .content
                .or(self.text)
                .or(self.document)
                .unwrap_or_default(),
            score: self.score.or(self.similarity).unwrap_or(0.0).max(0.0),
            metadata: self.metadata.unwrap_or_default(),
        }
    }
}

#[async_trait]
impl Tool for RetrievalTool {
    fn name(&self) -> &str {
        "vectorize_retrieval"
    }

    fn description(&self) -> &str {
        "Retrieve relevant documents from the knowledge base using semantic search"
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search query to find relevant documents"
                },
                "top_k": {
                    "type": "integer",
                    "description": "Number of top results to return (default: 5)",
                    "default": DEFAULT_TOP_K
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, args: Value) -> ToolOutcome {
        let query = args
            .get("query")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .trim()
            .to_string();

        if query.is_empty() {
            return ToolOutcome::fail("Query parameter is required and cannot be empty");
        }

        let top_k = args
            .get("top_k")
            .and_then(|v| v.as_u64())
            .filter(|&n| n > 0)
            .map(|n| n as usize)
            .unwrap_or(DEFAULT_TOP_K);

        tracing::debug!(query = %query, top_k, "retrieval pipeline request");

        let response = match self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&json!({ "question": query, "numResults": top_k }))
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "retrieval request failed");
                return ToolOutcome::fail(format!("Network error: {}", e));
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return ToolOutcome::fail(format!("API error: {} - {}", status.as_u16(), body));
        }

        let payload: PipelineResponse = match response.json().await {
            Ok(payload) => payload,
            Err(e) => return ToolOutcome::fail(format!("Invalid response body: {}", e)),
        };

        // Tolerate a missing documents array entirely.
        let documents: Vec<RetrievedDocument> = payload
            .documents
            .or(payload.results)
            .unwrap_or_default()
            .into_iter()
            .take(top_k)
            .enumerate()
            .map(|(index, raw)| raw.resolve(index))
            .collect();

        tracing::info!(count = documents.len(), "retrieval pipeline returned");

        ToolOutcome::ok(json!({
            "query": query,
            "documents": documents,
            "count": documents.len(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tool() -> RetrievalTool {
        RetrievalTool::new(&RetrievalConfig {
            api_key: "test-key".to_string(),
            org_id: "org".to_string(),
            pipeline_id: "pipe".to_string(),
            base_url: "https://api.vectorize.example/v1".to_string(),
        })
    }

    #[test]
    fn test_endpoint_construction() {
        let tool = tool();
        assert_eq!(
            tool.endpoint,
            "https://api.vectorize.example/v1/org/org/pipelines/pipe/retrieval"
        );
    }

    #[test]
    fn test_schema_requires_query() {
        let schema = tool().parameters_schema();
        assert_eq!(schema["type"], "object");
        assert!(
            schema["required"]
                .as_array()
                .unwrap()
                .contains(&json!("query"))
        );
    }

    #[tokio::test]
    async fn test_empty_query_fails_without_network() {
        // base_url is unroutable; a network attempt would error differently
        let outcome = tool().execute(json!({ "query": "   " })).await;
        assert!(!outcome.success);
        assert!(outcome.error.unwrap().contains("cannot be empty"));
    }

    #[tokio::test]
    async fn test_missing_query_fails() {
        let outcome = tool().execute(json!({})).await;
        assert!(!outcome.success);
    }

    #[test]
    fn test_raw_document_fallback_order() {
        let raw: RawDocument = serde_json::from_value(json!({
            "text": "from text field",
            "similarity": 0.42
        }))
        .unwrap();
        let doc = raw.resolve(3);
        assert_eq!(doc.id, "doc_3");
        assert_eq!(doc.content, "from text field");
        assert!((doc.score - 0.42).abs() < f32::EPSILON);
        assert!(doc.metadata.is_empty());
    }

    #[test]
    fn test_negative_score_clamped() {
        let raw: RawDocument = serde_json::from_value(json!({
            "content": "x",
            "score": -0.5
        }))
        .unwrap();
        assert_eq!(raw.resolve(0).score, 0.0);
    }
}
