//! Web search tool
//!
//! Queries the DuckDuckGo Instant Answer API (free, no credentials) and shapes
//! the response into a small ranked list of hits. Shaping priority: instant
//! answer abstract, related topics, definition, then the generic results list.
//! A successful call never produces an empty list; when upstream has nothing
//! usable, exactly one placeholder hit pointing at a search URL is returned.

use crate::tools::registry::Tool;
use crate::types::{ToolOutcome, WebSearchHit};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;

const SEARCH_TIMEOUT: Duration = Duration::from_secs(8);
const DEFAULT_MAX_RESULTS: usize = 5;
const USER_AGENT: &str = concat!("sage-agent/", env!("CARGO_PKG_VERSION"));

pub struct WebSearchTool {
    client: reqwest::Client,
    endpoint: String,
}

impl Default for WebSearchTool {
    fn default() -> Self {
        Self::new()
    }
}

impl WebSearchTool {
    pub fn new() -> Self {
        Self::with_endpoint("https://api.duckduckgo.com/")
    }

    /// Point the tool at a different endpoint. Used by tests.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(SEARCH_TIMEOUT)
                .user_agent(USER_AGENT)
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into(),
        }
    }
}

/// Wire shape of the Instant Answer API, resolved once here. Every field is
/// optional and independently present or absent.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct InstantAnswer {
    #[serde(rename = "Abstract")]
    abstract_text: String,
    #[serde(rename = "AbstractURL")]
    abstract_url: String,
    #[serde(rename = "AbstractSource")]
    abstract_source: String,
    #[serde(rename = "Heading")]
    heading: String,
    #[serde(rename = "RelatedTopics")]
    related_topics: Vec<RelatedTopic>,
    #[serde(rename = "Definition")]
    definition: String,
    #[serde(rename = "DefinitionURL")]
    definition_url: String,
    #[serde(rename = "DefinitionSource")]
    definition_source: String,
    #[serde(rename = "Results")]
    results: Vec<RelatedTopic>,
}

/// Entry in `RelatedTopics` or `Results`. Topic groups (which carry a nested
/// `Topics` list instead of `Text`/`FirstURL`) deserialize with both fields
/// absent and are skipped during shaping.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RelatedTopic {
    #[serde(rename = "Text")]
    text: String,
    #[serde(rename = "FirstURL")]
    first_url: String,
}

impl RelatedTopic {
    /// The segment before the first " - " becomes the title; the full text
    /// stays as the snippet.
    fn title(&self) -> &str {
        self.text.split(" - ").next().unwrap_or(&self.text)
    }
}

/// Shape an upstream payload into at most `max_results` hits.
fn shape_hits(answer: &InstantAnswer, query: &str, max_results: usize) -> Vec<WebSearchHit> {
    let mut hits: Vec<WebSearchHit> = Vec::new();

    if !answer.abstract_text.trim().is_empty() {
        hits.push(WebSearchHit {
            title: if answer.heading.is_empty() {
                "Instant Answer".to_string()
            } else {
                answer.heading.clone()
            },
            content: answer.abstract_text.clone(),
            url: answer.abstract_url.clone(),
            source: if answer.abstract_source.is_empty() {
                "DuckDuckGo".to_string()
            } else {
                answer.abstract_source.clone()
            },
            kind: "instant_answer".to_string(),
        });
    }

    for topic in answer
        .related_topics
        .iter()
        .filter(|t| !t.text.is_empty() && !t.first_url.is_empty())
        .take(max_results.saturating_sub(hits.len()))
    {
        hits.push(WebSearchHit {
            title: topic.title().to_string(),
            content: topic.text.clone(),
            url: topic.first_url.clone(),
            source: "DuckDuckGo".to_string(),
            kind: "related_topic".to_string(),
        });
    }

    if !answer.definition.is_empty() && !answer.definition_url.is_empty() {
        hits.push(WebSearchHit {
            title: format!("Definition: {}", query),
            content: answer.definition.clone(),
            url: answer.definition_url.clone(),
            source: if answer.definition_source.is_empty() {
                "Dictionary".to_string()
            } else {
                answer.definition_source.clone()
            },
            kind: "definition".to_string(),
        });
    }

    if hits.len() < max_results {
        for result in answer
            .results
            .iter()
            .filter(|r| !r.text.is_empty() && !r.first_url.is_empty())
            .take(max_results - hits.len())
        {
            hits.push(WebSearchHit {
                title: result.title().to_string(),
                content: result.text.clone(),
                url: result.first_url.clone(),
                source: "DuckDuckGo".to_string(),
                kind: "search_result".to_string(),
            });
        }
    }

    // Callers can always act on a non-empty list when the call succeeded.
    if hits.is_empty() {
        hits.push(WebSearchHit {
            title: format!("Search results for \"{}\"", query),
            content: format!(
                "No instant answer available for \"{}\". Follow the link for full web results.",
                query
            ),
            url: format!("https://duckduckgo.com/?q={}", urlencoding::encode(query)),
            source: "DuckDuckGo".to_string(),
            kind: "placeholder".to_string(),
        });
    }

    hits.truncate(max_results);
    hits
}

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> &str {
        "web_search"
    }

    fn description(&self) -> &str {
        "Search the internet for current information and news"
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search query to find information on the web"
                },
                "max_results": {
                    "type": "integer",
                    "description": "Maximum number of search results to return (default: 5)",
                    "default": DEFAULT_MAX_RESULTS
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

        let max_results = args
            .get("max_results")
            .and_then(|v| v.as_u64())
            .filter(|&n| n > 0)
            .map(|n| n as usize)
            .unwrap_or(DEFAULT_MAX_RESULTS);

        tracing::debug!(query = %query, max_results, "web search request");

        let response = match self
            .client
            .get(&self.endpoint)
            .query(&[
                ("q", query.as_str()),
                ("format", "json"),
                ("no_html", "1"),
                ("skip_disambig", "1"),
            ])
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "web search request failed");
                return ToolOutcome::fail(format!("Network error: {}", e));
            }
        };

        let status = response.status();
        if !status.is_success() {
            return ToolOutcome::fail(format!("Search API error: {}", status.as_u16()));
        }

        let answer: InstantAnswer = match response.json().await {
            Ok(answer) => answer,
            Err(e) => return ToolOutcome::fail(format!("Invalid response body: {}", e)),
        };

        let hits = shape_hits(&answer, &query, max_results);
        tracing::info!(count = hits.len(), "web search returned");

        ToolOutcome::ok(json!({
            "query": query,
            "results": hits,
            "count": hits.len(),
            "source": "DuckDuckGo API",
        }))
    }
}
