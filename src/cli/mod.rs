//! CLI module for sage-agent
//!
//! Provides command-line interface parsing and handling for the sage-agent
//! binary. Uses clap for argument parsing and owo-colors for colored output.

pub mod output;

use crate::agent::Agent;
use crate::types::ChatMessage;
use clap::{Parser, Subcommand};
use output::Output;
use serde_json::json;
use tokio::io::{AsyncBufReadExt, BufReader};

/// S.A.G.E - Search Augmented Generation Engine
///
/// A tool-calling chat agent that combines a semantic retrieval pipeline with
/// public web search behind a chat-completion model.
#[derive(Parser, Debug)]
#[command(
    name = "sage-agent",
    author = "Dirmacs <build@dirmacs.com>",
    version,
    about = "S.A.G.E - Search Augmented Generation Engine",
    long_about = "A tool-calling chat agent combining semantic retrieval and web search.\n\n\
                  Run 'serve' to start the HTTP server, 'chat' for an interactive\n\
                  session, or 'demo' for a fixed non-interactive demonstration.",
    after_help = "EXAMPLES:\n    \
                  sage-agent serve              # Start the HTTP server\n    \
                  sage-agent chat               # Interactive chat (quit/exit to leave)\n    \
                  sage-agent demo               # Run the demonstration sequence"
)]
pub struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server exposing the chat API
    Serve {
        /// Host address to bind (overrides HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides PORT)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Interactive chat session; type 'quit' or 'exit' to leave
    Chat,

    /// Run a fixed demonstration sequence and exit
    Demo,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Interactive read-eval loop over stdin.
pub async fn repl(agent: &Agent, out: &Output) {
    out.banner();
    out.info(&format!(
        "Agent ready ({}). Type your questions, or 'quit' to exit.",
        agent.model_name()
    ));
    out.info(&format!(
        "Available tools: {}",
        agent.tools().tool_names().join(", ")
    ));
    println!();

    let mut history: Vec<ChatMessage> = Vec::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        out.prompt();
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                out.error(&format!("Failed to read input: {}", e));
                break;
            }
        };

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("exit") {
            break;
        }

        let reply = agent.chat(input, &history).await;
        for record in &reply.tool_calls {
            out.info(&format!(
                "used {} ({} ms, {})",
                record.name,
                record.duration_ms,
                if record.outcome.success { "ok" } else { "failed" }
            ));
        }
        out.assistant(&reply.content);

        history.push(ChatMessage::user(input));
        history.push(ChatMessage::assistant(&reply.content, Vec::new()));
    }
}

/// Fixed demonstration sequence: one direct call per tool, then a full chat
/// turn with automatic tool selection.
pub async fn demo(agent: &Agent, out: &Output) {
    out.banner();
    out.header("Demonstration");

    out.step(1, 3, "Knowledge-base retrieval");
    match agent.tools().get("vectorize_retrieval") {
        Some(tool) => {
            let outcome = tool
                .execute(json!({ "query": "artificial intelligence", "top_k": 3 }))
                .await;
            print_outcome(out, outcome);
        }
        None => out.error("retrieval tool not registered"),
    }

    out.step(2, 3, "Web search");
    match agent.tools().get("web_search") {
        Some(tool) => {
            let outcome = tool
                .execute(json!({ "query": "latest AI news", "max_results": 3 }))
                .await;
            print_outcome(out, outcome);
        }
        None => out.error("web search tool not registered"),
    }

    out.step(3, 3, "Conversational interface with automatic tool selection");
    let reply = agent
        .chat(
            "What is machine learning and what are the latest developments in this field?",
            &[],
        )
        .await;
    out.assistant(&reply.content);
    out.success(&format!(
        "finished after {} round-trip(s), {} tool call(s)",
        reply.round_trips,
        reply.tool_calls.len()
    ));
}

fn print_outcome(out: &Output, outcome: crate::types::ToolOutcome) {
    if outcome.success {
        let data = outcome.data.unwrap_or_default();
        match serde_json::to_string_pretty(&data) {
            Ok(pretty) => println!("{}", pretty),
            Err(_) => println!("{}", data),
        }
    } else {
        out.error(outcome.error.as_deref().unwrap_or("tool failed"));
    }
}
