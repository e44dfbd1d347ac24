use anyhow::Context;
use sage::{
    Agent, AppState, Config, OpenAIClient,
    cli::{Cli, Commands, demo, output::Output, repl},
    tools,
};
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();
    let out = if cli.no_color {
        Output::no_color()
    } else {
        Output::new()
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Missing credentials are fatal here, before any server or agent exists.
    let config = match Config::from_env() {
        Ok(config) => Arc::new(config),
        Err(e) => {
            out.error(&e.to_string());
            out.error("Set the variable in your environment or .env file and retry.");
            std::process::exit(1);
        }
    };

    let llm = OpenAIClient::new(
        config.llm.openai_api_key.clone(),
        config.llm.api_base.clone(),
        config.llm.model.clone(),
    );
    let registry = Arc::new(tools::default_registry(&config.retrieval));
    let agent = Arc::new(Agent::new(Box::new(llm), registry));

    match cli.command {
        Some(Commands::Chat) => {
            repl(&agent, &out).await;
            Ok(())
        }
        Some(Commands::Demo) => {
            demo(&agent, &out).await;
            Ok(())
        }
        Some(Commands::Serve { host, port }) => serve(config, agent, host, port, &out).await,
        None => serve(config, agent, None, None, &out).await,
    }
}

async fn serve(
    config: Arc<Config>,
    agent: Arc<Agent>,
    host: Option<String>,
    port: Option<u16>,
    out: &Output,
) -> anyhow::Result<()> {
    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);

    let state = AppState {
        config: config.clone(),
        agent,
    };
    let app = sage::api::create_router().with_state(state);

    let addr = format!("{}:{}", host, port);
    out.banner();
    out.success(&format!("listening on http://{}", addr));
    tracing::info!(%addr, model = %config.llm.model, "server starting");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    axum::serve(listener, app)
        .await
        .context("server terminated unexpectedly")?;

    Ok(())
}
