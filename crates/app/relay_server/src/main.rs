//! Chat relay server binary.
//!
//! Relays game-client chat turns to the completion API and keeps per-player
//! history in memory for the life of the process.

mod error;

use std::sync::Arc;

use clap::Parser;
use relay_api::AppState;
use relay_api::config::ApiConfig;
use relay_core::completion::github::GitHubModelsClient;
use relay_core::history::MemoryHistoryStore;
use relay_core::relay::ChatRelay;
use tracing::{error, info};

use crate::error::Result;

/// CLI arguments, each also readable from the environment.
#[derive(Parser, Debug)]
#[command(name = "relay_server", about = "Chat relay server")]
struct Args {
    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 8787)]
    port: u16,

    /// Interface to bind.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Bearer token for the completion API. Required.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    github_token: Option<String>,

    /// Completion API base URL.
    #[arg(long, env = "COMPLETION_ENDPOINT", default_value = relay_core::completion::DEFAULT_ENDPOINT)]
    completion_endpoint: String,

    /// Model identifier sent with every completion request.
    #[arg(long, env = "COMPLETION_MODEL", default_value = relay_core::completion::DEFAULT_MODEL)]
    completion_model: String,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,relay_api=debug,relay_core=debug".into()),
        )
        .init();

    if let Err(e) = run(Args::parse()).await {
        error!("{e}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let mut config = ApiConfig::new(&args.host, args.port, args.github_token)?;
    config.completion = config
        .completion
        .with_endpoint(args.completion_endpoint)
        .with_model(args.completion_model);

    info!(
        version = relay_core::version(),
        endpoint = %config.completion.endpoint,
        model = %config.completion.model,
        "configuring completion client"
    );

    let relay = ChatRelay::new(
        Arc::new(MemoryHistoryStore::new()),
        Arc::new(GitHubModelsClient::new(config.completion.clone())),
    );
    let app = relay_api::router(AppState { relay });

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    let local_addr = listener.local_addr()?;
    info!(addr = %local_addr, "chat relay listening");

    axum::serve(listener, app).await?;

    Ok(())
}
