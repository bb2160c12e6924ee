//! REST API server for managing recipes.
//!
//! Wires the in-memory store, the runtime loop, and the HTTP API together,
//! with command-line configuration and graceful shutdown.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use recipe_store_api::{router::Router, server::Server};
use recipe_store_core::{config::ServiceConfig, RecipeStore};
use recipe_store_runtime::Runtime;
use tokio::sync::mpsc;
use tokio::{signal, time};
use tracing_subscriber::EnvFilter;

/// Command-line arguments for the recipe server.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value_t = 8080)]
    port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: IpAddr,

    /// Start with an empty collection instead of the seed recipes
    #[arg(long)]
    no_seed: bool,

    /// Capacity of the request queue feeding the runtime
    #[arg(long, default_value_t = 1024)]
    channel_capacity: usize,

    /// Request timeout in milliseconds
    #[arg(long, default_value_t = 5000)]
    request_timeout_ms: u64,

    /// Response timeout in milliseconds
    #[arg(long, default_value_t = 10000)]
    response_timeout_ms: u64,

    /// Time open connections get to finish on shutdown, in milliseconds
    #[arg(long, default_value_t = 10000)]
    shutdown_timeout_ms: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Arc::new(ServiceConfig {
        seed: !args.no_seed,
        channel_capacity: args.channel_capacity.max(1),
        request_timeout_ms: args.request_timeout_ms,
        response_timeout_ms: args.response_timeout_ms,
        shutdown_timeout_ms: args.shutdown_timeout_ms,
    });

    let store = RecipeStore::from_config(&config);
    let (api_tx, api_rx) = mpsc::channel(config.channel_capacity);
    let runtime = tokio::spawn(Runtime::new(store, api_rx).run());

    let router = Router::new(api_tx, config.clone()).context("Failed to build router")?;
    let addr = SocketAddr::new(args.host, args.port);
    let server = Server::bind(addr, router)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    server
        .serve_with_shutdown(shutdown_signal())
        .await
        .context("Server failed")?;

    // The router owned the last request sender, so the runtime drains and stops.
    let drain_timeout = time::Duration::from_millis(config.response_timeout_ms);
    match time::timeout(drain_timeout, runtime).await {
        Ok(joined) => {
            let store = joined.context("Runtime task failed")?;
            tracing::info!("Discarding {} recipes", store.len());
        }
        Err(_) => tracing::warn!("Runtime did not stop within {:?}", drain_timeout),
    }

    Ok(())
}

/// Resolves on Ctrl+C.
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
