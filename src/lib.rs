use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use dotenvy::dotenv;

pub mod ai;
pub mod config;
pub mod event;
pub mod handler;
pub mod server;
pub mod solution;
mod system_info;
pub mod text_utils;

pub use config::Config;
pub use handler::{Handler, HandlerResponse, IncomingRequest, Method, SolveError};
pub use solution::Solution;
pub use system_info::get_system_info;

// ──────────────────────────────────────────────────────────────
// Main application setup
// ──────────────────────────────────────────────────────────────

pub async fn run() -> Result<()> {
    // Load .env file if it exists (for local development)
    dotenv().ok();

    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting task solver...\n{}", get_system_info());

    let config = Config::from_env();
    match &config.ai {
        Some(ai) => tracing::info!(model = %ai.vision_model, "OpenAI configured"),
        None => tracing::warn!("OPENAI_API_KEY is not set; requests will fail with 500"),
    }

    let handler = Arc::new(Handler::new(config.ai.clone()));
    let app = server::router(handler, config.max_body_bytes);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
