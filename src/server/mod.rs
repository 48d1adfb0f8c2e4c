// src/server/mod.rs
// =============================================================================
// The HTTP face of the context server.
//
// run() builds the shared ContextService from the config, binds the listener
// and serves until the process is stopped.
// =============================================================================

mod routes;

pub use routes::create_router;

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::ServerConfig;
use crate::context::ContextService;

pub async fn run(host: &str, port: u16, config: &ServerConfig) -> Result<()> {
    let service = ContextService::new(config).context("failed to build HTTP clients")?;
    let app = create_router(Arc::new(service));

    let addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!(%addr, llama = %config.llama_url, github = %config.github_api, model = %config.model,
        "starting context server with Llama and GitHub integration");

    axum::serve(listener, app).await?;
    Ok(())
}
