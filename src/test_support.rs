// src/test_support.rs
// =============================================================================
// Helpers for tests that need something to talk HTTP to.
//
// Instead of hitting the real GitHub or a real Llama server, tests start a
// tiny axum app on 127.0.0.1 with a random port and point the code at it.
// =============================================================================

use axum::Router;
use std::time::Duration;
use tokio::net::TcpListener;
use url::Url;

use crate::config::ServerConfig;

/// Serves `app` in the background and returns its base URL.
pub async fn spawn_stub(app: Router) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Url::parse(&format!("http://{}", addr)).unwrap()
}

/// A URL nothing is listening on: connections are refused.
pub async fn unreachable_url() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    Url::parse(&format!("http://{}", addr)).unwrap()
}

/// Server config whose GitHub and Llama backends are the given stubs.
pub fn config_for(github: &Url, llama: &Url) -> ServerConfig {
    ServerConfig {
        llama_url: llama.clone(),
        github_api: github.clone(),
        upstream_timeout: Some(Duration::from_secs(5)),
        ..ServerConfig::default()
    }
}
