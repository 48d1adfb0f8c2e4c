// src/config.rs
// =============================================================================
// Runtime configuration for the server and the client.
//
// Nothing in here reads the environment directly. Values come from the CLI
// (src/cli.rs), where each flag can also be set through an environment
// variable thanks to clap's `env` feature. That keeps the backend addresses
// explicit: whoever builds a ServerConfig decides where GitHub and the Llama
// server live.
// =============================================================================

use std::time::Duration;
use url::Url;

pub const DEFAULT_LLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "llama3";
pub const DEFAULT_GITHUB_API: &str = "https://api.github.com";
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";
pub const DEFAULT_CLIENT_TIMEOUT_SECS: u64 = 10;

/// Where the context server finds its backends.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Base address of the Llama (Ollama-compatible) server
    pub llama_url: Url,
    /// Model name sent with every generate request
    pub model: String,
    /// Base address of the GitHub REST API
    pub github_api: Url,
    /// Optional token, sent as a bearer token to GitHub
    pub github_token: Option<String>,
    /// Deadline for outbound calls. None means wait as long as it takes.
    pub upstream_timeout: Option<Duration>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            llama_url: Url::parse(DEFAULT_LLAMA_URL).expect("default llama url is valid"),
            model: DEFAULT_MODEL.to_string(),
            github_api: Url::parse(DEFAULT_GITHUB_API).expect("default github url is valid"),
            github_token: None,
            upstream_timeout: None,
        }
    }
}

/// How the client reaches the context server.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub server_url: Url,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: Url::parse(DEFAULT_SERVER_URL).expect("default server url is valid"),
            timeout: Duration::from_secs(DEFAULT_CLIENT_TIMEOUT_SECS),
        }
    }
}

// Joins a base URL and an endpoint path without doubling or losing slashes
//
// Url::join would drop the last segment of a base that has no trailing slash
// (http://host/proxy + api/tags -> http://host/api/tags), so we glue strings.
//
// Example:
//   endpoint("http://localhost:11434/", "/api/tags") -> "http://localhost:11434/api/tags"
pub fn endpoint(base: &Url, path: &str) -> String {
    format!(
        "{}/{}",
        base.as_str().trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
