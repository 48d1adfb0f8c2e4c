// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Subcommands:
// - serve:       run the context server
// - ask:         ask one question through the assistant and print the answer
// - list-files:  call the dedicated listing endpoint directly
// - health:      print the server's health report
//
// Every flag that points at another service can also come from an
// environment variable (the `env = ...` attributes).
// =============================================================================

use clap::{Args, Parser, Subcommand};
use std::time::Duration;
use url::Url;

use crate::config::{
    ClientConfig, ServerConfig, DEFAULT_CLIENT_TIMEOUT_SECS, DEFAULT_GITHUB_API,
    DEFAULT_LLAMA_URL, DEFAULT_MODEL, DEFAULT_SERVER_URL,
};

#[derive(Parser, Debug)]
#[command(
    name = "repo-context",
    version,
    about = "Answers questions with a GitHub repository listing or a local Llama model",
    long_about = "repo-context decides, per question, whether you want the files of a GitHub \
                  repository or a general answer, and asks GitHub or a local Llama model accordingly."
)]
pub struct Cli {
    /// Log at debug level (RUST_LOG overrides this)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the context server
    ///
    /// Example: repo-context serve --port 8000 --model llama3
    Serve(ServeArgs),

    /// Ask a single question and print the answer
    ///
    /// Example: repo-context ask "List files from https://github.com/user/repository"
    Ask {
        /// The question, in plain words
        query: String,

        /// Optional user identifier sent along with the question
        #[arg(long)]
        user_id: Option<String>,

        /// Optional session identifier sent along with the question
        #[arg(long)]
        session_id: Option<String>,

        #[command(flatten)]
        client: ClientArgs,
    },

    /// List a repository through the dedicated endpoint
    ///
    /// Example: repo-context list-files https://github.com/rust-lang/rust
    ListFiles {
        /// GitHub repository URL (e.g., https://github.com/user/repo)
        repo_url: String,

        /// Output the raw result as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        client: ClientArgs,
    },

    /// Show whether the server can reach its backends
    Health {
        #[command(flatten)]
        client: ClientArgs,
    },
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, env = "REPO_CONTEXT_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "REPO_CONTEXT_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Base URL of the Llama (Ollama-compatible) server
    #[arg(long, env = "LLAMA_URL", default_value = DEFAULT_LLAMA_URL)]
    pub llama_url: Url,

    /// Model name used for generation
    #[arg(long, env = "LLAMA_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Base URL of the GitHub REST API
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_GITHUB_API)]
    pub github_api: Url,

    /// Token for the GitHub API (raises the rate limit, allows private repos)
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Seconds to wait for GitHub or the model before giving up (no limit if unset)
    #[arg(long, env = "UPSTREAM_TIMEOUT_SECS")]
    pub upstream_timeout: Option<u64>,
}

impl ServeArgs {
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            llama_url: self.llama_url.clone(),
            model: self.model.clone(),
            github_api: self.github_api.clone(),
            github_token: self.github_token.clone(),
            upstream_timeout: self.upstream_timeout.map(Duration::from_secs),
        }
    }
}

#[derive(Args, Debug)]
pub struct ClientArgs {
    /// Base URL of the context server
    #[arg(long, env = "REPO_CONTEXT_SERVER", default_value = DEFAULT_SERVER_URL)]
    pub server_url: Url,

    /// Seconds to wait for each call to the server
    #[arg(long, default_value_t = DEFAULT_CLIENT_TIMEOUT_SECS)]
    pub timeout: u64,
}

impl ClientArgs {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            server_url: self.server_url.clone(),
            timeout: Duration::from_secs(self.timeout),
        }
    }
}
