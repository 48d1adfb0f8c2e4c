// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (explicitly, before anything else runs)
// 3. Dispatch to the appropriate subcommand handler
// 4. Exit with proper code (0 = success, 1 = the answer was a failure, 2 = error)
//
// The server side lives in src/server + src/context, the client side in
// src/client. Both classify questions with src/intent.rs.
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;           // src/cli.rs - command-line parsing
mod client;        // src/client/ - HTTP client + assistant (fallback logic)
mod config;        // src/config.rs - server/client settings
mod context;       // src/context/ - request/response model, assembler, service
mod error;         // src/error.rs - typed upstream/client errors
mod github;        // src/github/ - URL parsing, contents API, listing format
mod health;        // src/health.rs - backend probe results
mod intent;        // src/intent.rs - listing vs generic classification
mod logging;       // src/logging.rs - tracing subscriber setup
mod model;         // src/model/ - Llama model backend
mod server;        // src/server/ - axum routes

#[cfg(test)]
mod test_support;

use clap::Parser;
use cli::{Cli, ClientArgs, Commands};
use tracing::warn;

use anyhow::{Context, Result};

use client::{Assistant, ContextClient};
use health::OverallStatus;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // If an unexpected error occurred, print it and exit with code 2
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = done
//   Ok(1) = the server reported a failure (listing failed, health degraded)
//   Err   = unexpected error
async fn run() -> Result<i32> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose)?;

    match cli.command {
        Commands::Serve(args) => {
            server::run(&args.host, args.port, &args.server_config()).await?;
            Ok(0)
        }
        Commands::Ask {
            query,
            user_id,
            session_id,
            client,
        } => handle_ask(&query, user_id, session_id, &client).await,
        Commands::ListFiles {
            repo_url,
            json,
            client,
        } => handle_list_files(&repo_url, json, &client).await,
        Commands::Health { client } => handle_health(&client).await,
    }
}

fn build_client(args: &ClientArgs) -> Result<ContextClient> {
    ContextClient::new(&args.client_config()).context("failed to build HTTP client")
}

// Handles the 'ask' subcommand
async fn handle_ask(
    query: &str,
    user_id: Option<String>,
    session_id: Option<String>,
    args: &ClientArgs,
) -> Result<i32> {
    let client = build_client(args)?;

    // Check the server before asking; a degraded backend is worth a warning,
    // not a reason to stop
    match client.check_health().await {
        Ok(report) => {
            if !report.llama_status.is_connected() {
                warn!(status = %report.llama_status, "Llama backend is not connected");
            }
            if !report.github_status.is_connected() {
                warn!(status = %report.github_status, "GitHub backend is not connected");
            }
        }
        Err(e) => warn!(error = %e, "could not reach the context server"),
    }

    let assistant = Assistant::new(client).with_identity(user_id, session_id);
    let answer = assistant.generate_response(query).await;
    println!("{}", answer);

    Ok(0)
}

// Handles the 'list-files' subcommand
async fn handle_list_files(repo_url: &str, json: bool, args: &ClientArgs) -> Result<i32> {
    let client = build_client(args)?;
    let result = client.list_github_files(repo_url).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if result.success {
        println!("📦 {}/{}", result.owner, result.repository);
        if result.files.is_empty() {
            println!("   (empty)");
        }
        for file in &result.files {
            println!("   {}", file);
        }
        println!("\n📋 Total: {}", result.files.len());
    } else {
        println!(
            "❌ {}",
            result.message.as_deref().unwrap_or("Unknown error")
        );
    }

    Ok(if result.success { 0 } else { 1 })
}

// Handles the 'health' subcommand
async fn handle_health(args: &ClientArgs) -> Result<i32> {
    let client = build_client(args)?;
    let report = client
        .check_health()
        .await
        .context("could not reach the context server")?;

    let marker = |connected: bool| if connected { "✅" } else { "❌" };

    println!("{:<10} {:?}", "STATUS", report.status);
    println!(
        "{:<10} {} {}",
        "llama",
        marker(report.llama_status.is_connected()),
        report.llama_status
    );
    println!(
        "{:<10} {} {}",
        "github",
        marker(report.github_status.is_connected()),
        report.github_status
    );

    Ok(if report.status == OverallStatus::Healthy { 0 } else { 1 })
}
