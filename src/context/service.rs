// src/context/service.rs
// =============================================================================
// The server-side pipeline: classify, resolve, assemble.
//
// A ContextService owns one GitHub client and one Llama client and holds no
// other state, so a single instance is shared by every request.
// Per request at most one outbound call is made, to GitHub *or* to the
// model, never both.
// =============================================================================

use std::time::Instant;
use tracing::info;

use super::assemble::{assemble, Resolution};
use super::types::{ContextRequest, ContextResponse, GitHubListResult};
use crate::config::ServerConfig;
use crate::github::{parse_github_url, render_dedicated_listing, GitHubClient};
use crate::health::HealthReport;
use crate::intent::{classify, Intent};
use crate::model::{build_prompt, LlamaClient};

pub const INVALID_REPO_URL_MESSAGE: &str =
    "Invalid GitHub repository URL. Please provide a URL in the format: https://github.com/owner/repo";

#[derive(Debug, Clone)]
pub struct ContextService {
    github: GitHubClient,
    llama: LlamaClient,
}

impl ContextService {
    pub fn new(config: &ServerConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            github: GitHubClient::new(config)?,
            llama: LlamaClient::new(config)?,
        })
    }

    // Answers a POST /context request
    //
    // Never fails: every upstream problem ends up as the content of the
    // single returned element.
    pub async fn resolve(&self, request: &ContextRequest) -> ContextResponse {
        let start = Instant::now();
        info!(
            query = %request.query_text,
            user_id = request.user_id.as_deref().unwrap_or("-"),
            session_id = request.session_id.as_deref().unwrap_or("-"),
            "received context request"
        );

        let resolution = match classify(&request.query_text) {
            Intent::RepoListing { url } => match parse_github_url(url) {
                Some(repo) => {
                    let result = self.github.list_contents(&repo, "").await;
                    Resolution::Listing { repo, result }
                }
                None => Resolution::InvalidUrl,
            },
            Intent::Generic => {
                let prompt = build_prompt(&request.query_text);
                Resolution::Model(self.llama.generate(&prompt).await)
            }
        };

        info!("context retrieved");
        assemble(
            &request.query_text,
            resolution,
            start.elapsed(),
            request.additional_context.as_ref(),
        )
    }

    // Answers a POST /github/list-files request
    //
    // Failures come back as `success: false` with a message, not as content.
    pub async fn list_files(&self, repo_url: &str) -> GitHubListResult {
        info!(repo_url, "GitHub list files request");

        let Some(repo) = parse_github_url(repo_url) else {
            return GitHubListResult::failure("", "", INVALID_REPO_URL_MESSAGE);
        };

        match self.github.list_contents(&repo, "").await {
            Ok(entries) => GitHubListResult {
                files: render_dedicated_listing(&entries),
                repository: repo.repo,
                owner: repo.owner,
                success: true,
                message: None,
            },
            Err(e) => GitHubListResult::failure(
                repo.owner,
                repo.repo,
                format!("Error accessing repository: {}", e),
            ),
        }
    }

    /// Probes both backends at the same time.
    pub async fn health(&self) -> HealthReport {
        let (llama_status, github_status) = tokio::join!(self.llama.probe(), self.github.probe());
        HealthReport::new(llama_status, github_status)
    }
}
