// src/client/http.rs
// =============================================================================
// HTTP client for the context server.
//
// One method per endpoint. Each call gets a bounded wait (10 seconds by
// default, see ClientConfig) and none of them retries on its own.
//
// Failure shapes differ per endpoint on purpose:
// - get_context: Err(ClientError), the caller decides what to say
// - list_github_files: a GitHubListResult with success = false, the same
//   shape the server uses for its own failures
// =============================================================================

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{error, info};
use url::Url;

use crate::config::{endpoint, ClientConfig};
use crate::context::{ContextRequest, ContextResponse, GitHubListRequest, GitHubListResult};
use crate::error::ClientError;
use crate::health::HealthReport;

#[derive(Debug, Clone)]
pub struct ContextClient {
    http: Client,
    server_url: Url,
}

impl ContextClient {
    pub fn new(config: &ClientConfig) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(config.timeout).build()?;
        info!(server_url = %config.server_url, "initialized context client");

        Ok(Self {
            http,
            server_url: config.server_url.clone(),
        })
    }

    // Fetches context for a query from POST /context
    pub async fn get_context(&self, request: &ContextRequest) -> Result<ContextResponse, ClientError> {
        info!(query = %request.query_text, "sending context request");

        self.post("context", request).await.map_err(|e| {
            error!(error = %e, "error fetching context");
            e
        })
    }

    // Lists a repository through POST /github/list-files
    //
    // A transport or status failure is turned into `success: false` so the
    // caller only ever has one shape to look at.
    pub async fn list_github_files(&self, repo_url: &str) -> GitHubListResult {
        info!(repo_url, "listing files for GitHub repository");

        let request = GitHubListRequest {
            repo_url: repo_url.to_string(),
        };

        match self.post("github/list-files", &request).await {
            Ok(result) => result,
            Err(e) => {
                error!(error = %e, "error listing GitHub files");
                GitHubListResult::failure("", "", e.to_string())
            }
        }
    }

    // Reads GET /health
    //
    // Called explicitly by whoever wants to know, never as a side effect of
    // building the client.
    pub async fn check_health(&self) -> Result<HealthReport, ClientError> {
        let response = self
            .http
            .get(endpoint(&self.server_url, "health"))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::Status(response.status().as_u16()));
        }
        Ok(response.json().await?)
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .http
            .post(endpoint(&self.server_url, path))
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::Status(response.status().as_u16()));
        }
        Ok(response.json().await?)
    }
}
