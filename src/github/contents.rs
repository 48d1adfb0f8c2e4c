// src/github/contents.rs
// =============================================================================
// Talks to the GitHub REST API.
//
// Two calls:
// - GET /repos/{owner}/{repo}/contents/{path}  -> directory listing
// - GET /rate_limit                            -> health probe (costs no quota)
//
// Every failure (bad status, unreadable body, network trouble) comes back as
// an UpstreamError. Deciding what to show the user is not this module's job;
// see src/github/format.rs and src/context/assemble.rs.
//
// Rust concepts:
// - serde: deserializing GitHub's JSON straight into our own structs
// - #[serde(other)]: a catch-all enum variant for values we don't know about
// =============================================================================

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use url::Url;

use super::url::RepoRef;
use crate::config::{endpoint, ServerConfig};
use crate::error::UpstreamError;
use crate::health::BackendStatus;

// GitHub rejects API requests that carry no User-Agent
const USER_AGENT: &str = concat!("repo-context/", env!("CARGO_PKG_VERSION"));

/// What kind of thing a repository entry is, as GitHub reports it in `type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    #[serde(rename = "dir")]
    Directory,
    Symlink,
    Submodule,
    /// Anything GitHub adds later
    #[serde(other)]
    Other,
}

/// One item of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoEntry {
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

// The error body GitHub sends with non-2xx responses
#[derive(Deserialize)]
struct GitHubErrorBody {
    message: String,
}

/// Read-only client for the GitHub contents API.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    api_base: Url,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(config: &ServerConfig) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));

        let mut builder = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers);

        if let Some(timeout) = config.upstream_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            api_base: config.github_api.clone(),
            token: config.github_token.clone(),
        })
    }

    // Lists the entries of `path` inside a repository
    //
    // Parameters:
    //   repo: owner/repo to read
    //   path: directory inside the repo, "" for the root
    //
    // Returns: entries in the order GitHub sent them
    pub async fn list_contents(
        &self,
        repo: &RepoRef,
        path: &str,
    ) -> Result<Vec<RepoEntry>, UpstreamError> {
        let url = self.contents_url(repo, path)?;

        info!(repo = %repo.full_name(), path, "listing GitHub repository contents");

        let response = self.get(url.as_str()).send().await.map_err(|e| {
            warn!(repo = %repo.full_name(), error = %e, "GitHub request failed");
            UpstreamError::Transport(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            // GitHub explains itself in a JSON `message` field; fall back to the code
            let message = match response.json::<GitHubErrorBody>().await {
                Ok(body) => body.message,
                Err(_) => format!("Error: Status code {}", status.as_u16()),
            };
            warn!(repo = %repo.full_name(), status = status.as_u16(), reason = %message, "GitHub returned an error");
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                message,
            });
        }

        // A path that names a file gives back an object instead of a list,
        // so "not a list" is reported as a malformed answer.
        let body = response.text().await?;
        let entries: Vec<RepoEntry> = serde_json::from_str(&body)
            .map_err(|e| UpstreamError::Malformed(e.to_string()))?;

        debug!(count = entries.len(), "GitHub listing received");
        Ok(entries)
    }

    // Builds {api_base}/repos/{owner}/{repo}/contents/{path}
    //
    // Owner, repo and path come from user text. Each one is pushed as a
    // single percent-encoded segment, so "?" or "#" cannot start a query or
    // fragment. "." and ".." are refused: they would climb out of /repos/.
    fn contents_url(&self, repo: &RepoRef, path: &str) -> Result<Url, UpstreamError> {
        let path_parts: Vec<&str> = path.split('/').filter(|part| !part.is_empty()).collect();

        if climbs_out(repo.owner.as_str())
            || climbs_out(repo.repo.as_str())
            || path_parts.iter().copied().any(climbs_out)
        {
            return Err(UpstreamError::InvalidRepo(repo.full_name()));
        }

        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| UpstreamError::InvalidRepo(format!("cannot extend {}", self.api_base)))?
            .pop_if_empty()
            .extend(["repos", repo.owner.as_str(), repo.repo.as_str(), "contents"])
            .extend(path_parts);

        Ok(url)
    }

    /// Probes GET /rate_limit, which works without spending API quota.
    pub async fn probe(&self) -> BackendStatus {
        let url = endpoint(&self.api_base, "rate_limit");
        BackendStatus::from_probe(self.get(&url).send().await)
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        let request = self.http.get(url);
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

// True for segments that are empty or navigate ("." / "..")
fn climbs_out(segment: &str) -> bool {
    segment.is_empty() || segment == "." || segment == ".."
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{config_for, spawn_stub};
    use axum::{http::StatusCode, routing::get, Json, Router};
    use serde_json::json;

    fn widget() -> RepoRef {
        RepoRef {
            owner: "acme".to_string(),
            repo: "widget".to_string(),
        }
    }

    #[test]
    fn test_entry_kind_from_github_type() {
        let entries: Vec<RepoEntry> = serde_json::from_value(json!([
            {"name": "src", "path": "src", "type": "dir", "sha": "abc"},
            {"name": "README.md", "path": "README.md", "type": "file"},
            {"name": "vendor", "path": "vendor", "type": "submodule"},
            {"name": "weird", "path": "weird", "type": "something-new"}
        ]))
        .unwrap();

        assert_eq!(entries[0].kind, EntryKind::Directory);
        assert_eq!(entries[1].kind, EntryKind::File);
        assert_eq!(entries[2].kind, EntryKind::Submodule);
        assert_eq!(entries[3].kind, EntryKind::Other);
    }

    #[tokio::test]
    async fn test_list_contents_success() {
        let app = Router::new().route(
            "/repos/acme/widget/contents",
            get(|| async {
                Json(json!([
                    {"name": "readme.md", "path": "readme.md", "type": "file"},
                    {"name": "src", "path": "src", "type": "dir"}
                ]))
            }),
        );
        let base = spawn_stub(app).await;
        let client = GitHubClient::new(&config_for(&base, &base)).unwrap();

        let entries = client.list_contents(&widget(), "").await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "readme.md");
        assert_eq!(entries[1].kind, EntryKind::Directory);
    }

    // Answers any request with one entry named after the path and query it saw
    fn echo_github() -> Router {
        Router::new().fallback(|uri: axum::http::Uri| async move {
            let seen = match uri.query() {
                Some(query) => format!("{}?{}", uri.path(), query),
                None => uri.path().to_string(),
            };
            Json(json!([{"name": seen, "path": seen, "type": "file"}]))
        })
    }

    #[tokio::test]
    async fn test_list_contents_encodes_query_characters_in_repo() {
        let base = spawn_stub(echo_github()).await;
        let client = GitHubClient::new(&config_for(&base, &base)).unwrap();

        let repo = RepoRef {
            owner: "acme".to_string(),
            repo: "widget?x=#frag".to_string(),
        };
        let entries = client.list_contents(&repo, "").await.unwrap();
        assert_eq!(entries[0].name, "/repos/acme/widget%3Fx=%23frag/contents");
    }

    #[tokio::test]
    async fn test_list_contents_refuses_dot_segments() {
        let base = spawn_stub(
            Router::new().route("/secret", get(|| async { Json(json!([{"name": "leaked", "path": "leaked", "type": "file"}])) })),
        )
        .await;
        let client = GitHubClient::new(&config_for(&base, &base)).unwrap();

        let climbing = RepoRef {
            owner: "..".to_string(),
            repo: "secret?x=".to_string(),
        };
        let err = client.list_contents(&climbing, "").await.unwrap_err();
        assert!(matches!(err, UpstreamError::InvalidRepo(_)));

        let err = client.list_contents(&widget(), "src/../../..").await.unwrap_err();
        assert!(matches!(err, UpstreamError::InvalidRepo(_)));
    }

    #[tokio::test]
    async fn test_list_contents_keeps_base_path_and_subdirectory() {
        let base = spawn_stub(echo_github()).await;
        let base = base.join("api/v3").unwrap();
        let client = GitHubClient::new(&config_for(&base, &base)).unwrap();

        let entries = client.list_contents(&widget(), "/src/bin").await.unwrap();
        assert_eq!(entries[0].name, "/api/v3/repos/acme/widget/contents/src/bin");
    }

    #[tokio::test]
    async fn test_list_contents_reports_github_message() {
        let app = Router::new().route(
            "/repos/acme/widget/contents",
            get(|| async {
                (
                    StatusCode::NOT_FOUND,
                    Json(json!({"message": "Not Found", "documentation_url": "https://docs.github.com"})),
                )
            }),
        );
        let base = spawn_stub(app).await;
        let client = GitHubClient::new(&config_for(&base, &base)).unwrap();

        match client.list_contents(&widget(), "").await {
            Err(UpstreamError::Status { status, message }) => {
                assert_eq!(status, 404);
                assert_eq!(message, "Not Found");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_list_contents_status_without_json_body() {
        let app = Router::new().route(
            "/repos/acme/widget/contents",
            get(|| async { (StatusCode::BAD_GATEWAY, "upstream exploded") }),
        );
        let base = spawn_stub(app).await;
        let client = GitHubClient::new(&config_for(&base, &base)).unwrap();

        let err = client.list_contents(&widget(), "").await.unwrap_err();
        assert_eq!(err.to_string(), "Error: Status code 502");
    }

    #[tokio::test]
    async fn test_list_contents_file_path_is_malformed() {
        let app = Router::new().route(
            "/repos/acme/widget/contents/README.md",
            get(|| async { Json(json!({"name": "README.md", "path": "README.md", "type": "file"})) }),
        );
        let base = spawn_stub(app).await;
        let client = GitHubClient::new(&config_for(&base, &base)).unwrap();

        let err = client.list_contents(&widget(), "README.md").await.unwrap_err();
        assert!(matches!(err, UpstreamError::Malformed(_)));
    }

    #[tokio::test]
    async fn test_rate_limit_reports_connected() {
        let app = Router::new().route("/rate_limit", get(|| async { Json(json!({"rate": {}})) }));
        let base = spawn_stub(app).await;
        let client = GitHubClient::new(&config_for(&base, &base)).unwrap();

        assert_eq!(client.probe().await, BackendStatus::Connected);
    }

    #[tokio::test]
    async fn test_rate_limit_reports_unavailable() {
        let app = Router::new().route(
            "/rate_limit",
            get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
        );
        let base = spawn_stub(app).await;
        let client = GitHubClient::new(&config_for(&base, &base)).unwrap();

        assert_eq!(client.probe().await, BackendStatus::Unavailable);
    }
}
