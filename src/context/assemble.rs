// src/context/assemble.rs
// =============================================================================
// Builds the /context answer out of whatever the resolvers produced.
//
// | What happened                              | source            | score |
// |--------------------------------------------|-------------------|-------|
// | URL parsed, listing succeeded              | github_api        | 0.95  |
// | URL parsed, listing failed                 | github_api_error  | 0.9   |
// | Listing asked for, URL did not parse       | github_url_parser | 0.9   |
// | Generic question                           | llm_model         | 0.9   |
//
// Exactly one element comes out. Everything here is pure; the network calls
// happen in src/context/service.rs before we get here.
// =============================================================================

use serde_json::{Map, Value};
use std::time::Duration;

use super::types::{ContextElement, ContextResponse, ContextSource};
use crate::error::UpstreamError;
use crate::github::{render_context_listing, RepoEntry, RepoRef};

pub const INVALID_URL_MESSAGE: &str =
    "The GitHub URL provided is not valid. Please provide a URL in the format: https://github.com/owner/repo";

/// What the resolution step produced for one query.
#[derive(Debug)]
pub enum Resolution {
    /// A listing was attempted for `repo`
    Listing {
        repo: RepoRef,
        result: Result<Vec<RepoEntry>, UpstreamError>,
    },
    /// A listing was asked for but the URL did not parse
    InvalidUrl,
    /// The model's text (which may itself be an error string)
    Model(String),
}

impl Resolution {
    fn into_element(self) -> ContextElement {
        let (content, source, relevance_score) = match self {
            Resolution::Listing {
                repo,
                result: Ok(entries),
            } => (
                render_context_listing(&repo, &entries),
                ContextSource::GithubApi,
                0.95,
            ),
            Resolution::Listing { result: Err(e), .. } => (
                format!("Error accessing GitHub repository: {}", e),
                ContextSource::GithubApiError,
                0.9,
            ),
            Resolution::InvalidUrl => (
                INVALID_URL_MESSAGE.to_string(),
                ContextSource::GithubUrlParser,
                0.9,
            ),
            Resolution::Model(text) => (text, ContextSource::LlmModel, 0.9),
        };

        ContextElement {
            content,
            source,
            relevance_score,
        }
    }
}

// Wraps a resolution into the response body
//
// Parameters:
//   query: the original query text, echoed into metadata
//   resolution: what the resolver produced
//   elapsed: how long resolving took, reported as processing_time_ms
//   additional_context: the caller's map, echoed back when non-empty
pub fn assemble(
    query: &str,
    resolution: Resolution,
    elapsed: Duration,
    additional_context: Option<&Map<String, Value>>,
) -> ContextResponse {
    let mut metadata = Map::new();
    metadata.insert("query".to_string(), Value::from(query));
    metadata.insert(
        "processing_time_ms".to_string(),
        Value::from(elapsed.as_millis() as u64),
    );
    if let Some(extra) = additional_context.filter(|m| !m.is_empty()) {
        metadata.insert(
            "additional_context".to_string(),
            Value::Object(extra.clone()),
        );
    }

    ContextResponse {
        elements: vec![resolution.into_element()],
        metadata,
    }
}
