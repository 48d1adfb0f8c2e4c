// src/context/types.rs
// =============================================================================
// The request and response shapes of the two resolution endpoints.
//
// These are shared by the server (which builds them) and the client (which
// reads them), so both sides always agree on the JSON.
// =============================================================================

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of POST /context
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextRequest {
    pub query_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// Caller-defined key/values, passed through untouched
    #[serde(default)]
    pub additional_context: Option<Map<String, Value>>,
}

impl ContextRequest {
    pub fn new(query_text: impl Into<String>) -> Self {
        Self {
            query_text: query_text.into(),
            ..Self::default()
        }
    }
}

/// Where a piece of context came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextSource {
    /// A successful repository listing
    GithubApi,
    /// GitHub was asked and failed; the content is the error
    GithubApiError,
    /// A listing was asked for but the URL could not be parsed
    GithubUrlParser,
    /// The language model answered (or failed to)
    LlmModel,
}

/// One unit of answer content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextElement {
    pub content: String,
    pub source: ContextSource,
    /// In [0, 1]
    pub relevance_score: f64,
}

/// Body returned by POST /context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextResponse {
    #[serde(rename = "context_elements", alias = "elements")]
    pub elements: Vec<ContextElement>,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

/// Body of POST /github/list-files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitHubListRequest {
    pub repo_url: String,
}

/// Body returned by POST /github/list-files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitHubListResult {
    #[serde(default)]
    pub files: Vec<String>,
    #[serde(default)]
    pub repository: String,
    #[serde(default)]
    pub owner: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl GitHubListResult {
    pub fn failure(
        owner: impl Into<String>,
        repository: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            files: Vec::new(),
            repository: repository.into(),
            owner: owner.into(),
            success: false,
            message: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_context_request_optional_fields() {
        let req: ContextRequest = serde_json::from_value(json!({"query_text": "hi"})).unwrap();
        assert_eq!(req, ContextRequest::new("hi"));

        let req: ContextRequest = serde_json::from_value(json!({
            "query_text": "hi",
            "user_id": "u1",
            "additional_context": {"lang": "en"}
        }))
        .unwrap();
        assert_eq!(req.user_id.as_deref(), Some("u1"));
        assert_eq!(req.additional_context.unwrap()["lang"], "en");
    }

    #[test]
    fn test_context_response_wire_names() {
        let response = ContextResponse {
            elements: vec![ContextElement {
                content: "x".to_string(),
                source: ContextSource::GithubApiError,
                relevance_score: 0.9,
            }],
            metadata: Map::new(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["context_elements"][0]["source"], "github_api_error");

        // Readers also accept the shorter field name
        let parsed: ContextResponse = serde_json::from_value(json!({
            "elements": [{"content": "y", "source": "llm_model", "relevance_score": 0.9}]
        }))
        .unwrap();
        assert_eq!(parsed.elements[0].source, ContextSource::LlmModel);
    }

    #[test]
    fn test_list_result_failure_has_message() {
        let result = GitHubListResult::failure("acme", "widget", "nope");
        assert!(!result.success);
        assert!(result.files.is_empty());
        assert_eq!(result.message.as_deref(), Some("nope"));
    }
}
