// src/server/routes.rs
// =============================================================================
// HTTP routes of the context server.
//
//   POST /context            -> ContextResponse
//   POST /github/list-files  -> GitHubListResult
//   GET  /health             -> HealthReport
//
// Handlers are thin: they hand the request to ContextService and return
// whatever it builds. Upstream failures are already folded into the body,
// so every route answers 200 with a well-formed JSON object.
// =============================================================================

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::context::{
    ContextRequest, ContextResponse, ContextService, GitHubListRequest, GitHubListResult,
};
use crate::health::HealthReport;

/// Create the router with all routes.
pub fn create_router(service: Arc<ContextService>) -> Router {
    Router::new()
        .route("/context", post(context))
        .route("/github/list-files", post(list_files))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

async fn context(
    State(service): State<Arc<ContextService>>,
    Json(request): Json<ContextRequest>,
) -> Json<ContextResponse> {
    Json(service.resolve(&request).await)
}

async fn list_files(
    State(service): State<Arc<ContextService>>,
    Json(request): Json<GitHubListRequest>,
) -> Json<GitHubListResult> {
    Json(service.list_files(&request.repo_url).await)
}

async fn health(State(service): State<Arc<ContextService>>) -> Json<HealthReport> {
    Json(service.health().await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ContextSource;
    use crate::test_support::{config_for, spawn_stub, unreachable_url};
    use serde_json::{json, Value};

    // A server whose backends are both unreachable
    async fn isolated_server() -> String {
        let nowhere = unreachable_url().await;
        let service = ContextService::new(&config_for(&nowhere, &nowhere)).unwrap();
        let base = spawn_stub(create_router(Arc::new(service))).await;
        base.as_str().trim_end_matches('/').to_string()
    }

    #[tokio::test]
    async fn test_context_route_returns_structured_error_content() {
        let base = isolated_server().await;
        let response: Value = reqwest::Client::new()
            .post(format!("{}/context", base))
            .json(&json!({"query_text": "list files from https://github.com/acme/widget"}))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        let parsed: ContextResponse = serde_json::from_value(response.clone()).unwrap();
        assert_eq!(parsed.elements[0].source, ContextSource::GithubApiError);
        assert!(response["metadata"]["processing_time_ms"].is_u64());
    }

    #[tokio::test]
    async fn test_list_files_route_reports_failure() {
        let base = isolated_server().await;
        let result: GitHubListResult = reqwest::Client::new()
            .post(format!("{}/github/list-files", base))
            .json(&json!({"repo_url": "not a url"}))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert!(!result.success);
        assert!(result.message.unwrap().starts_with("Invalid GitHub repository URL"));
    }

    #[tokio::test]
    async fn test_health_route_degraded() {
        let base = isolated_server().await;
        let body: Value = reqwest::get(format!("{}/health", base))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(body["status"], "degraded");
        assert!(body["llama_status"].as_str().unwrap().starts_with("error: "));
        assert!(body["github_status"].as_str().unwrap().starts_with("error: "));
    }
}
