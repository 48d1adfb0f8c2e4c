// src/model/llama.rs
// =============================================================================
// Asks a locally hosted Llama model (Ollama-compatible API) for an answer.
//
// The request:   POST {llama_url}/api/generate  {model, prompt, stream: false}
// The answer:    {"response": "..."}
// Health probe:  GET {llama_url}/api/tags
//
// A failing model must not break a /context request. generate() therefore
// always returns a String: either the model's answer or a short error text
// that stands in for it.
// =============================================================================

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use url::Url;

use crate::config::{endpoint, ServerConfig};
use crate::error::UpstreamError;
use crate::health::BackendStatus;

// Body of POST /api/generate
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

// Only the field we use; Ollama sends a lot more
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: Option<String>,
}

// Wraps a user's question in the instruction the model receives
pub fn build_prompt(query: &str) -> String {
    format!(
        "Please provide relevant information for the following query: \n{}\n\nRespond with factual, helpful information.",
        query
    )
}

#[derive(Debug, Clone)]
pub struct LlamaClient {
    http: Client,
    base: Url,
    model: String,
}

impl LlamaClient {
    pub fn new(config: &ServerConfig) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.upstream_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base: config.llama_url.clone(),
            model: config.model.clone(),
        })
    }

    // Sends a prompt to the model and returns its text
    //
    // Returns the model's answer, or one of:
    //   "Error querying model: <status>"   non-2xx answer
    //   "Error: <details>"                 no answer at all / unreadable body
    pub async fn generate(&self, prompt: &str) -> String {
        info!(model = %self.model, "querying Llama model");

        match self.try_generate(prompt).await {
            Ok(text) => text,
            Err(UpstreamError::Status { status, message }) => {
                error!(status, reason = %message, "error from Llama API");
                format!("Error querying model: {}", status)
            }
            Err(e) => {
                error!(error = %e, "exception when querying Llama");
                format!("Error: {}", e)
            }
        }
    }

    async fn try_generate(&self, prompt: &str) -> Result<String, UpstreamError> {
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        let response = self
            .http
            .post(endpoint(&self.base, "api/generate"))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::Malformed(e.to_string()))?;

        Ok(parsed
            .response
            .unwrap_or_else(|| "No response from model".to_string()))
    }

    /// Probes GET /api/tags (lists the installed models).
    pub async fn probe(&self) -> BackendStatus {
        BackendStatus::from_probe(self.http.get(endpoint(&self.base, "api/tags")).send().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{config_for, spawn_stub, unreachable_url};
    use axum::{http::StatusCode, routing::{get, post}, Json, Router};
    use serde_json::{json, Value};

    #[test]
    fn test_build_prompt_wraps_query() {
        let prompt = build_prompt("what is rust?");
        assert!(prompt.contains("what is rust?"));
        assert!(prompt.contains("factual, helpful information"));
    }

    #[tokio::test]
    async fn test_generate_returns_response_text() {
        let app = Router::new().route(
            "/api/generate",
            post(|Json(body): Json<Value>| async move {
                // Echo back what we were sent so the test can check the request shape
                assert_eq!(body["stream"], false);
                Json(json!({
                    "model": body["model"],
                    "response": format!("model={} prompt={}", body["model"].as_str().unwrap(), body["prompt"].as_str().unwrap()),
                    "done": true
                }))
            }),
        );
        let base = spawn_stub(app).await;
        let client = LlamaClient::new(&config_for(&base, &base)).unwrap();

        assert_eq!(client.generate("hi").await, "model=llama3 prompt=hi");
    }

    #[tokio::test]
    async fn test_generate_missing_response_field() {
        let app = Router::new().route("/api/generate", post(|| async { Json(json!({"done": true})) }));
        let base = spawn_stub(app).await;
        let client = LlamaClient::new(&config_for(&base, &base)).unwrap();

        assert_eq!(client.generate("hi").await, "No response from model");
    }

    #[tokio::test]
    async fn test_generate_status_error_becomes_text() {
        let app = Router::new().route(
            "/api/generate",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "model not loaded") }),
        );
        let base = spawn_stub(app).await;
        let client = LlamaClient::new(&config_for(&base, &base)).unwrap();

        assert_eq!(client.generate("hi").await, "Error querying model: 500");
    }

    #[tokio::test]
    async fn test_generate_transport_error_becomes_text() {
        let base = unreachable_url().await;
        let client = LlamaClient::new(&config_for(&base, &base)).unwrap();

        assert!(client.generate("hi").await.starts_with("Error: "));
    }

    #[tokio::test]
    async fn test_tags_reports_connection_state() {
        let app = Router::new().route("/api/tags", get(|| async { Json(json!({"models": []})) }));
        let base = spawn_stub(app).await;
        let client = LlamaClient::new(&config_for(&base, &base)).unwrap();
        assert_eq!(client.probe().await, BackendStatus::Connected);

        let base = unreachable_url().await;
        let client = LlamaClient::new(&config_for(&base, &base)).unwrap();
        assert!(matches!(client.probe().await, BackendStatus::Error(_)));
    }
}
