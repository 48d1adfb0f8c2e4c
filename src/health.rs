// src/health.rs
// =============================================================================
// Health reporting shared by the server (which computes it) and the client
// (which reads it).
//
// Each backend is probed on its own:
// - Llama server: GET /api/tags
// - GitHub:       GET /rate_limit
//
// A probe ends up as one of three states. The overall status is "healthy"
// only when both probes say "connected".
// =============================================================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of probing one backend.
///
/// Serialized as a plain string, the way the /health endpoint has always
/// reported it: "connected", "unavailable" or "error: <details>".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendStatus {
    /// Probe answered with a 2xx status
    Connected,
    /// Probe answered, but not with a 2xx status
    Unavailable,
    /// Probe never got an answer
    Error(String),
}

impl BackendStatus {
    /// Classifies the result of a probe request
    pub fn from_probe(result: Result<reqwest::Response, reqwest::Error>) -> Self {
        match result {
            Ok(response) if response.status().is_success() => BackendStatus::Connected,
            Ok(_) => BackendStatus::Unavailable,
            Err(e) => BackendStatus::Error(e.to_string()),
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, BackendStatus::Connected)
    }
}

impl fmt::Display for BackendStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendStatus::Connected => write!(f, "connected"),
            BackendStatus::Unavailable => write!(f, "unavailable"),
            BackendStatus::Error(e) => write!(f, "error: {}", e),
        }
    }
}

impl From<String> for BackendStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "connected" => BackendStatus::Connected,
            "unavailable" => BackendStatus::Unavailable,
            other => BackendStatus::Error(
                other.strip_prefix("error: ").unwrap_or(other).to_string(),
            ),
        }
    }
}

impl Serialize for BackendStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BackendStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(BackendStatus::from)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallStatus {
    Healthy,
    Degraded,
}

/// Body of GET /health
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: OverallStatus,
    pub llama_status: BackendStatus,
    pub github_status: BackendStatus,
}

impl HealthReport {
    pub fn new(llama_status: BackendStatus, github_status: BackendStatus) -> Self {
        let status = if llama_status.is_connected() && github_status.is_connected() {
            OverallStatus::Healthy
        } else {
            OverallStatus::Degraded
        };

        Self {
            status,
            llama_status,
            github_status,
        }
    }
}
