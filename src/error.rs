// src/error.rs
// =============================================================================
// Typed errors for the calls we make to other services.
//
// Two families:
// - UpstreamError: the server talking to GitHub or the Llama backend
// - ClientError: the client talking to our own server
//
// Neither of these ever reaches an end user as a raw error. The resolvers and
// the assistant turn them into content strings or `success: false` results.
//
// Rust concepts:
// - thiserror: derive macro that writes the Display/Error impls for us
// - #[from]: automatic conversion so the ? operator works on reqwest errors
// =============================================================================

use thiserror::Error;

/// Failure of an outbound call to GitHub or the model backend.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The upstream answered with a non-2xx status.
    /// `message` is what the upstream said (or a generic status line).
    #[error("{message}")]
    Status { status: u16, message: String },

    /// We never got a response (DNS, connect, timeout, ...)
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// Owner, repo or path would not stay inside /repos/{owner}/{repo}/contents
    #[error("Invalid repository reference: {0}")]
    InvalidRepo(String),

    /// We got a 2xx response, but the body was not what we expected
    #[error("Malformed response: {0}")]
    Malformed(String),
}

/// Failure of the client's own call to the context server.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned HTTP {0}")]
    Status(u16),
}
