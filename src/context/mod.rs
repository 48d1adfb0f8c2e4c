// src/context/mod.rs
// =============================================================================
// Context resolution: the data model, the assembler and the service that
// ties the classifier and both resolvers together.
//
// Submodules:
// - types: request/response structs shared with the client
// - assemble: pure function from "what happened" to a ContextResponse
// - service: the async pipeline the HTTP handlers call
// =============================================================================

mod assemble;
mod service;
mod types;

pub use service::ContextService;
pub use types::{ContextRequest, ContextResponse, GitHubListRequest, GitHubListResult};

#[cfg(test)]
pub use types::ContextSource;
