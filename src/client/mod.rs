// src/client/mod.rs
// =============================================================================
// The consumer side: an HTTP client for the context server and the
// assistant that decides which endpoint to use for a question.
// =============================================================================

mod assistant;
mod http;

pub use self::assistant::Assistant;
pub use self::http::ContextClient;
