// src/client/assistant.rs
// =============================================================================
// Turns a user's question into the one string we show them.
//
// Flow:
// 1. Classify the question with the same rule the server uses (intent.rs)
// 2. Repository listing?
//    - ask the dedicated /github/list-files endpoint first
//    - success -> print the files (or say the repository is empty)
//    - failure -> fall back to /context; if that fails too, report the
//      *dedicated* endpoint's message, since that is the one that explains
//      what went wrong with the repository
// 3. Anything else -> /context, first element's content
//
// Every path ends in a string. Nothing here returns an error.
// =============================================================================

use tracing::warn;

use super::http::ContextClient;
use crate::context::ContextRequest;
use crate::intent::{classify, Intent};

pub const NOT_ENOUGH_INFORMATION: &str = "I don't have enough information to answer that question.";
pub const NO_REPOSITORY_INFORMATION: &str =
    "I couldn't retrieve any information about the GitHub repository.";

pub struct Assistant {
    client: ContextClient,
    user_id: Option<String>,
    session_id: Option<String>,
}

impl Assistant {
    pub fn new(client: ContextClient) -> Self {
        Self {
            client,
            user_id: None,
            session_id: None,
        }
    }

    /// Tags every context request with these identifiers
    pub fn with_identity(mut self, user_id: Option<String>, session_id: Option<String>) -> Self {
        self.user_id = user_id;
        self.session_id = session_id;
        self
    }

    // Generates the display answer for one question
    pub async fn generate_response(&self, user_query: &str) -> String {
        match classify(user_query) {
            Intent::RepoListing { url } => self.list_repository(user_query, url).await,
            Intent::Generic => self.answer(user_query).await,
        }
    }

    async fn list_repository(&self, user_query: &str, url: &str) -> String {
        let listing = self.client.list_github_files(url).await;

        if listing.success {
            let name = format!("{}/{}", listing.owner, listing.repository);
            return if listing.files.is_empty() {
                format!("The repository {} appears to be empty.", name)
            } else {
                format!("Files in {}:\n\n{}", name, listing.files.join("\n"))
            };
        }

        warn!(
            reason = listing.message.as_deref().unwrap_or(""),
            "dedicated listing failed, falling back to context endpoint"
        );

        match self.client.get_context(&self.context_request(user_query)).await {
            Ok(context) => context
                .elements
                .into_iter()
                .next()
                .map(|element| element.content)
                .unwrap_or_else(|| NO_REPOSITORY_INFORMATION.to_string()),
            // Report what the dedicated call said, not the fallback's error
            Err(_) => format!(
                "Sorry, I couldn't list the GitHub repository files: {}",
                listing.message.as_deref().unwrap_or("Unknown error")
            ),
        }
    }

    async fn answer(&self, user_query: &str) -> String {
        match self.client.get_context(&self.context_request(user_query)).await {
            Ok(context) => context
                .elements
                .into_iter()
                .next()
                .map(|element| element.content)
                .unwrap_or_else(|| NOT_ENOUGH_INFORMATION.to_string()),
            Err(e) => format!("Sorry, I couldn't generate a proper response due to: {}", e),
        }
    }

    fn context_request(&self, user_query: &str) -> ContextRequest {
        ContextRequest {
            user_id: self.user_id.clone(),
            session_id: self.session_id.clone(),
            ..ContextRequest::new(user_query)
        }
    }
}
