// src/intent.rs
// =============================================================================
// Decides what a question is asking for.
//
// The rule, applied identically by the server and by the client:
//   a. find the first GitHub repository URL in the text (host matched
//      case-insensitively, scheme required)
//   b. lowercase the text; it must contain "github" AND ("list" OR "files")
//   -> a repository listing request iff (a) found a URL and (b) holds,
//      otherwise a generic question.
//
// This is a loose heuristic. A question that names a repository but never
// says "list" or "files" ("tell me about https://github.com/acme/widget") is
// a generic question and goes to the model. Callers rely on exactly this
// behavior, so don't make it smarter here.
// =============================================================================

use crate::github::find_github_url;

/// What the user wants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent<'a> {
    /// List a repository; `url` is the URL as it appears in the query
    RepoListing { url: &'a str },
    /// Anything else
    Generic,
}

pub fn classify(query: &str) -> Intent<'_> {
    let url = find_github_url(query);

    let lowered = query.to_lowercase();
    let mentions_listing =
        lowered.contains("github") && (lowered.contains("list") || lowered.contains("files"));

    match url {
        Some(url) if mentions_listing => Intent::RepoListing { url },
        _ => Intent::Generic,
    }
}
