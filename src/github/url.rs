// src/github/url.rs
// =============================================================================
// Recognizing GitHub repository URLs.
//
// Two jobs, two patterns:
// - find_github_url: scan free text (a user's question) for the first thing
//   that looks like a repository URL. Needs a scheme, host is matched
//   case-insensitively.
// - parse_github_url: take one candidate string and pull owner/repo out of
//   it. Anchored at the start, scheme and "www." optional, ".git" stripped,
//   anything after the repo segment ignored.
//
// "No match" is a normal answer here, so both return Option instead of an
// error.
//
// Rust concepts:
// - once_cell::sync::Lazy: compile each regex once, on first use
// - Option<T>: an expected "nothing found" outcome
// =============================================================================

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// Used on user text. Owner and repo segments stop at '/' or whitespace.
static URL_IN_TEXT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)https?://(?:www\.)?github\.com/[^/\s]+/[^/\s]+")
        .expect("URL_IN_TEXT is a valid regex")
});

// Used on a single URL. The repo segment stops at '/' or '.', which is what
// drops a trailing ".git".
static REPO_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:https?://)?(?:www\.)?github\.com/([^/]+)/([^/.]+)(?:\.git)?")
        .expect("REPO_URL is a valid regex")
});

/// An owner/repository pair taken from a GitHub URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
}

impl RepoRef {
    /// "owner/repo", the way GitHub writes it
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

// Parses a GitHub URL to extract owner and repository name
//
// Supported formats:
//   - https://github.com/owner/repo
//   - https://github.com/owner/repo.git
//   - http://www.github.com/owner/repo/tree/main  (trailing path ignored)
//   - github.com/owner/repo
//
// Returns: Some(RepoRef) on a match, None otherwise
//
// Example:
//   "https://github.com/rust-lang/rust" -> RepoRef { owner: "rust-lang", repo: "rust" }
pub fn parse_github_url(url: &str) -> Option<RepoRef> {
    let caps = REPO_URL.captures(url)?;

    Some(RepoRef {
        owner: caps[1].to_string(),
        repo: caps[2].to_string(),
    })
}

// Finds the first GitHub repository URL mentioned anywhere in `text`
//
// Returns the matched slice of `text`, untouched. It still has to go through
// parse_github_url before it can be used.
pub fn find_github_url(text: &str) -> Option<&str> {
    URL_IN_TEXT.find(text).map(|m| m.as_str())
}
