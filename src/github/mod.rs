// src/github/mod.rs
// =============================================================================
// This module handles everything GitHub-specific.
//
// Submodules:
// - url: finding and parsing repository URLs
// - contents: calling the GitHub contents API
// - format: rendering a listing for the two endpoints that return one
//
// Future enhancements:
// - Walk into subdirectories (list_contents already takes a path)
// =============================================================================

mod contents;
mod format;
mod url;

// Re-export the public pieces so callers can write `github::parse_github_url`
pub use self::contents::{GitHubClient, RepoEntry};
pub use self::format::{render_context_listing, render_dedicated_listing};
pub use self::url::{find_github_url, parse_github_url, RepoRef};

#[cfg(test)]
pub use self::contents::EntryKind;
