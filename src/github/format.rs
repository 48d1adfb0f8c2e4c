// src/github/format.rs
// =============================================================================
// Turning a directory listing into text.
//
// There are two renderings and they are deliberately different:
//
// 1. render_context_listing (used by POST /context)
//    One text block: a header, then directories, then files, by *name*.
//    Anything that is not a plain file counts as a directory.
//
// 2. render_dedicated_listing (used by POST /github/list-files)
//    One string per entry, in GitHub's order, by *full path*.
//    Anything that is not a directory counts as a file.
//
// Clients depend on both shapes, so they are kept apart on purpose.
// =============================================================================

use super::contents::{EntryKind, RepoEntry};
use super::url::RepoRef;

pub const FOLDER_MARKER: &str = "📁";
pub const FILE_MARKER: &str = "📄";

// Builds the content block for a /context answer
//
// Example output:
//   Repository: acme/widget
//
//   Files and directories:
//   📁 src
//   📄 readme.md
pub fn render_context_listing(repo: &RepoRef, entries: &[RepoEntry]) -> String {
    let (files, directories): (Vec<&RepoEntry>, Vec<&RepoEntry>) = entries
        .iter()
        .partition(|entry| entry.kind == EntryKind::File);

    let lines: Vec<String> = directories
        .iter()
        .map(|entry| format!("{} {}", FOLDER_MARKER, entry.name))
        .chain(files.iter().map(|entry| format!("{} {}", FILE_MARKER, entry.name)))
        .collect();

    format!(
        "Repository: {}\n\nFiles and directories:\n{}",
        repo.full_name(),
        lines.join("\n")
    )
}

// Builds the `files` list for a /github/list-files answer
//
// Example output:
//   ["📁 src", "📄 src/main.rs"]
pub fn render_dedicated_listing(entries: &[RepoEntry]) -> Vec<String> {
    entries
        .iter()
        .map(|entry| {
            let marker = if entry.kind == EntryKind::Directory {
                FOLDER_MARKER
            } else {
                FILE_MARKER
            };
            format!("{} {}", marker, entry.path)
        })
        .collect()
}
