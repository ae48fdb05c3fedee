//! Recursive, wildcard-aware listing.
//!
//! A flat `(prefix, delimiter)` listing API is turned into a directory walk:
//! every page is followed, matching subdirectories are pushed onto a stack
//! and expanded most-recently-discovered first, and the collected entries
//! are filtered, deduplicated and sorted once the walk is complete.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::entry::Entry;
use crate::error::Result;
use crate::listing::{ListingClient, Pages};
use crate::path;
use crate::wildcard::Wildcard;

/// Options for [`list`].
#[derive(Debug, Clone)]
pub struct ListOptions {
    pub delimiter: String,
    pub recursive: bool,
    /// Glob the returned paths must match. A `*` in the listed path sets
    /// this automatically.
    pub pattern: Option<String>,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            delimiter: "/".to_string(),
            recursive: false,
            pattern: None,
        }
    }
}

impl ListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }
}

/// List the entries under `path`.
///
/// A path containing `*` is a pattern: the walk starts at the part before
/// the first `*`, always recurses, and returns only entries whose full path
/// matches. The result is sorted directories first, then by path.
///
/// Any store failure aborts the whole listing.
pub async fn list<L>(client: &L, path: &str, options: &ListOptions) -> Result<Vec<Entry>>
where
    L: ListingClient + ?Sized,
{
    let (start, recursive, pattern) = if path::is_wildcard(path) {
        let start = path::split_wildcard(path);
        debug!(pattern = path, start, "Wildcard path, listing from its literal prefix");
        (start, true, Some(Wildcard::new(path)?))
    } else {
        let pattern = options.pattern.as_deref().map(Wildcard::new).transpose()?;
        (path, options.recursive, pattern)
    };

    walk(client, start, &options.delimiter, recursive, pattern.as_ref()).await
}

/// Walk from `start` without interpreting `*` in it.
pub(crate) async fn walk<L>(
    client: &L,
    start: &str,
    delimiter: &str,
    recursive: bool,
    pattern: Option<&Wildcard>,
) -> Result<Vec<Entry>>
where
    L: ListingClient + ?Sized,
{
    let (container, prefix) = path::parse(start)?;

    let mut found = Vec::new();
    let mut seen_paths = HashSet::new();
    let mut visited = HashSet::new();
    let mut stack = vec![prefix];

    while let Some(prefix) = stack.pop() {
        if !visited.insert(prefix.clone()) {
            continue;
        }

        let mut pages = Pages::new(client, &container, &prefix, delimiter);
        while let Some(entries) = pages.next().await? {
            for entry in entries {
                let entry_path = entry.path();
                if let Some(pattern) = pattern {
                    if !pattern.partial_match(&entry_path, delimiter) {
                        trace!(path = %entry_path, "Pruned, no partial match");
                        continue;
                    }
                }

                // A directory marker object shares its path with the common
                // prefix already found one level up; the first one wins.
                if !seen_paths.insert(entry_path) {
                    trace!(path = %entry, "Skipping entry with a path already listed");
                    continue;
                }

                if recursive {
                    if let Entry::Directory(dir) = &entry {
                        trace!(path = %entry, "Adding directory to search stack");
                        stack.push(dir.prefix.clone());
                    }
                }

                found.push(entry);
            }
        }
    }

    if let Some(pattern) = pattern {
        found.retain(|entry| pattern.full_match(&entry.path()));
    }

    found.sort();

    debug!(
        path = start,
        recursive,
        directories_listed = visited.len(),
        entries = found.len(),
        "Listing complete"
    );

    Ok(found)
}
