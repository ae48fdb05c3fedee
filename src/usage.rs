//! Disk usage: total object size under a path.

use std::collections::HashSet;

use futures::{stream, StreamExt, TryStreamExt};
use tracing::debug;

use crate::entry::Entry;
use crate::error::Result;
use crate::listing::{ListingClient, Pages};
use crate::traverse;

/// Subtree walks run at once by default.
pub const DEFAULT_MAX_CONCURRENCY: usize = 16;

/// Options for [`total_size`].
#[derive(Debug, Clone)]
pub struct UsageOptions {
    pub delimiter: String,
    pub recursive: bool,
    /// Upper bound on concurrent subdirectory walks.
    pub max_concurrency: usize,
}

impl Default for UsageOptions {
    fn default() -> Self {
        Self {
            delimiter: "/".to_string(),
            recursive: false,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }
}

impl UsageOptions {
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

    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }
}

/// Sum the sizes of the objects under `path`.
///
/// Without recursion only the objects directly under `path` count. With
/// recursion every subdirectory of the first listing is walked on its own,
/// up to `max_concurrency` at a time, and the per-directory totals are added
/// once all walks finish. Those subdirectories are distinct common prefixes,
/// so no object is counted twice. The first failing walk fails the call and
/// the walks still in flight are dropped.
///
/// `*` has no special meaning here.
pub async fn total_size<L>(client: &L, path: &str, options: &UsageOptions) -> Result<u64>
where
    L: ListingClient + ?Sized,
{
    let delimiter = options.delimiter.as_str();
    let entries = traverse::walk(client, path, delimiter, false, None).await?;

    let mut total = 0;
    let mut directories = Vec::new();
    for entry in entries {
        match entry {
            Entry::File(file) => total += file.size,
            Entry::Directory(dir) => directories.push(dir),
        }
    }

    debug!(path, files_size = total, directories = directories.len(), "Listed base");

    if !options.recursive || directories.is_empty() {
        return Ok(total);
    }

    let nested = stream::iter(directories)
        .map(|dir| async move { subtree_size(client, &dir.container, &dir.prefix, delimiter).await })
        .buffer_unordered(options.max_concurrency.max(1))
        .try_fold(0u64, |acc, size| async move { Ok(acc + size) })
        .await?;

    Ok(total + nested)
}

/// Total size of every object at or below `prefix`.
async fn subtree_size<L>(client: &L, container: &str, prefix: &str, delimiter: &str) -> Result<u64>
where
    L: ListingClient + ?Sized,
{
    let mut total = 0;
    let mut visited = HashSet::new();
    let mut stack = vec![prefix.to_string()];

    while let Some(prefix) = stack.pop() {
        if !visited.insert(prefix.clone()) {
            continue;
        }

        let mut pages = Pages::new(client, container, &prefix, delimiter);
        while let Some(entries) = pages.next().await? {
            for entry in entries {
                match entry {
                    Entry::File(file) => total += file.size,
                    Entry::Directory(dir) => stack.push(dir.prefix),
                }
            }
        }
    }

    debug!(container, prefix, size = total, directories = visited.len(), "Summed subtree");

    Ok(total)
}
