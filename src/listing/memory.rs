//! In-memory store for tests and local experiments.

use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{ListPage, ListingClient};
use crate::entry::S3File;
use crate::error::{Error, Result};

const DEFAULT_PAGE_SIZE: usize = 1000;

#[derive(Debug, Clone)]
struct StoredObject {
    size: u64,
    last_modified: Option<DateTime<Utc>>,
}

/// Buckets of objects listed the way `ListObjectsV2` lists them: keys in
/// byte order, keys sharing a prefix up to the next delimiter folded into
/// one common prefix, and at most `page_size` items per response.
#[derive(Debug)]
pub struct MemoryStore {
    containers: BTreeMap<String, BTreeMap<String, StoredObject>>,
    page_size: usize,
    failures: HashSet<(String, String)>,
    list_calls: AtomicUsize,
    listed_prefixes: Mutex<Vec<String>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self {
            containers: BTreeMap::new(),
            page_size: DEFAULT_PAGE_SIZE,
            failures: HashSet::new(),
            list_calls: AtomicUsize::new(0),
            listed_prefixes: Mutex::new(Vec::new()),
        }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maximum number of directories plus files per page.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Create an empty bucket.
    pub fn with_container(mut self, container: &str) -> Self {
        self.containers.entry(container.to_string()).or_default();
        self
    }

    pub fn with_object(self, container: &str, key: &str, size: u64) -> Self {
        self.with_object_at(container, key, size, None)
    }

    pub fn with_object_at(
        mut self,
        container: &str,
        key: &str,
        size: u64,
        last_modified: Option<DateTime<Utc>>,
    ) -> Self {
        self.containers
            .entry(container.to_string())
            .or_default()
            .insert(key.to_string(), StoredObject { size, last_modified });
        self
    }

    /// Make every listing of `prefix` in `container` fail.
    pub fn with_failure(mut self, container: &str, prefix: &str) -> Self {
        self.failures
            .insert((container.to_string(), prefix.to_string()));
        self
    }

    /// Number of pages served so far.
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Prefix of every first-page request served so far, in request order.
    pub fn listed_prefixes(&self) -> Vec<String> {
        self.listed_prefixes
            .lock()
            .map(|prefixes| prefixes.clone())
            .unwrap_or_default()
    }

    fn items<'a>(
        objects: &'a BTreeMap<String, StoredObject>,
        prefix: &str,
        delimiter: &str,
    ) -> Vec<(String, Option<&'a StoredObject>)> {
        let mut items: Vec<(String, Option<&StoredObject>)> = Vec::new();

        for (key, object) in objects.range(prefix.to_string()..) {
            if !key.starts_with(prefix) {
                break;
            }

            let rest = &key[prefix.len()..];
            let split = if delimiter.is_empty() {
                None
            } else {
                rest.find(delimiter)
            };

            match split {
                Some(idx) => {
                    let common = &key[..prefix.len() + idx + delimiter.len()];
                    // Keys sharing a common prefix are contiguous.
                    let is_repeat = matches!(items.last(), Some((last, None)) if last == common);
                    if !is_repeat {
                        items.push((common.to_string(), None));
                    }
                }
                None => items.push((key.clone(), Some(object))),
            }
        }

        items
    }
}

#[async_trait]
impl ListingClient for MemoryStore {
    async fn list_page(
        &self,
        container: &str,
        prefix: &str,
        delimiter: &str,
        page_token: Option<&str>,
    ) -> Result<ListPage> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if page_token.is_none() {
            if let Ok(mut prefixes) = self.listed_prefixes.lock() {
                prefixes.push(prefix.to_string());
            }
        }

        if self
            .failures
            .contains(&(container.to_string(), prefix.to_string()))
        {
            return Err(Error::Store(format!(
                "InternalError: listing s3://{container}/{prefix} failed"
            )));
        }

        let objects = self
            .containers
            .get(container)
            .ok_or_else(|| Error::Store(format!("NoSuchBucket: {container}")))?;

        let start = match page_token {
            Some(token) => token
                .parse::<usize>()
                .map_err(|_| Error::Store(format!("InvalidToken: {token}")))?,
            None => 0,
        };

        let items = Self::items(objects, prefix, delimiter);
        let end = (start + self.page_size).min(items.len());

        let mut page = ListPage::default();
        for (name, object) in items.get(start..end).unwrap_or_default() {
            match object {
                Some(object) => page.files.push(S3File {
                    container: container.to_string(),
                    key: name.clone(),
                    last_modified: object.last_modified,
                    size: object.size,
                    storage_class: Some("STANDARD".to_string()),
                }),
                None => page.directories.push(name.clone()),
            }
        }

        if end < items.len() {
            page.next_token = Some(end.to_string());
        }

        Ok(page)
    }
}
