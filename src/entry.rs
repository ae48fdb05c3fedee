//! Listing entries: objects and virtual directories.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};

use crate::path;

/// An object stored under a key.
#[derive(Debug, Clone)]
pub struct S3File {
    pub container: String,
    pub key: String,
    pub last_modified: Option<DateTime<Utc>>,
    pub size: u64,
    pub storage_class: Option<String>,
}

impl S3File {
    pub fn path(&self) -> String {
        path::join(&self.container, &self.key)
    }

    /// Last segment of the key.
    pub fn filename(&self) -> &str {
        self.key.rsplit('/').next().unwrap_or(&self.key)
    }
}

/// A common prefix reported by the store; always ends in the delimiter.
#[derive(Debug, Clone)]
pub struct S3Directory {
    pub container: String,
    pub prefix: String,
}

impl S3Directory {
    pub fn path(&self) -> String {
        path::join(&self.container, &self.prefix)
    }
}

/// One row of a listing.
///
/// Two entries are equal when their paths are equal. Directories sort
/// before files whatever their paths; entries of the same kind sort by
/// path. The two only disagree for a directory marker object and the common
/// prefix with the same path, so listings keep one entry per path before
/// sorting.
#[derive(Debug, Clone)]
pub enum Entry {
    Directory(S3Directory),
    File(S3File),
}

impl Entry {
    pub fn path(&self) -> String {
        match self {
            Entry::Directory(dir) => dir.path(),
            Entry::File(file) => file.path(),
        }
    }

    pub fn container(&self) -> &str {
        match self {
            Entry::Directory(dir) => &dir.container,
            Entry::File(file) => &file.container,
        }
    }

    /// Object size, `None` for directories.
    pub fn size(&self) -> Option<u64> {
        match self {
            Entry::Directory(_) => None,
            Entry::File(file) => Some(file.size),
        }
    }

    pub fn last_modified(&self) -> Option<DateTime<Utc>> {
        match self {
            Entry::Directory(_) => None,
            Entry::File(file) => file.last_modified,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Entry::Directory(_))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.path() == other.path()
    }
}

impl Eq for Entry {}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Entry::Directory(_), Entry::File(_)) => Ordering::Less,
            (Entry::File(_), Entry::Directory(_)) => Ordering::Greater,
            (Entry::Directory(a), Entry::Directory(b)) => a.path().cmp(&b.path()),
            (Entry::File(a), Entry::File(b)) => a.path().cmp(&b.path()),
        }
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
