//! Virtual path addressing: `s3://<bucket>/<key-prefix>`.

use crate::error::{Error, Result};

/// Scheme every virtual path starts with.
pub const SCHEME: &str = "s3://";

/// The only glyph that turns a path into a wildcard pattern.
pub const WILDCARD: char = '*';

/// Split a virtual path into its bucket and key.
///
/// The key is taken verbatim after the bucket; `..` and doubled
/// delimiters are not normalized. An empty key addresses the bucket root.
pub fn parse(path: &str) -> Result<(String, String)> {
    let invalid = || Error::InvalidPath(path.to_string());

    let rest = path.strip_prefix(SCHEME).ok_or_else(invalid)?;
    let (bucket, key) = rest.split_once('/').ok_or_else(invalid)?;
    if bucket.is_empty() {
        return Err(invalid());
    }

    Ok((bucket.to_string(), key.to_string()))
}

/// Build the virtual path for a key (or prefix) inside a bucket.
pub fn join(bucket: &str, key: &str) -> String {
    format!("{SCHEME}{bucket}/{key}")
}

/// Whether the path should be expanded as a wildcard pattern.
pub fn is_wildcard(path: &str) -> bool {
    path.contains(WILDCARD)
}

/// The deepest wildcard-free start of `path`.
///
/// `s3://logs/20*/error.txt` starts its search at `s3://logs/20`.
pub fn split_wildcard(path: &str) -> &str {
    match path.find(WILDCARD) {
        Some(idx) => &path[..idx],
        None => path,
    }
}
