//! Glob matching of virtual paths against a wildcard pattern.
//!
//! `*` matches any run of characters, delimiters included, since the whole
//! path string is matched at once. A run of `*` means the same as one `*`.
//! `?` and `[...]` keep their usual glob meaning and can match the
//! delimiter too.

use glob::{MatchOptions, Pattern};
use tracing::trace;

use crate::error::{Error, Result};
use crate::path::{SCHEME, WILDCARD};

const OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// A compiled wildcard pattern over full virtual paths.
#[derive(Debug, Clone)]
pub struct Wildcard {
    raw: String,
    compiled: Pattern,
    /// The pattern cut after each character, where the cut still compiles.
    heads: Vec<Pattern>,
}

impl Wildcard {
    /// Compile a pattern such as `s3://bucket/logs/*/error.txt`.
    pub fn new(pattern: &str) -> Result<Self> {
        let raw = collapse_stars(pattern);
        let compiled = Pattern::new(&raw).map_err(|e| Error::Pattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;

        let heads = raw
            .char_indices()
            .filter_map(|(idx, c)| Pattern::new(&raw[..idx + c.len_utf8()]).ok())
            .collect();

        Ok(Self {
            raw,
            compiled,
            heads,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether the complete path matches the complete pattern.
    pub fn full_match(&self, candidate: &str) -> bool {
        self.compiled.matches_with(candidate, OPTIONS)
    }

    /// Whether descending below `candidate` could still produce a full match.
    ///
    /// The leading segments of the pattern that correspond to the
    /// candidate's own depth are compared first; a pattern ending in the
    /// delimiter matches anything below it. Every glob token can also match
    /// the delimiter, so a candidate that fails that comparison is still
    /// kept when it matches some leading part of the pattern, since a longer
    /// path could then complete the match. Anything kept here that does not
    /// belong is removed by the final `full_match` pass.
    pub fn partial_match(&self, candidate: &str, delimiter: &str) -> bool {
        if delimiter.is_empty() {
            return true;
        }

        let is_match = self.segment_match(candidate, delimiter) || self.prefix_match(candidate);

        trace!(candidate, pattern = %self.raw, is_match, "Partial match");

        is_match
    }

    fn segment_match(&self, candidate: &str, delimiter: &str) -> bool {
        let candidate = candidate.strip_suffix(delimiter).unwrap_or(candidate);
        let mut pattern = self.raw.clone();
        if pattern.ends_with(delimiter) {
            pattern.push(WILDCARD);
        }

        let candidate_parts = segments(candidate, delimiter);
        let pattern_parts = segments(&pattern, delimiter);
        let depth = candidate_parts.len().min(pattern_parts.len());

        let truncated_candidate = format!("{SCHEME}{}", candidate_parts[..depth].join(delimiter));
        let truncated_pattern =
            collapse_stars(&format!("{SCHEME}{}", pattern_parts[..depth].join(delimiter)));

        match Pattern::new(&truncated_pattern) {
            Ok(compiled) => compiled.matches_with(&truncated_candidate, OPTIONS),
            // Cut through a character class.
            Err(_) => true,
        }
    }

    /// Whether `candidate` matches the pattern cut at some character.
    fn prefix_match(&self, candidate: &str) -> bool {
        self.heads
            .iter()
            .any(|head| head.matches_with(candidate, OPTIONS))
    }
}

/// Replace every run of `*` with a single `*`.
///
/// `glob` reads `**` as a recursive directory wildcard, or rejects it
/// inside a segment; here it is just a longer way to write `*`.
fn collapse_stars(pattern: &str) -> String {
    let mut collapsed = String::with_capacity(pattern.len());
    for c in pattern.chars() {
        if c == WILDCARD && collapsed.ends_with(WILDCARD) {
            continue;
        }
        collapsed.push(c);
    }
    collapsed
}

fn segments<'a>(path: &'a str, delimiter: &str) -> Vec<&'a str> {
    path.strip_prefix(SCHEME)
        .unwrap_or(path)
        .split(delimiter)
        .collect()
}
