//! Rendering listings and sizes for the terminal.

use chrono::{FixedOffset, Offset, Utc};

use crate::entry::Entry;

const UNITS: [&str; 5] = ["Bytes", "kB", "MB", "GB", "TB"];

/// Format a byte count with decimal units, e.g. `10.1 MB` or `13 Bytes`.
pub fn bytes_to_human(bytes: u64) -> String {
    let mut value = bytes as f64;
    for unit in UNITS {
        if value < 1000.0 {
            return if unit == "Bytes" {
                format!("{value:.0} {unit}")
            } else {
                format!("{value:.1} {unit}")
            };
        }
        value /= 1000.0;
    }
    format!("{value:.1} PB")
}

/// One listing row: modification time, size, path.
///
/// Directories show `-` for both time and size.
pub fn format_entry(entry: &Entry, human: bool, offset: Option<FixedOffset>) -> String {
    let offset = offset.unwrap_or_else(|| Utc.fix());

    let modified = entry
        .last_modified()
        .map(|t| t.with_timezone(&offset).format("%b %d %Y %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string());

    let size = match entry.size() {
        Some(size) if human => bytes_to_human(size),
        Some(size) => size.to_string(),
        None => "-".to_string(),
    };

    format!("{modified:<20}{size:<10}{entry}")
}
