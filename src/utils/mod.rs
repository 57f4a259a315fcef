//! Utilities for path collection and human-readable sizes.

use crate::{Error, Result};
use std::path::PathBuf;

/// Expand multiple glob patterns into filesystem paths.
///
/// Accepts anything iterable with items that convert to `&str`, e.g.:
/// `&[&str]`, `Vec<String>`, or `Vec<&str>`.
///
/// Patterns are expanded in the order given; matches of a single pattern
/// come back in the alphabetical order produced by `glob`. A pattern without
/// wildcards that matches nothing is kept verbatim so the reader can report
/// it as missing.
pub fn collect_paths_for_patterns<T>(patterns: T) -> Result<Vec<PathBuf>>
where
    T: IntoIterator,
    T::Item: AsRef<str>,
{
    let mut resolved_paths = Vec::new();

    for pattern in patterns.into_iter() {
        let paths = collect_paths_for_pattern(pattern.as_ref())?;
        resolved_paths.extend(paths);
    }

    Ok(resolved_paths)
}

/// Expand a single glob pattern into filesystem paths.
fn collect_paths_for_pattern(pattern: &str) -> Result<Vec<PathBuf>> {
    let mut resolved_paths = Vec::new();

    let paths = glob::glob(pattern).map_err(|err| Error::Other {
        message: format!("Invalid pattern '{pattern}': {err}"),
    })?;

    for entry in paths {
        let path = entry.map_err(|err| Error::Other {
            message: err.to_string(),
        })?;
        resolved_paths.push(path);
    }

    if resolved_paths.is_empty() && !has_wildcards(pattern) {
        resolved_paths.push(PathBuf::from(pattern));
    }

    Ok(resolved_paths)
}

fn has_wildcards(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

/// Format a byte count for display, e.g. `"0 Bytes"`, `"512 Bytes"`,
/// `"1.5 KB"`, `"2.25 MB"`.
///
/// Values are scaled by 1024 and shown with at most two decimals; trailing
/// zeros are dropped.
pub fn format_file_size(size: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    if size == 0 {
        return "0 Bytes".to_string();
    }

    let mut unit = 0;
    let mut scaled = size as f64;
    while scaled >= 1024.0 && unit < UNITS.len() - 1 {
        scaled /= 1024.0;
        unit += 1;
    }

    let rounded = format!("{scaled:.2}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", UNITS[unit])
}

/// Pluralize a page count the way the file list shows it.
pub fn pages_label(count: usize) -> &'static str {
    if count == 1 { "page" } else { "pages" }
}
