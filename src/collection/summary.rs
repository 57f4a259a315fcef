//! Aggregate figures over a collection.

use serde::Serialize;
use std::fmt;

use super::item::{PageCount, SourceItem};
use crate::utils::{format_file_size, pages_label};

/// Totals derived from the current sequence of items.
///
/// Always computed from the items; never stored or updated on its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Number of items, whatever their page count state.
    pub item_count: usize,
    /// Sum of known page counts.
    pub total_pages: usize,
    /// Sum of all item sizes in bytes.
    pub total_size: u64,
    /// Items still waiting for their page count.
    pub pending: usize,
    /// Items whose page count could not be determined.
    pub unknown: usize,
}

impl Summary {
    /// Compute the summary of a sequence of items.
    pub fn from_items(items: &[SourceItem]) -> Self {
        items.iter().fold(Self::default(), |mut summary, item| {
            summary.item_count += 1;
            summary.total_size += item.size();
            match item.page_count() {
                PageCount::Known(pages) => summary.total_pages += pages,
                PageCount::Pending => summary.pending += 1,
                PageCount::Unknown => summary.unknown += 1,
            }
            summary
        })
    }

    /// Format total size as human-readable string.
    pub fn format_total_size(&self) -> String {
        format_file_size(self.total_size)
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let files = if self.item_count == 1 { "file" } else { "files" };
        write!(
            f,
            "{} {files} • {} {} • {}",
            self.item_count,
            self.total_pages,
            pages_label(self.total_pages),
            self.format_total_size()
        )
    }
}
