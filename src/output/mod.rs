//! Output formatting and display for pdfstack.
//!
//! This module handles all user-facing output including:
//! - Formatted status messages
//! - The numbered collection listing and its summary
//! - Merge progress
//! - The final report, as text or JSON
//!
//! # Examples
//!
//! ```no_run
//! use pdfstack::output::OutputFormatter;
//! use pdfstack::config::Config;
//!
//! # fn example(config: Config) {
//! let formatter = OutputFormatter::from_config(&config);
//! formatter.info("Reading files");
//! formatter.success("Merge completed successfully");
//! # }
//! ```

pub mod formatter;
pub mod progress;

pub use formatter::{MessageLevel, OutputFormatter};
pub use progress::ProgressBar;

use serde::Serialize;
use std::path::Path;

use crate::collection::{SourceItem, Summary};
use crate::error::{Error, Result};
use crate::io::WriteStatistics;
use crate::merge::MergeStatistics;

/// Machine-readable report of a run, printed with `--json`.
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    /// Items in list order.
    pub items: &'a [SourceItem],
    /// Totals over the items.
    pub summary: Summary,
    /// Merge statistics, absent on a dry run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge: Option<&'a MergeStatistics>,
    /// Written file, absent on a dry run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<&'a Path>,
}

impl RunReport<'_> {
    /// Render as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| Error::other(format!("Failed to encode report: {e}")))
    }
}

/// Display merge and write statistics to the user.
pub fn display_merge_statistics(
    formatter: &OutputFormatter,
    merge: &MergeStatistics,
    write: &WriteStatistics,
) {
    formatter.success(&format!(
        "Merged {} file(s) into {} ({} pages, {})",
        merge.files_merged,
        write.output_path.display(),
        merge.total_pages,
        write.format_file_size()
    ));
    formatter.detail("Input size", &merge.format_input_size());
    formatter.detail("Merge time", &format!("{:.2}s", merge.merge_time.as_secs_f64()));
    formatter.detail("Write time", &format!("{:.2}s", write.write_time.as_secs_f64()));
}
