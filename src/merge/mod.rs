//! PDF merging for pdfstack.
//!
//! This module contains the merge pipeline:
//! - Building an output document from a snapshot of the collection
//! - Progress events reported while the merge runs
//! - Output name sanitization

pub mod document;
pub mod naming;
pub mod pipeline;
pub mod progress;

pub use document::OutputDocument;
pub use naming::{DEFAULT_OUTPUT_NAME, sanitize};
pub use pipeline::{MIN_SOURCES, MergeOutcome, MergePipeline, MergeStatistics};
pub use progress::{FINALIZING_LABEL, MergeProgress, NoProgress, ProgressReporter};
