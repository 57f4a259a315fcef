//! Sequential merge of a collection snapshot into one PDF.
//!
//! Sources are opened one at a time, in snapshot order, on the blocking pool.
//! A progress event is reported before each source and once more before the
//! output is serialized. The first source that cannot be opened ends the job.
//!
//! # Examples
//!
//! ```no_run
//! use pdfstack::collection::Collection;
//! use pdfstack::merge::{MergePipeline, MergeProgress};
//!
//! # async fn example(collection: &Collection) -> pdfstack::Result<()> {
//! let pipeline = MergePipeline::new();
//! let mut reporter = |p: &MergeProgress| println!("{:>3.0}% {}", p.percentage, p.label);
//! let outcome = pipeline
//!     .merge(&collection.snapshot(), "Quarterly report", &mut reporter)
//!     .await?;
//! println!("{}.pdf: {} pages", outcome.name, outcome.statistics.total_pages);
//! # Ok(())
//! # }
//! ```

use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tokio::task;
use tracing::{debug, info, warn};

use crate::collection::SourceItem;
use crate::config::CompressionLevel;
use crate::error::{Error, Result};
use crate::io::reader;
use crate::merge::document::OutputDocument;
use crate::merge::naming::sanitize;
use crate::merge::progress::{MergeProgress, ProgressReporter};
use crate::utils::format_file_size;

/// Minimum number of sources a merge accepts.
pub const MIN_SOURCES: usize = 2;

/// Statistics about a merge operation.
#[derive(Debug, Clone, Serialize)]
pub struct MergeStatistics {
    /// Number of sources merged.
    pub files_merged: usize,

    /// Total number of pages in the merged document.
    pub total_pages: usize,

    /// Total size of the sources.
    pub input_size: u64,

    /// Size of the serialized output.
    pub output_size: u64,

    /// Total time taken for the merge.
    #[serde(with = "millis")]
    pub merge_time: Duration,
}

impl MergeStatistics {
    /// Format input size as human-readable string.
    pub fn format_input_size(&self) -> String {
        format_file_size(self.input_size)
    }

    /// Format output size as human-readable string.
    pub fn format_output_size(&self) -> String {
        format_file_size(self.output_size)
    }
}

mod millis {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u128(duration.as_millis())
    }
}

/// Result of a successful merge.
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    /// The serialized PDF.
    pub bytes: Vec<u8>,

    /// Sanitized output name, without extension.
    pub name: String,

    /// Statistics about the merge.
    pub statistics: MergeStatistics,
}

/// State of one merge invocation.
#[derive(Debug)]
struct MergeJob {
    total: usize,
    current: Option<MergeProgress>,
    started: Instant,
}

impl MergeJob {
    fn new(total: usize) -> Self {
        Self {
            total,
            current: None,
            started: Instant::now(),
        }
    }

    fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    fn advance<R>(&mut self, progress: MergeProgress, reporter: &mut R)
    where
        R: ProgressReporter + ?Sized,
    {
        debug!(percentage = progress.percentage, label = %progress.label, "merge progress");
        reporter.report(&progress);
        self.current = Some(progress);
    }

    /// Log where the job stopped and hand `err` back.
    fn abort(&self, err: Error) -> Error {
        match &self.current {
            Some(progress) => warn!(
                percentage = progress.percentage,
                label = %progress.label,
                error = %err,
                "merge aborted"
            ),
            None => warn!(error = %err, "merge aborted"),
        }
        err
    }
}

/// Runs merge jobs, one at a time.
#[derive(Debug, Default)]
pub struct MergePipeline {
    busy: AtomicBool,
    compression: CompressionLevel,
}

/// Releases the pipeline when a job ends, however it ends.
struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn claim(flag: &'a AtomicBool) -> Result<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| Error::JobInProgress)?;
        Ok(Self(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl MergePipeline {
    /// Create a pipeline with standard compression.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pipeline with the given compression level.
    pub fn with_compression(compression: CompressionLevel) -> Self {
        Self {
            busy: AtomicBool::new(false),
            compression,
        }
    }

    /// Whether a job is currently running.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Merge `snapshot` into a single PDF named after `output_name`.
    ///
    /// Output page order is the concatenation of each source's pages, in
    /// snapshot order.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Fewer than two sources are given ([`Error::InsufficientInput`])
    /// - Another job is running on this pipeline ([`Error::JobInProgress`])
    /// - A source cannot be opened ([`Error::SourceUnreadable`])
    /// - The output cannot be serialized ([`Error::SerializationFailed`])
    pub async fn merge<R>(
        &self,
        snapshot: &[SourceItem],
        output_name: &str,
        reporter: &mut R,
    ) -> Result<MergeOutcome>
    where
        R: ProgressReporter + ?Sized,
    {
        if snapshot.len() < MIN_SOURCES {
            return Err(Error::InsufficientInput {
                count: snapshot.len(),
            });
        }

        let _guard = BusyGuard::claim(&self.busy)?;
        let mut job = MergeJob::new(snapshot.len());
        let mut output = OutputDocument::new();
        info!(sources = job.total, "merge started");

        for (index, item) in snapshot.iter().enumerate() {
            job.advance(
                MergeProgress::for_source(index, job.total, item.name()),
                reporter,
            );

            let bytes = item.shared_bytes();
            let document = task::spawn_blocking(move || reader::load_document(&bytes))
                .await
                .map_err(|err| err.to_string())
                .and_then(|loaded| loaded.map_err(|err| err.to_string()))
                .map_err(|reason| job.abort(Error::source_unreadable(index, item.name(), reason)))?;

            let appended = output.append(document).map_err(|err| {
                job.abort(Error::source_unreadable(index, item.name(), err.to_string()))
            })?;
            debug!(index, name = item.name(), pages = appended, "appended source");
        }

        job.advance(MergeProgress::finalizing(), reporter);

        let total_pages = output.page_count();
        let compression = self.compression;
        let bytes = task::spawn_blocking(move || output.serialize(compression))
            .await
            .map_err(|err| err.to_string())
            .and_then(|saved| saved.map_err(|err| err.to_string()))
            .map_err(|reason| job.abort(Error::serialization_failed(reason)))?;

        let statistics = MergeStatistics {
            files_merged: snapshot.len(),
            total_pages,
            input_size: snapshot.iter().map(SourceItem::size).sum(),
            output_size: bytes.len() as u64,
            merge_time: job.elapsed(),
        };
        info!(
            files = statistics.files_merged,
            pages = statistics.total_pages,
            size = statistics.output_size,
            "merge finished"
        );

        Ok(MergeOutcome {
            bytes,
            name: sanitize(output_name),
            statistics,
        })
    }
}
