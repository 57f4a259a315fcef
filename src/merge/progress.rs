//! Progress events emitted while a merge runs.

use serde::Serialize;

/// Label of the final progress event, sent once every source is appended.
pub const FINALIZING_LABEL: &str = "Finalizing...";

/// A single progress event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergeProgress {
    /// Completion in `[0, 100]`.
    pub percentage: f64,

    /// What is being worked on: a source name, or [`FINALIZING_LABEL`].
    pub label: String,
}

impl MergeProgress {
    /// Progress event for source `index` out of `total`.
    pub fn for_source(index: usize, total: usize, name: &str) -> Self {
        let percentage = if total == 0 {
            0.0
        } else {
            index as f64 / total as f64 * 100.0
        };
        Self {
            percentage,
            label: name.to_string(),
        }
    }

    /// The completion event.
    pub fn finalizing() -> Self {
        Self {
            percentage: 100.0,
            label: FINALIZING_LABEL.to_string(),
        }
    }
}

/// Receives progress events from the merge pipeline.
///
/// Implemented for any `FnMut(&MergeProgress)` closure, so a test can collect
/// events into a `Vec` and the CLI can hand in a progress bar.
pub trait ProgressReporter {
    /// Called before each source is opened and once more at completion.
    fn report(&mut self, progress: &MergeProgress);
}

impl<F> ProgressReporter for F
where
    F: FnMut(&MergeProgress),
{
    fn report(&mut self, progress: &MergeProgress) {
        self(progress)
    }
}

/// Reporter that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn report(&mut self, _progress: &MergeProgress) {}
}
