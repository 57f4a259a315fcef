//! Terminal progress bar for merges.
//!
//! # Examples
//!
//! ```
//! use pdfstack::merge::{MergeProgress, ProgressReporter};
//! use pdfstack::output::progress::ProgressBar;
//!
//! let mut bar = ProgressBar::new();
//! bar.report(&MergeProgress::for_source(0, 2, "a.pdf"));
//! bar.report(&MergeProgress::for_source(1, 2, "b.pdf"));
//! bar.report(&MergeProgress::finalizing());
//! bar.finish();
//! ```

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crate::merge::{MergeProgress, ProgressReporter};

/// Width of the bar in characters, brackets excluded.
const BAR_WIDTH: usize = 30;

/// Progress bar that renders merge progress on stdout.
#[derive(Debug)]
pub struct ProgressBar {
    /// Last rendered event.
    current: Option<MergeProgress>,
    /// Start time of the operation.
    start_time: Instant,
    /// Whether the progress bar is enabled.
    enabled: bool,
}

impl ProgressBar {
    /// Create a progress bar, enabled when stdout is a terminal.
    pub fn new() -> Self {
        Self {
            current: None,
            start_time: Instant::now(),
            enabled: Self::is_terminal(),
        }
    }

    /// Create a disabled progress bar (no output).
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::new()
        }
    }

    /// Create a progress bar unless `quiet` is set.
    pub fn unless_quiet(quiet: bool) -> Self {
        if quiet { Self::disabled() } else { Self::new() }
    }

    /// Check if stdout is a terminal.
    fn is_terminal() -> bool {
        use std::io::IsTerminal;
        io::stdout().is_terminal()
    }

    /// Percentage of the last event, 0 before any.
    pub fn percent(&self) -> f64 {
        self.current.as_ref().map_or(0.0, |p| p.percentage)
    }

    /// Get the elapsed time since start.
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// End the bar's line.
    pub fn finish(&mut self) {
        if self.enabled && self.current.is_some() {
            println!();
        }
    }

    /// Build the line for `progress`.
    fn render_line(&self, progress: &MergeProgress) -> String {
        let percentage = progress.percentage.clamp(0.0, 100.0);
        let filled = (percentage / 100.0 * BAR_WIDTH as f64).round() as usize;
        let bar = format!(
            "[{}{}]",
            "=".repeat(filled),
            " ".repeat(BAR_WIDTH - filled)
        );
        format!(
            "{bar} {percentage:>3.0}% {} {}",
            format_duration(self.elapsed()),
            progress.label
        )
    }
}

impl Default for ProgressBar {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for ProgressBar {
    fn report(&mut self, progress: &MergeProgress) {
        if self.enabled {
            print!("\r\x1b[K{}", self.render_line(progress));
            io::stdout().flush().ok();
        }
        self.current = Some(progress.clone());
    }
}

/// Format a duration as a human-readable string.
fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();

    if secs < 60 {
        format!("{secs}s")
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    }
}
