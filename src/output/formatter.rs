//! Message formatting and display.
//!
//! Status messages go to stdout, warnings and errors to stderr. Every line is
//! built by a pure `format_*` method first so it can be checked without a
//! terminal.
//!
//! # Examples
//!
//! ```
//! use pdfstack::output::formatter::OutputFormatter;
//!
//! let formatter = OutputFormatter::new(false, false);
//! formatter.info("Reading 3 files...");
//! formatter.success("Merged 3 files");
//! formatter.error("Something went wrong");
//! ```

use crate::collection::{SourceItem, Summary};
use crate::config::Config;
use crate::utils::format_file_size;
use std::io;

/// Level of output message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    /// Informational message.
    Info,
    /// Success message.
    Success,
    /// Warning message.
    Warning,
    /// Error message.
    Error,
    /// Debug/verbose message.
    Debug,
}

impl MessageLevel {
    fn prefix(self) -> &'static str {
        match self {
            Self::Info => "",
            Self::Success => "✓ ",
            Self::Warning => "⚠ ",
            Self::Error => "✗ ",
            Self::Debug => "→ ",
        }
    }

    fn color(self) -> &'static str {
        match self {
            Self::Info => "",
            Self::Success => "\x1b[32m",
            Self::Warning => "\x1b[33m",
            Self::Error => "\x1b[31m",
            Self::Debug => "\x1b[36m",
        }
    }

    fn to_stderr(self) -> bool {
        matches!(self, Self::Warning | Self::Error)
    }
}

/// Output formatter with configurable verbosity.
#[derive(Debug, Clone)]
pub struct OutputFormatter {
    /// Whether to suppress non-error output.
    quiet: bool,
    /// Whether to show verbose output.
    verbose: bool,
    /// Whether to use colored output.
    colored: bool,
}

impl OutputFormatter {
    /// Create a new output formatter; color is used on a terminal.
    pub fn new(quiet: bool, verbose: bool) -> Self {
        Self {
            quiet,
            verbose,
            colored: Self::should_use_color(),
        }
    }

    /// Create a formatter that never emits color codes.
    pub fn plain(quiet: bool, verbose: bool) -> Self {
        Self {
            quiet,
            verbose,
            colored: false,
        }
    }

    /// Create a formatter from configuration.
    ///
    /// JSON output keeps stdout free of human-readable messages.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.quiet || config.json, config.verbose)
    }

    /// Create a quiet formatter (only errors).
    pub fn quiet() -> Self {
        Self::new(true, false)
    }

    /// Create a verbose formatter.
    pub fn verbose() -> Self {
        Self::new(false, true)
    }

    /// Returns true if stdout is a TTY and TERM is set.
    fn should_use_color() -> bool {
        use std::io::IsTerminal;
        io::stdout().is_terminal() && std::env::var("TERM").is_ok()
    }

    /// Build the line printed for a message.
    pub fn format(&self, level: MessageLevel, message: &str) -> String {
        let prefix = level.prefix();
        let color = level.color();
        if self.colored && !color.is_empty() {
            format!("{color}{prefix}{message}\x1b[0m")
        } else {
            format!("{prefix}{message}")
        }
    }

    /// Build the line shown for the item at 1-based `position`.
    pub fn format_item(&self, position: usize, item: &SourceItem) -> String {
        let mut line = format!(
            "{position}. {} ({}, {})",
            item.name(),
            item.page_count(),
            format_file_size(item.size())
        );
        if self.verbose {
            line.push_str(&format!(" [{}]", item.id()));
        }
        line
    }

    /// Build the summary line, `"3 files • 12 pages • 1.5 MB"`.
    pub fn format_summary(&self, summary: &Summary) -> String {
        let mut line = summary.to_string();
        if summary.pending > 0 {
            line.push_str(&format!(" ({} still loading)", summary.pending));
        }
        line
    }

    /// Build the lines printed for the collection: one numbered line per
    /// item, then the summary.
    pub fn format_collection(&self, items: &[SourceItem], summary: &Summary) -> Vec<String> {
        if items.is_empty() {
            return vec!["No files selected".to_string()];
        }
        let mut lines: Vec<String> = items
            .iter()
            .enumerate()
            .map(|(index, item)| format!("  {}", self.format_item(index + 1, item)))
            .collect();
        lines.push(self.format_summary(summary));
        lines
    }

    /// Print an informational message.
    ///
    /// Suppressed in quiet mode.
    pub fn info(&self, message: &str) {
        if !self.quiet {
            self.print_message(MessageLevel::Info, message);
        }
    }

    /// Print a success message.
    ///
    /// Suppressed in quiet mode.
    pub fn success(&self, message: &str) {
        if !self.quiet {
            self.print_message(MessageLevel::Success, message);
        }
    }

    /// Print a warning message (even in quiet mode).
    pub fn warning(&self, message: &str) {
        self.print_message(MessageLevel::Warning, message);
    }

    /// Print an error message.
    pub fn error(&self, message: &str) {
        self.print_message(MessageLevel::Error, message);
    }

    /// Print a debug/verbose message.
    ///
    /// Only displayed in verbose mode.
    pub fn debug(&self, message: &str) {
        if self.verbose {
            self.print_message(MessageLevel::Debug, message);
        }
    }

    fn print_message(&self, level: MessageLevel, message: &str) {
        let line = self.format(level, message);
        if level.to_stderr() {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    }

    /// Print a section header.
    pub fn section(&self, title: &str) {
        if !self.quiet {
            println!("\n{title}");
        }
    }

    /// Print a `label: value` detail line, verbose mode only.
    pub fn detail(&self, label: &str, value: &str) {
        if self.verbose {
            println!("  {label}: {value}");
        }
    }

    /// Print the collection, one numbered line per item, then its summary.
    pub fn collection(&self, items: &[SourceItem], summary: &Summary) {
        if self.quiet {
            return;
        }
        for line in self.format_collection(items, summary) {
            println!("{line}");
        }
    }

    /// Print a block of text as is.
    ///
    /// Suppressed in quiet mode.
    pub fn text(&self, text: &str) {
        if !self.quiet {
            println!("{text}");
        }
    }

    /// Print a blank line.
    pub fn blank_line(&self) {
        if !self.quiet {
            println!();
        }
    }

    /// Check if output should be shown.
    pub fn should_print(&self) -> bool {
        !self.quiet
    }

    /// Check if verbose output should be shown.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Check if quiet mode is enabled.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }
}

impl Default for OutputFormatter {
    fn default() -> Self {
        Self::new(false, false)
    }
}
