//! Configuration module for pdfstack.
//!
//! This module turns CLI arguments into a validated configuration that
//! drives reading, merging and writing. It handles:
//! - Validation of argument combinations
//! - Resolution of conflicting options
//! - Application of defaults

use anyhow::{Result, bail};

use crate::Error;
use crate::io::writer::OutputWriter;
use crate::merge::sanitize;
use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

/// Default output directory.
pub const DEFAULT_OUT_DIR: &str = ".";

/// Compression applied to the output PDF.
///
/// Unreachable objects are pruned either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressionLevel {
    /// Write streams as they are.
    None,
    /// Compress uncompressed streams.
    #[default]
    Standard,
}

impl FromStr for CompressionLevel {
    type Err = Error;

    /// Parse compression level from string ("none" or "standard").
    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "standard" => Ok(Self::Standard),
            _ => Err(Error::InvalidConfig {
                message: format!("Invalid compression level: {s}. Must be one of: none, standard"),
            }),
        }
    }
}

/// Output file overwrite behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwriteMode {
    /// Prompt the user before overwriting (default).
    #[default]
    Prompt,
    /// Always overwrite without prompting.
    Force,
    /// Never overwrite, error if file exists.
    NoClobber,
}

/// Complete configuration for a pdfstack run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Input paths, already glob-expanded, in list order.
    pub inputs: Vec<PathBuf>,

    /// Requested output name, without extension and not yet sanitized.
    pub output_name: String,

    /// Directory the output is written to.
    pub out_dir: PathBuf,

    /// List and summarize only, never merge.
    pub dry_run: bool,

    /// Verbose output mode.
    pub verbose: bool,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,

    /// File overwrite behavior.
    pub overwrite_mode: OverwriteMode,

    /// Compression level for output.
    pub compression: CompressionLevel,

    /// Number of files read concurrently (None = auto-detect).
    pub jobs: Option<usize>,

    /// Run the interactive session instead of a one-shot merge.
    pub interactive: bool,

    /// Print the final report as JSON.
    pub json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            output_name: String::new(),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            dry_run: false,
            verbose: false,
            quiet: false,
            overwrite_mode: OverwriteMode::default(),
            compression: CompressionLevel::default(),
            jobs: None,
            interactive: false,
            json: false,
        }
    }
}

impl Config {
    /// Returns a reference to inputs.
    pub fn inputs(&self) -> &[PathBuf] {
        self.inputs.as_ref()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No input files are given outside interactive mode
    /// - Verbose and quiet modes are both enabled
    /// - Jobs count is zero
    /// - The output directory is empty
    pub fn validate(&self) -> Result<()> {
        if self.inputs.is_empty() && !self.interactive {
            bail!("No input files specified");
        }

        if self.verbose && self.quiet {
            bail!("Cannot use both --verbose and --quiet");
        }

        if let Some(jobs) = self.jobs
            && jobs == 0
        {
            bail!("Number of jobs must be at least 1");
        }

        if self.out_dir.as_os_str().is_empty() {
            bail!("Output directory cannot be empty");
        }

        Ok(())
    }

    /// Get the effective number of concurrent reads.
    ///
    /// Returns the configured job count, or the number of CPU cores if auto-detect.
    pub fn effective_jobs(&self) -> usize {
        self.jobs.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }

    /// Where an output named `name` would be written.
    pub fn output_path_for(&self, name: &str) -> PathBuf {
        OutputWriter::target_path(&self.out_dir, &sanitize(name))
    }

    /// Where the configured output would be written.
    pub fn output_path(&self) -> PathBuf {
        self.output_path_for(&self.output_name)
    }

    /// Output directory.
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Check if output should be displayed.
    ///
    /// Returns false if in quiet mode and not doing a dry run.
    pub fn should_print(&self) -> bool {
        !self.quiet || self.dry_run
    }
}
