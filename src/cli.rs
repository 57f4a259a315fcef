//! CLI argument parsing for pdfstack.
//!
//! This module defines the command-line interface using `clap` and turns it
//! into a validated [`Config`].
//!
//! # Examples
//!
//! ```no_run
//! use pdfstack::cli::Cli;
//! use pdfstack::config::Config;
//! use clap::Parser;
//!
//! let cli = Cli::parse();
//! let config = Config::try_from(&cli).expect("Invalid configuration");
//! println!("Merging {} files", config.inputs.len());
//! ```

use clap::Parser;
use std::path::PathBuf;
use std::str::FromStr;

use crate::config::{CompressionLevel, Config, OverwriteMode};
use crate::error::{Error, Result};
use crate::utils::collect_paths_for_patterns;

/// Collect, reorder and merge PDF files into a single document.
///
/// Files are merged in the order given. Files that are not PDFs are skipped
/// with a warning. Use --interactive to edit the list before merging.
#[derive(Parser, Debug)]
#[command(name = "pdfstack")]
#[command(version)]
#[command(about = "Collect, reorder and merge PDF files into a single document", long_about = None)]
#[command(author)]
pub struct Cli {
    /// Input files to merge (in order)
    ///
    /// Glob patterns are expanded. Optional with --interactive.
    ///
    /// Examples:
    ///   pdfstack intro.pdf body.pdf -o book
    ///   pdfstack 'chapter*.pdf' -o book
    #[arg(value_name = "FILE", required_unless_present = "interactive")]
    pub inputs: Vec<String>,

    /// Output name, without the .pdf extension
    ///
    /// Characters that are not allowed in file names are replaced with '_'.
    /// A blank name falls back to "Merged_PDFs".
    #[arg(short, long, value_name = "NAME", env = "PDFSTACK_OUTPUT", default_value = "")]
    pub output: String,

    /// Directory the merged PDF is written to
    #[arg(short = 'd', long, value_name = "DIR", env = "PDFSTACK_OUT_DIR", default_value = ".")]
    pub out_dir: PathBuf,

    /// Dry run - list the files and their totals without merging
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Verbose output - show item ids and timing details
    #[arg(short, long)]
    pub verbose: bool,

    /// Force overwrite of existing output file without confirmation
    #[arg(short, long)]
    pub force: bool,

    /// Never overwrite existing output file
    #[arg(long, conflicts_with = "force")]
    pub no_clobber: bool,

    /// Suppress all non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Compression level for output PDF
    ///
    /// - none: write streams as they are
    /// - standard: compress uncompressed streams (default)
    #[arg(short, long, value_name = "LEVEL", default_value = "standard")]
    #[arg(value_parser = ["none", "standard"])]
    pub compression: String,

    /// Number of files read concurrently
    ///
    /// Default is number of CPU cores.
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Start an interactive session to edit the list before merging
    #[arg(short, long)]
    pub interactive: bool,

    /// Print the final report as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Validate CLI arguments before processing.
    ///
    /// # Errors
    ///
    /// Returns an error if any validation checks fail.
    pub fn validate(&self) -> Result<()> {
        if let Some(jobs) = self.jobs
            && jobs == 0
        {
            return Err(Error::invalid_config("Number of jobs must be at least 1"));
        }

        if !["none", "standard"].contains(&self.compression.as_str()) {
            return Err(Error::invalid_config(format!(
                "Invalid compression level: {}",
                self.compression
            )));
        }

        Ok(())
    }

    /// Resolve the overwrite mode from --force / --no-clobber.
    pub fn overwrite_mode(&self) -> OverwriteMode {
        if self.force {
            OverwriteMode::Force
        } else if self.no_clobber {
            OverwriteMode::NoClobber
        } else {
            OverwriteMode::Prompt
        }
    }
}

impl TryFrom<&Cli> for Config {
    type Error = Error;

    fn try_from(cli: &Cli) -> Result<Self> {
        cli.validate()?;

        let compression = CompressionLevel::from_str(&cli.compression)?;
        let inputs = collect_paths_for_patterns(&cli.inputs)?;

        let config = Config {
            inputs,
            output_name: cli.output.clone(),
            out_dir: cli.out_dir.clone(),
            dry_run: cli.dry_run,
            verbose: cli.verbose,
            quiet: cli.quiet,
            overwrite_mode: cli.overwrite_mode(),
            compression,
            jobs: cli.jobs,
            interactive: cli.interactive,
            json: cli.json,
        };

        config.validate().map_err(|e| {
            Error::invalid_config(format!("Configuration validation failed: {e}"))
        })?;

        Ok(config)
    }
}
