//! Writing merged PDFs to disk.
//!
//! The merge pipeline hands back finished bytes; this module only decides
//! where they go and gets them there safely:
//! - Atomic writes (write to temp file, then rename)
//! - Creation of missing output directories
//! - Write statistics
//!
//! # Examples
//!
//! ```no_run
//! use pdfstack::io::writer::OutputWriter;
//! use std::path::Path;
//!
//! # async fn example(bytes: Vec<u8>) -> pdfstack::Result<()> {
//! let writer = OutputWriter::new();
//! let stats = writer.write(&bytes, Path::new("out"), "Merged_PDFs").await?;
//! println!("Wrote {}", stats.output_path.display());
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::debug;

use crate::error::{Error, Result};
use crate::utils::format_file_size;

/// Extension appended to every output name.
pub const PDF_EXTENSION: &str = "pdf";

/// Options for writing PDF files.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Use atomic writes (write to temp file, then rename).
    pub atomic: bool,

    /// Create the output directory if it does not exist.
    pub create_dirs: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            atomic: true,
            create_dirs: true,
        }
    }
}

/// Statistics about a write operation.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Time taken to write the file.
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,
}

impl WriteStatistics {
    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// Writer for merged PDF bytes.
#[derive(Debug, Clone, Default)]
pub struct OutputWriter {
    options: WriteOptions,
}

impl OutputWriter {
    /// Create a new writer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with custom options.
    pub fn with_options(options: WriteOptions) -> Self {
        Self { options }
    }

    /// Create a writer without atomic writes.
    pub fn non_atomic() -> Self {
        Self::with_options(WriteOptions {
            atomic: false,
            ..Default::default()
        })
    }

    /// Path the output named `name` ends up at inside `dir`.
    ///
    /// `name` is expected to be sanitized already; the `.pdf` extension is
    /// always appended.
    pub fn target_path(dir: &Path, name: &str) -> PathBuf {
        dir.join(format!("{name}.{PDF_EXTENSION}"))
    }

    /// Write `bytes` to `<dir>/<name>.pdf`, replacing any existing file.
    ///
    /// Overwrite policy is the caller's business; check
    /// [`target_path`](Self::target_path) first.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The output directory cannot be created
    /// - The file cannot be created or written
    /// - The final rename fails
    pub async fn write(&self, bytes: &[u8], dir: &Path, name: &str) -> Result<WriteStatistics> {
        let start = Instant::now();
        let output_path = Self::target_path(dir, name);

        if self.options.create_dirs && !dir.as_os_str().is_empty() {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| Error::FailedToCreateOutput {
                    path: dir.to_path_buf(),
                    source: e,
                })?;
        }

        // Determine write path (temp or final)
        let write_path = if self.options.atomic {
            output_path.with_extension(format!("{PDF_EXTENSION}.tmp"))
        } else {
            output_path.clone()
        };

        tokio::fs::write(&write_path, bytes)
            .await
            .map_err(|e| Error::FailedToWrite {
                path: write_path.clone(),
                source: e,
            })?;

        if self.options.atomic {
            if let Err(e) = tokio::fs::rename(&write_path, &output_path).await {
                let _ = tokio::fs::remove_file(&write_path).await;
                return Err(Error::FailedToWrite {
                    path: output_path,
                    source: e,
                });
            }
        }

        let stats = WriteStatistics {
            write_time: start.elapsed(),
            file_size: bytes.len() as u64,
            output_path,
        };
        debug!(path = %stats.output_path.display(), size = stats.file_size, "wrote output");

        Ok(stats)
    }

    /// Check if output file exists.
    pub async fn exists(path: &Path) -> bool {
        tokio::fs::metadata(path).await.is_ok()
    }
}
