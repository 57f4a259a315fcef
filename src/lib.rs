//! pdfstack - Collect, reorder and merge PDF files into a single document.
//!
//! This library provides:
//!
//! - An ordered, editable collection of PDF files with background page counting
//! - A sequential merge pipeline with progress reporting
//! - Safe output naming and atomic writing
//! - An interactive editing session
//!
//! # Examples
//!
//! ## Merge Two Files
//!
//! ```no_run
//! use pdfstack::collection::{Collection, RawFile};
//! use pdfstack::merge::{MergePipeline, NoProgress};
//!
//! # async fn example(a: Vec<u8>, b: Vec<u8>) -> pdfstack::Result<()> {
//! let mut collection = Collection::new();
//! collection.add(vec![RawFile::pdf("a.pdf", a), RawFile::pdf("b.pdf", b)])?;
//!
//! let outcome = MergePipeline::new()
//!     .merge(&collection.snapshot(), "Combined", &mut NoProgress)
//!     .await?;
//! std::fs::write(format!("{}.pdf", outcome.name), &outcome.bytes)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Reading From Disk
//!
//! ```no_run
//! use pdfstack::collection::Collection;
//! use pdfstack::io::read_sources;
//! use std::path::PathBuf;
//!
//! # async fn example() -> pdfstack::Result<()> {
//! let files = read_sources(&[PathBuf::from("a.pdf"), PathBuf::from("notes.txt")], 4).await?;
//!
//! let mut collection = Collection::new();
//! let report = collection.add(files)?;
//! println!("skipped: {:?}", report.rejected);
//!
//! collection.settle().await;
//! println!("{}", collection.summary());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod collection;
pub mod config;
pub mod error;
pub mod io;
pub mod merge;
pub mod output;
pub mod session;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
