//! I/O operations for pdfstack.
//!
//! This module handles everything that touches the file system:
//! - Reading user files into memory with a declared media type
//! - Opening PDF bytes and counting pages
//! - Writing merged PDFs to disk

pub mod reader;
pub mod writer;

pub use reader::{count_pages, load_document, read_source, read_sources};
pub use writer::{OutputWriter, WriteOptions, WriteStatistics};
