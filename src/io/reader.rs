//! Reading source files and opening PDF bytes.
//!
//! Files are read into memory as [`RawFile`]s; nothing here decides whether a
//! file is acceptable, that is up to the collection. Opening bytes as a PDF
//! is synchronous and CPU bound, callers move it onto the blocking pool.
//!
//! # Examples
//!
//! ```no_run
//! use pdfstack::io::reader;
//! use std::path::PathBuf;
//!
//! # async fn example() -> pdfstack::Result<()> {
//! let paths = vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")];
//! let files = reader::read_sources(&paths, 4).await?;
//! println!("Read {} files", files.len());
//! # Ok(())
//! # }
//! ```

use futures::stream::{self, StreamExt, TryStreamExt};
use lopdf::Document;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::collection::{PDF_MEDIA_TYPE, RawFile};
use crate::error::{Error, Result};

/// Media type declared for a path, judged by its extension.
pub fn media_type_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("pdf") => PDF_MEDIA_TYPE,
        Some("txt") => "text/plain",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("html" | "htm") => "text/html",
        _ => "application/octet-stream",
    }
}

/// Read a single file into memory.
///
/// # Errors
///
/// Returns an error if:
/// - The path does not exist ([`Error::FileNotFound`])
/// - The path is a directory ([`Error::NotAFile`])
/// - The file cannot be read ([`Error::FileNotAccessible`])
pub async fn read_source(path: &Path) -> Result<RawFile> {
    let metadata = tokio::fs::metadata(path).await.map_err(|err| match err.kind() {
        ErrorKind::NotFound => Error::file_not_found(path.to_path_buf()),
        _ => Error::FileNotAccessible {
            path: path.to_path_buf(),
            source: err,
        },
    })?;

    if !metadata.is_file() {
        return Err(Error::not_a_file(path.to_path_buf()));
    }

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|err| Error::FileNotAccessible {
            path: path.to_path_buf(),
            source: err,
        })?;

    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    debug!(path = %path.display(), size = bytes.len(), "read source file");

    Ok(RawFile::new(name, media_type_for_path(path), bytes))
}

/// Read several files, at most `jobs` at a time, keeping input order.
///
/// Stops at the first file that cannot be read.
pub async fn read_sources(paths: &[PathBuf], jobs: usize) -> Result<Vec<RawFile>> {
    stream::iter(paths.iter().map(|path| read_source(path)))
        .buffered(jobs.max(1))
        .try_collect()
        .await
}

/// Open PDF bytes as a document.
///
/// A document without a catalog is treated as unreadable, since neither its
/// pages nor its page count can be trusted.
pub fn load_document(bytes: &[u8]) -> lopdf::Result<Document> {
    let document = Document::load_mem(bytes)?;
    document.catalog()?;
    Ok(document)
}

/// Count the pages of a PDF given as bytes.
pub fn count_pages(bytes: &[u8]) -> lopdf::Result<usize> {
    Ok(load_document(bytes)?.get_pages().len())
}
