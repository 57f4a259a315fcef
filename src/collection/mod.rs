//! The user-editable list of files awaiting a merge.
//!
//! This module provides:
//! - [`RawFile`]: a file as offered by the user (name, media type, bytes)
//! - [`SourceItem`]: an accepted file with a stable [`ItemId`] and its page count
//! - [`Collection`]: the ordered list with add, remove, move and clear
//! - [`Summary`]: totals derived from the list
//!
//! Page counts are filled in by background tasks after a file is added.

mod enrichment;
pub mod item;
pub mod manager;
pub mod summary;

pub use item::{ItemId, PDF_MEDIA_TYPE, PageCount, RawFile, SourceItem};
pub use manager::{AddReport, Collection, Direction};
pub use summary::Summary;
