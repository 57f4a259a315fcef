//! Source items and the raw files they are built from.

use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use crate::utils::pages_label;

/// Media type a file must declare to be accepted into a collection.
pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// Stable identity of a source item.
///
/// Ids are handed out by the owning [`Collection`](super::Collection) and are
/// never reused within a session, so they stay valid across reorders and
/// removals of other items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ItemId(u64);

impl ItemId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw numeric value of the id.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A user-supplied file before it is accepted into a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFile {
    /// Display name, usually the file name without directories.
    pub name: String,
    /// Declared media type (e.g. `application/pdf`).
    pub media_type: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl RawFile {
    /// Create a raw file with an explicit media type.
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }

    /// Create a raw file declared as PDF.
    pub fn pdf(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self::new(name, PDF_MEDIA_TYPE, bytes)
    }

    /// Whether the declared media type is PDF.
    ///
    /// Only the declaration is checked; contents are validated later by
    /// page counting.
    pub fn is_pdf(&self) -> bool {
        self.media_type.eq_ignore_ascii_case(PDF_MEDIA_TYPE)
    }

    /// Size of the contents in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Page count of a source item as known to the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageCount {
    /// Counting has not finished yet.
    Pending,
    /// The document opened and has this many pages.
    Known(usize),
    /// The document could not be opened.
    Unknown,
}

impl PageCount {
    /// Whether counting is still in flight.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// The page count if it is known.
    pub fn known(&self) -> Option<usize> {
        match self {
            Self::Known(pages) => Some(*pages),
            _ => None,
        }
    }
}

impl fmt::Display for PageCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "Loading..."),
            Self::Known(pages) => write!(f, "{pages} {}", pages_label(*pages)),
            Self::Unknown => write!(f, "? pages"),
        }
    }
}

/// One accepted file plus its derived metadata.
///
/// Cloning is cheap: the contents are shared, which is what lets a merge
/// snapshot outlive later edits of the collection.
#[derive(Debug, Clone, Serialize)]
pub struct SourceItem {
    id: ItemId,
    name: String,
    #[serde(skip)]
    bytes: Arc<[u8]>,
    size: u64,
    page_count: PageCount,
}

impl SourceItem {
    pub(crate) fn pending(id: ItemId, file: RawFile) -> Self {
        let size = file.size();
        Self {
            id,
            name: file.name,
            bytes: file.bytes.into(),
            size,
            page_count: PageCount::Pending,
        }
    }

    /// Stable identity.
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// File contents.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub(crate) fn shared_bytes(&self) -> Arc<[u8]> {
        Arc::clone(&self.bytes)
    }

    /// Size in bytes.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Current page count state.
    pub fn page_count(&self) -> PageCount {
        self.page_count
    }

    pub(crate) fn set_page_count(&mut self, page_count: PageCount) {
        self.page_count = page_count;
    }
}
