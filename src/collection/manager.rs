//! The ordered collection of source items.

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::enrichment::{self, Enrichment, EnrichmentReceiver, EnrichmentSender};
use super::item::{ItemId, PageCount, RawFile, SourceItem};
use super::summary::Summary;
use crate::error::{Error, Result};

/// Direction of a single-step move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards the front of the list.
    Up,
    /// Towards the back of the list.
    Down,
}

/// What happened to a batch of files offered to [`Collection::add`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddReport {
    /// Ids of the accepted files, in the order they were appended.
    pub added: Vec<ItemId>,
    /// Names of the files that were skipped because they are not PDFs.
    pub rejected: Vec<String>,
}

impl AddReport {
    /// Whether some files were skipped; callers surface this as a warning.
    pub fn has_rejections(&self) -> bool {
        !self.rejected.is_empty()
    }
}

/// Ordered list of source items awaiting a merge.
///
/// The collection is the only place list state is changed. Page counts are
/// produced in the background and applied when the owner calls
/// [`poll_enrichment`](Self::poll_enrichment) or [`settle`](Self::settle).
///
/// # Examples
///
/// ```no_run
/// use pdfstack::collection::{Collection, Direction, RawFile};
///
/// # async fn example(a: Vec<u8>, b: Vec<u8>) -> pdfstack::Result<()> {
/// let mut collection = Collection::new();
/// collection.add(vec![RawFile::pdf("a.pdf", a), RawFile::pdf("b.pdf", b)])?;
/// collection.move_item(1, Direction::Up)?;
/// collection.settle().await;
/// println!("{}", collection.summary());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Collection {
    items: Vec<SourceItem>,
    next_id: u64,
    enrichment_tx: EnrichmentSender,
    enrichment_rx: EnrichmentReceiver,
}

impl Collection {
    /// Create an empty collection.
    pub fn new() -> Self {
        let (enrichment_tx, enrichment_rx) = mpsc::unbounded_channel();
        Self {
            items: Vec::new(),
            next_id: 1,
            enrichment_tx,
            enrichment_rx,
        }
    }

    /// Append the PDF files among `files` and start counting their pages.
    ///
    /// Files that do not declare a PDF media type are skipped and listed in
    /// the report. Accepted files show up immediately with
    /// [`PageCount::Pending`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if no file was accepted, or
    /// [`Error::NoRuntime`] when called outside a tokio runtime. In both
    /// cases the collection is left unchanged.
    pub fn add(&mut self, files: impl IntoIterator<Item = RawFile>) -> Result<AddReport> {
        let (accepted, rejected): (Vec<RawFile>, Vec<RawFile>) =
            files.into_iter().partition(RawFile::is_pdf);

        if accepted.is_empty() {
            return Err(Error::InvalidInput {
                rejected: rejected.len(),
            });
        }

        let runtime = Handle::try_current().map_err(|_| Error::NoRuntime)?;

        let rejected: Vec<String> = rejected.into_iter().map(|file| file.name).collect();
        if !rejected.is_empty() {
            warn!(count = rejected.len(), "ignoring files that are not PDFs");
        }

        let mut added = Vec::with_capacity(accepted.len());
        for file in accepted {
            let id = ItemId::new(self.next_id);
            self.next_id += 1;

            let item = SourceItem::pending(id, file);
            debug!(item = %id, name = item.name(), size = item.size(), "added item");
            enrichment::spawn(
                &runtime,
                id,
                item.name().to_string(),
                item.shared_bytes(),
                self.enrichment_tx.clone(),
            );

            self.items.push(item);
            added.push(id);
        }

        Ok(AddReport { added, rejected })
    }

    /// Remove the item at `index`, shifting later items down by one.
    ///
    /// A page count still in flight for the removed item is discarded when
    /// it arrives.
    pub fn remove(&mut self, index: usize) -> Result<SourceItem> {
        self.check_index(index)?;
        let item = self.items.remove(index);
        debug!(item = %item.id(), index, "removed item");
        Ok(item)
    }

    /// Remove the item with the given id.
    pub fn remove_id(&mut self, id: ItemId) -> Result<SourceItem> {
        let index = self.require_position(id)?;
        self.remove(index)
    }

    /// Swap the item at `index` with its neighbour in `direction`.
    ///
    /// Returns `Ok(false)` without changing anything when the item is already
    /// at that end of the list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index` is not a valid position.
    pub fn move_item(&mut self, index: usize, direction: Direction) -> Result<bool> {
        self.check_index(index)?;

        let target = match direction {
            Direction::Up => index.checked_sub(1),
            Direction::Down => Some(index + 1).filter(|&next| next < self.items.len()),
        };

        match target {
            Some(target) => {
                self.items.swap(index, target);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Move the item with the given id one step in `direction`.
    pub fn move_id(&mut self, id: ItemId, direction: Direction) -> Result<bool> {
        let index = self.require_position(id)?;
        self.move_item(index, direction)
    }

    /// Drop every item.
    pub fn clear(&mut self) {
        debug!(count = self.items.len(), "cleared collection");
        self.items.clear();
    }

    /// Totals over the current items.
    pub fn summary(&self) -> Summary {
        Summary::from_items(&self.items)
    }

    /// Copy of the items in display order, used to seed a merge job.
    ///
    /// Later changes to the collection do not affect the copy.
    pub fn snapshot(&self) -> Vec<SourceItem> {
        self.items.clone()
    }

    /// Items in display order.
    pub fn items(&self) -> &[SourceItem] {
        &self.items
    }

    /// Item with the given id.
    pub fn get(&self, id: ItemId) -> Option<&SourceItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Current position of the item with the given id.
    pub fn position(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether any item is still waiting for its page count.
    pub fn has_pending(&self) -> bool {
        self.items.iter().any(|item| item.page_count().is_pending())
    }

    /// Apply every page count that has arrived so far, without waiting.
    ///
    /// Returns the ids of the items that changed, in arrival order.
    pub fn poll_enrichment(&mut self) -> Vec<ItemId> {
        let mut changed = Vec::new();
        while let Ok(enrichment) = self.enrichment_rx.try_recv() {
            if self.apply(enrichment) {
                changed.push(enrichment.id);
            }
        }
        changed
    }

    /// Wait until no item is pending, applying page counts as they arrive.
    ///
    /// Returns the ids of the items that changed, in arrival order.
    pub async fn settle(&mut self) -> Vec<ItemId> {
        let mut changed = self.poll_enrichment();

        while self.has_pending() {
            let Some(enrichment) = self.enrichment_rx.recv().await else {
                break;
            };
            if self.apply(enrichment) {
                changed.push(enrichment.id);
            }
        }

        changed
    }

    fn apply(&mut self, enrichment: Enrichment) -> bool {
        let Some(item) = self.items.iter_mut().find(|item| item.id() == enrichment.id) else {
            debug!(item = %enrichment.id, "discarding page count for removed item");
            return false;
        };

        if item.page_count() != PageCount::Pending {
            return false;
        }

        item.set_page_count(enrichment.page_count);
        true
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.items.len() {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        Ok(())
    }

    fn require_position(&self, id: ItemId) -> Result<usize> {
        self.position(id)
            .ok_or(Error::UnknownItem { id: id.get() })
    }
}

impl Default for Collection {
    fn default() -> Self {
        Self::new()
    }
}
