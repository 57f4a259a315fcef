//! Background page counting for freshly added items.
//!
//! Each accepted file gets its own task. Parsing runs on the blocking pool
//! and the outcome travels back to the owning collection over a channel,
//! addressed by [`ItemId`]. The collection decides whether the result still
//! applies; tasks never touch the list themselves.

use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task;
use tracing::{debug, warn};

use super::item::{ItemId, PageCount};
use crate::io::reader;

/// A finished page count for one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Enrichment {
    pub id: ItemId,
    pub page_count: PageCount,
}

pub(crate) type EnrichmentSender = mpsc::UnboundedSender<Enrichment>;
pub(crate) type EnrichmentReceiver = mpsc::UnboundedReceiver<Enrichment>;

/// Spawn the page counting task for one item on `runtime`.
pub(crate) fn spawn(
    runtime: &Handle,
    id: ItemId,
    name: String,
    bytes: Arc<[u8]>,
    tx: EnrichmentSender,
) {
    runtime.spawn(async move {
        let counted = task::spawn_blocking(move || reader::count_pages(&bytes)).await;

        let page_count = match counted {
            Ok(Ok(pages)) => {
                debug!(item = %id, name = %name, pages, "counted pages");
                PageCount::Known(pages)
            }
            Ok(Err(err)) => {
                warn!(item = %id, name = %name, error = %err, "could not count pages");
                PageCount::Unknown
            }
            Err(err) => {
                warn!(item = %id, name = %name, error = %err, "page counting task aborted");
                PageCount::Unknown
            }
        };

        // The collection may be gone already; then nobody is interested.
        let _ = tx.send(Enrichment { id, page_count });
    });
}
