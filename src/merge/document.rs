//! The document a merge accumulates pages into.
//!
//! Every source is appended as a whole: its objects are renumbered past the
//! ones already present, and its pages are hung directly under the output
//! page tree root. Attributes a page inherits from its own page tree are
//! copied onto the page first, since that tree is left behind.

use lopdf::{Document, Object, ObjectId, dictionary};

use crate::config::CompressionLevel;

/// PDF version written to the output header.
const OUTPUT_VERSION: &str = "1.5";

/// Page attributes a page may inherit from its ancestors.
const INHERITABLE: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Upper bound on page tree depth; guards against `Parent` cycles.
const MAX_TREE_DEPTH: usize = 64;

/// Output document under construction.
#[derive(Debug)]
pub struct OutputDocument {
    document: Document,
    pages_id: ObjectId,
    page_count: usize,
}

impl OutputDocument {
    /// Create an empty document: a catalog and a page tree root without kids.
    pub fn new() -> Self {
        let mut document = Document::with_version(OUTPUT_VERSION);
        let pages_id = document.new_object_id();
        document.objects.insert(
            pages_id,
            dictionary! {
                "Type" => "Pages",
                "Kids" => Vec::<Object>::new(),
                "Count" => 0_i64,
            }
            .into(),
        );

        let catalog_id = document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        document.trailer.set("Root", catalog_id);

        Self {
            document,
            pages_id,
            page_count: 0,
        }
    }

    /// Number of pages appended so far.
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Append every page of `source`, in the source's page order.
    ///
    /// Returns the number of pages appended.
    pub fn append(&mut self, mut source: Document) -> lopdf::Result<usize> {
        for page_id in source.get_pages().into_values() {
            inherit_attributes(&mut source, page_id)?;
        }

        source.renumber_objects_with(self.document.max_id + 1);
        let page_ids: Vec<ObjectId> = source.get_pages().into_values().collect();

        for &page_id in &page_ids {
            source
                .get_dictionary_mut(page_id)?
                .set("Parent", self.pages_id);
        }

        self.document.max_id = self.document.max_id.max(source.max_id);
        self.document.objects.extend(source.objects);

        let root = self.document.get_dictionary_mut(self.pages_id)?;
        root.get_mut(b"Kids")?
            .as_array_mut()?
            .extend(page_ids.iter().map(|&id| Object::Reference(id)));

        self.page_count += page_ids.len();
        root.set("Count", self.page_count as i64);

        Ok(page_ids.len())
    }

    /// Serialize the document.
    ///
    /// Objects left over from the sources' own page trees and catalogs are
    /// pruned before writing.
    pub fn serialize(mut self, compression: CompressionLevel) -> lopdf::Result<Vec<u8>> {
        self.document.prune_objects();
        self.document.renumber_objects();
        if compression != CompressionLevel::None {
            self.document.compress();
        }

        let mut bytes = Vec::new();
        self.document.save_to(&mut bytes)?;
        Ok(bytes)
    }
}

impl Default for OutputDocument {
    fn default() -> Self {
        Self::new()
    }
}

/// Copy inheritable attributes the page lacks from its nearest ancestor.
fn inherit_attributes(doc: &mut Document, page_id: ObjectId) -> lopdf::Result<()> {
    let page = doc.get_dictionary(page_id)?;
    let mut missing: Vec<&[u8]> = INHERITABLE
        .iter()
        .copied()
        .filter(|key| !page.has(key))
        .collect();

    let mut inherited = Vec::new();
    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();
    let mut depth = 0;

    while let Some(node_id) = parent {
        if missing.is_empty() || depth >= MAX_TREE_DEPTH {
            break;
        }
        depth += 1;

        let Ok(node) = doc.get_dictionary(node_id) else {
            break;
        };
        missing.retain(|key| match node.get(key) {
            Ok(value) => {
                inherited.push((key.to_vec(), value.clone()));
                false
            }
            Err(_) => true,
        });
        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
    }

    if !inherited.is_empty() {
        let page = doc.get_dictionary_mut(page_id)?;
        for (key, value) in inherited {
            page.set(key, value);
        }
    }

    Ok(())
}
