//! Shared helpers for the integration tests.
//!
//! PDFs are generated in memory with lopdf; every page carries a `Marker`
//! string so tests can check page order in the output.

use lopdf::{Document, Object, dictionary};
use std::path::{Path, PathBuf};

/// Build a PDF whose pages are marked `"{tag}1"`..`"{tag}{pages}"`.
pub fn marked_pdf(tag: &str, pages: usize) -> Vec<u8> {
    let mut doc = Document::with_version("1.4");
    let pages_id = doc.new_object_id();

    let kids: Vec<Object> = (1..=pages)
        .map(|i| {
            let page = dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
                "Marker" => Object::string_literal(format!("{tag}{i}")),
            };
            doc.add_object(page).into()
        })
        .collect();

    doc.objects.insert(
        pages_id,
        dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages as i64,
        }
        .into(),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("Failed to build test PDF");
    bytes
}

/// Write a marked PDF into `dir` and return its path.
pub fn write_pdf(dir: &Path, name: &str, tag: &str, pages: usize) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, marked_pdf(tag, pages)).expect("Failed to write test PDF");
    path
}

/// Write arbitrary bytes into `dir` and return the path.
pub fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).expect("Failed to write test file");
    path
}

/// Page markers of a PDF, in page order.
pub fn page_markers(bytes: &[u8]) -> Vec<String> {
    let doc = Document::load_mem(bytes).expect("Output is not a readable PDF");
    doc.get_pages()
        .into_values()
        .map(|page_id| {
            let page = doc.get_dictionary(page_id).expect("Page is not a dictionary");
            match page.get(b"Marker") {
                Ok(Object::String(text, _)) => String::from_utf8_lossy(text).into_owned(),
                _ => "?".to_string(),
            }
        })
        .collect()
}
