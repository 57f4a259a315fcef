//! In-memory PDF fixtures for unit tests.

use lopdf::{Document, Object, dictionary};

/// Build a PDF whose pages carry a `Marker` string `"{tag}1"`..`"{tag}{pages}"`.
pub(crate) fn marked_pdf(tag: &str, pages: usize) -> Vec<u8> {
    build_pdf(tag, pages, false)
}

/// Build a PDF with `pages` empty pages.
pub(crate) fn blank_pdf(pages: usize) -> Vec<u8> {
    build_pdf("P", pages, false)
}

/// Like [`marked_pdf`], but the page size lives on the page tree root and
/// the pages only inherit it.
pub(crate) fn inherited_pdf(tag: &str, pages: usize) -> Vec<u8> {
    build_pdf(tag, pages, true)
}

fn build_pdf(tag: &str, pages: usize, inherit_media_box: bool) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let media_box: Vec<Object> = vec![0.into(), 0.into(), 612.into(), 792.into()];

    let mut kids = Vec::with_capacity(pages);
    for i in 1..=pages {
        let mut page = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Marker" => Object::string_literal(format!("{tag}{i}")),
        };
        if !inherit_media_box {
            page.set("MediaBox", media_box.clone());
        }
        kids.push(Object::Reference(doc.add_object(page)));
    }

    let mut pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => pages as i64,
    };
    if inherit_media_box {
        pages_dict.set("MediaBox", media_box);
    }
    doc.objects.insert(pages_id, pages_dict.into());

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

/// Markers of every page in page order; pages without one yield `"?"`.
pub(crate) fn page_markers(bytes: &[u8]) -> Vec<String> {
    let doc = Document::load_mem(bytes).unwrap();
    doc.get_pages()
        .into_values()
        .map(|page_id| {
            let page = doc.get_dictionary(page_id).unwrap();
            match page.get(b"Marker") {
                Ok(Object::String(text, _)) => String::from_utf8_lossy(text).into_owned(),
                _ => "?".to_string(),
            }
        })
        .collect()
}
