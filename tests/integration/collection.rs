//! Integration tests for building and editing the collection.

use pdfstack::collection::{Collection, Direction, PageCount, RawFile};
use pdfstack::io::read_sources;
use tempfile::TempDir;

use crate::common::{marked_pdf, write_file, write_pdf};

#[tokio::test]
async fn test_files_from_disk_get_page_counts() {
    let dir = TempDir::new().unwrap();
    let paths = vec![
        write_pdf(dir.path(), "one.pdf", "A", 1),
        write_pdf(dir.path(), "three.PDF", "B", 3),
        write_file(dir.path(), "readme.txt", b"not a pdf"),
    ];

    let files = read_sources(&paths, 2).await.unwrap();
    let mut collection = Collection::new();
    let report = collection.add(files).unwrap();

    assert_eq!(report.added.len(), 2);
    assert_eq!(report.rejected, vec!["readme.txt".to_string()]);

    collection.settle().await;
    let counts: Vec<PageCount> = collection.items().iter().map(|i| i.page_count()).collect();
    assert_eq!(counts, vec![PageCount::Known(1), PageCount::Known(3)]);

    let summary = collection.summary();
    assert_eq!(summary.item_count, 2);
    assert_eq!(summary.total_pages, 4);
    assert_eq!(summary.pending, 0);
}

#[tokio::test]
async fn test_summary_tracks_every_edit() {
    let mut collection = Collection::new();
    collection
        .add((0..5).map(|i| RawFile::pdf(format!("f{i}.pdf"), marked_pdf("F", i + 1))))
        .unwrap();
    collection.settle().await;

    let edits: [(&str, usize); 6] = [
        ("down", 0),
        ("remove", 2),
        ("up", 3),
        ("up", 0),
        ("remove", 0),
        ("down", 2),
    ];
    for (edit, index) in edits {
        match edit {
            "down" => {
                collection.move_item(index, Direction::Down).unwrap();
            }
            "up" => {
                collection.move_item(index, Direction::Up).unwrap();
            }
            _ => {
                collection.remove(index).unwrap();
            }
        }
        let summary = collection.summary();
        assert_eq!(summary.item_count, collection.len());
        let expected: usize = collection
            .items()
            .iter()
            .filter_map(|i| i.page_count().known())
            .sum();
        assert_eq!(summary.total_pages, expected);
    }
    assert_eq!(collection.len(), 3);
}

#[tokio::test]
async fn test_up_then_down_restores_order() {
    let mut collection = Collection::new();
    collection
        .add(["a.pdf", "b.pdf", "c.pdf"].map(|n| RawFile::pdf(n, marked_pdf("X", 1))))
        .unwrap();
    let before: Vec<_> = collection.items().iter().map(|i| i.id()).collect();

    assert!(collection.move_item(2, Direction::Up).unwrap());
    assert!(collection.move_item(1, Direction::Down).unwrap());

    let after: Vec<_> = collection.items().iter().map(|i| i.id()).collect();
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_corrupt_file_is_unknown_and_others_unaffected() {
    let mut collection = Collection::new();
    collection
        .add(vec![
            RawFile::pdf("good.pdf", marked_pdf("G", 2)),
            RawFile::pdf("bad.pdf", marked_pdf("T", 2)[..40].to_vec()),
            RawFile::pdf("also-good.pdf", marked_pdf("H", 1)),
        ])
        .unwrap();
    collection.settle().await;

    let counts: Vec<PageCount> = collection.items().iter().map(|i| i.page_count()).collect();
    assert_eq!(
        counts,
        vec![PageCount::Known(2), PageCount::Unknown, PageCount::Known(1)]
    );

    let summary = collection.summary();
    assert_eq!(summary.total_pages, 3);
    assert_eq!(summary.unknown, 1);
    assert_eq!(summary.item_count, 3);
}

#[tokio::test]
async fn test_snapshot_is_isolated_from_later_edits() {
    let mut collection = Collection::new();
    collection
        .add(vec![
            RawFile::pdf("a.pdf", marked_pdf("A", 1)),
            RawFile::pdf("b.pdf", marked_pdf("B", 1)),
        ])
        .unwrap();

    let snapshot = collection.snapshot();
    collection.clear();

    assert!(collection.is_empty());
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot[1].name(), "b.pdf");
}
