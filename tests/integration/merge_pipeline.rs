//! Integration tests for merging and writing.

use pdfstack::collection::{Collection, Direction, RawFile};
use pdfstack::config::CompressionLevel;
use pdfstack::io::{OutputWriter, read_sources};
use pdfstack::merge::{FINALIZING_LABEL, MergePipeline, MergeProgress, NoProgress};
use tempfile::TempDir;

use crate::common::{marked_pdf, page_markers, write_pdf};

async fn collection_of(files: Vec<RawFile>) -> Collection {
    let mut collection = Collection::new();
    collection.add(files).unwrap();
    collection
}

#[tokio::test]
async fn test_merge_two_files_from_disk() {
    let dir = TempDir::new().unwrap();
    let paths = vec![
        write_pdf(dir.path(), "intro.pdf", "I", 1),
        write_pdf(dir.path(), "body.pdf", "B", 3),
    ];
    let mut collection = collection_of(read_sources(&paths, 2).await.unwrap()).await;
    collection.settle().await;

    let outcome = MergePipeline::new()
        .merge(&collection.snapshot(), "Book", &mut NoProgress)
        .await
        .unwrap();
    assert_eq!(outcome.statistics.total_pages, collection.summary().total_pages);

    let out_dir = dir.path().join("out");
    let stats = OutputWriter::new()
        .write(&outcome.bytes, &out_dir, &outcome.name)
        .await
        .unwrap();

    assert_eq!(stats.output_path, out_dir.join("Book.pdf"));
    let written = std::fs::read(&stats.output_path).unwrap();
    assert_eq!(page_markers(&written), vec!["I1", "B1", "B2", "B3"]);
}

#[tokio::test]
async fn test_reordering_changes_output_order() {
    let mut collection = collection_of(vec![
        RawFile::pdf("a.pdf", marked_pdf("A", 2)),
        RawFile::pdf("b.pdf", marked_pdf("B", 2)),
    ])
    .await;
    let pipeline = MergePipeline::new();

    let forward = pipeline
        .merge(&collection.snapshot(), "ab", &mut NoProgress)
        .await
        .unwrap();
    collection.move_item(0, Direction::Down).unwrap();
    let backward = pipeline
        .merge(&collection.snapshot(), "ba", &mut NoProgress)
        .await
        .unwrap();

    assert_eq!(page_markers(&forward.bytes), vec!["A1", "A2", "B1", "B2"]);
    assert_eq!(page_markers(&backward.bytes), vec!["B1", "B2", "A1", "A2"]);
}

#[tokio::test]
async fn test_progress_events_for_three_sources() {
    let collection = collection_of(vec![
        RawFile::pdf("one.pdf", marked_pdf("A", 1)),
        RawFile::pdf("two.pdf", marked_pdf("B", 1)),
        RawFile::pdf("three.pdf", marked_pdf("C", 1)),
    ])
    .await;

    let mut events: Vec<MergeProgress> = Vec::new();
    let mut reporter = |p: &MergeProgress| events.push(p.clone());
    MergePipeline::new()
        .merge(&collection.snapshot(), "x", &mut reporter)
        .await
        .unwrap();

    assert_eq!(events.len(), 4);
    assert_eq!(events[0].percentage, 0.0);
    assert!((events[1].percentage - 100.0 / 3.0).abs() < 1e-9);
    assert!((events[2].percentage - 200.0 / 3.0).abs() < 1e-9);
    assert_eq!(events[3].percentage, 100.0);
    assert_eq!(events[2].label, "three.pdf");
    assert_eq!(events[3].label, FINALIZING_LABEL);
}

#[tokio::test]
async fn test_unsettled_collection_can_be_merged() {
    // Page counting may still be running; merging does not depend on it.
    let collection = collection_of(vec![
        RawFile::pdf("a.pdf", marked_pdf("A", 1)),
        RawFile::pdf("b.pdf", marked_pdf("B", 1)),
    ])
    .await;

    let outcome = MergePipeline::with_compression(CompressionLevel::None)
        .merge(&collection.snapshot(), "  ", &mut NoProgress)
        .await
        .unwrap();

    assert_eq!(outcome.name, "Merged_PDFs");
    assert_eq!(page_markers(&outcome.bytes), vec!["A1", "B1"]);
}

#[tokio::test]
async fn test_merged_output_can_be_merged_again() {
    let first = MergePipeline::new()
        .merge(
            &collection_of(vec![
                RawFile::pdf("a.pdf", marked_pdf("A", 1)),
                RawFile::pdf("b.pdf", marked_pdf("B", 1)),
            ])
            .await
            .snapshot(),
            "first",
            &mut NoProgress,
        )
        .await
        .unwrap();

    let second = MergePipeline::new()
        .merge(
            &collection_of(vec![
                RawFile::pdf("first.pdf", first.bytes),
                RawFile::pdf("c.pdf", marked_pdf("C", 1)),
            ])
            .await
            .snapshot(),
            "second",
            &mut NoProgress,
        )
        .await
        .unwrap();

    assert_eq!(page_markers(&second.bytes), vec!["A1", "B1", "C1"]);
}
