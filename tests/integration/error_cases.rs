//! Integration tests for error handling and edge cases.

use pdfstack::collection::{Collection, Direction, RawFile};
use pdfstack::config::Config;
use pdfstack::error::Error;
use pdfstack::io::read_sources;
use pdfstack::merge::{MergePipeline, MergeProgress, NoProgress};
use std::path::PathBuf;
use tempfile::TempDir;

use crate::common::{marked_pdf, write_file, write_pdf};

#[tokio::test]
async fn test_error_nonexistent_input() {
    let err = read_sources(&[PathBuf::from("/nonexistent/file.pdf")], 1)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::FileNotFound { .. }));
    assert_eq!(err.exit_code(), 2);
}

#[tokio::test]
async fn test_error_only_non_pdfs() {
    let dir = TempDir::new().unwrap();
    let paths = vec![
        write_file(dir.path(), "a.txt", b"a"),
        write_file(dir.path(), "b.png", b"b"),
    ];
    let files = read_sources(&paths, 2).await.unwrap();

    let mut collection = Collection::new();
    let err = collection.add(files).unwrap_err();
    assert!(matches!(err, Error::InvalidInput { rejected: 2 }));
    assert!(collection.is_empty());
}

#[tokio::test]
async fn test_error_single_file_merge() {
    let mut collection = Collection::new();
    collection
        .add(vec![RawFile::pdf("only.pdf", marked_pdf("A", 3))])
        .unwrap();

    let mut events = 0;
    let mut reporter = |_: &MergeProgress| events += 1;
    let err = MergePipeline::new()
        .merge(&collection.snapshot(), "out", &mut reporter)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InsufficientInput { count: 1 }));
    assert_eq!(events, 0);
}

#[tokio::test]
async fn test_error_unreadable_middle_source() {
    let dir = TempDir::new().unwrap();
    let paths = vec![
        write_pdf(dir.path(), "a.pdf", "A", 1),
        write_file(dir.path(), "fake.pdf", b"this is plain text"),
        write_pdf(dir.path(), "c.pdf", "C", 1),
    ];
    let mut collection = Collection::new();
    collection.add(read_sources(&paths, 3).await.unwrap()).unwrap();

    let mut labels = Vec::new();
    let mut reporter = |p: &MergeProgress| labels.push(p.label.clone());
    let err = MergePipeline::new()
        .merge(&collection.snapshot(), "out", &mut reporter)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::SourceUnreadable { index: 1, .. }));
    assert!(err.to_string().contains("fake.pdf"));
    assert_eq!(err.exit_code(), 3);
    assert_eq!(labels, vec!["a.pdf", "fake.pdf"]);
}

#[tokio::test]
async fn test_error_index_out_of_range() {
    let mut collection = Collection::new();
    collection
        .add(vec![RawFile::pdf("a.pdf", marked_pdf("A", 1))])
        .unwrap();

    assert!(matches!(
        collection.remove(1),
        Err(Error::IndexOutOfRange { index: 1, len: 1 })
    ));
    assert!(matches!(
        collection.move_item(5, Direction::Up),
        Err(Error::IndexOutOfRange { .. })
    ));
    // Moving past either end is not an error.
    assert!(!collection.move_item(0, Direction::Up).unwrap());
    assert!(!collection.move_item(0, Direction::Down).unwrap());
}

#[tokio::test]
async fn test_error_removed_item_is_unknown() {
    let mut collection = Collection::new();
    let report = collection
        .add(vec![
            RawFile::pdf("a.pdf", marked_pdf("A", 1)),
            RawFile::pdf("b.pdf", marked_pdf("B", 1)),
        ])
        .unwrap();
    let id = report.added[0];

    collection.remove_id(id).unwrap();
    assert!(matches!(
        collection.remove_id(id),
        Err(Error::UnknownItem { .. })
    ));
    assert!(collection.get(id).is_none());

    // The late page count for the removed item goes nowhere.
    collection.settle().await;
    assert_eq!(collection.len(), 1);
    assert_eq!(collection.summary().total_pages, 1);
}

#[tokio::test]
async fn test_error_pipeline_reusable_after_failure() {
    let pipeline = MergePipeline::new();
    let mut collection = Collection::new();
    collection
        .add(vec![
            RawFile::pdf("bad.pdf", b"nope".to_vec()),
            RawFile::pdf("b.pdf", marked_pdf("B", 1)),
        ])
        .unwrap();

    assert!(pipeline
        .merge(&collection.snapshot(), "x", &mut NoProgress)
        .await
        .is_err());
    assert!(!pipeline.is_busy());

    collection.remove(0).unwrap();
    collection
        .add(vec![RawFile::pdf("a.pdf", marked_pdf("A", 1))])
        .unwrap();
    assert!(pipeline
        .merge(&collection.snapshot(), "x", &mut NoProgress)
        .await
        .is_ok());
}

#[test]
fn test_error_invalid_config() {
    let config = Config {
        jobs: Some(0),
        inputs: vec![PathBuf::from("a.pdf")],
        ..Default::default()
    };
    assert!(config.validate().is_err());
}
