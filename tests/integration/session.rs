//! Integration tests for the interactive session.

use pdfstack::config::{Config, OverwriteMode};
use pdfstack::session::{Flow, Session, SessionCommand};
use tempfile::TempDir;

use crate::common::{page_markers, write_pdf};

fn session_in(dir: &TempDir, overwrite_mode: OverwriteMode) -> Session {
    Session::new(Config {
        out_dir: dir.path().join("out"),
        quiet: true,
        interactive: true,
        overwrite_mode,
        ..Default::default()
    })
}

#[tokio::test]
async fn test_scripted_session() {
    let dir = TempDir::new().unwrap();
    write_pdf(dir.path(), "1-cover.pdf", "C", 1);
    write_pdf(dir.path(), "2-body.pdf", "B", 2);
    write_pdf(dir.path(), "3-appendix.pdf", "X", 1);
    let pattern = dir.path().join("*.pdf");

    let mut session = session_in(&dir, OverwriteMode::Prompt);
    let script = [
        format!("add {}", pattern.display()),
        "list".to_string(),
        "rm 3".to_string(),
        "up 2".to_string(),
        "name Final/Draft".to_string(),
        "merge".to_string(),
    ];
    for line in &script {
        assert_eq!(session.run_line(line).await, Flow::Continue);
    }

    let written = std::fs::read(dir.path().join("out").join("Final_Draft.pdf")).unwrap();
    assert_eq!(page_markers(&written), vec!["B1", "B2", "C1"]);
    assert_eq!(session.run_line("exit").await, Flow::Quit);
}

#[tokio::test]
async fn test_force_overwrites_existing_output() {
    let dir = TempDir::new().unwrap();
    let a = write_pdf(dir.path(), "a.pdf", "A", 1);
    let b = write_pdf(dir.path(), "b.pdf", "B", 1);
    let out = dir.path().join("out");
    std::fs::create_dir_all(&out).unwrap();
    std::fs::write(out.join("same.pdf"), b"old").unwrap();

    let mut session = session_in(&dir, OverwriteMode::Force);
    session.add_paths(&[a, b]).await.unwrap();
    session
        .execute(SessionCommand::Merge(Some("same".into())))
        .await
        .unwrap();

    let written = std::fs::read(out.join("same.pdf")).unwrap();
    assert_eq!(page_markers(&written), vec!["A1", "B1"]);
}

#[tokio::test]
async fn test_clear_then_merge_is_refused() {
    let dir = TempDir::new().unwrap();
    let a = write_pdf(dir.path(), "a.pdf", "A", 1);
    let b = write_pdf(dir.path(), "b.pdf", "B", 1);

    let mut session = session_in(&dir, OverwriteMode::Force);
    session.add_paths(&[a, b]).await.unwrap();
    session.run_line("clear").await;

    assert!(session.collection().is_empty());
    assert!(session.execute(SessionCommand::Merge(None)).await.is_err());
    assert!(!dir.path().join("out").exists());
}
