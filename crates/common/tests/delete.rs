//! Integration tests for deleting notes

mod common;

use ::common::program::NoteError;
use ::common::runtime::{NoteState, RuntimeError};

#[tokio::test]
async fn test_delete_removes_note() {
    let (harness, alice) = common::setup_with_note().await;

    alice.delete().await.unwrap();

    assert!(alice.note().await.unwrap().is_none());
    assert_eq!(alice.note_state().await.unwrap(), NoteState::Absent);
    assert_eq!(
        harness
            .runtime()
            .fetch_note(&alice.note_address().unwrap())
            .await
            .unwrap(),
        None
    );
}

#[tokio::test]
async fn test_delete_refunds_deposit() {
    let (_harness, alice) = common::setup_test_env().await;
    let before = alice.balance().await.unwrap();

    alice.create(common::TITLE, common::CONTENT).await.unwrap();
    alice.delete().await.unwrap();

    assert_eq!(alice.balance().await.unwrap(), before);
}

#[tokio::test]
async fn test_delete_then_create_starts_fresh() {
    let (_harness, alice) = common::setup_with_note().await;
    alice.update("edited before delete").await.unwrap();
    alice.delete().await.unwrap();

    alice.create("second", "fresh").await.unwrap();

    let note = alice.note().await.unwrap().unwrap();
    assert_eq!(note.title, "second");
    assert_eq!(note.content, b"fresh");
    assert_eq!(note.author, alice.public());
}

#[tokio::test]
async fn test_delete_missing_note() {
    let (_harness, alice) = common::setup_test_env().await;
    let result = alice.delete().await;
    assert!(matches!(
        result,
        Err(RuntimeError::Program(NoteError::AccountNotFound))
    ));
}

#[tokio::test]
async fn test_double_delete() {
    let (_harness, alice) = common::setup_with_note().await;
    alice.delete().await.unwrap();
    let result = alice.delete().await;
    assert!(matches!(
        result,
        Err(RuntimeError::Program(NoteError::AccountNotFound))
    ));
}
