//! Integration tests for creating notes

mod common;

use ::common::ledger::Ledger;
use ::common::program::{instruction, Note, NoteError, MAX_CONTENT_LEN, MAX_TITLE_LEN};
use ::common::runtime::{NoteState, RuntimeError};
use ::common::testkit::HarnessError;

fn note_error(result: Result<(), HarnessError>) -> NoteError {
    match result {
        Err(RuntimeError::Program(e)) => e,
        Err(e) => panic!("expected a program error, got {}", e),
        Ok(()) => panic!("expected a program error, got success"),
    }
}

#[tokio::test]
async fn test_create_stores_inputs() {
    let (_harness, alice) = common::setup_test_env().await;

    alice.create(common::TITLE, common::CONTENT).await.unwrap();

    let note = alice.note().await.unwrap().unwrap();
    assert_eq!(note.title, common::TITLE);
    assert_eq!(note.content, common::CONTENT.as_bytes());
    assert_eq!(note.author, alice.public());
    assert_eq!(note.created_at, note.last_updated);
    assert_eq!(alice.note_state().await.unwrap(), NoteState::Live);
}

#[tokio::test]
async fn test_create_moves_deposit() {
    let (harness, alice) = common::setup_test_env().await;
    let before = alice.balance().await.unwrap();

    alice.create(common::TITLE, common::CONTENT).await.unwrap();

    assert_eq!(
        alice.balance().await.unwrap(),
        before - common::note_deposit()
    );
    let account = harness
        .runtime()
        .ledger()
        .account(&alice.note_address().unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(account.lamports, common::note_deposit());
    assert_eq!(account.owner, *harness.runtime().program_id());
    assert_eq!(account.data.len(), Note::SPACE);
}

#[tokio::test]
async fn test_create_rejections_allocate_nothing() {
    let (harness, alice) = common::setup_test_env().await;
    let balance = alice.balance().await.unwrap();

    let long_title = "t".repeat(MAX_TITLE_LEN + 1);
    let long_content = vec![b'c'; MAX_CONTENT_LEN + 1];

    assert_eq!(
        note_error(alice.create(long_title, common::CONTENT).await),
        NoteError::TitleTooLong
    );
    assert_eq!(
        note_error(alice.create("", common::CONTENT).await),
        NoteError::TitleEmpty
    );
    assert_eq!(
        note_error(alice.create(common::TITLE, long_content).await),
        NoteError::ContentTooLong
    );
    assert_eq!(
        note_error(alice.create(common::TITLE, "").await),
        NoteError::ContentEmpty
    );

    assert_eq!(alice.note_state().await.unwrap(), NoteState::Absent);
    assert_eq!(alice.balance().await.unwrap(), balance);
    // Only alice's wallet exists
    assert_eq!(harness.runtime().ledger().len(), 1);

    alice.create(common::TITLE, common::CONTENT).await.unwrap();
    assert_eq!(alice.note_state().await.unwrap(), NoteState::Live);
}

#[tokio::test]
async fn test_create_at_limits() {
    let (_harness, alice) = common::setup_test_env().await;

    let title = "t".repeat(MAX_TITLE_LEN);
    let content = vec![b'c'; MAX_CONTENT_LEN];
    alice.create(title.clone(), content.clone()).await.unwrap();

    let note = alice.note().await.unwrap().unwrap();
    assert_eq!(note.title, title);
    assert_eq!(note.content, content);
}

#[tokio::test]
async fn test_create_twice_conflicts() {
    let (_harness, alice) = common::setup_with_note().await;

    assert_eq!(
        note_error(alice.create("second", "other").await),
        NoteError::AccountAlreadyExists
    );

    let note = alice.note().await.unwrap().unwrap();
    assert_eq!(note.title, common::TITLE);
}

#[tokio::test]
async fn test_create_underfunded() {
    let harness = common::setup_test_env().await.0;
    let deposit = common::note_deposit();
    let bob = harness.author_with_funds("bob", deposit - 1).await.unwrap();

    assert_eq!(
        note_error(bob.create(common::TITLE, common::CONTENT).await),
        NoteError::InsufficientFunds {
            required: deposit,
            available: deposit - 1,
        }
    );
    assert_eq!(bob.note_state().await.unwrap(), NoteState::Absent);
    assert_eq!(bob.balance().await.unwrap(), deposit - 1);

    bob.airdrop(1).await.unwrap();
    bob.create(common::TITLE, common::CONTENT).await.unwrap();
    assert_eq!(bob.balance().await.unwrap(), 0);
}

#[tokio::test]
async fn test_create_in_someone_elses_slot() {
    let (harness, alice) = common::setup_test_env().await;
    let bob = harness.author("bob").await.unwrap();

    let mut message = instruction::create_note(
        harness.runtime().program_id(),
        &alice.public(),
        common::TITLE,
        common::CONTENT,
    )
    .unwrap();
    message.note = bob.note_address().unwrap();

    assert_eq!(
        note_error(alice.submit(message).await),
        NoteError::InvalidAddress
    );
    assert_eq!(bob.note_state().await.unwrap(), NoteState::Absent);
}
