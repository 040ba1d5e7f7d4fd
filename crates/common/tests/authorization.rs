//! Integration tests for author-only mutation and signature checks

mod common;

use ::common::address::Address;
use ::common::program::{instruction, NoteError, NoteInstruction};
use ::common::runtime::{RuntimeError, Transaction, TransactionError};

#[tokio::test]
async fn test_non_author_cannot_update() {
    let (harness, alice) = common::setup_with_note().await;
    let mallory = harness.author("mallory").await.unwrap();

    let mut message =
        instruction::update_note(harness.runtime().program_id(), &mallory.public(), "hijacked")
            .unwrap();
    message.note = alice.note_address().unwrap();

    let result = mallory.submit(message).await;
    assert!(matches!(
        result,
        Err(RuntimeError::Program(NoteError::Unauthorized))
    ));

    let note = alice.note().await.unwrap().unwrap();
    assert_eq!(note.title, common::TITLE);
    assert_eq!(note.content, common::CONTENT.as_bytes());
    assert_eq!(note.author, alice.public());
}

#[tokio::test]
async fn test_non_author_cannot_delete() {
    let (harness, alice) = common::setup_with_note().await;
    let mallory = harness.author("mallory").await.unwrap();
    let mallory_balance = mallory.balance().await.unwrap();

    let mut message =
        instruction::delete_note(harness.runtime().program_id(), &mallory.public()).unwrap();
    message.note = alice.note_address().unwrap();

    let result = mallory.submit(message).await;
    assert!(matches!(
        result,
        Err(RuntimeError::Program(NoteError::Unauthorized))
    ));

    assert!(alice.note().await.unwrap().is_some());
    assert_eq!(mallory.balance().await.unwrap(), mallory_balance);
}

#[tokio::test]
async fn test_tampered_transaction_rejected() {
    let (harness, alice) = common::setup_with_note().await;

    let mut transaction = alice
        .sign(instruction::update_note(
            harness.runtime().program_id(),
            &alice.public(),
            "signed content",
        )
        .unwrap())
        .unwrap();
    transaction.message.instruction = NoteInstruction::UpdateNote {
        content: b"swapped content".to_vec(),
    };

    let result = harness.runtime().process_transaction(&transaction).await;
    assert!(matches!(
        result,
        Err(RuntimeError::Transaction(TransactionError::InvalidSignature))
    ));

    let note = alice.note().await.unwrap().unwrap();
    assert_eq!(note.content, common::CONTENT.as_bytes());
}

#[tokio::test]
async fn test_forged_signer_rejected() {
    let (harness, alice) = common::setup_with_note().await;
    let mallory = harness.author("mallory").await.unwrap();

    // Claims to be alice but signs with mallory's key
    let message =
        instruction::delete_note(harness.runtime().program_id(), &alice.public()).unwrap();
    let transaction = Transaction {
        signature: mallory.secret().sign(&message.encode().unwrap()),
        message,
    };

    let result = harness.runtime().process_transaction(&transaction).await;
    assert!(matches!(
        result,
        Err(RuntimeError::Transaction(TransactionError::InvalidSignature))
    ));
    assert!(alice.note().await.unwrap().is_some());
}

#[tokio::test]
async fn test_wrong_program_rejected() {
    let (_harness, alice) = common::setup_test_env().await;
    let other_program = Address::new([9u8; 32]);

    let message = instruction::create_note(
        &other_program,
        &alice.public(),
        common::TITLE,
        common::CONTENT,
    )
    .unwrap();

    let result = alice.submit(message).await;
    assert!(matches!(
        result,
        Err(RuntimeError::Transaction(
            TransactionError::ProgramMismatch { .. }
        ))
    ));
}
