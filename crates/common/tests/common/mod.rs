//! Shared test utilities for note integration tests
#![allow(dead_code)]

use common::ledger::Rent;
use common::program::Note;
use common::testkit::{TestAuthor, TestHarness};

pub const TITLE: &str = "delhi-weather";
pub const CONTENT: &str = "This is my first note";

/// A fresh harness with one funded author
pub async fn setup_test_env() -> (TestHarness, TestAuthor) {
    let harness = TestHarness::new();
    let author = harness.author("alice").await.unwrap();
    (harness, author)
}

/// A fresh harness with one funded author who already owns a note
pub async fn setup_with_note() -> (TestHarness, TestAuthor) {
    let (harness, author) = setup_test_env().await;
    author.create(TITLE, CONTENT).await.unwrap();
    (harness, author)
}

/// Deposit locked in every live note
pub fn note_deposit() -> u64 {
    Rent::default().minimum_balance(Note::SPACE)
}
