//! Integration tests for concurrent transactions

mod common;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use tokio::sync::Notify;

use ::common::address::Address;
use ::common::ledger::{
    Account, AccountChange, Ledger, LedgerError, MemoryLedger, MemoryLedgerError,
};
use ::common::program::{instruction, NoteError, NOTES_PROGRAM_ID};
use ::common::runtime::{NoteState, Runtime, RuntimeError};

/// Shares a memory ledger, but parks the first read it serves until told
///  to go on, standing in for a second process working on the same file
#[derive(Debug, Clone)]
struct PausingLedger {
    inner: MemoryLedger,
    armed: Arc<AtomicBool>,
    paused: Arc<Notify>,
    resume: Arc<Notify>,
}

impl PausingLedger {
    fn new(inner: MemoryLedger) -> Self {
        Self {
            inner,
            armed: Arc::new(AtomicBool::new(true)),
            paused: Arc::new(Notify::new()),
            resume: Arc::new(Notify::new()),
        }
    }
}

#[async_trait]
impl Ledger for PausingLedger {
    type Error = MemoryLedgerError;

    async fn account(
        &self,
        address: &Address,
    ) -> Result<Option<Account>, LedgerError<Self::Error>> {
        let account = self.inner.account(address).await?;
        if self.armed.swap(false, Ordering::SeqCst) {
            self.paused.notify_one();
            self.resume.notified().await;
        }
        Ok(account)
    }

    async fn commit(&self, changes: Vec<AccountChange>) -> Result<(), LedgerError<Self::Error>> {
        self.inner.commit(changes).await
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_same_owner_creates_once() {
    let (_harness, alice) = common::setup_test_env().await;
    let before = alice.balance().await.unwrap();

    let attempts = (0..8).map(|i| {
        let alice = alice.clone();
        tokio::spawn(async move { alice.create(format!("title-{}", i), "content").await })
    });
    let results: Vec<_> = join_all(attempts)
        .await
        .into_iter()
        .map(|joined| joined.unwrap())
        .collect();

    let succeeded = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(succeeded, 1);
    assert!(results.iter().filter(|r| r.is_err()).all(|r| matches!(
        r,
        Err(RuntimeError::Program(NoteError::AccountAlreadyExists))
    )));

    assert_eq!(alice.note_state().await.unwrap(), NoteState::Live);
    assert_eq!(
        alice.balance().await.unwrap(),
        before - common::note_deposit()
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_distinct_owners_all_succeed() {
    let harness = common::setup_test_env().await.0;

    let mut authors = Vec::new();
    for i in 0..16 {
        authors.push(harness.author(format!("author-{}", i)).await.unwrap());
    }

    let creates = authors.iter().cloned().map(|author| {
        tokio::spawn(async move {
            author.create(author.name.clone(), "content").await?;
            author.update("updated").await
        })
    });
    for joined in join_all(creates).await {
        joined.unwrap().unwrap();
    }

    for author in &authors {
        let note = author.note().await.unwrap().unwrap();
        assert_eq!(note.title, author.name);
        assert_eq!(note.content, b"updated");
    }
    // alice's wallet, then a wallet and a note per author
    assert_eq!(harness.runtime().ledger().len(), 33);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_interleaved_updates_serialize() {
    let (_harness, alice) = common::setup_with_note().await;

    let updates = (0..16).map(|i| {
        let alice = alice.clone();
        tokio::spawn(async move { alice.update(format!("revision {}", i)).await })
    });
    for joined in join_all(updates).await {
        joined.unwrap().unwrap();
    }

    let note = alice.note().await.unwrap().unwrap();
    let content = String::from_utf8(note.content).unwrap();
    assert!(content.starts_with("revision "));
    assert_eq!(note.title, common::TITLE);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_update_against_replaced_note_rejected() {
    let (harness, alice) = common::setup_with_note().await;
    let note_address = alice.note_address().unwrap();

    // A second runtime over the same accounts, with its own lock table
    let pausing = PausingLedger::new(harness.runtime().ledger().clone());
    let other_runtime = Runtime::new(pausing.clone());

    let update = instruction::update_note(&NOTES_PROGRAM_ID, &alice.public(), "late update")
        .unwrap()
        .sign(alice.secret())
        .unwrap();
    let pending = tokio::spawn(async move { other_runtime.process_transaction(&update).await });

    // The update has read the old note; replace it before it commits
    pausing.paused.notified().await;
    alice.delete().await.unwrap();
    alice.create("fresh-title", "fresh content").await.unwrap();
    pausing.resume.notify_one();

    let result = pending.await.unwrap();
    assert!(matches!(
        result,
        Err(RuntimeError::Ledger(LedgerError::AccountChanged(a))) if a == note_address
    ));

    let note = alice.note().await.unwrap().unwrap();
    assert_eq!(note.title, "fresh-title");
    assert_eq!(note.content, b"fresh content");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_delete_against_replaced_note_rejected() {
    let (harness, alice) = common::setup_with_note().await;
    let note_address = alice.note_address().unwrap();

    let pausing = PausingLedger::new(harness.runtime().ledger().clone());
    let other_runtime = Runtime::new(pausing.clone());

    let delete = instruction::delete_note(&NOTES_PROGRAM_ID, &alice.public())
        .unwrap()
        .sign(alice.secret())
        .unwrap();
    let pending = tokio::spawn(async move { other_runtime.process_transaction(&delete).await });

    pausing.paused.notified().await;
    alice.update("edited meanwhile").await.unwrap();
    pausing.resume.notify_one();

    let result = pending.await.unwrap();
    assert!(matches!(
        result,
        Err(RuntimeError::Ledger(LedgerError::AccountChanged(a))) if a == note_address
    ));
    assert_eq!(
        alice.note().await.unwrap().unwrap().content,
        b"edited meanwhile"
    );
}
