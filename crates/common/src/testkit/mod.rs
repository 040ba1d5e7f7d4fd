/// Lightweight harness for driving a runtime from tests
///
/// Spins up a [`Runtime`] over an in-memory ledger and hands out funded
/// authors with convenience methods for signing and submitting note
/// instructions, without any external infrastructure.
///
/// # Example
///
/// ```rust,ignore
/// use common::testkit::TestHarness;
///
/// #[tokio::test]
/// async fn test_note_lifecycle() -> anyhow::Result<()> {
///     let harness = TestHarness::new();
///     let alice = harness.author("alice").await?;
///
///     alice.create("delhi-weather", "This is my first note").await?;
///     alice.update("Updated content").await?;
///     assert_eq!(alice.note().await?.unwrap().content, b"Updated content");
///
///     alice.delete().await?;
///     Ok(())
/// }
/// ```
mod author;

pub use author::TestAuthor;

use crate::ledger::{MemoryLedger, MemoryLedgerError, LAMPORTS_PER_TOKEN};
use crate::runtime::{Runtime, RuntimeError};

/// Error type returned by instructions submitted through the harness
pub type HarnessError = RuntimeError<MemoryLedgerError>;

/// Lamports every new author starts with
pub const DEFAULT_FUNDING: u64 = LAMPORTS_PER_TOKEN;

/// A runtime over a fresh in-memory ledger
#[derive(Debug, Clone)]
pub struct TestHarness {
    runtime: Runtime<MemoryLedger>,
}

impl Default for TestHarness {
    fn default() -> Self {
        Self {
            runtime: Runtime::new(MemoryLedger::new()),
        }
    }
}

impl TestHarness {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn runtime(&self) -> &Runtime<MemoryLedger> {
        &self.runtime
    }

    /// A new author funded with [`DEFAULT_FUNDING`]
    pub async fn author(&self, name: impl Into<String>) -> anyhow::Result<TestAuthor> {
        self.author_with_funds(name, DEFAULT_FUNDING).await
    }

    /// A new author whose wallet holds exactly `lamports`
    pub async fn author_with_funds(
        &self,
        name: impl Into<String>,
        lamports: u64,
    ) -> anyhow::Result<TestAuthor> {
        let author = TestAuthor::new(name, self.runtime.clone());
        if lamports > 0 {
            author.airdrop(lamports).await?;
        }
        Ok(author)
    }
}
