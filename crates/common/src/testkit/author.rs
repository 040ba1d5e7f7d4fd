use crate::address::Address;
use crate::crypto::{PublicKey, SecretKey};
use crate::ledger::MemoryLedger;
use crate::program::{instruction, Note};
use crate::runtime::{Message, NoteState, Runtime, Transaction};

use super::HarnessError;

/// An identity with a wallet on the harness ledger
#[derive(Debug, Clone)]
pub struct TestAuthor {
    /// The name of this author (for debugging)
    pub name: String,
    secret: SecretKey,
    runtime: Runtime<MemoryLedger>,
}

impl TestAuthor {
    pub(super) fn new(name: impl Into<String>, runtime: Runtime<MemoryLedger>) -> Self {
        Self {
            name: name.into(),
            secret: SecretKey::generate(),
            runtime,
        }
    }

    pub fn public(&self) -> PublicKey {
        self.secret.public()
    }

    pub fn secret(&self) -> &SecretKey {
        &self.secret
    }

    pub fn wallet(&self) -> Address {
        Address::from(self.public())
    }

    /// This author's note slot
    pub fn note_address(&self) -> Result<Address, HarnessError> {
        Ok(self.runtime.note_address(&self.public())?.0)
    }

    pub async fn airdrop(&self, lamports: u64) -> Result<u64, HarnessError> {
        self.runtime.airdrop(&self.public(), lamports).await
    }

    pub async fn balance(&self) -> Result<u64, HarnessError> {
        self.runtime.balance(&self.wallet()).await
    }

    pub fn sign(&self, message: Message) -> Result<Transaction, HarnessError> {
        Ok(message.sign(&self.secret)?)
    }

    /// Sign and submit an arbitrary message
    pub async fn submit(&self, message: Message) -> Result<(), HarnessError> {
        let transaction = self.sign(message)?;
        self.runtime.process_transaction(&transaction).await
    }

    pub async fn create(
        &self,
        title: impl Into<String>,
        content: impl Into<Vec<u8>>,
    ) -> Result<(), HarnessError> {
        let message = instruction::create_note(
            self.runtime.program_id(),
            &self.public(),
            title,
            content,
        )?;
        self.submit(message).await
    }

    pub async fn update(&self, content: impl Into<Vec<u8>>) -> Result<(), HarnessError> {
        let message =
            instruction::update_note(self.runtime.program_id(), &self.public(), content)?;
        self.submit(message).await
    }

    pub async fn delete(&self) -> Result<(), HarnessError> {
        let message = instruction::delete_note(self.runtime.program_id(), &self.public())?;
        self.submit(message).await
    }

    /// Decoded note in this author's slot, if any
    pub async fn note(&self) -> Result<Option<Note>, HarnessError> {
        self.runtime.fetch_note(&self.note_address()?).await
    }

    pub async fn note_state(&self) -> Result<NoteState, HarnessError> {
        self.runtime.note_state(&self.note_address()?).await
    }
}
