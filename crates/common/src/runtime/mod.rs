use crate::address::{Address, AddressError};
use crate::crypto::PublicKey;
use crate::ledger::{AccountChange, Ledger, LedgerError, Rent};
use crate::program::{self, InstructionContext, Note, NoteError, NOTES_PROGRAM_ID};

mod locks;
mod transaction;

pub use locks::{AddressGuard, AddressLocks};
pub use transaction::{Message, Signer, Transaction, TransactionError};

#[derive(thiserror::Error, Debug)]
pub enum RuntimeError<E> {
    #[error("transaction rejected: {0}")]
    Transaction(#[from] TransactionError),
    #[error("program error: {0}")]
    Program(#[from] NoteError),
    #[error("address error: {0}")]
    Address(#[from] AddressError),
    #[error("ledger error: {0}")]
    Ledger(LedgerError<E>),
}

impl<E> RuntimeError<E> {
    /// The program level condition, if that is what went wrong
    pub fn note_error(&self) -> Option<&NoteError> {
        match self {
            RuntimeError::Program(e) => Some(e),
            _ => None,
        }
    }
}

// Existence and funding conditions reported by the ledger surface the
//  same way as when the program catches them itself
impl<E> From<LedgerError<E>> for RuntimeError<E> {
    fn from(err: LedgerError<E>) -> Self {
        match err {
            LedgerError::AccountAlreadyExists(_) => {
                RuntimeError::Program(NoteError::AccountAlreadyExists)
            }
            LedgerError::AccountNotFound(_) => RuntimeError::Program(NoteError::AccountNotFound),
            LedgerError::InsufficientFunds {
                required,
                available,
                ..
            } => RuntimeError::Program(NoteError::InsufficientFunds {
                required,
                available,
            }),
            other => RuntimeError::Ledger(other),
        }
    }
}

/// Whether a note slot currently holds a note
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteState {
    Absent,
    Live,
}

/// Executes signed note transactions against a ledger.
///
/// Each transaction locks the note slot and the signer's wallet for the
/// whole load / process / commit cycle. Transactions by different owners
/// touch disjoint addresses and run concurrently.
#[derive(Debug, Clone)]
pub struct Runtime<L: Ledger> {
    ledger: L,
    program_id: Address,
    rent: Rent,
    locks: AddressLocks,
}

impl<L: Ledger> Runtime<L> {
    pub fn new(ledger: L) -> Self {
        Self {
            ledger,
            program_id: NOTES_PROGRAM_ID,
            rent: Rent::default(),
            locks: AddressLocks::new(),
        }
    }

    pub fn with_program_id(mut self, program_id: Address) -> Self {
        self.program_id = program_id;
        self
    }

    pub fn with_rent(mut self, rent: Rent) -> Self {
        self.rent = rent;
        self
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn program_id(&self) -> &Address {
        &self.program_id
    }

    pub fn rent(&self) -> &Rent {
        &self.rent
    }

    /// Note slot for `owner` under this runtime's program
    pub fn note_address(&self, owner: &PublicKey) -> Result<(Address, u8), AddressError> {
        program::derive_note_address(&self.program_id, owner)
    }

    /// Verify, execute and commit a single transaction.
    ///
    /// Either every change the instruction asks for is applied or none is.
    pub async fn process_transaction(
        &self,
        transaction: &Transaction,
    ) -> Result<(), RuntimeError<L::Error>> {
        let signer = transaction.verify()?;
        let message = &transaction.message;
        if message.program_id != self.program_id {
            return Err(TransactionError::ProgramMismatch {
                expected: self.program_id,
                found: message.program_id,
            }
            .into());
        }

        let payer = signer.wallet();
        let _guard = self.locks.lock([message.note, payer]).await;

        let note_account = self.ledger.account(&message.note).await?;
        let payer_lamports = self.ledger.balance(&payer).await?;

        let ctx = InstructionContext {
            program_id: &self.program_id,
            signer: &signer,
            note_address: message.note,
            note_account,
            payer_lamports,
            rent: &self.rent,
            unix_timestamp: unix_timestamp(),
        };

        let changes = program::process(ctx, message.instruction.clone()).map_err(|e| {
            tracing::warn!(
                "{} by {} failed: {} ({})",
                message.instruction.name(),
                signer.key(),
                e.name(),
                e.code()
            );
            e
        })?;

        self.ledger.commit(changes).await?;
        tracing::debug!(
            "{} by {} committed at {}",
            message.instruction.name(),
            signer.key(),
            message.note
        );
        Ok(())
    }

    /// Credit `identity`'s wallet, returning the new balance
    pub async fn airdrop(
        &self,
        identity: &PublicKey,
        lamports: u64,
    ) -> Result<u64, RuntimeError<L::Error>> {
        let wallet = Address::from(identity);
        let _guard = self.locks.lock([wallet]).await;

        self.ledger
            .commit(vec![AccountChange::Credit {
                address: wallet,
                lamports,
            }])
            .await?;
        Ok(self.ledger.balance(&wallet).await?)
    }

    pub async fn balance(&self, address: &Address) -> Result<u64, RuntimeError<L::Error>> {
        Ok(self.ledger.balance(address).await?)
    }

    /// Read the note stored at `address`, if any. Anyone may call this.
    pub async fn fetch_note(
        &self,
        address: &Address,
    ) -> Result<Option<Note>, RuntimeError<L::Error>> {
        let Some(account) = self.ledger.account(address).await? else {
            return Ok(None);
        };
        if account.owner != self.program_id {
            return Err(NoteError::InvalidAccountOwner.into());
        }
        Ok(Some(Note::decode(&account.data)?))
    }

    pub async fn note_state(
        &self,
        address: &Address,
    ) -> Result<NoteState, RuntimeError<L::Error>> {
        let live = self
            .ledger
            .account(address)
            .await?
            .is_some_and(|account| account.owner == self.program_id);
        Ok(if live { NoteState::Live } else { NoteState::Absent })
    }
}

fn unix_timestamp() -> i64 {
    time::OffsetDateTime::now_utc().unix_timestamp()
}
