use std::fmt::{Debug, Display};

use async_trait::async_trait;

use crate::address::Address;

/// Owner of plain wallet accounts
pub const SYSTEM_PROGRAM_ID: Address = Address::new([0u8; 32]);

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError<T> {
    /// The backend failed for reasons of its own
    #[error("unhandled ledger provider error: {0}")]
    Provider(#[from] T),
    /// A create targeted an address that already holds an account
    #[error("account already exists: {0}")]
    AccountAlreadyExists(Address),
    /// A write or close targeted an address holding no account
    #[error("account not found: {0}")]
    AccountNotFound(Address),
    /// A debit would take the balance below zero
    #[error("insufficient funds in {address}: required {required}, available {available}")]
    InsufficientFunds {
        address: Address,
        required: u64,
        available: u64,
    },
    /// A credit would overflow the balance
    #[error("balance overflow in {0}")]
    BalanceOverflow(Address),
    /// The account no longer holds the data the change was computed from
    #[error("account changed since it was read: {0}")]
    AccountChanged(Address),
}

/// An account as stored on the ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// The program allowed to modify `data`
    pub owner: Address,
    /// Balance held by the account
    pub lamports: u64,
    /// Raw account storage
    pub data: Vec<u8>,
}

impl Account {
    /// An empty wallet owned by the system program
    pub fn system(lamports: u64) -> Self {
        Self {
            owner: SYSTEM_PROGRAM_ID,
            lamports,
            data: Vec::new(),
        }
    }
}

/// One step of an atomic change set.
///
/// Changes are applied in order, and each sees the effects of the ones
/// before it. If any step fails the whole set is discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountChange {
    /// Add lamports to an account, opening a system wallet if needed
    Credit { address: Address, lamports: u64 },
    /// Allocate a new account funded by `payer`
    Create {
        address: Address,
        owner: Address,
        lamports: u64,
        data: Vec<u8>,
        payer: Address,
    },
    /// Replace the data of an existing account, provided it still holds
    ///  `expected`
    Write {
        address: Address,
        expected: Vec<u8>,
        data: Vec<u8>,
    },
    /// Remove an account holding `expected` and hand its lamports to
    ///  `beneficiary`
    Close {
        address: Address,
        expected: Vec<u8>,
        beneficiary: Address,
    },
}

#[async_trait]
pub trait Ledger: Send + Sync + std::fmt::Debug + Clone + 'static {
    type Error: std::error::Error + Display + Debug + Send + Sync + 'static;

    /// Load the account stored at `address`
    ///
    /// # Returns
    /// * `Ok(Some(Account))` - The account exists
    /// * `Ok(None)` - Nothing is stored at the address
    async fn account(
        &self,
        address: &Address,
    ) -> Result<Option<Account>, LedgerError<Self::Error>>;

    /// Apply an ordered change set atomically
    ///
    /// Should fail with the following errors to be considered
    ///  correct, leaving every account untouched:
    /// * `Err(LedgerError::AccountAlreadyExists)` - A create hit an existing account
    /// * `Err(LedgerError::AccountNotFound)` - A write or close hit an empty address
    /// * `Err(LedgerError::AccountChanged)` - A write or close found other data than expected
    /// * `Err(LedgerError::InsufficientFunds)` - A payer could not cover a create
    async fn commit(&self, changes: Vec<AccountChange>) -> Result<(), LedgerError<Self::Error>>;

    /// Whether an account is stored at `address`
    async fn exists(&self, address: &Address) -> Result<bool, LedgerError<Self::Error>> {
        Ok(self.account(address).await?.is_some())
    }

    /// Lamports held at `address`, zero when no account exists
    async fn balance(&self, address: &Address) -> Result<u64, LedgerError<Self::Error>> {
        Ok(self
            .account(address)
            .await?
            .map(|account| account.lamports)
            .unwrap_or(0))
    }
}
