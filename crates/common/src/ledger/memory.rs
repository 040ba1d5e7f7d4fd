use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::provider::{Account, AccountChange, Ledger, LedgerError};
use crate::address::Address;

/// In-memory ledger using a HashMap
#[derive(Debug, Clone)]
pub struct MemoryLedger {
    inner: Arc<RwLock<MemoryLedgerInner>>,
}

#[derive(Debug, Default)]
struct MemoryLedgerInner {
    accounts: HashMap<Address, Account>,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MemoryLedgerError {
    #[error("memory ledger error: {0}")]
    Internal(String),
}

type Staged = HashMap<Address, Option<Account>>;

impl MemoryLedger {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryLedgerInner::default())),
        }
    }

    /// Number of accounts currently stored
    pub fn len(&self) -> usize {
        self.inner
            .read()
            .map(|inner| inner.accounts.len())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

/// Read through the staged overlay to the committed accounts
fn current(
    accounts: &HashMap<Address, Account>,
    staged: &Staged,
    address: &Address,
) -> Option<Account> {
    match staged.get(address) {
        Some(entry) => entry.clone(),
        None => accounts.get(address).cloned(),
    }
}

fn credit(
    account: Option<Account>,
    address: Address,
    lamports: u64,
) -> Result<Account, LedgerError<MemoryLedgerError>> {
    let mut account = account.unwrap_or_else(|| Account::system(0));
    account.lamports = account
        .lamports
        .checked_add(lamports)
        .ok_or(LedgerError::BalanceOverflow(address))?;
    Ok(account)
}

/// Stage every change against an overlay; nothing touches the committed
///  map until the whole set has been validated
fn stage(
    accounts: &HashMap<Address, Account>,
    changes: Vec<AccountChange>,
) -> Result<Staged, LedgerError<MemoryLedgerError>> {
    let mut staged = Staged::new();

    for change in changes {
        match change {
            AccountChange::Credit { address, lamports } => {
                let account = credit(current(accounts, &staged, &address), address, lamports)?;
                staged.insert(address, Some(account));
            }
            AccountChange::Create {
                address,
                owner,
                lamports,
                data,
                payer,
            } => {
                if current(accounts, &staged, &address).is_some() {
                    return Err(LedgerError::AccountAlreadyExists(address));
                }

                let mut funder =
                    current(accounts, &staged, &payer).unwrap_or_else(|| Account::system(0));
                if funder.lamports < lamports {
                    return Err(LedgerError::InsufficientFunds {
                        address: payer,
                        required: lamports,
                        available: funder.lamports,
                    });
                }
                funder.lamports -= lamports;
                staged.insert(payer, Some(funder));

                staged.insert(
                    address,
                    Some(Account {
                        owner,
                        lamports,
                        data,
                    }),
                );
            }
            AccountChange::Write {
                address,
                expected,
                data,
            } => {
                let mut account = current(accounts, &staged, &address)
                    .ok_or(LedgerError::AccountNotFound(address))?;
                if account.data != expected {
                    return Err(LedgerError::AccountChanged(address));
                }
                account.data = data;
                staged.insert(address, Some(account));
            }
            AccountChange::Close {
                address,
                expected,
                beneficiary,
            } => {
                let closed = current(accounts, &staged, &address)
                    .ok_or(LedgerError::AccountNotFound(address))?;
                if closed.data != expected {
                    return Err(LedgerError::AccountChanged(address));
                }
                staged.insert(address, None);

                let account = credit(
                    current(accounts, &staged, &beneficiary),
                    beneficiary,
                    closed.lamports,
                )?;
                staged.insert(beneficiary, Some(account));
            }
        }
    }

    Ok(staged)
}

#[async_trait]
impl Ledger for MemoryLedger {
    type Error = MemoryLedgerError;

    async fn account(
        &self,
        address: &Address,
    ) -> Result<Option<Account>, LedgerError<Self::Error>> {
        let inner = self.inner.read().map_err(|e| {
            LedgerError::Provider(MemoryLedgerError::Internal(format!(
                "failed to acquire read lock: {}",
                e
            )))
        })?;

        Ok(inner.accounts.get(address).cloned())
    }

    async fn commit(&self, changes: Vec<AccountChange>) -> Result<(), LedgerError<Self::Error>> {
        let mut inner = self.inner.write().map_err(|e| {
            LedgerError::Provider(MemoryLedgerError::Internal(format!(
                "failed to acquire write lock: {}",
                e
            )))
        })?;

        let staged = stage(&inner.accounts, changes)?;

        for (address, entry) in staged {
            match entry {
                Some(account) => {
                    inner.accounts.insert(address, account);
                }
                None => {
                    inner.accounts.remove(&address);
                }
            }
        }

        Ok(())
    }
}
