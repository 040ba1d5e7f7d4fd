//! Account storage for the local runtime
//!
//! The runtime never touches storage directly; it reads accounts through a
//! [`Ledger`] and hands back an ordered list of [`AccountChange`]s to commit.
//! A backend must apply a change set atomically: every change or none.
//!
//! - [`MemoryLedger`]: a map behind a lock, used by tests
//! - the CLI's SQLite database: one SQL transaction per commit

mod memory;
mod provider;
mod rent;

pub use memory::{MemoryLedger, MemoryLedgerError};
pub use provider::{Account, AccountChange, Ledger, LedgerError, SYSTEM_PROGRAM_ID};
pub use rent::{Rent, ACCOUNT_STORAGE_OVERHEAD, LAMPORTS_PER_TOKEN};
