/**
 * Deterministic program addresses.
 *  - Off-curve address derivation from seeds + bump
 *  - Wallet addresses for identities
 */
pub mod address;
/**
 * Cryptographic types and operations.
 *  - Ed25519 public and secret keys
 *  - Signing and strict verification
 */
pub mod crypto;
/**
 * Account storage the runtime executes against.
 * Backends implement the [`ledger::Ledger`] trait;
 *  an in-memory one lives here, the CLI brings
 *  a SQLite one.
 */
pub mod ledger;
/**
 * The note program: record layout, validation,
 *  and the create / update / delete transitions.
 */
pub mod program;
/**
 * Local host runtime. Verifies signed transactions,
 *  serializes access per address and commits the
 *  program's account changes atomically.
 */
pub mod runtime;
/**
 * Helpers for exercising a runtime from tests.
 */
pub mod testkit;
/**
 * Helper for setting build version information
 *  at compile time.
 */
pub mod version;

pub mod prelude {
    pub use crate::address::{find_program_address, Address, AddressError};
    pub use crate::crypto::{PublicKey, SecretKey};
    pub use crate::ledger::{Account, AccountChange, Ledger, LedgerError, MemoryLedger, Rent};
    pub use crate::program::{
        derive_note_address, Note, NoteError, NoteInstruction, NOTES_PROGRAM_ID,
    };
    pub use crate::runtime::{Message, NoteState, Runtime, RuntimeError, Transaction};
    pub use crate::version::build_info;
}
