//! Cryptographic primitives for the notes ledger
//!
//! - **Identity & Authentication**: Ed25519 keypairs identify note authors.
//!   A transaction is only attributed to an author after its signature has
//!   been verified against the author's [`PublicKey`].
//! - **Address hashing**: SHA-256 is used by [`crate::address`] to derive
//!   program addresses; it lives there rather than here.

mod keys;

pub use ed25519_dalek::Signature;
pub use keys::{KeyError, PublicKey, SecretKey, PRIVATE_KEY_SIZE, PUBLIC_KEY_SIZE};
