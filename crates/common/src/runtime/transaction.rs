use bincode::Options;
use ed25519_dalek::Signature;
use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::crypto::{PublicKey, SecretKey};
use crate::program::NoteInstruction;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransactionError {
    #[error("message signer does not match the signing key")]
    SignerMismatch,
    #[error("transaction targets program {found}, expected {expected}")]
    ProgramMismatch { expected: Address, found: Address },
    #[error("invalid transaction signature")]
    InvalidSignature,
    #[error("failed to encode message: {0}")]
    Encoding(String),
}

/// The signed part of a transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub program_id: Address,
    /// Identity authorizing the instruction; also pays for new accounts
    pub signer: PublicKey,
    /// Note slot the instruction acts on
    pub note: Address,
    pub instruction: NoteInstruction,
}

impl Message {
    /// Canonical bytes covered by the signature
    pub fn encode(&self) -> Result<Vec<u8>, TransactionError> {
        bincode::DefaultOptions::new()
            .with_fixint_encoding()
            .with_little_endian()
            .serialize(self)
            .map_err(|e| TransactionError::Encoding(e.to_string()))
    }

    /// Sign with `secret_key`, which must belong to `self.signer`
    pub fn sign(self, secret_key: &SecretKey) -> Result<Transaction, TransactionError> {
        Transaction::new(self, secret_key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub message: Message,
    pub signature: Signature,
}

impl Transaction {
    pub fn new(message: Message, secret_key: &SecretKey) -> Result<Self, TransactionError> {
        if secret_key.public() != message.signer {
            return Err(TransactionError::SignerMismatch);
        }
        let signature = secret_key.sign(&message.encode()?);
        Ok(Self { message, signature })
    }

    /// Check the signature and hand back proof of who signed.
    ///
    /// This is the only way to obtain a [`Signer`].
    pub fn verify(&self) -> Result<Signer, TransactionError> {
        let bytes = self.message.encode()?;
        self.message
            .signer
            .verify(&bytes, &self.signature)
            .map_err(|_| TransactionError::InvalidSignature)?;
        Ok(Signer(self.message.signer))
    }
}

/// An identity whose signature has been checked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signer(PublicKey);

impl Signer {
    /// Unverified signer for driving the program directly in unit tests
    #[cfg(test)]
    pub(crate) fn new(key: PublicKey) -> Self {
        Self(key)
    }

    pub fn key(&self) -> &PublicKey {
        &self.0
    }

    /// The signer's wallet, which pays for and is refunded by notes
    pub fn wallet(&self) -> Address {
        Address::from(&self.0)
    }
}
