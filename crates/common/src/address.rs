//! # Program Addresses
//!
//! Every account on the ledger lives at a 32 byte [`Address`]. Wallet
//! accounts live at the raw bytes of their owner's public key. Program owned
//! accounts live at a *program derived address*: a hash of caller supplied
//! seeds, a one byte bump and the owning program's id.
//!
//! A derived address is only valid when it is **not** a point on the Ed25519
//! curve. No secret key exists for an off-curve point, so nobody can sign for
//! a derived address; only the program named in the hash can act on it.
//!
//! ```text
//! candidate(bump) = sha256(seed_0 || .. || seed_n || [bump] || program_id || "ProgramDerivedAddress")
//! ```
//!
//! [`find_program_address`] walks the bumps upwards from zero and returns the
//! first off-curve candidate. The search is pure: anyone can recompute where a
//! record lives from its seeds without asking the ledger.

use std::fmt;
use std::str::FromStr;

use curve25519_dalek::edwards::CompressedEdwardsY;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::crypto::PublicKey;

/// Size of an address in bytes
pub const ADDRESS_SIZE: usize = 32;
/// Longest single seed accepted by address derivation
pub const MAX_SEED_LEN: usize = 32;
/// Most seeds accepted by address derivation (the bump is not counted)
pub const MAX_SEEDS: usize = 16;

const PDA_MARKER: &[u8] = b"ProgramDerivedAddress";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    #[error("seed of {0} bytes exceeds the 32 byte limit")]
    MaxSeedLengthExceeded(usize),
    #[error("{0} seeds exceed the limit of 16")]
    TooManySeeds(usize),
    #[error("seeds produce an address on the ed25519 curve")]
    InvalidSeeds,
    #[error("no bump yields an off-curve address")]
    NoViableBump,
    #[error("invalid address: {0}")]
    Parse(String),
}

/// A location on the ledger
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Address([u8; ADDRESS_SIZE]);

impl Address {
    pub const fn new(bytes: [u8; ADDRESS_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn to_bytes(&self) -> [u8; ADDRESS_SIZE] {
        self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse an address from hex, with or without a "0x" prefix
    pub fn from_hex(hex: &str) -> Result<Self, AddressError> {
        let hex = hex.strip_prefix("0x").unwrap_or(hex);
        let mut buff = [0; ADDRESS_SIZE];
        hex::decode_to_slice(hex, &mut buff).map_err(|e| AddressError::Parse(e.to_string()))?;
        Ok(Self(buff))
    }

    /// Whether these bytes decompress to a point on the Ed25519 curve
    pub fn is_on_curve(&self) -> bool {
        CompressedEdwardsY(self.0).decompress().is_some()
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; ADDRESS_SIZE]> for Address {
    fn from(bytes: [u8; ADDRESS_SIZE]) -> Self {
        Self(bytes)
    }
}

/// The wallet address of an identity
impl From<&PublicKey> for Address {
    fn from(key: &PublicKey) -> Self {
        Self(key.to_bytes())
    }
}

impl From<PublicKey> for Address {
    fn from(key: PublicKey) -> Self {
        Self(key.to_bytes())
    }
}

impl FromStr for Address {
    type Err = AddressError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_hex())
    }
}

/// Compute the program address for `seeds` and a known `bump`.
///
/// Fails with [`AddressError::InvalidSeeds`] if the result lands on the
/// curve, which means the bump is not a valid discriminant for these seeds.
pub fn create_program_address(
    seeds: &[&[u8]],
    bump: u8,
    program_id: &Address,
) -> Result<Address, AddressError> {
    if seeds.len() > MAX_SEEDS {
        return Err(AddressError::TooManySeeds(seeds.len()));
    }
    if let Some(seed) = seeds.iter().find(|seed| seed.len() > MAX_SEED_LEN) {
        return Err(AddressError::MaxSeedLengthExceeded(seed.len()));
    }

    let mut hasher = Sha256::new();
    for seed in seeds {
        hasher.update(seed);
    }
    hasher.update([bump]);
    hasher.update(program_id.as_ref());
    hasher.update(PDA_MARKER);
    let hash: [u8; ADDRESS_SIZE] = hasher.finalize().into();

    let address = Address(hash);
    if address.is_on_curve() {
        return Err(AddressError::InvalidSeeds);
    }
    Ok(address)
}

/// Find the smallest bump giving an off-curve address for `seeds`.
///
/// Returns `None` only if every one of the 256 bumps lands on the curve, or
/// if the seeds themselves break the length limits.
pub fn find_program_address(seeds: &[&[u8]], program_id: &Address) -> Option<(Address, u8)> {
    (0..=u8::MAX).find_map(|bump| {
        create_program_address(seeds, bump, program_id)
            .ok()
            .map(|address| (address, bump))
    })
}
