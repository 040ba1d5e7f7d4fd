pub mod address;
pub mod airdrop;
pub mod balance;
pub mod init;
pub mod note;
pub mod version;

pub use address::Address;
pub use airdrop::Airdrop;
pub use balance::Balance;
pub use init::Init;
pub use note::Note;
pub use version::Version;

use common::crypto::KeyError;
use common::prelude::PublicKey;

/// Parse an `--owner` flag, falling back to `default` when absent
pub fn owner_or(owner: Option<&str>, default: PublicKey) -> Result<PublicKey, KeyError> {
    match owner {
        Some(hex) => PublicKey::from_hex(hex),
        None => Ok(default),
    }
}

/// Lamports as a whole token amount, for display
pub fn tokens(lamports: u64) -> String {
    format!(
        "{:.9}",
        lamports as f64 / common::ledger::LAMPORTS_PER_TOKEN as f64
    )
}
