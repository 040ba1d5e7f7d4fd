use clap::Args;

use common::crypto::KeyError;
use common::prelude::{derive_note_address, PublicKey, NOTES_PROGRAM_ID};
use notes_cli::state::{AppState, StateError};

#[derive(Args, Debug, Clone)]
pub struct Address {
    /// Hex encoded identity to derive for (defaults to the local identity)
    #[arg(long)]
    pub owner: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum AddressError {
    #[error(transparent)]
    State(#[from] StateError),
    #[error("invalid owner: {0}")]
    InvalidOwner(#[from] KeyError),
    #[error("cannot derive note address: {0}")]
    Derive(#[from] common::address::AddressError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Address {
    type Error = AddressError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        // Deriving for an explicit owner needs no local state
        let owner = match &self.owner {
            Some(hex) => PublicKey::from_hex(hex)?,
            None => {
                let state = AppState::load(ctx.config_path.clone())?;
                state.load_key()?.public()
            }
        };

        let (address, bump) = derive_note_address(&NOTES_PROGRAM_ID, &owner)?;
        Ok(format!(
            "Owner: {}\nNote address: {}\nBump: {}",
            owner, address, bump
        ))
    }
}
