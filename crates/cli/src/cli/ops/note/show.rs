use clap::Args;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use common::crypto::KeyError;
use common::prelude::{AddressError, RuntimeError};

use crate::cli::op::SessionError;

#[derive(Args, Debug, Clone)]
pub struct Show {
    /// Hex encoded identity whose note to show (defaults to the local identity)
    #[arg(long)]
    pub owner: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ShowError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Runtime(#[from] RuntimeError<sqlx::Error>),
    #[error("invalid owner: {0}")]
    InvalidOwner(#[from] KeyError),
    #[error("cannot derive note address: {0}")]
    Address(#[from] AddressError),
}

fn timestamp(unix: i64) -> String {
    OffsetDateTime::from_unix_timestamp(unix)
        .ok()
        .and_then(|t| t.format(&Rfc3339).ok())
        .unwrap_or_else(|| unix.to_string())
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Show {
    type Error = ShowError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let session = ctx.session().await?;
        let owner = crate::cli::ops::owner_or(self.owner.as_deref(), session.key.public())?;
        let (note_address, _) = session.runtime.note_address(&owner)?;

        let Some(note) = session.runtime.fetch_note(&note_address).await? else {
            return Ok(format!("No note at {}", note_address));
        };

        Ok(format!(
            "Address: {}\n\
             Title: {}\n\
             Author: {}\n\
             Bump: {}\n\
             Created: {}\n\
             Updated: {}\n\
             \n\
             {}",
            note_address,
            note.title,
            note.author,
            note.bump,
            timestamp(note.created_at),
            timestamp(note.last_updated),
            String::from_utf8_lossy(&note.content)
        ))
    }
}
