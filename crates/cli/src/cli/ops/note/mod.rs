use clap::{Args, Subcommand};

pub mod create;
pub mod delete;
pub mod show;
pub mod update;

use common::prelude::{AddressError, Message, RuntimeError};

use crate::cli::op::{Op, Session, SessionError};

crate::command_enum! {
    (Create, create::Create),
    (Update, update::Update),
    (Delete, delete::Delete),
    (Show, show::Show),
}

// Rename the generated Command to NoteCommand for clarity
pub type NoteCommand = Command;

#[derive(Args, Debug, Clone)]
pub struct Note {
    #[command(subcommand)]
    pub command: NoteCommand,
}

#[async_trait::async_trait]
impl Op for Note {
    type Error = OpError;
    type Output = OpOutput;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        self.command.execute(ctx).await
    }
}

/// Errors shared by the commands that submit a transaction
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Runtime(#[from] RuntimeError<sqlx::Error>),
    #[error("cannot derive note address: {0}")]
    Address(#[from] AddressError),
}

/// Sign `message` with the local identity and run it against the ledger
pub async fn submit(session: &Session, message: Message) -> Result<(), SubmitError> {
    let transaction = message
        .sign(&session.key)
        .map_err(|e| SubmitError::Runtime(e.into()))?;
    session.runtime.process_transaction(&transaction).await?;
    Ok(())
}
